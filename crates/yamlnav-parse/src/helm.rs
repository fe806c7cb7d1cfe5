//! Templated YAML (Helm charts).
//!
//! Go template expressions are not valid YAML, so each `{{ ... }}` is
//! replaced by a marker string of exactly the same length before parsing.
//! Because positions are unchanged, every string node can then be restored
//! from the original text at its range.

use crate::model::{MapValue, ResourceParse, Value};
use crate::{parse_yaml, Result};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use yamlnav_source_map::SourceText;

static TEMPLATE_EXPR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[^}]*\}\}").unwrap());

/// Replacements for `{{`, `}}` and `"` inside an expression. Each must have
/// the same character length as the text it replaces.
const TEMPLATE_START: &str = "AA";
const TEMPLATE_END: &str = "ZZ";
const TEMPLATE_QUOTE: &str = "Q";

/// Parse a YAML stream containing template expressions.
///
/// Ranges refer to the original text. String values that overlapped a
/// template expression hold the original source text of their range as
/// both `value` and `raw_text`.
///
/// # Example
///
/// ```rust
/// use yamlnav_parse::parse_helm_template;
///
/// let docs = parse_helm_template("name: {{ .Values.name }}\n").unwrap();
/// let name = &docs[0].get("name").unwrap().value;
/// assert_eq!(name.as_str(), Some("{{ .Values.name }}"));
/// ```
pub fn parse_helm_template(content: &str) -> Result<Vec<ResourceParse>> {
    let encoded = encode_template_markers(content);
    let source = SourceText::new(content);

    let documents = parse_yaml(&encoded)?
        .into_iter()
        .map(|doc| restore_document(doc, &source))
        .collect();

    Ok(documents)
}

fn encode_template_markers(content: &str) -> String {
    TEMPLATE_EXPR
        .replace_all(content, |caps: &Captures<'_>| {
            caps[0]
                .replace("{{", TEMPLATE_START)
                .replace("}}", TEMPLATE_END)
                .replace('"', TEMPLATE_QUOTE)
        })
        .into_owned()
}

fn restore_document(doc: ResourceParse, source: &SourceText<'_>) -> ResourceParse {
    let mut map = doc.into_map();
    restore_map(&mut map, source);
    ResourceParse::new(map.entries, map.range)
}

fn restore_map(map: &mut MapValue, source: &SourceText<'_>) {
    for entry in map.entries.values_mut() {
        restore_value(&mut entry.value, source);
    }
}

fn restore_value(value: &mut Value, source: &SourceText<'_>) {
    match value {
        Value::String(s) => {
            if let Some(original) = source.slice(s.range) {
                s.value = original.to_string();
                s.raw_text = original.to_string();
            }
        }
        Value::Array(array) => {
            for item in array.items.iter_mut() {
                restore_value(item, source);
            }
        }
        Value::Map(map) => restore_map(map, source),
        Value::Number(_) | Value::Boolean(_) | Value::Missing(_) => {}
    }
}
