//! JSON front end.
//!
//! JSON is checked with serde_json first so that syntax errors carry JSON
//! line and column information, then parsed through the YAML grammar, which
//! accepts JSON and reports character positions for every node.

use crate::model::ResourceParse;
use crate::{parse_yaml, Error, Result};

/// Parse a JSON document into a single [`ResourceParse`].
///
/// Keys keep the span of their quoted token, and `raw_text` of a string
/// value includes its quotes.
///
/// # Errors
///
/// Returns [`Error::Json`] if the text is not valid JSON.
pub fn parse_json(content: &str) -> Result<ResourceParse> {
    serde_json::from_str::<serde_json::Value>(content)?;

    let mut documents = parse_yaml(content)?;
    if documents.len() != 1 {
        return Err(Error::DocumentCount {
            expected: 1,
            found: documents.len(),
        });
    }

    Ok(documents.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;
    use crate::Range;

    const TOP_LEVEL: &str = "{ \"apiVersion\": \"apps/v1\",\n\"kind\": \"Namespace\" }";

    #[test]
    fn test_single_resource() {
        let doc = parse_json(r#"{ "hello": "world" }"#).unwrap();
        assert_eq!(doc.entries().len(), 1);
        assert_eq!(doc.get("hello").unwrap().value.as_str(), Some("world"));
    }

    #[test]
    fn test_key_and_value_ranges() {
        let doc = parse_json(TOP_LEVEL).unwrap();

        let api = doc.get("apiVersion").unwrap();
        assert_eq!(api.key_range, Range::new(2, 14));
        assert_eq!(api.value.range(), Range::new(16, 25));
        assert_eq!(api.value.as_str(), Some("apps/v1"));

        let kind = doc.get("kind").unwrap();
        assert_eq!(kind.key_range, Range::new(27, 33));
        assert_eq!(kind.value.range(), Range::new(35, 46));
        assert_eq!(doc.range(), Range::new(0, 48));
    }

    #[test]
    fn test_scalar_types() {
        let doc = parse_json("{ \"stringy\": \"foo\",\n\"inty\": 123,\n\"floaty\": 4.5,\n\"booly\": true }")
            .unwrap();
        assert_eq!(doc.get("stringy").unwrap().value.raw_text(), Some("\"foo\""));
        assert_eq!(doc.get("inty").unwrap().value.as_f64(), Some(123.0));
        assert_eq!(doc.get("inty").unwrap().value.raw_text(), Some("123"));
        assert_eq!(doc.get("floaty").unwrap().value.as_f64(), Some(4.5));
        assert_eq!(doc.get("booly").unwrap().value.as_bool(), Some(true));
    }

    #[test]
    fn test_nested_maps() {
        let text = "{ \"metadata\": {\n  \"name\": \"foo\",\n  \"labels\": {\n    \"hello\": \"world\"\n  }\n} }";
        let doc = parse_json(text).unwrap();
        let metadata = doc.get("metadata").unwrap().value.as_map().unwrap();
        assert_eq!(metadata.len(), 2);
        let labels = &metadata.get("labels").unwrap().value;
        assert_eq!(labels.value_type(), ValueType::Map);
        assert_eq!(
            labels.as_map().unwrap().get("hello").unwrap().value.as_str(),
            Some("world")
        );
    }

    #[test]
    fn test_invalid_json_reports_position() {
        let err = parse_json("{ \"a\": 1,\n  \"b\" }").unwrap_err();
        match err {
            Error::Json { line, .. } => assert_eq!(line, 2),
            other => panic!("expected a JSON error, got {:?}", other),
        }
    }
}
