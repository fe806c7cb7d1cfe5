//! YAML parser that builds ResourceParse trees.

use crate::model::{
    ArrayValue, BooleanValue, MapEntry, MapValue, MissingValue, NumberValue, ResourceParse,
    StringValue, Value,
};
use crate::scalar::{self, Typed};
use crate::{Error, Range, Result};
use indexmap::IndexMap;
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser, Tag};
use yaml_rust2::scanner::{Marker, TScalarStyle};
use yamlnav_source_map::SourceText;

/// Parse a YAML stream into one [`ResourceParse`] per document.
///
/// Documents whose root is not a mapping produce an empty resource spanning
/// the root node. A leading byte order mark is skipped, but ranges still
/// count it so they index the text as given.
///
/// # Example
///
/// ```rust
/// use yamlnav_parse::parse_yaml;
///
/// let docs = parse_yaml("hello: world\n---\nhello-again: another-world").unwrap();
/// assert_eq!(docs.len(), 2);
/// assert!(docs[1].get("hello-again").is_some());
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] if the text is not valid YAML.
pub fn parse_yaml(content: &str) -> Result<Vec<ResourceParse>> {
    let (body, base) = match content.strip_prefix('\u{feff}') {
        Some(rest) => (rest, 1),
        None => (content, 0),
    };
    let mut parser = Parser::new_from_str(body);
    let mut builder = ResourceBuilder::new(content, base);

    parser
        .load(&mut builder, true)
        .map_err(|err| Error::from(err).shifted(base))?;

    let documents = builder.finish()?;
    tracing::debug!(documents = documents.len(), "parsed YAML stream");
    Ok(documents)
}

/// Builder that implements MarkedEventReceiver to construct resource trees.
struct ResourceBuilder<'a> {
    source: SourceText<'a>,

    /// Characters skipped before the text handed to the event parser
    base: usize,

    /// Stack of collections being constructed
    stack: Vec<BuildNode>,

    /// Root of the document currently being parsed
    root: Option<Value>,

    documents: Vec<ResourceParse>,

    /// Structural problem detected mid-stream; reported once loading ends
    failure: Option<Error>,
}

/// A collection being constructed during parsing.
enum BuildNode {
    Sequence {
        start: usize,
        flow: bool,
        items: Vec<Value>,
    },

    Mapping {
        start: usize,
        flow: bool,
        entries: IndexMap<String, MapEntry>,
        /// Key waiting for its value
        pending_key: Option<(String, Range)>,
    },
}

impl<'a> ResourceBuilder<'a> {
    fn new(source: &'a str, base: usize) -> Self {
        Self {
            source: SourceText::new(source),
            base,
            stack: Vec::new(),
            root: None,
            documents: Vec::new(),
            failure: None,
        }
    }

    fn finish(self) -> Result<Vec<ResourceParse>> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.documents),
        }
    }

    /// Offset of a parser marker in the original text.
    fn offset(&self, marker: &Marker) -> usize {
        self.base + marker.index()
    }

    fn fail(&mut self, message: &str, offset: usize) {
        if self.failure.is_none() {
            self.failure = Some(Error::Syntax {
                message: message.to_string(),
                location: Some(Range::empty_at(offset)),
            });
        }
    }

    fn end_document(&mut self) {
        let resource = match self.root.take() {
            Some(Value::Map(map)) => ResourceParse::new(map.entries, map.range),
            Some(other) => ResourceParse::empty(other.range()),
            None => ResourceParse::empty(Range::empty_at(0)),
        };
        self.documents.push(resource);
    }

    /// Attach a finished node to the collection on top of the stack, or
    /// make it the document root.
    fn push_complete(&mut self, node: Value) {
        let Some(parent) = self.stack.last_mut() else {
            self.root = Some(node);
            return;
        };

        match parent {
            BuildNode::Sequence { items, .. } => items.push(node),
            BuildNode::Mapping {
                entries,
                pending_key,
                ..
            } => match pending_key.take() {
                None => {
                    let key = key_text(&node, &self.source);
                    *pending_key = Some((key, node.range()));
                }
                Some((key, key_range)) => {
                    let value = match node {
                        // An empty value takes the span of its key
                        Value::Missing(_) => Value::Missing(MissingValue { range: key_range }),
                        other => other,
                    };
                    if entries.contains_key(&key) {
                        tracing::warn!(key = %key, offset = key_range.start, "duplicate mapping key");
                    }
                    entries.insert(key, MapEntry { key_range, value });
                }
            },
        }
    }

    fn scalar_node(
        &self,
        value: String,
        style: TScalarStyle,
        tag: Option<&Tag>,
        marker: &Marker,
    ) -> Value {
        let at = self.offset(marker);

        // The parser reports an empty node as an empty plain scalar positioned
        // at the next token. Plain scalars written in the source are never
        // empty.
        if style == TScalarStyle::Plain && value.is_empty() {
            let at = self.sequence_item_floor().unwrap_or(at);
            return Value::Missing(MissingValue {
                range: Range::empty_at(at),
            });
        }

        let range = scalar::scalar_range(&self.source, at, style, &value);
        let raw_text = self.source.slice(range).unwrap_or_default().to_string();

        match scalar::resolve(&value, style, tag) {
            Typed::String(value) => Value::String(StringValue {
                value,
                raw_text,
                range,
            }),
            Typed::Number(value) => Value::Number(NumberValue {
                value,
                raw_text,
                range,
            }),
            Typed::Boolean(value) => Value::Boolean(BooleanValue {
                value,
                raw_text,
                range,
            }),
        }
    }

    /// For an empty sequence item, the end of the previous item (or the
    /// start of the sequence), so the item stays inside its parent.
    fn sequence_item_floor(&self) -> Option<usize> {
        match self.stack.last()? {
            BuildNode::Sequence { start, items, .. } => Some(
                items
                    .last()
                    .map(|item| item.range().end)
                    .unwrap_or(*start),
            ),
            BuildNode::Mapping { .. } => None,
        }
    }

    fn alias_node(&self, marker: &Marker) -> Value {
        let start = self.offset(marker);
        let len = self
            .source
            .chars_from(start)
            .iter()
            .take_while(|c| !c.is_whitespace() && !matches!(c, ',' | ']' | '}'))
            .count();
        let range = Range::new(start, start + len);
        let text = self.source.slice(range).unwrap_or_default().to_string();
        Value::String(StringValue {
            value: text.clone(),
            raw_text: text,
            range,
        })
    }

    /// End of a collection: the closing bracket for flow style, otherwise
    /// the end of its last child.
    fn collection_end(&self, start: usize, flow: bool, marker: &Marker, last: Option<Range>) -> usize {
        if flow {
            return (self.offset(marker) + 1).min(self.source.char_len());
        }
        last.map(|r| r.end).unwrap_or(start).max(start)
    }

    /// Offset of the `-` indicator that `at` follows on the same line, if
    /// only blanks separate them.
    fn entry_indicator_before(&self, at: usize) -> Option<usize> {
        let mut pos = at;
        while pos > 0 && matches!(self.source.char_at(pos - 1), Some(' ' | '\t')) {
            pos -= 1;
        }
        (pos > 0 && self.source.char_at(pos - 1) == Some('-')).then(|| pos - 1)
    }

    /// Start offset and flow flag for a sequence reported at `at`.
    ///
    /// A block sequence is reported either at its first `-` or, when it is
    /// a mapping value at the same indentation as its key, at the content
    /// of its first item. That content can itself open a sequence at the
    /// same offset; the enclosing one is the sequence that opens directly
    /// under a pending mapping key.
    fn sequence_start(&self, at: usize) -> (usize, bool) {
        let under_key = matches!(
            self.stack.last(),
            Some(BuildNode::Mapping {
                pending_key: Some(_),
                ..
            })
        );
        if under_key {
            if let Some(dash) = self.entry_indicator_before(at) {
                return (dash, false);
            }
        }

        let next_is_blank = matches!(
            self.source.char_at(at + 1),
            None | Some(' ' | '\t' | '\r' | '\n')
        );
        match self.source.char_at(at) {
            Some('-') if next_is_blank => (at, false),
            Some('[') => (at, true),
            _ => (self.entry_indicator_before(at).unwrap_or(at), false),
        }
    }
}

impl<'a> MarkedEventReceiver for ResourceBuilder<'a> {
    fn on_event(&mut self, ev: Event, marker: Marker) {
        match ev {
            Event::Nothing => {}

            Event::StreamStart => {}
            Event::StreamEnd => {}
            Event::DocumentStart => {
                self.root = None;
            }
            Event::DocumentEnd => self.end_document(),

            Event::Scalar(value, style, _anchor_id, tag) => {
                let node = self.scalar_node(value, style, tag.as_ref(), &marker);
                self.push_complete(node);
            }

            Event::Alias(_anchor_id) => {
                // Aliases are not resolved; they are kept as their own token
                let node = self.alias_node(&marker);
                self.push_complete(node);
            }

            Event::SequenceStart(_anchor_id, _tag) => {
                let (start, flow) = self.sequence_start(self.offset(&marker));
                self.stack.push(BuildNode::Sequence {
                    start,
                    flow,
                    items: Vec::new(),
                });
            }

            Event::SequenceEnd => match self.stack.pop() {
                Some(BuildNode::Sequence { start, flow, items }) => {
                    let last = items.last().map(Value::range);
                    let end = self.collection_end(start, flow, &marker, last);
                    self.push_complete(Value::Array(ArrayValue {
                        items,
                        range: Range::new(start, end),
                    }));
                }
                _ => self.fail("sequence end without matching start", self.offset(&marker)),
            },

            Event::MappingStart(_anchor_id, _tag) => {
                // Block mappings are reported at the first ':', so their
                // start is settled by the first key once it is known
                let start = self.offset(&marker);
                let flow = self.source.char_at(start) == Some('{');
                self.stack.push(BuildNode::Mapping {
                    start,
                    flow,
                    entries: IndexMap::new(),
                    pending_key: None,
                });
            }

            Event::MappingEnd => match self.stack.pop() {
                Some(BuildNode::Mapping {
                    start,
                    flow,
                    entries,
                    pending_key,
                }) => {
                    if let Some((key, _)) = pending_key {
                        self.fail(&format!("mapping key '{}' without value", key), self.offset(&marker));
                    }
                    let start = entries
                        .values()
                        .next()
                        .map_or(start, |first| first.key_range.start.min(start));
                    let last = entries.values().map(|e| e.value.range().cover(&e.key_range)).last();
                    let end = self.collection_end(start, flow, &marker, last);
                    self.push_complete(Value::Map(MapValue {
                        entries,
                        range: Range::new(start, end),
                    }));
                }
                _ => self.fail("mapping end without matching start", self.offset(&marker)),
            },
        }
    }
}

/// The lookup key for a mapping key node: the scalar value for strings,
/// otherwise the literal source text.
fn key_text(node: &Value, source: &SourceText<'_>) -> String {
    match node {
        Value::String(s) => s.value.clone(),
        Value::Number(n) => n.raw_text.clone(),
        Value::Boolean(b) => b.raw_text.clone(),
        other => source.slice(other.range()).unwrap_or_default().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ValueType;

    fn first(text: &str) -> ResourceParse {
        parse_yaml(text).unwrap().remove(0)
    }

    #[test]
    fn test_parse_top_level_ranges() {
        let doc = first("apiVersion: apps/v1\nkind: Namespace");
        let api = doc.get("apiVersion").unwrap();
        assert_eq!(api.key_range, Range::new(0, 10));
        assert_eq!(api.value.range(), Range::new(12, 19));
        assert_eq!(api.value.as_str(), Some("apps/v1"));

        let kind = doc.get("kind").unwrap();
        assert_eq!(kind.key_range, Range::new(20, 24));
        assert_eq!(kind.value.range(), Range::new(26, 35));
        assert_eq!(doc.range(), Range::new(0, 35));
    }

    #[test]
    fn test_parse_scalar_types() {
        let doc = first("s: foo\nn: 123\nf: 4.5\nb: true\nq: \"123\"");
        assert_eq!(doc.get("s").unwrap().value.value_type(), ValueType::String);
        assert_eq!(doc.get("n").unwrap().value.as_f64(), Some(123.0));
        assert_eq!(doc.get("f").unwrap().value.as_f64(), Some(4.5));
        assert_eq!(doc.get("b").unwrap().value.as_bool(), Some(true));

        let quoted = &doc.get("q").unwrap().value;
        assert_eq!(quoted.as_str(), Some("123"));
        assert_eq!(quoted.raw_text(), Some("\"123\""));
    }

    #[test]
    fn test_parse_sequence() {
        let doc = first("keywords:\n- foo\n- 123\n- true");
        let keywords = doc.get("keywords").unwrap().value.as_array().unwrap();
        assert_eq!(keywords.len(), 3);
        assert_eq!(keywords.range, Range::new(10, 28));
        assert_eq!(keywords.items[0].range(), Range::new(12, 15));
        assert_eq!(keywords.items[1].value_type(), ValueType::Number);
        assert_eq!(keywords.items[2].value_type(), ValueType::Boolean);
    }

    #[test]
    fn test_nested_map_ranges() {
        let text = "map1:\n  map11:\n    foo: 123\n    bar: 456\nmap2: x";
        let doc = first(text);
        let map1 = doc.get("map1").unwrap();
        assert_eq!(map1.key_range, Range::new(0, 4));

        let map11 = map1.value.as_map().unwrap().get("map11").unwrap();
        assert_eq!(map11.key_range, Range::new(8, 13));
        // Block collections end at their last child, not at the next key
        assert_eq!(map11.value.range(), Range::new(19, 40));
        assert_eq!(map1.value.range(), Range::new(8, 40));
    }

    #[test]
    fn test_flow_collections() {
        let doc = first("ports: [80, 443]\nlabels: {a: b}");
        let ports = &doc.get("ports").unwrap().value;
        assert_eq!(ports.range(), Range::new(7, 16));
        assert_eq!(ports.as_array().unwrap().len(), 2);

        let labels = &doc.get("labels").unwrap().value;
        assert_eq!(labels.range(), Range::new(25, 31));
    }

    #[test]
    fn test_keys_without_values_are_missing() {
        let doc = first("naughty:\nnice:\n  test: 123");
        let naughty = doc.get("naughty").unwrap();
        assert!(naughty.value.is_missing());
        assert_eq!(naughty.value.range(), naughty.key_range);
        assert_eq!(naughty.key_range, Range::new(0, 7));
        assert!(doc.get("nice").unwrap().value.as_map().is_some());
    }

    #[test]
    fn test_trailing_key_without_value() {
        let doc = first("resources:\n  limits:\n");
        let resources = doc.get("resources").unwrap().value.as_map().unwrap();
        let limits = resources.get("limits").unwrap();
        assert!(limits.value.is_missing());
        assert_eq!(limits.key_range, Range::new(13, 19));
    }

    #[test]
    fn test_flow_mapping_value_left_empty() {
        let doc = first("m: {x: , y: 1}");
        let m = doc.get("m").unwrap().value.as_map().unwrap();
        assert_eq!(m.range, Range::new(3, 14));
        let x = m.get("x").unwrap();
        assert!(x.value.is_missing());
        assert_eq!(x.key_range, Range::new(4, 5));
        assert_eq!(x.value.range(), x.key_range);
        assert_eq!(m.get("y").unwrap().value.as_f64(), Some(1.0));
    }

    #[test]
    fn test_empty_sequence_item_is_missing() {
        let doc = first("list:\n-\n- b");
        let list = doc.get("list").unwrap().value.as_array().unwrap();
        assert_eq!(list.range, Range::new(6, 11));
        assert!(list.items[0].is_missing());
        assert!(list.range.contains(&list.items[0].range()));
        assert_eq!(list.items[1].as_str(), Some("b"));
    }

    #[test]
    fn test_sequence_starts_at_first_indicator() {
        let doc = first("key:\n- [1, 2]\n- x");
        let key = doc.get("key").unwrap().value.as_array().unwrap();
        assert_eq!(key.range, Range::new(5, 17));
        assert_eq!(key.items[0].range(), Range::new(7, 13));
        assert_eq!(key.items[0].as_array().unwrap().len(), 2);

        let doc = first("key:\n- - a\n  - b");
        let outer = doc.get("key").unwrap().value.as_array().unwrap();
        assert_eq!(outer.range, Range::new(5, 16));
        let inner = outer.items[0].as_array().unwrap();
        assert_eq!(inner.range, Range::new(7, 16));
        assert_eq!(inner.items[1].range(), Range::new(15, 16));
    }

    #[test]
    fn test_byte_order_mark_is_skipped() {
        let text = "\u{feff}a: 1\nb: two";
        let doc = first(text);
        let a = doc.get("a").unwrap();
        assert_eq!(a.key_range, Range::new(1, 2));
        assert_eq!(a.value.range(), Range::new(4, 5));
        assert_eq!(doc.range(), Range::new(1, 12));

        let source = SourceText::new(text);
        let b = &doc.get("b").unwrap().value;
        assert_eq!(source.slice(b.range()), b.raw_text());
    }

    #[test]
    fn test_core_tags_override_plain_typing() {
        let doc = first("a: !!str 123\nb: !!int \"7\"\nc: !!str true");
        let a = &doc.get("a").unwrap().value;
        assert_eq!(a.as_str(), Some("123"));
        assert_eq!(a.raw_text(), Some("123"));
        assert_eq!(doc.get("b").unwrap().value.as_f64(), Some(7.0));
        assert_eq!(doc.get("c").unwrap().value.as_str(), Some("true"));
    }

    #[test]
    fn test_explicit_null_is_kept_as_text() {
        let doc = first("a: ~\nb: null");
        assert_eq!(doc.get("a").unwrap().value.raw_text(), Some("~"));
        assert_eq!(doc.get("b").unwrap().value.as_str(), Some("null"));
    }

    #[test]
    fn test_multiple_documents() {
        let docs = parse_yaml("hello: world\n---\nhello-again: another-world").unwrap();
        assert_eq!(docs.len(), 2);
        assert!(docs[0].get("hello").is_some());
        assert!(docs[1].get("hello-again").is_some());
    }

    #[test]
    fn test_non_map_root_is_empty() {
        let docs = parse_yaml("- a\n- b").unwrap();
        assert_eq!(docs.len(), 1);
        assert!(docs[0].entries().is_empty());
        assert_eq!(docs[0].range(), Range::new(0, 7));
    }

    #[test]
    fn test_multiline_scalar_raw_text() {
        let text = "description: |\n  first\n  second\nname: x";
        let doc = first(text);
        let desc = &doc.get("description").unwrap().value;
        assert_eq!(desc.as_str(), Some("first\nsecond\n"));
        assert_eq!(desc.raw_text(), Some("|\n  first\n  second"));
    }

    #[test]
    fn test_syntax_error_has_location() {
        let err = parse_yaml("a: [1, 2\nb: c").unwrap_err();
        assert!(matches!(err, Error::Syntax { .. }));
        assert!(err.location().is_some());
    }
}
