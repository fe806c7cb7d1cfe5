//! Position-preserving value tree.

use crate::Range;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

/// A parsed value with its source range.
///
/// The tree is immutable once built: every node is owned by the
/// [`ResourceParse`] it was parsed into, and every array and map range
/// contains the ranges of all of its descendants.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "valueType", rename_all = "lowercase")]
pub enum Value {
    String(StringValue),
    Number(NumberValue),
    Boolean(BooleanValue),
    Array(ArrayValue),
    Map(MapValue),
    Missing(MissingValue),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringValue {
    pub value: String,
    pub raw_text: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberValue {
    pub value: f64,
    pub raw_text: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanValue {
    pub value: bool,
    pub raw_text: String,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArrayValue {
    pub items: Vec<Value>,
    pub range: Range,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapValue {
    pub entries: IndexMap<String, MapEntry>,
    pub range: Range,
}

/// A key declared with no value, such as `naughty:` followed by a sibling
/// key. The range is the span of the key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingValue {
    pub range: Range,
}

/// One entry of a map. The key string lives in the owning map;
/// `key_range` is the span of the key token.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapEntry {
    pub key_range: Range,
    pub value: Value,
}

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Map,
    Missing,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Array => "array",
            ValueType::Map => "map",
            ValueType::Missing => "missing",
        }
    }

    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            ValueType::String | ValueType::Number | ValueType::Boolean
        )
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, ValueType::Array | ValueType::Map)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Number(_) => ValueType::Number,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Array(_) => ValueType::Array,
            Value::Map(_) => ValueType::Map,
            Value::Missing(_) => ValueType::Missing,
        }
    }

    pub fn range(&self) -> Range {
        match self {
            Value::String(v) => v.range,
            Value::Number(v) => v.range,
            Value::Boolean(v) => v.range,
            Value::Array(v) => v.range,
            Value::Map(v) => v.range,
            Value::Missing(v) => v.range,
        }
    }

    /// The literal source text of a scalar, or None for collections and
    /// missing values.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(&v.raw_text),
            Value::Number(v) => Some(&v.raw_text),
            Value::Boolean(v) => Some(&v.raw_text),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Value::Missing(_))
    }

    pub fn as_map(&self) -> Option<&MapValue> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayValue> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&s.value),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.value),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(b.value),
            _ => None,
        }
    }
}

impl MapValue {
    pub fn get(&self, key: &str) -> Option<&MapEntry> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MapEntry)> {
        self.entries.iter().map(|(k, e)| (k.as_str(), e))
    }
}

impl ArrayValue {
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.items.get(index)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The root of one parsed document.
///
/// The root is stored as a [`Value::Map`] so that walkers and traversal
/// entries can treat it like any other node.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ResourceParse {
    root: Value,
}

impl ResourceParse {
    pub fn new(entries: IndexMap<String, MapEntry>, range: Range) -> Self {
        ResourceParse {
            root: Value::Map(MapValue { entries, range }),
        }
    }

    /// An empty document spanning `range` (used for non-map roots).
    pub fn empty(range: Range) -> Self {
        Self::new(IndexMap::new(), range)
    }

    /// The root as a map value.
    pub fn root(&self) -> &MapValue {
        match &self.root {
            Value::Map(map) => map,
            _ => unreachable!("resource roots are always constructed as maps"),
        }
    }

    /// Take the root map out of the resource.
    pub fn into_map(self) -> MapValue {
        match self.root {
            Value::Map(map) => map,
            _ => unreachable!("resource roots are always constructed as maps"),
        }
    }

    /// The root as a [`Value`], for walking or identity comparisons.
    pub fn as_value(&self) -> &Value {
        &self.root
    }

    pub fn entries(&self) -> &IndexMap<String, MapEntry> {
        &self.root().entries
    }

    pub fn range(&self) -> Range {
        self.root().range
    }

    pub fn get(&self, key: &str) -> Option<&MapEntry> {
        self.root().get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(value: &str, start: usize) -> Value {
        Value::String(StringValue {
            value: value.into(),
            raw_text: value.into(),
            range: Range::new(start, start + value.len()),
        })
    }

    #[test]
    fn test_scalar_accessors() {
        let v = string("apps/v1", 12);
        assert_eq!(v.value_type(), ValueType::String);
        assert_eq!(v.range(), Range::new(12, 19));
        assert_eq!(v.raw_text(), Some("apps/v1"));
        assert_eq!(v.as_str(), Some("apps/v1"));
        assert_eq!(v.as_f64(), None);
        assert!(v.as_map().is_none());
    }

    #[test]
    fn test_missing_has_no_raw_text() {
        let v = Value::Missing(MissingValue {
            range: Range::new(0, 7),
        });
        assert!(v.is_missing());
        assert_eq!(v.raw_text(), None);
        assert_eq!(v.value_type().to_string(), "missing");
    }

    #[test]
    fn test_resource_root_is_map() {
        let mut entries = IndexMap::new();
        entries.insert(
            "kind".to_string(),
            MapEntry {
                key_range: Range::new(0, 4),
                value: string("Namespace", 6),
            },
        );
        let resource = ResourceParse::new(entries, Range::new(0, 15));

        assert_eq!(resource.range(), Range::new(0, 15));
        assert_eq!(resource.as_value().value_type(), ValueType::Map);
        assert_eq!(
            resource.get("kind").and_then(|e| e.value.as_str()),
            Some("Namespace")
        );
        assert!(resource.get("apiVersion").is_none());
    }

    #[test]
    fn test_serializes_with_value_type_tag() {
        let json = serde_json::to_value(string("foo", 0)).unwrap();
        assert_eq!(json["valueType"], "string");
        assert_eq!(json["rawText"], "foo");
        assert_eq!(json["range"]["end"], 3);
    }
}
