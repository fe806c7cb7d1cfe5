use super::{
    require, ArrayTraversal, BooleanTraversal, NumberTraversal, Position, Segment, Shape,
    StringTraversal, Traversal, TraversalEntry,
};
use crate::error::TraversalError;
use indexmap::IndexMap;
use yamlnav_parse::{Range, ResourceParse, Value};

/// A view that expects a map.
#[derive(Debug, Clone, Copy)]
pub struct MapTraversal<'a> {
    position: Position<'a>,
}

impl<'a> MapTraversal<'a> {
    /// View the root of a document.
    pub fn new(resource: &'a ResourceParse) -> Self {
        MapTraversal {
            position: Position::root(resource),
        }
    }

    pub(crate) fn from_position(position: Position<'a>) -> Self {
        MapTraversal { position }
    }

    fn lookup(&self, key: &str) -> Position<'a> {
        self.position.child(self.is_valid(), Segment::Key(key))
    }

    pub fn as_string(&self, key: &str) -> StringTraversal<'a> {
        StringTraversal::from_position(self.lookup(key))
    }

    pub fn as_number(&self, key: &str) -> NumberTraversal<'a> {
        NumberTraversal::from_position(self.lookup(key))
    }

    pub fn as_boolean(&self, key: &str) -> BooleanTraversal<'a> {
        BooleanTraversal::from_position(self.lookup(key))
    }

    pub fn as_array(&self, key: &str) -> ArrayTraversal<'a> {
        ArrayTraversal::from_position(self.lookup(key))
    }

    pub fn as_map(&self, key: &str) -> MapTraversal<'a> {
        MapTraversal::from_position(self.lookup(key))
    }

    /// Untyped views of every entry, in document order.
    ///
    /// Fails with [`TraversalError::NotACollection`] unless the view is a
    /// valid map.
    pub fn items(&self) -> Result<IndexMap<&'a str, Traversal<'a>>, TraversalError> {
        let Some(Value::Map(map)) = self.position.node() else {
            return Err(TraversalError::NotACollection { kind: self.kind() });
        };

        Ok(map
            .entries
            .iter()
            .map(|(key, entry)| {
                (key.as_str(), Traversal::from_position(Position::keyed(entry)))
            })
            .collect())
    }

    /// Keys of the map in document order; empty unless the view is valid.
    pub fn keys(&self) -> Vec<&'a str> {
        match self.position.node() {
            Some(Value::Map(map)) => map.entries.keys().map(String::as_str).collect(),
            _ => Vec::new(),
        }
    }

    pub fn range(&self) -> Result<Range, TraversalError> {
        require(&self.position, Shape::Map).map(Value::range)
    }
}

impl<'a> TraversalEntry<'a> for MapTraversal<'a> {
    fn position(&self) -> &Position<'a> {
        &self.position
    }

    fn shape(&self) -> Shape {
        Shape::Map
    }
}

impl<'a> From<&'a ResourceParse> for MapTraversal<'a> {
    fn from(resource: &'a ResourceParse) -> Self {
        MapTraversal::new(resource)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traversal::Kind;
    use yamlnav_parse::parse_yaml;

    fn doc(text: &str) -> ResourceParse {
        parse_yaml(text).unwrap().remove(0)
    }

    #[test]
    fn test_items_preserve_document_order() {
        let resource = doc("zeta: 1\nalpha: two\nmid: [1]");
        let items = MapTraversal::new(&resource).items().unwrap();
        let keys: Vec<_> = items.keys().copied().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(items["alpha"].kind(), Kind::String);
        assert_eq!(items["mid"].kind(), Kind::Array);
        assert_eq!(items["zeta"].key_range(), Ok(Range::new(0, 4)));
    }

    #[test]
    fn test_items_on_non_collection() {
        let resource = doc("name: foo
list: [1]");
        let root = MapTraversal::new(&resource);
        assert_eq!(
            root.as_map("name").items().unwrap_err(),
            TraversalError::NotACollection {
                kind: Kind::NotValid
            }
        );
        assert_eq!(
            root.as_map("zzz").items().unwrap_err(),
            TraversalError::NotACollection {
                kind: Kind::NotPresent
            }
        );
        // An array viewed as a map is still not a map collection
        assert_eq!(
            root.as_map("list").items().unwrap_err(),
            TraversalError::NotACollection {
                kind: Kind::NotValid
            }
        );
        assert!(root.as_map("name").keys().is_empty());
    }

    #[test]
    fn test_root_is_not_keyed() {
        let resource = doc("a: 1");
        let root = MapTraversal::new(&resource);
        assert_eq!(root.key_range(), Err(TraversalError::NotAKeyedEntry));
        assert_eq!(root.range(), Ok(Range::new(0, 4)));
        assert_eq!(root.keys(), vec!["a"]);
    }
}
