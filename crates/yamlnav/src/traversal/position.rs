//! Where a traversal entry points, and what to highlight when nothing is
//! there.
//!
//! Every entry carries an anchor: the last location known to exist on the
//! way to it. Looking up a map key that exists (even with no value) anchors
//! at the key; looking up an array element that exists anchors at the
//! element. A failed lookup keeps the parent's anchor, so a path that
//! leaves the document at any depth still points at the deepest part of
//! it that was found.

use super::{Kind, Segment, Shape};
use yamlnav_parse::{MapEntry, Range, ResourceParse, Value};

/// How an entry was reached from its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Origin {
    Root,
    /// Key span if the key exists
    Keyed(Option<Range>),
    Indexed,
}

#[derive(Debug, Clone, Copy)]
struct Anchor<'a> {
    node: &'a Value,
    range: Range,
}

/// A location in a document as seen by a traversal entry.
///
/// The fields are private; entries expose it only so that generic code
/// over [`TraversalEntry`](super::TraversalEntry) can share navigation.
#[derive(Debug, Clone, Copy)]
pub struct Position<'a> {
    /// Node at the path, including a `Missing` placeholder
    node: Option<&'a Value>,
    origin: Origin,
    anchor: Anchor<'a>,
}

impl<'a> Position<'a> {
    pub(crate) fn root(resource: &'a ResourceParse) -> Self {
        let node = resource.as_value();
        Position {
            node: Some(node),
            origin: Origin::Root,
            anchor: Anchor {
                node,
                range: resource.range(),
            },
        }
    }

    pub(crate) fn keyed(entry: &'a MapEntry) -> Self {
        Position {
            node: Some(&entry.value),
            origin: Origin::Keyed(Some(entry.key_range)),
            anchor: Anchor {
                node: &entry.value,
                range: entry.key_range,
            },
        }
    }

    pub(crate) fn indexed(item: &'a Value) -> Self {
        Position {
            node: Some(item),
            origin: Origin::Indexed,
            anchor: Anchor {
                node: item,
                range: item.range(),
            },
        }
    }

    /// Navigate to `segment`. Lookups only happen through a valid parent;
    /// otherwise the child is absent and inherits this anchor.
    pub(crate) fn child(&self, parent_valid: bool, segment: Segment<'_>) -> Self {
        let found = match (parent_valid, self.node, segment) {
            (true, Some(Value::Map(map)), Segment::Key(key)) => map.get(key).map(Position::keyed),
            (true, Some(Value::Array(array)), Segment::Index(index)) => {
                array.get(index).map(Position::indexed)
            }
            _ => None,
        };

        found.unwrap_or(Position {
            node: None,
            origin: match segment {
                Segment::Key(_) => Origin::Keyed(None),
                Segment::Index(_) => Origin::Indexed,
            },
            anchor: self.anchor,
        })
    }

    /// The concrete node, excluding `Missing` placeholders.
    pub(crate) fn node(&self) -> Option<&'a Value> {
        self.node.filter(|node| !node.is_missing())
    }

    pub(crate) fn kind(&self, shape: Shape) -> Kind {
        match self.node() {
            None => Kind::NotPresent,
            Some(node) if shape.accepts(node.value_type()) => Kind::from(node.value_type()),
            Some(_) => Kind::NotValid,
        }
    }

    pub(crate) fn nearest_parse_node(&self) -> &'a Value {
        self.node.unwrap_or(self.anchor.node)
    }

    pub(crate) fn highlight_range(&self) -> Range {
        self.node.map(Value::range).unwrap_or(self.anchor.range)
    }

    pub(crate) fn key_range(&self) -> Option<Option<Range>> {
        match self.origin {
            Origin::Keyed(range) => Some(range),
            Origin::Root | Origin::Indexed => None,
        }
    }
}
