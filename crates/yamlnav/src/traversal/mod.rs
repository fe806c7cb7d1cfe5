//! Typed, fail-safe views over a parsed document.
//!
//! A traversal entry is a view of whatever sits at some path in a
//! [`ResourceParse`](yamlnav_parse::ResourceParse), together with the shape
//! the caller expects to find there. Navigating never fails: asking for a
//! key that does not exist, or indexing into a string, yields an entry that
//! reports [`Kind::NotPresent`] or [`Kind::NotValid`] and can itself be
//! navigated further. Only terminal reads return errors.
//!
//! Every entry, present or not, can report a range to highlight; see
//! [`TraversalEntry::highlight_range`].

mod array;
mod map;
mod position;
mod scalar;
mod untyped;

pub use array::ArrayTraversal;
pub use map::MapTraversal;
pub use position::Position;
pub use scalar::{BooleanTraversal, FromScalar, NumberTraversal, ScalarTraversal, StringTraversal};
pub use untyped::{Items, Scalar, Traversal};

use crate::error::TraversalError;
use crate::path::{Path, PathSegment};
use serde::Serialize;
use std::fmt;
use yamlnav_parse::{Range, Value, ValueType};

/// Classification of a traversal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    String,
    Number,
    Boolean,
    Array,
    Map,
    /// Nothing at the path, or a key declared without a value
    NotPresent,
    /// A node exists but has the wrong shape for the view
    NotValid,
}

impl Kind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Array => "array",
            Kind::Map => "map",
            Kind::NotPresent => "not-present",
            Kind::NotValid => "not-valid",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValueType> for Kind {
    fn from(value_type: ValueType) -> Self {
        match value_type {
            ValueType::String => Kind::String,
            ValueType::Number => Kind::Number,
            ValueType::Boolean => Kind::Boolean,
            ValueType::Array => Kind::Array,
            ValueType::Map => Kind::Map,
            ValueType::Missing => Kind::NotPresent,
        }
    }
}

/// The shape a view expects of its node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    /// Any concrete node (untyped views)
    Any,
    String,
    Number,
    Boolean,
    Array,
    Map,
    /// Any of string, number or boolean
    Scalar,
}

impl Shape {
    pub fn accepts(&self, value_type: ValueType) -> bool {
        match self {
            Shape::Any => value_type != ValueType::Missing,
            Shape::String => value_type == ValueType::String,
            Shape::Number => value_type == ValueType::Number,
            Shape::Boolean => value_type == ValueType::Boolean,
            Shape::Array => value_type == ValueType::Array,
            Shape::Map => value_type == ValueType::Map,
            Shape::Scalar => value_type.is_scalar(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::Any => "any value",
            Shape::String => "string",
            Shape::Number => "number",
            Shape::Boolean => "boolean",
            Shape::Array => "array",
            Shape::Map => "map",
            Shape::Scalar => "scalar",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One navigation step: a map key or an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Segment<'k> {
    Key(&'k str),
    Index(usize),
}

impl<'k> From<&'k str> for Segment<'k> {
    fn from(key: &'k str) -> Self {
        Segment::Key(key)
    }
}

impl<'k> From<&'k String> for Segment<'k> {
    fn from(key: &'k String) -> Self {
        Segment::Key(key)
    }
}

impl From<usize> for Segment<'_> {
    fn from(index: usize) -> Self {
        Segment::Index(index)
    }
}

impl<'k> From<&'k PathSegment> for Segment<'k> {
    fn from(segment: &'k PathSegment) -> Self {
        match segment {
            PathSegment::Key(key) => Segment::Key(key),
            PathSegment::Index(index) => Segment::Index(*index),
        }
    }
}

/// Operations shared by every traversal entry.
///
/// Implementors provide their [`Position`] and the [`Shape`] they expect;
/// everything else is derived from those two.
pub trait TraversalEntry<'a> {
    fn position(&self) -> &Position<'a>;

    fn shape(&self) -> Shape;

    fn kind(&self) -> Kind {
        self.position().kind(self.shape())
    }

    /// True if a concrete node occupies the path.
    fn exists(&self) -> bool {
        self.position().node().is_some()
    }

    /// True if a node exists and has the shape this view expects.
    fn is_valid(&self) -> bool {
        !matches!(self.kind(), Kind::NotPresent | Kind::NotValid)
    }

    /// Untyped child at a key or index. Children of absent or invalid
    /// entries are not present.
    fn child<'k>(&self, segment: impl Into<Segment<'k>>) -> Traversal<'a>
    where
        Self: Sized,
    {
        Traversal::from_position(self.position().child(self.is_valid(), segment.into()))
    }

    /// Navigate a multi-segment path from this entry.
    fn at(&self, path: &Path) -> Traversal<'a>
    where
        Self: Sized,
    {
        let mut segments = path.segments().iter();
        let mut current = match segments.next() {
            Some(first) => self.child(first),
            None => return Traversal::from_position(*self.position()),
        };
        for segment in segments {
            current = current.child(segment);
        }
        current
    }

    /// The node at the path, if one exists.
    fn parse_node(&self) -> Option<&'a Value> {
        self.position().node()
    }

    /// The node at the path, or the node the highlight falls back to.
    fn nearest_parse_node(&self) -> &'a Value {
        self.position().nearest_parse_node()
    }

    /// The range to point at for this entry. Never fails: an absent entry
    /// highlights the deepest location found on the way to it.
    fn highlight_range(&self) -> Range {
        self.position().highlight_range()
    }

    /// Span of the map key this entry was looked up by.
    fn key_range(&self) -> Result<Range, TraversalError> {
        match self.position().key_range() {
            Some(Some(range)) => Ok(range),
            Some(None) => Err(TraversalError::NotPresent),
            None => Err(TraversalError::NotAKeyedEntry),
        }
    }
}

/// Error for a read that requires a node of `expected` shape.
pub(crate) fn require<'a>(
    position: &Position<'a>,
    expected: Shape,
) -> Result<&'a Value, TraversalError> {
    let node = position.node().ok_or(TraversalError::NotPresent)?;
    if expected.accepts(node.value_type()) {
        Ok(node)
    } else {
        Err(TraversalError::TypeMismatch {
            expected,
            found: node.value_type(),
        })
    }
}
