use super::{
    require, ArrayTraversal, BooleanTraversal, MapTraversal, NumberTraversal, Position,
    Shape, StringTraversal, TraversalEntry,
};
use crate::error::TraversalError;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use yamlnav_parse::{Range, ResourceParse, Value};

/// A scalar read through an untyped view.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Scalar<'a> {
    String(&'a str),
    Number(f64),
    Boolean(bool),
}

impl fmt::Display for Scalar<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Children of a collection read through an untyped view.
#[derive(Debug, Clone)]
pub enum Items<'a> {
    Array(Vec<Traversal<'a>>),
    Map(IndexMap<&'a str, Traversal<'a>>),
}

impl<'a> Items<'a> {
    pub fn len(&self) -> usize {
        match self {
            Items::Array(items) => items.len(),
            Items::Map(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The child views in order, dropping map keys.
    pub fn into_values(self) -> Vec<Traversal<'a>> {
        match self {
            Items::Array(items) => items,
            Items::Map(items) => items.into_values().collect(),
        }
    }
}

/// A view that accepts whatever node it finds. Its kind is the type of
/// that node.
#[derive(Debug, Clone, Copy)]
pub struct Traversal<'a> {
    position: Position<'a>,
}

impl<'a> Traversal<'a> {
    /// View the root of a document.
    pub fn new(resource: &'a ResourceParse) -> Self {
        Traversal {
            position: Position::root(resource),
        }
    }

    pub(crate) fn from_position(position: Position<'a>) -> Self {
        Traversal { position }
    }

    pub fn value(&self) -> Result<Scalar<'a>, TraversalError> {
        match require(&self.position, Shape::Scalar)? {
            Value::String(s) => Ok(Scalar::String(&s.value)),
            Value::Number(n) => Ok(Scalar::Number(n.value)),
            Value::Boolean(b) => Ok(Scalar::Boolean(b.value)),
            _ => unreachable!("a scalar-shaped node is a scalar"),
        }
    }

    pub fn raw_text(&self) -> Result<&'a str, TraversalError> {
        let node = require(&self.position, Shape::Scalar)?;
        Ok(node.raw_text().unwrap_or_default())
    }

    pub fn range(&self) -> Result<Range, TraversalError> {
        require(&self.position, Shape::Any).map(Value::range)
    }

    pub fn items(&self) -> Result<Items<'a>, TraversalError> {
        match self.position.node() {
            Some(Value::Array(_)) => ArrayTraversal::from_position(self.position)
                .items()
                .map(Items::Array),
            Some(Value::Map(_)) => MapTraversal::from_position(self.position)
                .items()
                .map(Items::Map),
            _ => Err(TraversalError::NotACollection { kind: self.kind() }),
        }
    }

    pub fn as_map(&self) -> MapTraversal<'a> {
        MapTraversal::from_position(self.position)
    }

    pub fn as_array(&self) -> ArrayTraversal<'a> {
        ArrayTraversal::from_position(self.position)
    }

    pub fn as_string(&self) -> StringTraversal<'a> {
        StringTraversal::from_position(self.position)
    }

    pub fn as_number(&self) -> NumberTraversal<'a> {
        NumberTraversal::from_position(self.position)
    }

    pub fn as_boolean(&self) -> BooleanTraversal<'a> {
        BooleanTraversal::from_position(self.position)
    }
}

impl<'a> TraversalEntry<'a> for Traversal<'a> {
    fn position(&self) -> &Position<'a> {
        &self.position
    }

    fn shape(&self) -> Shape {
        Shape::Any
    }
}

impl<'a> From<&'a ResourceParse> for Traversal<'a> {
    fn from(resource: &'a ResourceParse) -> Self {
        Traversal::new(resource)
    }
}

impl<'a> From<Traversal<'a>> for MapTraversal<'a> {
    fn from(traversal: Traversal<'a>) -> Self {
        traversal.as_map()
    }
}
