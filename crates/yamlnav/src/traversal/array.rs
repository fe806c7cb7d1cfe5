use super::{
    require, BooleanTraversal, MapTraversal, NumberTraversal, Position, Segment, Shape,
    StringTraversal, Traversal, TraversalEntry,
};
use crate::error::TraversalError;
use yamlnav_parse::{Range, Value};

/// A view that expects an array.
#[derive(Debug, Clone, Copy)]
pub struct ArrayTraversal<'a> {
    position: Position<'a>,
}

impl<'a> ArrayTraversal<'a> {
    pub(crate) fn from_position(position: Position<'a>) -> Self {
        ArrayTraversal { position }
    }

    fn lookup(&self, index: usize) -> Position<'a> {
        self.position.child(self.is_valid(), Segment::Index(index))
    }

    /// Positions of every element; empty unless the view is valid.
    fn elements(&self) -> Vec<Position<'a>> {
        match self.position.node() {
            Some(Value::Array(array)) => array.items.iter().map(Position::indexed).collect(),
            _ => Vec::new(),
        }
    }

    pub fn as_string(&self, index: usize) -> StringTraversal<'a> {
        StringTraversal::from_position(self.lookup(index))
    }

    pub fn as_number(&self, index: usize) -> NumberTraversal<'a> {
        NumberTraversal::from_position(self.lookup(index))
    }

    pub fn as_boolean(&self, index: usize) -> BooleanTraversal<'a> {
        BooleanTraversal::from_position(self.lookup(index))
    }

    pub fn as_array(&self, index: usize) -> ArrayTraversal<'a> {
        ArrayTraversal::from_position(self.lookup(index))
    }

    pub fn as_map(&self, index: usize) -> MapTraversal<'a> {
        MapTraversal::from_position(self.lookup(index))
    }

    /// Untyped views of every element.
    pub fn items(&self) -> Result<Vec<Traversal<'a>>, TraversalError> {
        if !matches!(self.position.node(), Some(Value::Array(_))) {
            return Err(TraversalError::NotACollection { kind: self.kind() });
        }
        Ok(self
            .elements()
            .into_iter()
            .map(Traversal::from_position)
            .collect())
    }

    /// Every element viewed as a string. Elements of other types stay in
    /// place and report [`Kind::NotValid`](super::Kind::NotValid).
    pub fn strings(&self) -> Vec<StringTraversal<'a>> {
        self.elements()
            .into_iter()
            .map(StringTraversal::from_position)
            .collect()
    }

    pub fn numbers(&self) -> Vec<NumberTraversal<'a>> {
        self.elements()
            .into_iter()
            .map(NumberTraversal::from_position)
            .collect()
    }

    pub fn booleans(&self) -> Vec<BooleanTraversal<'a>> {
        self.elements()
            .into_iter()
            .map(BooleanTraversal::from_position)
            .collect()
    }

    pub fn maps(&self) -> Vec<MapTraversal<'a>> {
        self.elements()
            .into_iter()
            .map(MapTraversal::from_position)
            .collect()
    }

    pub fn arrays(&self) -> Vec<ArrayTraversal<'a>> {
        self.elements()
            .into_iter()
            .map(ArrayTraversal::from_position)
            .collect()
    }

    /// Number of elements; zero unless the view is valid.
    pub fn len(&self) -> usize {
        match self.position.node() {
            Some(Value::Array(array)) => array.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn range(&self) -> Result<Range, TraversalError> {
        require(&self.position, Shape::Array).map(Value::range)
    }
}

impl<'a> TraversalEntry<'a> for ArrayTraversal<'a> {
    fn position(&self) -> &Position<'a> {
        &self.position
    }

    fn shape(&self) -> Shape {
        Shape::Array
    }
}
