use super::{require, Position, Shape, TraversalEntry};
use crate::error::TraversalError;
use std::marker::PhantomData;
use yamlnav_parse::{Range, Value};

/// Rust type produced by a typed scalar view.
pub trait FromScalar<'a>: Sized {
    const SHAPE: Shape;

    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromScalar<'a> for &'a str {
    const SHAPE: Shape = Shape::String;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromScalar<'a> for f64 {
    const SHAPE: Shape = Shape::Number;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_f64()
    }
}

impl<'a> FromScalar<'a> for bool {
    const SHAPE: Shape = Shape::Boolean;

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_bool()
    }
}

/// A view that expects a scalar of type `T`.
///
/// `raw_text` and `range` work for any scalar at the path, so a number
/// requested as a string can still be reported with its literal text.
#[derive(Debug, Clone, Copy)]
pub struct ScalarTraversal<'a, T> {
    position: Position<'a>,
    marker: PhantomData<T>,
}

pub type StringTraversal<'a> = ScalarTraversal<'a, &'a str>;
pub type NumberTraversal<'a> = ScalarTraversal<'a, f64>;
pub type BooleanTraversal<'a> = ScalarTraversal<'a, bool>;

impl<'a, T: FromScalar<'a>> ScalarTraversal<'a, T> {
    pub(crate) fn from_position(position: Position<'a>) -> Self {
        ScalarTraversal {
            position,
            marker: PhantomData,
        }
    }

    pub fn value(&self) -> Result<T, TraversalError> {
        let node = self.position.node().ok_or(TraversalError::NotPresent)?;
        T::from_value(node).ok_or(TraversalError::TypeMismatch {
            expected: T::SHAPE,
            found: node.value_type(),
        })
    }

    pub fn raw_text(&self) -> Result<&'a str, TraversalError> {
        let node = require(&self.position, Shape::Scalar)?;
        Ok(node.raw_text().unwrap_or_default())
    }

    pub fn range(&self) -> Result<Range, TraversalError> {
        require(&self.position, Shape::Scalar).map(Value::range)
    }
}

impl<'a, T: FromScalar<'a>> TraversalEntry<'a> for ScalarTraversal<'a, T> {
    fn position(&self) -> &Position<'a> {
        &self.position
    }

    fn shape(&self) -> Shape {
        T::SHAPE
    }
}

#[cfg(test)]
mod tests {
    use crate::traversal::{Kind, MapTraversal, TraversalEntry};
    use crate::TraversalError;
    use yamlnav_parse::{parse_yaml, Range, ValueType};

    #[test]
    fn test_typed_values() {
        let resource = parse_yaml("s: foo\nn: 12.5\nb: false").unwrap().remove(0);
        let root = MapTraversal::new(&resource);

        assert_eq!(root.as_string("s").value(), Ok("foo"));
        assert_eq!(root.as_number("n").value(), Ok(12.5));
        assert_eq!(root.as_boolean("b").value(), Ok(false));
        assert_eq!(root.as_boolean("b").kind(), Kind::Boolean);
    }

    #[test]
    fn test_wrong_scalar_type_keeps_raw_text() {
        let resource = parse_yaml("s: foo\nm:\n  a: 1").unwrap().remove(0);
        let root = MapTraversal::new(&resource);

        let n = root.as_number("s");
        assert_eq!(n.kind(), Kind::NotValid);
        assert!(n.exists());
        assert_eq!(
            n.value(),
            Err(TraversalError::TypeMismatch {
                expected: crate::Shape::Number,
                found: ValueType::String,
            })
        );
        assert_eq!(n.raw_text(), Ok("foo"));
        assert_eq!(n.range(), Ok(Range::new(3, 6)));

        let collection = root.as_string("m");
        assert!(matches!(
            collection.raw_text(),
            Err(TraversalError::TypeMismatch {
                found: ValueType::Map,
                ..
            })
        ));
        assert_eq!(root.as_string("zzz").range(), Err(TraversalError::NotPresent));
    }
}
