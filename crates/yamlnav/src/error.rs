//! Error types for terminal reads and path parsing.

use crate::traversal::{Kind, Shape};
use thiserror::Error;
use yamlnav_parse::ValueType;

/// Failure of a terminal read (`value`, `range`, `raw_text`, `items`,
/// `key_range`) on a traversal entry. Navigation itself never fails.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraversalError {
    /// No node occupies the path, or the key was declared without a value
    #[error("value is not present")]
    NotPresent,

    /// The node exists but does not have the requested shape
    #[error("expected {expected} but found {found}")]
    TypeMismatch { expected: Shape, found: ValueType },

    /// `items` was called on a scalar, an absent entry, or a view whose
    /// node is not the requested collection
    #[error("a {kind} value has no items")]
    NotACollection { kind: Kind },

    /// `key_range` was called on an array element or a document root
    #[error("entry was not reached through a map key")]
    NotAKeyedEntry,
}

/// Error from parsing a [`Path`](crate::Path) expression. Offsets are
/// character positions in the expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("unterminated '[' at offset {offset}")]
    UnterminatedBracket { offset: usize },

    #[error("invalid index '{text}' at offset {offset}")]
    BadIndex { text: String, offset: usize },

    #[error("empty path segment at offset {offset}")]
    EmptySegment { offset: usize },

    #[error("unterminated quote at offset {offset}")]
    UnterminatedQuote { offset: usize },

    #[error("unexpected '{found}' at offset {offset}, expected '.' or '['")]
    UnexpectedChar { found: char, offset: usize },
}
