//! # yamlnav
//!
//! Fail-safe navigation of position-preserving documents.
//!
//! Documents parsed by [`yamlnav_parse`] are navigated through traversal
//! entries: typed views that never fail while navigating and always know
//! which source range to point at, even for paths that lead nowhere. This
//! makes them suitable for diagnostics that need to highlight a missing or
//! mistyped field.
//!
//! ## Example
//!
//! ```rust
//! use yamlnav::{Kind, MapTraversal, TraversalEntry};
//! use yamlnav_parse::{parse_yaml, Range};
//!
//! let docs = parse_yaml("metadata:\n  name: foo\nspec: {}").unwrap();
//! let doc = MapTraversal::new(&docs[0]);
//!
//! let name = doc.as_map("metadata").as_string("name");
//! assert_eq!(name.value(), Ok("foo"));
//!
//! // A missing field is still navigable and highlights its nearest
//! // existing ancestor key
//! let missing = doc.as_map("metadata").as_map("labels").as_string("app");
//! assert_eq!(missing.kind(), Kind::NotPresent);
//! assert_eq!(missing.highlight_range(), Range::new(0, 8));
//! ```

pub mod error;
pub mod path;
pub mod semantics;
pub mod traversal;
pub mod walker;

pub use error::{PathError, TraversalError};
pub use path::{Path, PathSegment};
pub use semantics::is_kind;
pub use traversal::{
    ArrayTraversal, BooleanTraversal, FromScalar, Items, Kind, MapTraversal, NumberTraversal,
    Position, Scalar, ScalarTraversal, Segment, Shape, StringTraversal, Traversal, TraversalEntry,
};
pub use walker::{walk, walk_from, Ancestor, Ancestors, Parented, ResourceWalker};
