//! Source positions for yamlnav
//!
//! This crate provides the position types shared by the parser and the
//! traversal layer. Positions are character offsets into the original
//! source text, matching what the YAML scanner reports.
//!
//! The core types are:
//! - [`Range`]: a half-open `[start, end)` span of character offsets
//! - [`Location`]: an offset resolved to a 0-indexed row and column
//! - [`SourceText`]: indexes a text for slicing and row/column lookups
//!
//! # Example
//!
//! ```rust
//! use yamlnav_source_map::*;
//!
//! let source = SourceText::new("apiVersion: apps/v1\nkind: Namespace");
//! let range = Range::new(12, 19);
//!
//! assert_eq!(source.slice(range), Some("apps/v1"));
//! assert_eq!(source.location(range.start).unwrap().column, 12);
//! ```

pub mod source_text;
pub mod types;

pub use source_text::SourceText;
pub use types::{Location, Range};
