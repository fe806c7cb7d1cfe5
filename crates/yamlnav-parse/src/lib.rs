//! # yamlnav-parse
//!
//! Parsing of YAML, JSON and templated YAML into a position-preserving
//! value tree.
//!
//! Every node of the tree carries the [`Range`] of character offsets it was
//! parsed from, and every scalar keeps its literal source text, so that
//! tooling built on top can point at the exact text behind any value.
//!
//! ## Example
//!
//! ```rust
//! use yamlnav_parse::{parse, Format, Range};
//!
//! let docs = parse("apiVersion: apps/v1\nkind: Namespace", Format::Yaml).unwrap();
//! let api = docs[0].get("apiVersion").unwrap();
//! assert_eq!(api.key_range, Range::new(0, 10));
//! assert_eq!(api.value.range(), Range::new(12, 19));
//! ```

mod error;
mod format;
mod helm;
mod json;
mod model;
mod parser;
mod scalar;

pub use error::{Error, Result};
pub use format::{parse, Format};
pub use helm::parse_helm_template;
pub use json::parse_json;
pub use model::{
    ArrayValue, BooleanValue, MapEntry, MapValue, MissingValue, NumberValue, ResourceParse,
    StringValue, Value, ValueType,
};
pub use parser::parse_yaml;
pub use yamlnav_source_map::{Location, Range, SourceText};
