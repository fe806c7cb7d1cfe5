//! Error types for parsing documents into resource trees.

use crate::Range;
use thiserror::Error;

/// Result type alias for yamlnav-parse operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning text into [`ResourceParse`] values.
///
/// [`ResourceParse`]: crate::ResourceParse
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// YAML syntax error reported by the scanner
    #[error("YAML syntax error: {message}")]
    Syntax {
        message: String,
        /// Empty range at the character offset where scanning failed
        location: Option<Range>,
    },

    /// JSON syntax error (1-indexed line and column, as reported by serde_json)
    #[error("JSON syntax error at {line}:{column}: {message}")]
    Json {
        message: String,
        line: usize,
        column: usize,
    },

    /// The input held a different number of documents than the format allows
    #[error("expected {expected} document(s) but found {found}")]
    DocumentCount { expected: usize, found: usize },
}

impl Error {
    /// The source range the error points at, if known.
    pub fn location(&self) -> Option<Range> {
        match self {
            Error::Syntax { location, .. } => *location,
            Error::Json { .. } | Error::DocumentCount { .. } => None,
        }
    }

    /// Move the location `by` characters later in the text.
    pub(crate) fn shifted(self, by: usize) -> Self {
        match self {
            Error::Syntax { message, location } => Error::Syntax {
                message,
                location: location.map(|r| Range::new(r.start + by, r.end + by)),
            },
            other => other,
        }
    }
}

impl From<yaml_rust2::ScanError> for Error {
    fn from(err: yaml_rust2::ScanError) -> Self {
        Error::Syntax {
            message: err.info().to_string(),
            location: Some(Range::empty_at(err.marker().index())),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}
