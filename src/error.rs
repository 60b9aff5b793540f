//! Error types for parsing and serialization.
//!
//! Parse failures come in two flavors: [`Error::Syntax`] for lexical
//! problems (bad escapes, unterminated quotes, unmatched brackets,
//! trailing content) and [`Error::Structural`] for shape problems
//! (empty mapping keys, invalid indentation jumps, non-string flow
//! keys, nesting depth). Both carry a 1-based line and a 1-based,
//! tab-expanded column; a column of 0 means "whole line".
//!
//! The rendered message follows the format
//! `yaml: line L, column C: message`.
//!
//! ## Examples
//!
//! ```rust
//! use yamlite::parse;
//!
//! let err = parse("key: [1, 2").unwrap_err();
//! assert!(err.to_string().starts_with("yaml: line 1"));
//! ```

use thiserror::Error;

/// All errors that can occur while parsing or loading a document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Lexical error: bad escape, unterminated quote, unmatched bracket,
    /// trailing content after a complete value.
    #[error("{}", located(*.line, *.column, .msg))]
    Syntax {
        line: usize,
        column: usize,
        msg: String,
    },

    /// Shape error: empty mapping key, invalid indentation, flow object
    /// key that is not a string, nesting past the configured depth.
    #[error("{}", located(*.line, *.column, .msg))]
    Structural {
        line: usize,
        column: usize,
        msg: String,
    },

    /// The file handed to [`parse_file`](crate::parse_file) could not be
    /// read. Carries the path instead of a position.
    #[error("yaml: unable to open file {path}: {msg}")]
    Io { path: String, msg: String },
}

fn located(line: usize, column: usize, msg: &str) -> String {
    if column == 0 {
        format!("yaml: line {}: {}", line, msg)
    } else {
        format!("yaml: line {}, column {}: {}", line, column, msg)
    }
}

impl Error {
    /// Creates a syntax error at the given position. Column 0 suppresses
    /// the column in the rendered message.
    pub fn syntax(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Syntax {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates a structural error at the given position.
    pub fn structural(line: usize, column: usize, msg: impl Into<String>) -> Self {
        Error::Structural {
            line,
            column,
            msg: msg.into(),
        }
    }

    /// Creates an I/O error for a path that could not be read.
    pub fn io(path: impl Into<String>, msg: impl Into<String>) -> Self {
        Error::Io {
            path: path.into(),
            msg: msg.into(),
        }
    }

    /// The (line, column) the error points at, if it carries one.
    #[must_use]
    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            Error::Syntax { line, column, .. } | Error::Structural { line, column, .. } => {
                Some((*line, *column))
            }
            Error::Io { .. } => None,
        }
    }

    /// Returns `true` for [`Error::Syntax`].
    #[must_use]
    pub const fn is_syntax(&self) -> bool {
        matches!(self, Error::Syntax { .. })
    }

    /// Returns `true` for [`Error::Structural`].
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self, Error::Structural { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_line_and_column() {
        let err = Error::syntax(3, 7, "bad escape sequence");
        assert_eq!(
            err.to_string(),
            "yaml: line 3, column 7: bad escape sequence"
        );
    }

    #[test]
    fn column_zero_is_omitted() {
        let err = Error::structural(12, 0, "invalid indentation");
        assert_eq!(err.to_string(), "yaml: line 12: invalid indentation");
    }

    #[test]
    fn io_error_carries_path() {
        let err = Error::io("/no/such/file.yaml", "not found");
        assert!(err.to_string().contains("/no/such/file.yaml"));
        assert_eq!(err.location(), None);
    }
}
