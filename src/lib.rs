//! # yamlite
//!
//! A small, dependency-light codec for a practical YAML subset, built
//! around a dynamically typed tree value.
//!
//! ## What is covered
//!
//! The format is the YAML most configuration files actually use:
//!
//! - Block mappings and sequences driven by indentation
//! - Flow collections (`[a, b]`, `{k: v}`), including multi-line ones
//! - Literal (`|`) and folded (`>`) block scalars with `+`/`-` chomping
//! - Single- and double-quoted strings with escapes
//! - Comments, `---`/`...` document markers, `_` digit separators
//!
//! Anchors, aliases, tags and multi-document streams are out of scope.
//!
//! ## Key Features
//!
//! - **Dynamic Tree**: [`Node`] models null, bool, number, string, list
//!   and dict without a schema, with auto-vivifying index operators
//! - **Order-Preserving**: dictionaries keep their source key order, so
//!   parse/serialize cycles do not reshuffle files
//! - **Positioned Errors**: every parse error carries a 1-based line
//!   and column, rendered as `yaml: line L, column C: message`
//! - **Serde Compatible**: [`Node`] implements `Serialize` and
//!   `Deserialize`, so trees cross into other formats unchanged
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! ```rust
//! use yamlite::parse;
//!
//! let config = parse("
//! server:
//!   host: localhost
//!   port: 8080
//! features: [tls, http2]
//! ")?;
//!
//! assert_eq!(config["server"]["port"].as_i64(), Some(8080));
//! assert_eq!(config["features"][0].as_str(), Some("tls"));
//! # Ok::<(), yamlite::Error>(())
//! ```
//!
//! ## Building Trees
//!
//! Trees can be built with the [`node!`] macro or grown in place with
//! the index operators:
//!
//! ```rust
//! use yamlite::{node, to_string, Node};
//!
//! let mut tree = Node::Nil;
//! tree["server"]["host"] = node!("localhost");
//! tree["server"]["ports"][0] = node!(8080);
//!
//! assert_eq!(
//!     to_string(&tree),
//!     "server:\n  host: localhost\n  ports:\n    - 8080\n"
//! );
//! ```

mod de;
pub mod error;
mod flow;
mod lines;
pub mod macros;
pub mod map;
pub mod options;
mod scalar;
mod scan;
pub mod ser;
pub mod value;

pub use error::{Error, Result};
pub use map::NodeMap;
pub use options::Options;
pub use ser::{to_string, to_writer};
pub use value::Node;

use std::fs;
use std::path::Path;

/// Parses a document into a [`Node`] tree with default options.
///
/// Empty or comment-only input parses to [`Node::Nil`].
///
/// # Examples
///
/// ```rust
/// use yamlite::parse;
///
/// let node = parse("numbers: [1, 2, 3]").unwrap();
/// assert_eq!(node["numbers"][2].as_i64(), Some(3));
/// ```
///
/// # Errors
///
/// Returns [`Error::Syntax`] for lexical problems and
/// [`Error::Structural`] for shape problems, both positioned at the
/// offending line and column.
pub fn parse(text: &str) -> Result<Node> {
    parse_with_options(text, &Options::default())
}

/// Parses a document with explicit [`Options`].
///
/// # Errors
///
/// As [`parse`], plus [`Error::Structural`] when nesting exceeds the
/// configured depth limit.
pub fn parse_with_options(text: &str, options: &Options) -> Result<Node> {
    de::parse_document(text, options)
}

/// Reads and parses a file.
///
/// # Errors
///
/// Returns [`Error::Io`] when the file cannot be read, otherwise as
/// [`parse`].
pub fn parse_file(path: impl AsRef<Path>) -> Result<Node> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(path.display().to_string(), e.to_string()))?;
    parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node;

    #[test]
    fn parse_then_serialize_round_trip() {
        let source = "name: demo\nitems:\n  - a\n  - b\nnested:\n  flag: true\n";
        let tree = parse(source).unwrap();
        assert_eq!(to_string(&tree), source);
    }

    #[test]
    fn autovivified_tree_serializes() {
        let mut tree = Node::Nil;
        tree["a"]["b"] = Node::from(1);
        tree["a"]["c"][1] = Node::from(true);

        let text = to_string(&tree);
        let back = parse(&text).unwrap();
        assert_eq!(back["a"]["b"].as_i64(), Some(1));
        assert!(back["a"]["c"][0].is_nil());
        assert_eq!(back["a"]["c"][1].as_bool(), Some(true));
    }

    #[test]
    fn parse_file_reports_missing_paths() {
        let err = parse_file("/no/such/file.yaml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("/no/such/file.yaml"));
    }

    #[test]
    fn to_writer_emits_the_same_bytes() {
        let tree = node!({"a": 1});
        let mut buffer = Vec::new();
        to_writer(&mut buffer, &tree).unwrap();
        assert_eq!(buffer, to_string(&tree).into_bytes());
    }
}
