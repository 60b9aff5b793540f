//! Serializer: node tree back to document text.
//!
//! Output uses two-space indentation, one `key: value` or `- item` per
//! line, with empty containers written inline as `{}` / `[]`. Strings
//! are left plain when they would read back unchanged and double-quoted
//! otherwise, so a serialize/parse cycle is lossless for every tree.

use std::fmt;
use std::io;

use crate::Node;

/// Serializes `node` to a string.
///
/// ## Examples
///
/// ```rust
/// use yamlite::{node, to_string};
///
/// let tree = node!({"name": "demo", "ports": [80, 443]});
/// assert_eq!(to_string(&tree), "name: demo\nports:\n  - 80\n  - 443\n");
/// ```
#[must_use]
pub fn to_string(node: &Node) -> String {
    let mut out = String::new();
    write_node(&mut out, node, 0).expect("writing to a String does not fail");
    out
}

/// Serializes `node` into an [`io::Write`] sink. Serialization itself
/// cannot fail; only the sink can.
pub fn to_writer<W: io::Write>(mut writer: W, node: &Node) -> io::Result<()> {
    writer.write_all(to_string(node).as_bytes())
}

/// Writes `node` at the given indentation. Non-empty containers expand
/// to one entry per line; everything else is a single scalar token.
pub(crate) fn write_node<W: fmt::Write>(out: &mut W, node: &Node, indent: usize) -> fmt::Result {
    match node {
        Node::Dict(entries) if !entries.is_empty() => {
            for (key, value) in entries {
                write_indent(out, indent)?;
                out.write_str(key)?;
                out.write_char(':')?;
                write_entry(out, value, indent)?;
            }
            Ok(())
        }
        Node::List(items) if !items.is_empty() => {
            for item in items {
                write_indent(out, indent)?;
                out.write_char('-')?;
                write_entry(out, item, indent)?;
            }
            Ok(())
        }
        _ => write_scalar(out, node),
    }
}

/// Writes the value part of a `key:` or `-` entry: a nested block on
/// the following lines, or an inline scalar on the same line.
fn write_entry<W: fmt::Write>(out: &mut W, value: &Node, indent: usize) -> fmt::Result {
    let expands = match value {
        Node::Dict(entries) => !entries.is_empty(),
        Node::List(items) => !items.is_empty(),
        _ => false,
    };
    if expands {
        out.write_char('\n')?;
        write_node(out, value, indent + 2)
    } else {
        out.write_char(' ')?;
        write_scalar(out, value)?;
        out.write_char('\n')
    }
}

fn write_scalar<W: fmt::Write>(out: &mut W, node: &Node) -> fmt::Result {
    match node {
        Node::Nil => out.write_str("null"),
        Node::Bool(true) => out.write_str("true"),
        Node::Bool(false) => out.write_str("false"),
        Node::Number(value) => write_number(out, *value),
        Node::String(text) => {
            if needs_quotes(text) {
                write_quoted(out, text)
            } else {
                out.write_str(text)
            }
        }
        Node::Dict(_) => out.write_str("{}"),
        Node::List(_) => out.write_str("[]"),
    }
}

fn write_indent<W: fmt::Write>(out: &mut W, indent: usize) -> fmt::Result {
    for _ in 0..indent {
        out.write_char(' ')?;
    }
    Ok(())
}

/// Whole values within i64's exactly-representable range print without
/// a fractional part; specials use the `.inf` / `.nan` spellings the
/// resolver understands.
fn write_number<W: fmt::Write>(out: &mut W, value: f64) -> fmt::Result {
    if value.is_nan() {
        return out.write_str(".nan");
    }
    if value.is_infinite() {
        return out.write_str(if value > 0.0 { ".inf" } else { "-.inf" });
    }
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return write!(out, "{}", value as i64);
    }
    write!(out, "{}", value)
}

/// A string needs quoting when it contains syntax characters, or when
/// it would resolve back to something other than a string.
fn needs_quotes(text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    let has_syntax = text.bytes().any(|b| {
        b < 0x20
            || matches!(
                b,
                b' ' | b'\t'
                    | b':'
                    | b'-'
                    | b'#'
                    | b'['
                    | b']'
                    | b'{'
                    | b'}'
                    | b','
                    | b'\''
                    | b'"'
                    | b'\\'
            )
    });
    has_syntax || resolves_to_non_string(text)
}

fn resolves_to_non_string(text: &str) -> bool {
    let lower = text.to_ascii_lowercase();
    if matches!(
        lower.as_str(),
        "true" | "false" | "null" | "~" | ".inf" | "+.inf" | "-.inf" | ".nan"
    ) {
        return true;
    }
    let numeric: String = text.chars().filter(|&c| c != '_').collect();
    !numeric.is_empty() && numeric.parse::<f64>().is_ok()
}

fn write_quoted<W: fmt::Write>(out: &mut W, text: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in text.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            c if (c as u32) < 0x20 => write!(out, "\\u{:04x}", c as u32)?,
            c => out.write_char(c)?,
        }
    }
    out.write_char('"')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node, NodeMap};

    #[test]
    fn scalars() {
        assert_eq!(to_string(&Node::Nil), "null");
        assert_eq!(to_string(&Node::Bool(true)), "true");
        assert_eq!(to_string(&Node::from(42)), "42");
        assert_eq!(to_string(&Node::from(2.5)), "2.5");
        assert_eq!(to_string(&Node::from("plain")), "plain");
    }

    #[test]
    fn special_numbers() {
        assert_eq!(to_string(&Node::Number(f64::INFINITY)), ".inf");
        assert_eq!(to_string(&Node::Number(f64::NEG_INFINITY)), "-.inf");
        assert_eq!(to_string(&Node::Number(f64::NAN)), ".nan");
        assert_eq!(to_string(&Node::Number(1e20)), "100000000000000000000");
    }

    #[test]
    fn empty_containers_are_inline() {
        assert_eq!(to_string(&Node::List(Vec::new())), "[]");
        assert_eq!(to_string(&Node::Dict(NodeMap::new())), "{}");
        assert_eq!(to_string(&node!({"a": [], "b": {}})), "a: []\nb: {}\n");
    }

    #[test]
    fn nested_blocks_indent_by_two() {
        let tree = node!({"outer": {"inner": [1, 2]}});
        assert_eq!(to_string(&tree), "outer:\n  inner:\n    - 1\n    - 2\n");
    }

    #[test]
    fn strings_that_read_back_differently_are_quoted() {
        assert_eq!(to_string(&Node::from("true")), "\"true\"");
        assert_eq!(to_string(&Node::from("123")), "\"123\"");
        assert_eq!(to_string(&Node::from("1_000")), "\"1_000\"");
        assert_eq!(to_string(&Node::from(".NaN")), "\".NaN\"");
        assert_eq!(to_string(&Node::from("")), "\"\"");
    }

    #[test]
    fn strings_with_syntax_characters_are_quoted() {
        assert_eq!(to_string(&Node::from("a: b")), "\"a: b\"");
        assert_eq!(to_string(&Node::from("x # y")), "\"x # y\"");
        assert_eq!(to_string(&Node::from("line\nbreak")), "\"line\\nbreak\"");
    }

    #[test]
    fn control_characters_use_unicode_escapes() {
        assert_eq!(to_string(&Node::from("a\u{1}b")), "\"a\\u0001b\"");
    }

    #[test]
    fn plain_strings_stay_plain() {
        assert_eq!(to_string(&Node::from("hello")), "hello");
        assert_eq!(to_string(&Node::from("çédille")), "çédille");
    }
}
