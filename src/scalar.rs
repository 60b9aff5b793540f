//! Scalar resolution: classifying a trimmed token as null, boolean,
//! number or string.
//!
//! Quoted tokens decode their escapes; everything else resolves by
//! case-insensitive keyword (`true`, `null`, `.inf`, ...) and then by a
//! full, locale-independent numeric parse with `_` separators removed.
//! A token that matches nothing stays a string, keeping its original
//! (non-lowered) spelling.

use crate::error::{Error, Result};
use crate::scan;
use crate::Node;

/// Resolves one trimmed scalar token. `line`/`column` locate the token
/// for error reporting.
pub(crate) fn resolve(token: &str, line: usize, column: usize) -> Result<Node> {
    let trimmed = scan::trim(token);
    if trimmed.is_empty() {
        return Ok(Node::Nil);
    }

    // A token opening with a quote must close with one; falling through
    // to a plain string would hide the mistake.
    if trimmed.starts_with('"') {
        return decode_double_quoted(trimmed, line, column).map(Node::String);
    }
    if trimmed.starts_with('\'') {
        return decode_single_quoted(trimmed, line, column).map(Node::String);
    }

    let lower = trimmed.to_ascii_lowercase();
    match lower.as_str() {
        "true" => return Ok(Node::Bool(true)),
        "false" => return Ok(Node::Bool(false)),
        "null" | "~" => return Ok(Node::Nil),
        ".inf" | "+.inf" => return Ok(Node::Number(f64::INFINITY)),
        "-.inf" => return Ok(Node::Number(f64::NEG_INFINITY)),
        ".nan" => return Ok(Node::Number(f64::NAN)),
        _ => {}
    }

    let numeric: String = trimmed.chars().filter(|&c| c != '_').collect();
    if !numeric.is_empty() {
        if let Ok(value) = numeric.parse::<f64>() {
            return Ok(Node::Number(value));
        }
    }

    Ok(Node::String(trimmed.to_string()))
}

/// Decodes a double-quoted token (quotes included) with C-style escapes.
pub(crate) fn decode_double_quoted(text: &str, line: usize, column: usize) -> Result<String> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != b'"' {
        return Err(Error::syntax(
            line,
            column,
            "unterminated double-quoted string",
        ));
    }

    let inner = &bytes[1..bytes.len() - 1];
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        if inner[i] != b'\\' {
            out.push(inner[i]);
            i += 1;
            continue;
        }
        if i + 1 >= inner.len() {
            return Err(Error::syntax(line, column + i, "bad escape sequence"));
        }
        let escape = inner[i + 1];
        i += 2;
        match escape {
            b'n' => out.push(b'\n'),
            b'r' => out.push(b'\r'),
            b't' => out.push(b'\t'),
            b'"' => out.push(b'"'),
            b'\\' => out.push(b'\\'),
            b'b' => out.push(0x08),
            b'f' => out.push(0x0C),
            b'0' => out.push(0),
            b'u' => {
                if i + 4 > inner.len() {
                    return Err(Error::syntax(line, column + i, "incomplete unicode escape"));
                }
                let hex = std::str::from_utf8(&inner[i..i + 4])
                    .map_err(|_| Error::syntax(line, column + i, "invalid unicode escape"))?;
                let code = u32::from_str_radix(hex, 16)
                    .map_err(|_| Error::syntax(line, column + i, "invalid unicode escape"))?;
                let ch = char::from_u32(code)
                    .ok_or_else(|| Error::syntax(line, column + i, "invalid unicode escape"))?;
                let mut buf = [0u8; 4];
                out.extend_from_slice(ch.encode_utf8(&mut buf).as_bytes());
                i += 4;
            }
            _ => {
                return Err(Error::syntax(line, column + i, "invalid escape sequence"));
            }
        }
    }

    String::from_utf8(out).map_err(|_| Error::syntax(line, column, "invalid utf-8 in string"))
}

/// Decodes a single-quoted token (quotes included); the only escape is
/// `''` for a literal quote.
pub(crate) fn decode_single_quoted(text: &str, line: usize, column: usize) -> Result<String> {
    let bytes = text.as_bytes();
    if bytes.len() < 2 || bytes[bytes.len() - 1] != b'\'' {
        return Err(Error::syntax(
            line,
            column,
            "unterminated single-quoted string",
        ));
    }

    let inner = &bytes[1..bytes.len() - 1];
    let mut out: Vec<u8> = Vec::with_capacity(inner.len());
    let mut i = 0;
    while i < inner.len() {
        if inner[i] == b'\'' && inner.get(i + 1) == Some(&b'\'') {
            out.push(b'\'');
            i += 2;
        } else {
            out.push(inner[i]);
            i += 1;
        }
    }

    String::from_utf8(out).map_err(|_| Error::syntax(line, column, "invalid utf-8 in string"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(token: &str) -> Node {
        resolve(token, 1, 1).unwrap()
    }

    #[test]
    fn keywords_resolve_case_insensitively() {
        assert_eq!(node("true"), Node::Bool(true));
        assert_eq!(node("FALSE"), Node::Bool(false));
        assert_eq!(node("null"), Node::Nil);
        assert_eq!(node("~"), Node::Nil);
        assert_eq!(node(""), Node::Nil);
    }

    #[test]
    fn special_floats() {
        assert_eq!(node(".inf"), Node::Number(f64::INFINITY));
        assert_eq!(node("+.Inf"), Node::Number(f64::INFINITY));
        assert_eq!(node("-.inf"), Node::Number(f64::NEG_INFINITY));
        assert!(matches!(node(".nan"), Node::Number(n) if n.is_nan()));
    }

    #[test]
    fn numbers_with_separators() {
        assert_eq!(node("1_000_000"), Node::Number(1_000_000.0));
        assert_eq!(node("-2.5"), Node::Number(-2.5));
        assert_eq!(node("1e3"), Node::Number(1000.0));
    }

    #[test]
    fn partial_numbers_stay_strings() {
        assert_eq!(node("12ab"), Node::String("12ab".to_string()));
        assert_eq!(node("-"), Node::String("-".to_string()));
        assert_eq!(node("_"), Node::String("_".to_string()));
    }

    #[test]
    fn strings_keep_their_original_case() {
        assert_eq!(node("Hello"), Node::String("Hello".to_string()));
        assert_eq!(node("TrueNorth"), Node::String("TrueNorth".to_string()));
    }

    #[test]
    fn double_quoted_escapes() {
        assert_eq!(node(r#""a\nb""#), Node::String("a\nb".to_string()));
        assert_eq!(node(r#""tab\there""#), Node::String("tab\there".to_string()));
        assert_eq!(node(r#""é""#), Node::String("é".to_string()));
        assert_eq!(node(r#""中""#), Node::String("中".to_string()));
    }

    #[test]
    fn single_quoted_doubling() {
        assert_eq!(node("'it''s'"), Node::String("it's".to_string()));
        assert_eq!(node("'no \\n escape'"), Node::String("no \\n escape".to_string()));
    }

    #[test]
    fn unterminated_quotes_error() {
        assert!(resolve("\"abc", 3, 5).unwrap_err().is_syntax());
        assert!(resolve("'abc", 3, 5).unwrap_err().is_syntax());
        assert_eq!(resolve("\"abc", 3, 5).unwrap_err().location(), Some((3, 5)));
    }

    #[test]
    fn bad_escapes_error() {
        assert!(resolve(r#""\q""#, 1, 1).is_err());
        assert!(resolve(r#""\u12""#, 1, 1).is_err());
        assert!(resolve(r#""\u12zz""#, 1, 1).is_err());
        assert!(resolve(r#""trailing\""#, 1, 1).is_err());
    }

    #[test]
    fn quoted_literals_stay_strings() {
        assert_eq!(node("\"true\""), Node::String("true".to_string()));
        assert_eq!(node("'123'"), Node::String("123".to_string()));
    }
}
