//! Shared lexical scanning primitives.
//!
//! Comment stripping, colon finding, block-indicator detection and flow
//! gathering all need the same quote/escape bookkeeping: `''` escapes a
//! quote inside single-quoted text, `\x` skips the next character inside
//! double-quoted text, and nothing is significant while either quote is
//! open. Keeping one stepper here means the rules cannot drift apart
//! between call sites.
//!
//! All scanning is byte-oriented: every significant character is ASCII,
//! so UTF-8 continuation bytes pass through untouched.

/// Quote/escape state for a single left-to-right scan.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct QuoteState {
    in_single: bool,
    in_double: bool,
}

impl QuoteState {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// `true` while no quote is open.
    pub(crate) fn outside(&self) -> bool {
        !self.in_single && !self.in_double
    }

    /// Consumes the byte at `i`, updating quote state, and returns the
    /// index just past everything consumed (two bytes for a `''` or
    /// `\x` escape).
    pub(crate) fn advance(&mut self, bytes: &[u8], i: usize) -> usize {
        let ch = bytes[i];
        if ch == b'"' && !self.in_single {
            self.in_double = !self.in_double;
            return i + 1;
        }
        if ch == b'\'' && !self.in_double {
            if self.in_single && bytes.get(i + 1) == Some(&b'\'') {
                return i + 2;
            }
            self.in_single = !self.in_single;
            return i + 1;
        }
        if self.in_double && ch == b'\\' && i + 1 < bytes.len() {
            return i + 2;
        }
        i + 1
    }
}

/// The comment rule: `#` opens a comment only at position 0 or after
/// whitespace. Quote state is the caller's concern.
pub(crate) fn comment_starts_at(bytes: &[u8], pos: usize) -> bool {
    bytes[pos] == b'#' && (pos == 0 || bytes[pos - 1].is_ascii_whitespace())
}

/// Strips a trailing comment, applying [`comment_starts_at`] outside
/// quotes. Returns the prefix of `text` before the comment, or all of
/// `text` if there is none.
pub(crate) fn strip_comment(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut state = QuoteState::new();
    let mut i = 0;
    while i < bytes.len() {
        if state.outside() && comment_starts_at(bytes, i) {
            return &text[..i];
        }
        i = state.advance(bytes, i);
    }
    text
}

/// Finds the first `:` that sits outside quotes and is followed by
/// whitespace or the end of the line — a mapping separator position.
pub(crate) fn find_unescaped_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut state = QuoteState::new();
    let mut i = 0;
    while i < bytes.len() {
        if state.outside()
            && bytes[i] == b':'
            && (i + 1 == bytes.len() || bytes[i + 1].is_ascii_whitespace())
        {
            return Some(i);
        }
        i = state.advance(bytes, i);
    }
    None
}

/// Finds the first unquoted `|` or `>` at or after `start`.
pub(crate) fn find_block_indicator(text: &str, start: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut state = QuoteState::new();
    let mut i = start;
    while i < bytes.len() {
        if state.outside() && (bytes[i] == b'|' || bytes[i] == b'>') {
            return Some(i);
        }
        i = state.advance(bytes, i);
    }
    None
}

/// Strips leading and trailing spaces, tabs and carriage returns.
pub(crate) fn trim(text: &str) -> &str {
    text.trim_matches(|c| c == ' ' || c == '\t' || c == '\r')
}

/// 1-based column of byte offset `pos`, counting a tab as 4 columns.
pub(crate) fn compute_column(text: &str, pos: usize) -> usize {
    let mut col = 1;
    for &b in text.as_bytes().iter().take(pos) {
        col += if b == b'\t' { 4 } else { 1 };
    }
    col
}

/// Byte offset of the first character at or past `indent` columns,
/// counting a tab as 4 columns.
pub(crate) fn offset_for_indent(text: &str, indent: usize) -> usize {
    let bytes = text.as_bytes();
    let mut col = 0;
    let mut i = 0;
    while i < bytes.len() && col < indent {
        col += if bytes[i] == b'\t' { 4 } else { 1 };
        i += 1;
    }
    i
}

/// Byte offset of the first non-space, non-tab character at or past
/// `start`, if any.
pub(crate) fn skip_blanks(text: &str, start: usize) -> Option<usize> {
    text.as_bytes()
        .iter()
        .enumerate()
        .skip(start)
        .find(|(_, &b)| b != b' ' && b != b'\t')
        .map(|(i, _)| i)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_inside_quotes_is_not_a_comment() {
        assert_eq!(strip_comment(r#"key: "a # b" # tail"#), r#"key: "a # b" "#);
        assert_eq!(strip_comment("key: 'a # b' # tail"), "key: 'a # b' ");
    }

    #[test]
    fn hash_needs_leading_whitespace() {
        assert_eq!(strip_comment("a#b"), "a#b");
        assert_eq!(strip_comment("#whole line"), "");
        assert_eq!(strip_comment("a #b"), "a ");
    }

    #[test]
    fn doubled_single_quote_does_not_close() {
        assert_eq!(strip_comment("'it''s # fine' # gone"), "'it''s # fine' ");
    }

    #[test]
    fn escaped_quote_does_not_close() {
        assert_eq!(strip_comment(r#""a \" # b" # gone"#), r#""a \" # b" "#);
    }

    #[test]
    fn colon_inside_quotes_is_skipped() {
        assert_eq!(find_unescaped_colon(r#""a: b": 1"#), Some(6));
        assert_eq!(find_unescaped_colon("'a: b'"), None);
    }

    #[test]
    fn colon_requires_following_whitespace() {
        assert_eq!(find_unescaped_colon("http://host"), None);
        assert_eq!(find_unescaped_colon("key:"), Some(3));
        assert_eq!(find_unescaped_colon("key: value"), Some(3));
    }

    #[test]
    fn indicator_inside_quotes_is_skipped() {
        assert_eq!(find_block_indicator("key: '|'", 0), None);
        assert_eq!(find_block_indicator("key: |", 0), Some(5));
        assert_eq!(find_block_indicator("key: >-", 0), Some(5));
    }

    #[test]
    fn columns_expand_tabs() {
        assert_eq!(compute_column("\tx", 1), 5);
        assert_eq!(compute_column("abc", 2), 3);
        assert_eq!(offset_for_indent("\t  x", 6), 3);
    }
}
