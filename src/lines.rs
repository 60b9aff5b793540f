//! Line index: the one-shot preprocessing pass over the raw document.
//!
//! Splits the input on `\n` (dropping `\r`) and records, per physical
//! line: the tab-expanded indentation, the raw text, a comment-stripped
//! copy, a trimmed copy and the 1-based line number. The pass also keeps
//! just enough state to know when a block scalar is open, because lines
//! inside a block scalar keep their text verbatim — a `#` in them is
//! content, not a comment.

use crate::scan;

/// One logical line of the document. Immutable once built; the block
/// parser walks these through a monotonically advancing cursor.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    /// Leading whitespace width in columns, tabs counted as 4.
    pub indent: usize,
    /// The line exactly as read (minus `\r`).
    pub raw: String,
    /// The line with any trailing comment removed, or the raw text
    /// verbatim for block-scalar content.
    pub stripped: String,
    /// `stripped` with surrounding whitespace removed.
    pub trimmed: String,
    /// 1-based source line number.
    pub number: usize,
}

impl Line {
    /// Blank or comment-only line.
    pub fn is_blank(&self) -> bool {
        self.trimmed.is_empty()
    }
}

/// Splits `text` into indexed lines. A terminating `\n` closes the last
/// line; it does not start an empty one.
pub(crate) fn index_lines(text: &str) -> Vec<Line> {
    let body = text.strip_suffix('\n').unwrap_or(text);
    let mut indexer = Indexer::default();
    if !body.is_empty() {
        for (offset, segment) in body.split('\n').enumerate() {
            indexer.add_line(segment, offset + 1);
        }
    }
    indexer.lines
}

#[derive(Default)]
struct Indexer {
    lines: Vec<Line>,
    in_block_scalar: bool,
    block_indent: usize,
}

impl Indexer {
    fn add_line(&mut self, segment: &str, number: usize) {
        let raw = if segment.contains('\r') {
            segment.replace('\r', "")
        } else {
            segment.to_string()
        };

        let mut indent = 0;
        for b in raw.bytes() {
            match b {
                b' ' => indent += 1,
                b'\t' => indent += 4,
                _ => break,
            }
        }

        let non_ws = raw
            .bytes()
            .position(|b| b != b' ' && b != b'\t' && b != b'\r');

        // Inside an open block scalar, sufficiently indented lines and
        // blank lines are content: comment stripping is suspended.
        let mut is_block_content = false;
        if self.in_block_scalar {
            if indent >= self.block_indent || non_ws.is_none() {
                is_block_content = true;
            } else {
                self.in_block_scalar = false;
            }
        }

        let stripped = if is_block_content {
            raw.clone()
        } else {
            scan::strip_comment(&raw).to_string()
        };
        let trimmed = scan::trim(&stripped).to_string();

        if !self.in_block_scalar {
            // Locate the line's value position: after the mapping colon,
            // else after a sequence dash, else the first non-blank
            // column. An unquoted `|`/`>` there opens a block scalar.
            let value_pos = match scan::find_unescaped_colon(&stripped) {
                Some(colon) => scan::skip_blanks(&stripped, colon + 1),
                None => match non_ws {
                    Some(pos) if stripped.as_bytes().get(pos) == Some(&b'-') => {
                        scan::skip_blanks(&stripped, pos + 1)
                    }
                    other => other,
                },
            };

            if let Some(pos) = value_pos {
                if let Some(indicator) = scan::find_block_indicator(&stripped, pos) {
                    self.in_block_scalar = true;
                    self.block_indent = compute_block_indent(&stripped, indicator, indent);
                }
            }
        }

        self.lines.push(Line {
            indent,
            raw,
            stripped,
            trimmed,
            number,
        });
    }
}

/// Indentation threshold of a freshly opened block scalar: an explicit
/// digit after the indicator sets `indent + digit`; otherwise default to
/// `indent + 1` (refined against actual content lines when the scalar
/// is parsed).
fn compute_block_indent(text: &str, indicator_pos: usize, indent: usize) -> usize {
    let bytes = text.as_bytes();
    let mut explicit = 0usize;
    let mut pos = indicator_pos + 1;
    while pos < bytes.len() {
        match bytes[pos] {
            b'+' | b'-' | b' ' | b'\t' => pos += 1,
            b @ b'0'..=b'9' => {
                explicit = explicit.saturating_mul(10).saturating_add(usize::from(b - b'0'));
                pos += 1;
            }
            _ => break,
        }
    }
    if explicit > 0 {
        indent.saturating_add(explicit)
    } else {
        indent + 1
    }
}
