//! Flow collections: `[a, b]` and `{k: v}` values, possibly spanning
//! several physical lines.
//!
//! Parsing happens in two stages. [`gather`] walks the raw line text
//! with a bracket stack and the shared quote state, joining lines with
//! `\n` until the opening bracket is balanced. [`FlowParser`] then
//! consumes the gathered text with a plain cursor, tracking line and
//! column so errors still point into the original document.

use crate::error::{Error, Result};
use crate::lines::Line;
use crate::map::NodeMap;
use crate::options::Options;
use crate::scalar;
use crate::scan::{self, QuoteState};
use crate::Node;

/// Parses the flow collection that opens at byte `value_pos` of line
/// `start_idx`. Returns the parsed node and the index of the first line
/// past the collection.
pub(crate) fn parse_collection(
    lines: &[Line],
    start_idx: usize,
    value_pos: usize,
    options: &Options,
    depth: usize,
) -> Result<(Node, usize)> {
    let header = &lines[start_idx];
    let opener = header.stripped.as_bytes().get(value_pos);
    if opener != Some(&b'[') && opener != Some(&b'{') {
        return Err(Error::syntax(
            header.number,
            scan::compute_column(&header.stripped, value_pos),
            "flow collection must start with '[' or '{'",
        ));
    }

    let start_column = scan::compute_column(&header.stripped, value_pos);
    let (text, next_idx) = gather(lines, start_idx, value_pos)?;

    let mut parser = FlowParser::new(&text, header.number, start_column, options);
    let value = parser.parse_value(depth)?;
    parser.expect_end()?;
    Ok((value, next_idx))
}

/// Collects the raw text of a flow collection, starting at `start_pos`
/// on line `start_idx` and ending where the bracket stack empties.
/// Physical line breaks become `\n`; a comment ends a line's
/// contribution. Returns the text and the index past the last consumed
/// line.
fn gather(lines: &[Line], start_idx: usize, start_pos: usize) -> Result<(String, usize)> {
    let mut stack: Vec<u8> = Vec::new();
    let mut state = QuoteState::new();
    let mut buffer: Vec<u8> = Vec::new();

    let mut idx = start_idx;
    while idx < lines.len() {
        let ln = &lines[idx];
        let bytes = ln.raw.as_bytes();
        let mut pos = if idx == start_idx { start_pos } else { 0 };
        while pos < bytes.len() {
            let ch = bytes[pos];
            if state.outside() {
                if scan::comment_starts_at(bytes, pos) {
                    break;
                }
                match ch {
                    b'[' => stack.push(b']'),
                    b'{' => stack.push(b'}'),
                    b']' | b'}' => {
                        if stack.last() != Some(&ch) {
                            return Err(Error::syntax(
                                ln.number,
                                scan::compute_column(&ln.raw, pos),
                                "unmatched closing bracket",
                            ));
                        }
                        stack.pop();
                        if stack.is_empty() {
                            buffer.push(ch);
                            let tail = scan::trim(scan::strip_comment(&ln.raw[pos + 1..]));
                            if !tail.is_empty() {
                                return Err(Error::syntax(
                                    ln.number,
                                    scan::compute_column(&ln.raw, pos + 1),
                                    "unexpected text after flow collection",
                                ));
                            }
                            let text = String::from_utf8(buffer).map_err(|_| {
                                Error::syntax(ln.number, 0, "invalid utf-8 in flow collection")
                            })?;
                            return Ok((text, idx + 1));
                        }
                    }
                    _ => {}
                }
            }
            let next = state.advance(bytes, pos);
            buffer.extend_from_slice(&bytes[pos..next]);
            pos = next;
        }
        buffer.push(b'\n');
        idx += 1;
    }

    let start = &lines[start_idx];
    Err(Error::syntax(
        start.number,
        scan::compute_column(&start.raw, start_pos),
        "unterminated flow collection",
    ))
}

/// Cursor parser over gathered flow text. Line and column start at the
/// collection's position in the source document and advance as the
/// cursor crosses the `\n` markers [`gather`] inserted.
struct FlowParser<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
    column: usize,
    max_depth: usize,
}

impl<'a> FlowParser<'a> {
    fn new(src: &'a str, line: usize, column: usize, options: &Options) -> Self {
        FlowParser {
            src,
            pos: 0,
            line,
            column,
            max_depth: options.max_depth,
        }
    }

    fn eof(&self) -> bool {
        self.pos >= self.src.len()
    }

    fn peek(&self) -> u8 {
        self.src.as_bytes().get(self.pos).copied().unwrap_or(0)
    }

    fn bump(&mut self) -> u8 {
        let ch = self.src.as_bytes()[self.pos];
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        ch
    }

    fn fail(&self, msg: &str) -> Error {
        Error::syntax(self.line, self.column, msg)
    }

    fn skip_ws(&mut self) {
        while !self.eof() && matches!(self.peek(), b' ' | b'\t' | b'\r' | b'\n') {
            self.bump();
        }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Node> {
        if depth > self.max_depth {
            return Err(Error::structural(
                self.line,
                self.column,
                format!("nesting exceeds {} levels", self.max_depth),
            ));
        }
        self.skip_ws();
        match self.peek() {
            b'[' => self.parse_array(depth),
            b'{' => self.parse_object(depth),
            b'"' => self.parse_double_quoted(),
            b'\'' => self.parse_single_quoted(),
            _ => self.parse_plain_scalar(),
        }
    }

    fn parse_array(&mut self, depth: usize) -> Result<Node> {
        let mut items = Vec::new();
        self.bump();
        self.skip_ws();
        if self.peek() == b']' {
            self.bump();
            return Ok(Node::List(items));
        }
        loop {
            if self.eof() {
                return Err(self.fail("expected ',' or ']'"));
            }
            items.push(self.parse_value(depth + 1)?);
            self.skip_ws();
            match self.peek() {
                b',' => {
                    self.bump();
                }
                b']' => {
                    self.bump();
                    break;
                }
                _ => return Err(self.fail("expected ',' or ']'")),
            }
        }
        Ok(Node::List(items))
    }

    fn parse_object(&mut self, depth: usize) -> Result<Node> {
        let mut entries = NodeMap::new();
        self.bump();
        self.skip_ws();
        if self.peek() == b'}' {
            self.bump();
            return Ok(Node::Dict(entries));
        }
        loop {
            if self.eof() {
                return Err(self.fail("expected ',' or '}' in flow map"));
            }
            let key_line = self.line;
            let key_column = self.column;
            let key = match self.parse_value(depth + 1)? {
                Node::String(key) => key,
                _ => {
                    return Err(Error::structural(
                        key_line,
                        key_column,
                        "flow map keys must be strings",
                    ))
                }
            };
            self.skip_ws();
            if self.peek() != b':' {
                return Err(self.fail("expected ':' in flow map"));
            }
            self.bump();
            let value = self.parse_value(depth + 1)?;
            entries.insert(key, value);
            self.skip_ws();
            match self.peek() {
                b',' => {
                    self.bump();
                    self.skip_ws();
                }
                b'}' => {
                    self.bump();
                    break;
                }
                _ => return Err(self.fail("expected ',' or '}' in flow map")),
            }
        }
        Ok(Node::Dict(entries))
    }

    fn parse_double_quoted(&mut self) -> Result<Node> {
        let start = self.pos;
        let start_line = self.line;
        let start_column = self.column;
        self.bump();
        while !self.eof() {
            match self.bump() {
                b'"' => {
                    let token = &self.src[start..self.pos];
                    return scalar::decode_double_quoted(token, start_line, start_column)
                        .map(Node::String);
                }
                b'\\' if !self.eof() => {
                    self.bump();
                }
                _ => {}
            }
        }
        Err(Error::syntax(start_line, start_column, "unterminated string"))
    }

    fn parse_single_quoted(&mut self) -> Result<Node> {
        let start = self.pos;
        let start_line = self.line;
        let start_column = self.column;
        self.bump();
        while !self.eof() {
            if self.bump() == b'\'' {
                if self.peek() == b'\'' {
                    self.bump();
                } else {
                    let token = &self.src[start..self.pos];
                    return scalar::decode_single_quoted(token, start_line, start_column)
                        .map(Node::String);
                }
            }
        }
        Err(Error::syntax(start_line, start_column, "unterminated string"))
    }

    fn parse_plain_scalar(&mut self) -> Result<Node> {
        let start = self.pos;
        let start_line = self.line;
        let start_column = self.column;
        while !self.eof() {
            match self.peek() {
                b',' | b']' | b'}' | b'\n' => break,
                // A colon ends the token only when followed by
                // whitespace or a delimiter, so `http://host` survives.
                b':' => {
                    let next = self.src.as_bytes().get(self.pos + 1);
                    match next {
                        Some(&b)
                            if !b.is_ascii_whitespace()
                                && !matches!(b, b',' | b']' | b'}') =>
                        {
                            self.bump();
                        }
                        _ => break,
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
        scalar::resolve(&self.src[start..self.pos], start_line, start_column)
    }

    fn expect_end(&mut self) -> Result<()> {
        self.skip_ws();
        if !self.eof() {
            return Err(self.fail("unexpected content in flow value"));
        }
        Ok(())
    }
}
