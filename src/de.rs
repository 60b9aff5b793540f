//! Block parser: indentation-driven recursive descent over the line
//! index.
//!
//! A single cursor advances monotonically through the lines. Each level
//! of nesting is parsed at a fixed indentation; a deeper line opens a
//! child block and a shallower one returns control to the parent.
//! Sequences, mappings, block scalars and flow collections all dispatch
//! from here.

use crate::error::{Error, Result};
use crate::flow;
use crate::lines::{index_lines, Line};
use crate::map::NodeMap;
use crate::options::Options;
use crate::scalar;
use crate::scan;
use crate::Node;

/// Parses a complete document into a node tree.
pub(crate) fn parse_document(text: &str, options: &Options) -> Result<Node> {
    let mut parser = Parser {
        lines: index_lines(text),
        index: 0,
        options,
    };
    parser.parse()
}

struct Parser<'a> {
    lines: Vec<Line>,
    index: usize,
    options: &'a Options,
}

impl Parser<'_> {
    fn parse(&mut self) -> Result<Node> {
        self.skip_empty_lines();
        if self.index >= self.lines.len() {
            return Ok(Node::Nil);
        }
        let top_indent = self.lines[self.index].indent;
        let root = self.parse_block(top_indent, 0)?;

        self.skip_empty_lines();
        if self.index < self.lines.len() {
            let ln = &self.lines[self.index];
            // Anything deeper than the document is a dedent mistake;
            // anything at or above it is a second document fragment.
            if ln.indent > top_indent {
                return Err(Error::structural(ln.number, 1, "invalid indentation"));
            }
            return Err(Error::syntax(ln.number, 1, "unexpected trailing content"));
        }
        Ok(root)
    }

    /// Skips blank lines and the `---` / `...` document markers.
    fn skip_empty_lines(&mut self) {
        while self.index < self.lines.len() {
            let ln = &self.lines[self.index];
            if ln.is_blank() || ln.trimmed == "---" || ln.trimmed == "..." {
                self.index += 1;
            } else {
                break;
            }
        }
    }

    /// Skips blank lines only. Used when looking ahead for a nested
    /// block, where a document marker must end the construct rather
    /// than be consumed.
    fn skip_blank_lines(&mut self) {
        while self.index < self.lines.len() && self.lines[self.index].is_blank() {
            self.index += 1;
        }
    }

    fn is_sequence_line(&self, idx: usize, indent: usize) -> bool {
        let ln = &self.lines[idx];
        if ln.indent != indent {
            return false;
        }
        match scan::skip_blanks(&ln.stripped, 0) {
            Some(pos) => {
                let bytes = ln.stripped.as_bytes();
                bytes[pos] == b'-'
                    && (pos + 1 == bytes.len() || bytes[pos + 1].is_ascii_whitespace())
            }
            None => false,
        }
    }

    fn is_mapping_line(&self, idx: usize, indent: usize) -> bool {
        let ln = &self.lines[idx];
        ln.indent == indent && scan::find_unescaped_colon(&ln.stripped).is_some()
    }

    fn parse_block(&mut self, indent: usize, depth: usize) -> Result<Node> {
        self.skip_empty_lines();
        if self.index >= self.lines.len() {
            return Ok(Node::Nil);
        }
        let number = self.lines[self.index].number;
        if depth > self.options.max_depth {
            return Err(Error::structural(
                number,
                0,
                format!("nesting exceeds {} levels", self.options.max_depth),
            ));
        }
        if self.lines[self.index].indent < indent {
            return Err(Error::structural(number, 1, "invalid indentation"));
        }

        let at = self.lines[self.index].indent;
        if self.is_sequence_line(self.index, at) {
            return self.parse_sequence(at, depth);
        }
        if self.is_mapping_line(self.index, at) {
            return self.parse_mapping(at, depth);
        }

        // A bare value: block scalar, flow collection or plain scalar.
        let current = self.index;
        self.index = current + 1;
        let (first, pos) = {
            let ln = &self.lines[current];
            let pos = scan::skip_blanks(&ln.stripped, 0).unwrap_or(0);
            (ln.stripped.as_bytes().get(pos).copied(), pos)
        };
        match first {
            Some(b'|') | Some(b'>') => self.parse_block_scalar(current, pos),
            Some(b'[') | Some(b'{') => {
                let (node, next) =
                    flow::parse_collection(&self.lines, current, pos, self.options, depth)?;
                self.index = next;
                Ok(node)
            }
            _ => {
                let ln = &self.lines[current];
                let column = scan::compute_column(&ln.stripped, pos);
                scalar::resolve(&ln.trimmed, ln.number, column)
            }
        }
    }

    fn parse_sequence(&mut self, indent: usize, depth: usize) -> Result<Node> {
        let mut items = Vec::new();
        while self.index < self.lines.len() {
            if self.lines[self.index].is_blank() {
                self.index += 1;
                continue;
            }
            if !self.is_sequence_line(self.index, indent) {
                break;
            }
            let current = self.index;
            let (value_pos, number) = {
                let ln = &self.lines[current];
                let dash = match scan::skip_blanks(&ln.stripped, 0) {
                    Some(pos) => pos,
                    None => break,
                };
                (scan::skip_blanks(&ln.stripped, dash + 1), ln.number)
            };

            let mut element = Node::Nil;
            let mut element_initialized = false;
            match value_pos {
                None => {
                    self.index = current + 1;
                }
                Some(vp) => {
                    let rest = {
                        let ln = &self.lines[current];
                        scan::trim(&ln.stripped[vp..]).to_string()
                    };
                    if let Some(colon) = scan::find_unescaped_colon(&rest) {
                        // Inline `- key: value` starts a one-entry
                        // mapping that deeper lines may extend.
                        let key = scan::trim(&rest[..colon]).to_string();
                        if key.is_empty() {
                            let column =
                                scan::compute_column(&self.lines[current].stripped, vp);
                            return Err(Error::structural(
                                number,
                                column,
                                "empty key in sequence mapping",
                            ));
                        }
                        let inline_pos =
                            scan::skip_blanks(&self.lines[current].stripped, vp + colon + 1);
                        let mut entries = NodeMap::new();
                        let value = match inline_pos {
                            Some(pos) => self.parse_value(current, pos, indent, depth)?,
                            None => Node::Nil,
                        };
                        entries.insert(key, value);
                        element = Node::Dict(entries);
                    } else {
                        element = self.parse_value(current, vp, indent, depth)?;
                    }
                    element_initialized = true;
                    if self.index < current + 1 {
                        self.index = current + 1;
                    }
                }
            }

            // A deeper block after the item merges into it: dict keys
            // are inserted, list items appended, anything else replaces.
            self.skip_blank_lines();
            if self.index < self.lines.len() && self.lines[self.index].indent > indent {
                let nested_indent = self.lines[self.index].indent;
                let nested = self.parse_block(nested_indent, depth + 1)?;
                if !element_initialized || element.is_nil() {
                    element = nested;
                } else {
                    match (&mut element, nested) {
                        (Node::Dict(dst), Node::Dict(src)) => {
                            for (key, value) in src {
                                dst.insert(key, value);
                            }
                        }
                        (Node::List(dst), Node::List(mut src)) => {
                            dst.append(&mut src);
                        }
                        (slot, other) => *slot = other,
                    }
                }
            }
            items.push(element);
        }
        Ok(Node::List(items))
    }

    fn parse_mapping(&mut self, indent: usize, depth: usize) -> Result<Node> {
        let mut entries = NodeMap::new();
        while self.index < self.lines.len() {
            if self.lines[self.index].is_blank() {
                self.index += 1;
                continue;
            }
            if !self.is_mapping_line(self.index, indent) {
                break;
            }
            let current = self.index;
            let (key, value_pos, number) = {
                let ln = &self.lines[current];
                let colon = match scan::find_unescaped_colon(&ln.stripped) {
                    Some(pos) => pos,
                    None => break,
                };
                (
                    scan::trim(&ln.stripped[..colon]).to_string(),
                    scan::skip_blanks(&ln.stripped, colon + 1),
                    ln.number,
                )
            };
            if key.is_empty() {
                return Err(Error::structural(number, 1, "empty mapping key"));
            }

            if let Some(pos) = value_pos {
                let value = self.parse_value(current, pos, indent, depth)?;
                entries.insert(key, value);
                if self.index < current + 1 {
                    self.index = current + 1;
                }
                continue;
            }

            // `key:` with nothing after it takes the next deeper block
            // as its value, or nil when none follows.
            self.index = current + 1;
            self.skip_blank_lines();
            if self.index < self.lines.len() && self.lines[self.index].indent > indent {
                let nested_indent = self.lines[self.index].indent;
                let value = self.parse_block(nested_indent, depth + 1)?;
                entries.insert(key, value);
            } else {
                entries.insert(key, Node::Nil);
            }
        }
        Ok(Node::Dict(entries))
    }

    /// Parses the value that starts at byte `value_pos` of line
    /// `line_idx`. `indent` is the indentation of the owning construct.
    fn parse_value(
        &mut self,
        line_idx: usize,
        value_pos: usize,
        indent: usize,
        depth: usize,
    ) -> Result<Node> {
        let (value_text, column, number) = {
            let ln = &self.lines[line_idx];
            (
                scan::trim(&ln.stripped[value_pos..]).to_string(),
                scan::compute_column(&ln.stripped, value_pos),
                ln.number,
            )
        };

        if value_text.is_empty() {
            self.skip_blank_lines();
            if self.index < self.lines.len() && self.lines[self.index].indent > indent {
                let nested_indent = self.lines[self.index].indent;
                return self.parse_block(nested_indent, depth + 1);
            }
            return Ok(Node::Nil);
        }

        match value_text.as_bytes()[0] {
            b'|' | b'>' => self.parse_block_scalar(line_idx, value_pos),
            b'[' | b'{' => {
                // A flow value under a key or dash is one level deeper
                // than its owner, like a nested block.
                let (node, next) = flow::parse_collection(
                    &self.lines,
                    line_idx,
                    value_pos,
                    self.options,
                    depth + 1,
                )?;
                self.index = next;
                Ok(node)
            }
            _ => scalar::resolve(&value_text, number, column),
        }
    }

    /// Parses a `|` or `>` block scalar whose indicator sits at byte
    /// `indicator_pos` of line `line_idx`. Consumes the content lines
    /// and leaves the cursor on the first line past them.
    fn parse_block_scalar(&mut self, line_idx: usize, indicator_pos: usize) -> Result<Node> {
        let (literal, chomp, explicit, header_indent) = {
            let ln = &self.lines[line_idx];
            let bytes = ln.stripped.as_bytes();
            let literal = bytes[indicator_pos] == b'|';

            // Header suffix: `+`/`-` chomping (first one wins) and an
            // optional explicit indentation digit.
            let mut chomp = None;
            let mut explicit = 0usize;
            for &b in &bytes[indicator_pos + 1..] {
                match b {
                    b'+' | b'-' => {
                        if chomp.is_none() {
                            chomp = Some(b);
                        }
                    }
                    b'0'..=b'9' => {
                        explicit = explicit.saturating_mul(10).saturating_add(usize::from(b - b'0'));
                    }
                    b' ' | b'\t' => {}
                    _ => break,
                }
            }
            (literal, chomp, explicit, ln.indent)
        };

        let content_start = line_idx + 1;
        let mut content_indent = if explicit > 0 {
            header_indent.saturating_add(explicit)
        } else {
            0
        };

        // Without an explicit indicator, the first non-blank content
        // line fixes the indentation.
        let mut probe = content_start;
        if content_indent == 0 {
            while probe < self.lines.len() {
                let ln = &self.lines[probe];
                if ln.is_blank() {
                    probe += 1;
                    continue;
                }
                if ln.indent <= header_indent {
                    break;
                }
                content_indent = ln.indent;
                break;
            }
        }
        if content_indent == 0 {
            self.index = probe;
            return Ok(Node::String(String::new()));
        }

        let mut collected: Vec<String> = Vec::new();
        let mut idx = content_start;
        while idx < self.lines.len() {
            let ln = &self.lines[idx];
            if ln.indent < content_indent {
                if !ln.is_blank() {
                    break;
                }
                collected.push(String::new());
                idx += 1;
                continue;
            }
            let offset = scan::offset_for_indent(&ln.raw, content_indent).min(ln.raw.len());
            collected.push(ln.raw[offset..].to_string());
            idx += 1;
        }
        self.index = idx;

        if chomp != Some(b'+') {
            while collected.last().is_some_and(|s| s.is_empty()) {
                collected.pop();
            }
        }

        let mut text = String::new();
        if literal {
            text = collected.join("\n");
        } else {
            // Folded: single breaks become spaces; blank lines keep a
            // hard break and restart folding.
            let mut first = true;
            let mut previous_blank = false;
            for segment in &collected {
                if segment.is_empty() {
                    text.push('\n');
                    previous_blank = true;
                    first = false;
                    continue;
                }
                if !first && !previous_blank {
                    text.push(' ');
                }
                if previous_blank && !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
                text.push_str(segment);
                previous_blank = false;
                first = false;
            }
        }

        match chomp {
            Some(b'+') => text.push('\n'),
            Some(b'-') => {}
            _ => {
                if !text.is_empty() && !text.ends_with('\n') {
                    text.push('\n');
                }
            }
        }
        Ok(Node::String(text))
    }
}
