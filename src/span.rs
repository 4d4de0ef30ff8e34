//! Source positions and spans used to locate errors.

use serde::Serialize;

/// A single point within the source, in both byte-offset and line/column
/// form.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
/// `offset` is a byte offset into the source (so it can be used directly to
/// slice/index the underlying `str`); `\n` increments `line` and resets
/// `column` to 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourcePosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
    /// 0-based byte offset consumed.
    pub offset: usize,
}

impl SourcePosition {
    /// The position at the very start of a source: line 1, column 1, offset 0.
    pub fn start() -> Self {
        SourcePosition {
            line: 1,
            column: 1,
            offset: 0,
        }
    }

    /// Advance this position past `c`, following the line/column rules.
    /// `offset` moves by `c`'s UTF-8 byte length; `column` moves by one
    /// character regardless of its byte length.
    pub fn advance(&self, c: char) -> Self {
        if c == '\n' {
            SourcePosition {
                line: self.line + 1,
                column: 1,
                offset: self.offset + c.len_utf8(),
            }
        } else {
            SourcePosition {
                line: self.line,
                column: self.column + 1,
                offset: self.offset + c.len_utf8(),
            }
        }
    }

    /// Advance this position past an entire string, in character steps.
    pub fn advance_str(&self, s: &str) -> Self {
        let mut pos = *self;
        for c in s.chars() {
            pos = pos.advance(c);
        }
        pos
    }
}

/// A region of source text, used to point at an error or a successful match.
///
/// `length` is a byte length (matching how the span is sliced out of the
/// original `&str`); `line`/`column` describe the *start* of the span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the start of the span.
    pub offset: usize,
    /// Byte length of the span. Zero for a "point" failure, e.g. `char('x')`
    /// failing at a position without consuming anything.
    pub length: usize,
    /// 1-based line of the start of the span.
    pub line: usize,
    /// 1-based column of the start of the span.
    pub column: usize,
}

impl Span {
    /// Build a span of the given byte length starting at `position`.
    pub fn new(position: SourcePosition, length: usize) -> Self {
        Span {
            offset: position.offset,
            length,
            line: position.line,
            column: position.column,
        }
    }

    /// A zero-length span at a raw offset/line/column triple. Convenient for
    /// primitives that fail without having a full `SourcePosition` on hand.
    pub fn zero_width(offset: usize, line: usize, column: usize) -> Self {
        Span {
            offset,
            length: 0,
            line,
            column,
        }
    }

    /// The offset one past the end of this span.
    pub fn end_offset(&self) -> usize {
        self.offset + self.length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_newlines() {
        let start = SourcePosition::start();
        let after_a = start.advance('a');
        assert_eq!(after_a, SourcePosition { line: 1, column: 2, offset: 1 });

        let after_nl = after_a.advance('\n');
        assert_eq!(after_nl, SourcePosition { line: 2, column: 1, offset: 2 });
    }

    #[test]
    fn advance_str_matches_char_by_char_advance() {
        let start = SourcePosition::start();
        let whole = start.advance_str("ab\ncd");
        let mut stepped = start;
        for c in "ab\ncd".chars() {
            stepped = stepped.advance(c);
        }
        assert_eq!(whole, stepped);
    }

    #[test]
    fn span_end_offset_accounts_for_length() {
        let pos = SourcePosition { line: 3, column: 4, offset: 10 };
        let span = Span::new(pos, 5);
        assert_eq!(span.end_offset(), 15);
    }
}
