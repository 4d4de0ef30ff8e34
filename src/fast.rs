//! The mutable execution context used by the fast path.
//!
//! Unlike `ParserState`, `FastCtx` is mutated in place by every primitive
//! and combinator. It exists for the hot combinators (`char`, `digit`,
//! `many0` over a cheap pattern) where threading a fresh `ParserState`
//! value through every step would allocate more than the match itself
//! costs. A `FastCtx` is created once per call to `parse_fast` and
//! discarded when that call returns; it is never shared across parses.

use std::rc::Rc;

use crate::error::{ParseError, ParseErrorBundle};
use crate::span::SourcePosition;

/// Marker type standing in for the engine's `PARSE_FAILED` sentinel.
///
/// A fast-path runner's signature is conceptually `FastCtx -> T |
/// PARSE_FAILED`; in Rust that's `Result<T, ParseFailed>` (equivalently
/// `Option<T>`, but the named error type documents the intent at call
/// sites and lets `?` be used inside fast runners).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFailed;

/// Result type returned by a fast-path runner.
pub type FastResult<T> = Result<T, ParseFailed>;

/// A saved position used by `atomic`/`or` to backtrack on the fast path.
///
/// Deliberately does NOT snapshot `error`/`error_offset`: the furthest-
/// failure cursor survives backtracking, by design (spec: "errors recorded
/// during the attempt still contribute to the furthest-failure tracker").
#[derive(Debug, Clone, Copy)]
pub struct FastSnapshot {
    position: SourcePosition,
    committed: bool,
    label_stack_len: usize,
}

/// Mutable fast-path context: the source, a cursor, and the furthest-
/// failure tracker, all updated in place.
pub struct FastCtx<'s> {
    source: &'s str,
    position: SourcePosition,
    committed: bool,
    label_stack: Vec<Rc<str>>,
    error: Option<ParseError>,
    error_offset: usize,
    expect_message: Option<Rc<str>>,
}

impl<'s> FastCtx<'s> {
    /// Create a context for a fresh parse of `source`.
    pub fn new(source: &'s str) -> Self {
        FastCtx {
            source,
            position: SourcePosition::start(),
            committed: false,
            label_stack: Vec::new(),
            error: None,
            error_offset: 0,
            expect_message: None,
        }
    }

    /// The full source text.
    pub fn source(&self) -> &'s str {
        self.source
    }

    /// The current byte offset.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// The current line/column/offset triple.
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// The not-yet-consumed suffix of the source.
    pub fn remaining(&self) -> &'s str {
        &self.source[self.position.offset..]
    }

    /// True if the cursor is at the end of the source.
    pub fn at_eof(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    /// Whether the current alternative scope has committed.
    pub fn committed(&self) -> bool {
        self.committed
    }

    /// Set the commit flag. `commit()` only ever sets this to `true`;
    /// `atomic`'s restore is what can set it back to `false`.
    pub fn set_committed(&mut self, committed: bool) {
        self.committed = committed;
    }

    /// The label stack currently in effect.
    pub fn label_stack(&self) -> &[Rc<str>] {
        &self.label_stack
    }

    /// Push a label, entering a `label`/`expect` scope.
    pub fn push_label(&mut self, label: Rc<str>) {
        self.label_stack.push(label);
    }

    /// Truncate the label stack back to `len`, leaving the scope.
    pub fn truncate_label_stack(&mut self, len: usize) {
        self.label_stack.truncate(len);
    }

    /// Advance the cursor past `text`, which must be a prefix of
    /// `self.remaining()`.
    pub fn advance(&mut self, text: &str) {
        debug_assert!(self.remaining().starts_with(text));
        self.position = self.position.advance_str(text);
    }

    /// Advance the cursor past a single character.
    pub fn advance_char(&mut self, c: char) {
        self.position = self.position.advance(c);
    }

    /// Jump the cursor directly to `position`. Used when bridging to the
    /// slow path for a combinator that only implements `run_slow`.
    pub fn seek(&mut self, position: SourcePosition) {
        self.position = position;
    }

    /// Install an overriding message for the innermost `expect(...)` scope.
    pub fn set_expect_message(&mut self, message: Option<Rc<str>>) {
        self.expect_message = message;
    }

    /// The overriding message installed by the innermost `expect`, if any.
    pub fn expect_message(&self) -> Option<&Rc<str>> {
        self.expect_message.as_ref()
    }

    /// Record a candidate furthest-failure error. Replaces the tracked
    /// error only if `err`'s span is strictly further than what's tracked;
    /// ties keep the earlier record, per spec.
    pub fn record_error(&mut self, err: ParseError) {
        let offset = err.span().offset;
        if offset > self.error_offset || self.error.is_none() {
            self.replace_error(err.with_context_from(&self.label_stack));
        }
    }

    /// Unconditionally replace the tracked furthest error. Used by
    /// `expect`/`map_err` to rewrite the error they just caused, bypassing
    /// the normal furthest-wins comparison.
    pub fn replace_error(&mut self, err: ParseError) {
        self.error_offset = err.span().offset;
        self.error = Some(err);
    }

    /// The tracked furthest error, if its offset is at least `min_offset`.
    /// Used by `expect`/`map_err` to check whether the failure they just
    /// observed is the one currently tracked (and so safe to rewrite).
    pub fn error_if_at_least(&self, min_offset: usize) -> Option<ParseError> {
        match &self.error {
            Some(err) if err.span().offset >= min_offset => Some(err.clone()),
            _ => None,
        }
    }

    /// Snapshot the furthest-failure cursor itself, distinct from
    /// `snapshot`, which deliberately leaves it alone. Used by `lookahead`
    /// and `not_followed_by`, whose probing failures must never surface as
    /// the furthest failure of the overall parse.
    pub fn error_snapshot(&self) -> (Option<ParseError>, usize) {
        (self.error.clone(), self.error_offset)
    }

    /// Restore a cursor captured by `error_snapshot`.
    pub fn restore_error_snapshot(&mut self, snapshot: (Option<ParseError>, usize)) {
        self.error = snapshot.0;
        self.error_offset = snapshot.1;
    }

    /// Snapshot the backtrackable fields (not the furthest-error cursor).
    pub fn snapshot(&self) -> FastSnapshot {
        FastSnapshot {
            position: self.position,
            committed: self.committed,
            label_stack_len: self.label_stack.len(),
        }
    }

    /// Restore the backtrackable fields from a snapshot taken earlier in
    /// this same parse.
    pub fn restore(&mut self, snapshot: FastSnapshot) {
        self.position = snapshot.position;
        self.committed = snapshot.committed;
        self.label_stack.truncate(snapshot.label_stack_len);
    }

    /// If the tracked furthest error occurred at or after `min_offset`
    /// (i.e. it happened inside the scope that just finished), rewrite it
    /// to read "expected <description>". Backing implementation of the
    /// fast path's `Parser::expect`.
    pub fn rewrite_furthest_as_expected(&mut self, min_offset: usize, description: &str) {
        if let Some(err) = self.error_if_at_least(min_offset) {
            self.replace_error(err.rewrite_as_expected(description));
        }
    }

    /// Build a single-error bundle from the furthest-failure cursor. Used
    /// by `parse_fast` when the top-level parser fails.
    pub fn to_bundle(&self) -> ParseErrorBundle {
        match &self.error {
            Some(err) => ParseErrorBundle::single(err.clone(), self.source.to_string()),
            None => ParseErrorBundle::single(
                ParseError::custom(
                    crate::span::Span::new(self.position, 0),
                    "parse failed".to_string(),
                    vec![],
                    vec![],
                ),
                self.source.to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    #[test]
    fn record_error_keeps_furthest() {
        let mut ctx = FastCtx::new("abc");
        ctx.record_error(ParseError::expected(Span::zero_width(1, 1, 2), vec!["a".into()], vec![]));
        ctx.record_error(ParseError::expected(Span::zero_width(0, 1, 1), vec!["b".into()], vec![]));
        assert_eq!(ctx.to_bundle().primary().unwrap().span().offset, 1);
    }

    #[test]
    fn record_error_ties_keep_earlier() {
        let mut ctx = FastCtx::new("abc");
        ctx.record_error(ParseError::expected(Span::zero_width(1, 1, 2), vec!["a".into()], vec![]));
        ctx.record_error(ParseError::expected(Span::zero_width(1, 1, 2), vec!["b".into()], vec![]));
        match ctx.to_bundle().primary().unwrap() {
            ParseError::Expected { items, .. } => assert_eq!(items[0], "a"),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn snapshot_restore_does_not_touch_error_cursor() {
        let mut ctx = FastCtx::new("abc");
        ctx.record_error(ParseError::expected(Span::zero_width(2, 1, 3), vec!["z".into()], vec![]));
        let snap = ctx.snapshot();
        ctx.advance("a");
        ctx.set_committed(true);
        ctx.restore(snap);
        assert_eq!(ctx.offset(), 0);
        assert!(!ctx.committed());
        assert_eq!(ctx.to_bundle().primary().unwrap().span().offset, 2);
    }
}
