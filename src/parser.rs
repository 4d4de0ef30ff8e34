//! The `Parser<T>` value type and its combinator methods.
//!
//! A `Parser<T>` is an immutable value: constructing one is cheap, and the
//! same `Parser` can be reused across any number of parses, even
//! concurrently, because nothing about it is mutated after construction.
//! Its identity is its behavior, carried as two closures — a slow runner
//! that threads an immutable `ParserState`, and an optional fast runner
//! that mutates a `FastCtx` in place. Every combinator method below builds
//! a new `Parser` by composing the closures of its inputs; none of them
//! mutate `self`.

use std::rc::Rc;

use crate::error::{ParseError, ParseErrorBundle};
use crate::fast::{FastCtx, FastResult, ParseFailed};
use crate::outcome::Outcome;
use crate::state::ParserState;

type SlowRunner<T> = Rc<dyn Fn(ParserState) -> (ParserState, Outcome<T>)>;
type FastRunner<T> = Rc<dyn for<'a> Fn(&mut FastCtx<'a>) -> FastResult<T>>;

/// A parser that recognizes some pattern in a `&str` and, on success,
/// produces a `T`.
pub struct Parser<T> {
    run_slow: SlowRunner<T>,
    run_fast: Option<FastRunner<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            run_slow: self.run_slow.clone(),
            run_fast: self.run_fast.clone(),
        }
    }
}

impl<T: 'static> Parser<T> {
    /// Build a parser from just a slow runner. `parse_fast` will still work
    /// on a parser built this way — it bridges through the slow path — but
    /// won't get the fast path's allocation-free hot loop.
    pub fn new(run_slow: impl Fn(ParserState) -> (ParserState, Outcome<T>) + 'static) -> Self {
        Parser { run_slow: Rc::new(run_slow), run_fast: None }
    }

    /// Build a parser with both a slow and a fast runner. The two must be
    /// observationally equivalent: same successes, same values, and
    /// equivalent furthest-failure errors.
    pub fn with_fast(
        run_slow: impl Fn(ParserState) -> (ParserState, Outcome<T>) + 'static,
        run_fast: impl for<'a> Fn(&mut FastCtx<'a>) -> FastResult<T> + 'static,
    ) -> Self {
        Parser {
            run_slow: Rc::new(run_slow),
            run_fast: Some(Rc::new(run_fast)),
        }
    }

    /// Run this parser against `state`, returning the resulting state and
    /// outcome. This is the slow-path entry point; see `Parser::exec_fast`
    /// for the fast-path equivalent.
    pub fn run(&self, state: ParserState) -> (ParserState, Outcome<T>) {
        (self.run_slow)(state)
    }

    /// Run this parser's fast path. If this parser has no dedicated fast
    /// runner, bridges through the slow path instead: reconstructs a
    /// `ParserState` from the context's current fields, runs `run_slow`,
    /// and copies the result back into the context. Every higher-order
    /// combinator calls this (rather than matching on `run_fast` directly)
    /// so a tree built from a mix of fast- and slow-only leaves still works
    /// end to end on `parse_fast`.
    pub fn exec_fast<'a>(&self, ctx: &mut FastCtx<'a>) -> FastResult<T> {
        if let Some(fast) = &self.run_fast {
            return fast(ctx);
        }
        let source: Rc<str> = Rc::from(ctx.source());
        let state = ParserState::at(source, ctx.position(), ctx.committed(), ctx.label_stack().to_vec());
        let (new_state, outcome) = self.run(state);
        ctx.seek(new_state.position());
        ctx.set_committed(new_state.committed());
        match outcome {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(bundle) => {
                for err in bundle.errors {
                    ctx.record_error(err);
                }
                Err(ParseFailed)
            }
        }
    }

    /// Transform a successful value with `f`. Cannot itself fail.
    pub fn map<U: 'static>(self, f: impl Fn(T) -> U + 'static) -> Parser<U> {
        let f = Rc::new(f);
        let slow_self = self.clone();
        let f_slow = f.clone();
        let run_slow = move |state: ParserState| {
            let (state, outcome) = slow_self.run(state);
            (state, outcome.map(|v| f_slow(v)))
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<U> {
            fast_self.exec_fast(ctx).map(|v| f(v))
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self`, then use its value to build and run a second parser.
    /// Failure in either phase propagates.
    pub fn flat_map<U: 'static>(self, f: impl Fn(T) -> Parser<U> + 'static) -> Parser<U> {
        let f = Rc::new(f);
        let slow_self = self.clone();
        let f_slow = f.clone();
        let run_slow = move |state: ParserState| {
            let (state, outcome) = slow_self.run(state);
            match outcome {
                Outcome::Success(v) => f_slow(v).run(state),
                Outcome::Failure(bundle) => (state, Outcome::Failure(bundle)),
            }
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<U> {
            let v = fast_self.exec_fast(ctx)?;
            f(v).exec_fast(ctx)
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self` then `other`; succeed with both values as a pair.
    pub fn zip<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        let slow_self = self.clone();
        let slow_other = other.clone();
        let run_slow = move |state: ParserState| {
            let (state, outcome) = slow_self.run(state);
            match outcome {
                Outcome::Success(a) => {
                    let (state, outcome) = slow_other.run(state);
                    match outcome {
                        Outcome::Success(b) => (state, Outcome::Success((a, b))),
                        Outcome::Failure(bundle) => (state, Outcome::Failure(bundle)),
                    }
                }
                Outcome::Failure(bundle) => (state, Outcome::Failure(bundle)),
            }
        };
        let fast_self = self;
        let fast_other = other;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<(T, U)> {
            let a = fast_self.exec_fast(ctx)?;
            let b = fast_other.exec_fast(ctx)?;
            Ok((a, b))
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self` then `other`, keeping only `other`'s value.
    pub fn then<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        self.zip(other).map(|(_, b)| b)
    }

    /// Run `self` then `other`, keeping only `self`'s value.
    pub fn then_discard<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        self.zip(other).map(|(a, _)| a)
    }

    /// Try `self`; if it fails without committing, try `alt` instead at the
    /// original position. If `self` fails having committed (or raised a
    /// `Fatal` error), the failure propagates without trying `alt` — this
    /// is the "cut" behavior.
    pub fn or(self, alt: Parser<T>) -> Parser<T> {
        let slow_left = self.clone();
        let slow_right = alt.clone();
        let run_slow = move |state: ParserState| {
            let (state_after, outcome) = slow_left.run(state.clone());
            match outcome {
                Outcome::Success(v) => (state_after, Outcome::Success(v)),
                Outcome::Failure(bundle) => {
                    if state_after.committed() || bundle.errors.iter().any(ParseError::is_fatal) {
                        (state_after, Outcome::Failure(bundle))
                    } else {
                        let (state2, outcome2) = slow_right.run(state);
                        match outcome2 {
                            Outcome::Success(v) => (state2, Outcome::Success(v)),
                            Outcome::Failure(bundle2) => (state2, Outcome::Failure(bundle.merge(bundle2))),
                        }
                    }
                }
            }
        };
        let fast_left = self;
        let fast_right = alt;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let snapshot = ctx.snapshot();
            match fast_left.exec_fast(ctx) {
                Ok(v) => Ok(v),
                Err(ParseFailed) => {
                    if ctx.committed() {
                        Err(ParseFailed)
                    } else {
                        ctx.restore(snapshot);
                        fast_right.exec_fast(ctx)
                    }
                }
            }
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self`; on success return `Some(value)` (still advancing the
    /// state). On uncommitted failure, return `None` at the original
    /// position. On committed failure, propagate it.
    pub fn optional(self) -> Parser<Option<T>> {
        let slow_self = self.clone();
        let run_slow = move |state: ParserState| {
            let (state_after, outcome) = slow_self.run(state.clone());
            match outcome {
                Outcome::Success(v) => (state_after, Outcome::Success(Some(v))),
                Outcome::Failure(bundle) => {
                    if state_after.committed() {
                        (state_after, Outcome::Failure(bundle))
                    } else {
                        (state, Outcome::Success(None))
                    }
                }
            }
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<Option<T>> {
            let snapshot = ctx.snapshot();
            match fast_self.exec_fast(ctx) {
                Ok(v) => Ok(Some(v)),
                Err(ParseFailed) => {
                    if ctx.committed() {
                        Err(ParseFailed)
                    } else {
                        ctx.restore(snapshot);
                        Ok(None)
                    }
                }
            }
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self`; on failure, fully discard any side effects — including
    /// the commit flag and label stack — and restore the pre-call state.
    /// Errors recorded during the attempt still count toward the
    /// furthest-failure tracker.
    pub fn atomic(self) -> Parser<T> {
        let slow_self = self.clone();
        let run_slow = move |state: ParserState| {
            let original = state.clone();
            let (state_after, outcome) = slow_self.run(state);
            match outcome {
                Outcome::Success(v) => (state_after, Outcome::Success(v)),
                Outcome::Failure(bundle) => (original, Outcome::Failure(bundle)),
            }
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let snapshot = ctx.snapshot();
            match fast_self.exec_fast(ctx) {
                Ok(v) => Ok(v),
                Err(ParseFailed) => {
                    ctx.restore(snapshot);
                    Err(ParseFailed)
                }
            }
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Run `self`; on success, mark the state as committed, preventing any
    /// enclosing `or`/`optional` from backtracking past this point. A
    /// no-op on failure.
    pub fn commit(self) -> Parser<T> {
        let slow_self = self.clone();
        let run_slow = move |state: ParserState| {
            let (state, outcome) = slow_self.run(state);
            match outcome {
                Outcome::Success(v) => (state.with_committed(true), Outcome::Success(v)),
                Outcome::Failure(bundle) => (state, Outcome::Failure(bundle)),
            }
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let v = fast_self.exec_fast(ctx)?;
            ctx.set_committed(true);
            Ok(v)
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Alias for `commit`, matching the vocabulary some PEG libraries use.
    pub fn cut(self) -> Parser<T> {
        self.commit()
    }

    /// Push `name` onto the active label stack for the duration of `self`,
    /// popping it regardless of outcome. Any error recorded while `self`
    /// runs carries a snapshot of the label stack at the moment it was
    /// recorded, giving nested labels a path like `["expr", "if", "cond"]`.
    pub fn label(self, name: impl Into<Rc<str>>) -> Parser<T> {
        let name: Rc<str> = name.into();
        let slow_name = name.clone();
        let slow_self = self.clone();
        let run_slow = move |state: ParserState| {
            let len_before = state.label_stack().len();
            let pushed = state.push_label(slow_name.clone());
            let (state_after, outcome) = slow_self.run(pushed);
            (state_after.truncate_label_stack(len_before), outcome)
        };
        let fast_name = name;
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let len_before = ctx.label_stack().len();
            ctx.push_label(fast_name.clone());
            let result = fast_self.exec_fast(ctx);
            ctx.truncate_label_stack(len_before);
            result
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Equivalent to `label(description)`, plus: on failure, collapse
    /// whatever was recorded into a single error reading "expected
    /// <description>" instead of the raw primitive's message.
    pub fn expect(self, description: impl Into<Rc<str>>) -> Parser<T> {
        let description: Rc<str> = description.into();
        let labeled = self.label(description.clone());

        let slow_labeled = labeled.clone();
        let slow_desc = description.clone();
        let run_slow = move |state: ParserState| {
            let (state_after, outcome) = slow_labeled.run(state);
            match outcome {
                Outcome::Success(v) => (state_after, Outcome::Success(v)),
                Outcome::Failure(bundle) => {
                    (state_after, Outcome::Failure(bundle.collapse_as_expected(&slow_desc)))
                }
            }
        };

        let fast_labeled = labeled;
        let fast_desc = description;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let entry_offset = ctx.offset();
            let previous = ctx.expect_message().cloned();
            ctx.set_expect_message(Some(fast_desc.clone()));
            let result = fast_labeled.exec_fast(ctx);
            ctx.set_expect_message(previous);
            if result.is_err() {
                ctx.rewrite_furthest_as_expected(entry_offset, &fast_desc);
            }
            result
        };

        Parser::with_fast(run_slow, run_fast)
    }

    /// Rewrite the error bundle produced on failure. A no-op on success.
    pub fn map_err(self, f: impl Fn(ParseErrorBundle) -> ParseErrorBundle + 'static) -> Parser<T> {
        let f = Rc::new(f);
        let slow_self = self.clone();
        let f_slow = f.clone();
        let run_slow = move |state: ParserState| {
            let (state, outcome) = slow_self.run(state);
            match outcome {
                Outcome::Success(v) => (state, Outcome::Success(v)),
                Outcome::Failure(bundle) => (state, Outcome::Failure(f_slow(bundle))),
            }
        };
        let fast_self = self;
        let run_fast = move |ctx: &mut FastCtx| -> FastResult<T> {
            let entry_offset = ctx.offset();
            let result = fast_self.exec_fast(ctx);
            if result.is_err() {
                if let Some(err) = ctx.error_if_at_least(entry_offset) {
                    let bundle = ParseErrorBundle::single(err, ctx.source().to_string());
                    let rewritten = f(bundle);
                    if let Some(first) = rewritten.errors.into_iter().next() {
                        ctx.replace_error(first);
                    }
                }
            }
            result
        };
        Parser::with_fast(run_slow, run_fast)
    }

    /// Skip leading whitespace before matching `self`.
    pub fn trim_left(self) -> Parser<T> {
        crate::primitives::skip_whitespace().then(self)
    }

    /// Skip trailing whitespace after matching `self`.
    pub fn trim_right(self) -> Parser<T> {
        self.then_discard(crate::primitives::skip_whitespace())
    }

    /// Skip leading and trailing whitespace around `self`.
    pub fn trim(self) -> Parser<T> {
        self.trim_left().trim_right()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::primitives::{char, digit, string};

    #[test]
    fn map_transforms_value() {
        let p = char('a').map(|c| c.to_ascii_uppercase());
        assert_parse_eq(&p, "a", 'A');
    }

    #[test]
    fn zip_requires_both() {
        let p = char('a').zip(char('b'));
        assert_parse_eq(&p, "ab", ('a', 'b'));
        assert_no_parse(&p, "ac");
    }

    #[test]
    fn then_and_then_discard_pick_a_side() {
        let p = char('a').then(char('b'));
        assert_parse_eq(&p, "ab", 'b');
        let p = char('a').then_discard(char('b'));
        assert_parse_eq(&p, "ab", 'a');
    }

    #[test]
    fn or_tries_second_only_without_commit() {
        let p = string("foo").atomic().or(string("for"));
        assert_parse_eq(&p, "for", "for".to_string());
    }

    #[test]
    fn or_respects_cut_after_commit() {
        let p = char('i').commit().then(char('f')).or(char('i').map(|_| 'x'));
        let result = p.run(crate::state::ParserState::new(std::rc::Rc::from("ix")));
        assert!(result.1.is_failure());
    }

    #[test]
    fn optional_advances_on_success_and_rewinds_on_failure() {
        let p = char('a').optional();
        let (state, outcome) = p.run(crate::state::ParserState::new(std::rc::Rc::from("a")));
        assert_eq!(state.offset(), 1);
        assert!(matches!(outcome, crate::outcome::Outcome::Success(Some('a'))));

        let p = char('a').optional();
        let (state, outcome) = p.run(crate::state::ParserState::new(std::rc::Rc::from("b")));
        assert_eq!(state.offset(), 0);
        assert!(matches!(outcome, crate::outcome::Outcome::Success(None)));
    }

    #[test]
    fn atomic_restores_commit_and_offset_on_failure() {
        let p = char('a').commit().then(char('z')).atomic();
        let (state, outcome) = p.run(crate::state::ParserState::new(std::rc::Rc::from("ax")));
        assert_eq!(state.offset(), 0);
        assert!(!state.committed());
        assert!(outcome.is_failure());
    }

    #[test]
    fn expect_collapses_to_single_targeted_message() {
        let p = digit().expect("a decimal digit");
        assert_parse_error(&p, "x", "expected a decimal digit");
    }

    #[test]
    fn label_stack_length_is_restored_after_running() {
        let p = char('a').label("letter a");
        let state = crate::state::ParserState::new(std::rc::Rc::from("a"));
        let before = state.label_stack().len();
        let (after, _) = p.run(state);
        assert_eq!(after.label_stack().len(), before);
    }

    #[test]
    fn fast_and_slow_paths_agree_on_success() {
        let digit_value = || digit().map(|c| c.to_digit(10).unwrap());
        let p = digit_value().zip(digit_value()).map(|(a, b)| a * 10 + b);
        assert_parse_eq(&p, "42", 42);
    }
}
