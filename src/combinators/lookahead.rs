//! Probing combinators that test input without permanently consuming it,
//! plus the forward-scanning family (`take_until`, `skip_until`,
//! `take_upto`, `parse_until_char`).

use crate::error::{ParseError, ParseErrorBundle};
use crate::fast::{FastCtx, FastResult, ParseFailed};
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::Span;
use crate::state::ParserState;

/// Run `p`; on success, yield `Some(value)` WITHOUT advancing past it. On
/// failure, yield `None` WITHOUT advancing and WITHOUT letting `p`'s
/// failure count toward the overall furthest-failure error.
pub fn lookahead<T: 'static>(p: Parser<T>) -> Parser<Option<T>> {
    let slow_p = p.clone();
    let run_slow = move |state: ParserState| {
        let (_after, outcome) = slow_p.run(state.clone());
        match outcome {
            Outcome::Success(v) => (state, Outcome::Success(Some(v))),
            Outcome::Failure(_) => (state, Outcome::Success(None)),
        }
    };
    let fast_p = p;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Option<T>> {
        let snapshot = ctx.snapshot();
        let error_snapshot = ctx.error_snapshot();
        let result = fast_p.exec_fast(ctx);
        ctx.restore(snapshot);
        match result {
            Ok(v) => Ok(Some(v)),
            Err(ParseFailed) => {
                ctx.restore_error_snapshot(error_snapshot);
                Ok(None)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Run `p` from the current position; succeed with `()` (without advancing)
/// if `p` fails, fail with a targeted error if `p` succeeds.
pub fn not_followed_by<T: 'static>(p: Parser<T>) -> Parser<()> {
    let slow_p = p.clone();
    let run_slow = move |state: ParserState| {
        let (_after, outcome) = slow_p.run(state.clone());
        match outcome {
            Outcome::Success(_) => {
                let span = Span::new(state.position(), 0);
                let err = ParseError::custom(span, "unexpected match".to_string(), vec![], state.label_stack().to_vec());
                (state.clone(), Outcome::Failure(ParseErrorBundle::single(err, state.source().to_string())))
            }
            Outcome::Failure(_) => (state, Outcome::Success(())),
        }
    };
    let fast_p = p;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<()> {
        let snapshot = ctx.snapshot();
        let error_snapshot = ctx.error_snapshot();
        let result = fast_p.exec_fast(ctx);
        ctx.restore(snapshot);
        match result {
            Ok(_) => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(ParseError::custom(span, "unexpected match".to_string(), vec![], vec![]));
                Err(ParseFailed)
            }
            Err(ParseFailed) => {
                ctx.restore_error_snapshot(error_snapshot);
                Ok(())
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Scan forward one character at a time, testing `p` at the current
/// position each step, until `p` would succeed or input is exhausted.
/// Returns the characters scanned (not including wherever `p` would match);
/// `p` is only probed, never actually consumed. Always succeeds, even at
/// EOF with nothing found.
pub fn take_until<T: 'static>(p: Parser<T>) -> Parser<String> {
    let slow_p = p.clone();
    let run_slow = move |mut state: ParserState| {
        let mut collected = String::new();
        loop {
            let (_after, probe) = slow_p.run(state.clone());
            if probe.is_success() {
                return (state, Outcome::Success(collected));
            }
            match state.remaining().chars().next() {
                Some(c) => {
                    let rest = &state.remaining()[..c.len_utf8()];
                    collected.push(c);
                    state = state.advance(rest);
                }
                None => return (state, Outcome::Success(collected)),
            }
        }
    };
    let fast_p = p;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<String> {
        let mut collected = String::new();
        loop {
            let snapshot = ctx.snapshot();
            let error_snapshot = ctx.error_snapshot();
            let probe = fast_p.exec_fast(ctx);
            ctx.restore(snapshot);
            if probe.is_ok() {
                ctx.restore_error_snapshot(error_snapshot);
                return Ok(collected);
            }
            ctx.restore_error_snapshot(error_snapshot);
            match ctx.remaining().chars().next() {
                Some(c) => {
                    collected.push(c);
                    ctx.advance_char(c);
                }
                None => return Ok(collected),
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// `take_until`, discarding the collected text.
pub fn skip_until<T: 'static>(p: Parser<T>) -> Parser<()> {
    take_until(p).map(|_| ())
}

/// Like `take_until`, but the cursor is left exactly where it started: a
/// pure peek at what comes before `p` would match.
pub fn take_upto<T: 'static>(p: Parser<T>) -> Parser<String> {
    let inner = take_until(p);
    let slow_inner = inner.clone();
    let run_slow = move |state: ParserState| {
        let (_after, outcome) = slow_inner.run(state.clone());
        (state, outcome)
    };
    let fast_inner = inner;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<String> {
        let snapshot = ctx.snapshot();
        let result = fast_inner.exec_fast(ctx);
        ctx.restore(snapshot);
        result
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Scan forward for a literal character `target`, returning everything
/// before it without consuming `target` itself. Unlike `take_until`, fails
/// if `target` is never found before end of input.
pub fn parse_until_char(target: char) -> Parser<String> {
    let run_slow = move |mut state: ParserState| {
        let mut collected = String::new();
        loop {
            match state.remaining().chars().next() {
                Some(c) if c == target => return (state, Outcome::Success(collected)),
                Some(c) => {
                    let rest = &state.remaining()[..c.len_utf8()];
                    collected.push(c);
                    state = state.advance(rest);
                }
                None => {
                    let span = Span::new(state.position(), 0);
                    let err = ParseError::expected(span, vec![format!("{target:?}")], state.label_stack().to_vec());
                    return (state.clone(), Outcome::Failure(ParseErrorBundle::single(err, state.source().to_string())));
                }
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<String> {
        let mut collected = String::new();
        loop {
            match ctx.remaining().chars().next() {
                Some(c) if c == target => return Ok(collected),
                Some(c) => {
                    collected.push(c);
                    ctx.advance_char(c);
                }
                None => {
                    let span = Span::new(ctx.position(), 0);
                    ctx.record_error(ParseError::expected(span, vec![format!("{target:?}")], vec![]));
                    return Err(ParseFailed);
                }
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}
