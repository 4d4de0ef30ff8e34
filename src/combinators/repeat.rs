//! Repetition combinators: `many0`, `many1`, `many_n`, `many_n_exact`,
//! `count`, and their skip-the-results variants.

use crate::error::{ParseError, ParseErrorBundle};
use crate::fast::{FastCtx, FastResult, ParseFailed};
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::Span;
use crate::state::ParserState;

/// Run `p` zero or more times, collecting successes into a `Vec`, stopping
/// at the first uncommitted failure. A committed failure (or a `Fatal`
/// error) propagates instead of ending the loop.
///
/// Panics if `p` succeeds without advancing the cursor — that is a bug in
/// `p`, not a parse failure, and looping forever is worse than crashing.
pub fn many0<T: 'static>(p: Parser<T>) -> Parser<Vec<T>> {
    let slow_p = p.clone();
    let run_slow = move |mut state: ParserState| {
        let mut results = Vec::new();
        loop {
            let before = state.offset();
            let (state_after, outcome) = slow_p.run(state.clone());
            match outcome {
                Outcome::Success(v) => {
                    assert!(
                        state_after.offset() > before,
                        "many0: parser did not advance the input at offset {before}"
                    );
                    results.push(v);
                    state = state_after;
                }
                Outcome::Failure(bundle) => {
                    if state_after.committed() || bundle.errors.iter().any(ParseError::is_fatal) {
                        return (state_after, Outcome::Failure(bundle));
                    }
                    return (state, Outcome::Success(results));
                }
            }
        }
    };
    let fast_p = p;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Vec<T>> {
        let mut results = Vec::new();
        loop {
            let before = ctx.offset();
            let snapshot = ctx.snapshot();
            match fast_p.exec_fast(ctx) {
                Ok(v) => {
                    assert!(
                        ctx.offset() > before,
                        "many0: parser did not advance the input at offset {before}"
                    );
                    results.push(v);
                }
                Err(ParseFailed) => {
                    if ctx.committed() {
                        return Err(ParseFailed);
                    }
                    ctx.restore(snapshot);
                    return Ok(results);
                }
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Like `many0`, but fails if `p` never succeeds.
pub fn many1<T: 'static>(p: Parser<T>) -> Parser<Vec<T>> {
    p.clone().zip(many0(p)).map(|(first, mut rest)| {
        rest.insert(0, first);
        rest
    })
}

/// Run `p` via `many0`, then require at least `n` successes. On a shortfall,
/// fails with a `Custom` error at the position the loop stopped.
pub fn many_n<T: 'static>(p: Parser<T>, n: usize) -> Parser<Vec<T>> {
    let inner = many0(p);
    let slow_inner = inner.clone();
    let run_slow = move |state: ParserState| {
        let (state_after, outcome) = slow_inner.run(state);
        match outcome {
            Outcome::Success(results) if results.len() >= n => (state_after, Outcome::Success(results)),
            Outcome::Success(results) => {
                let span = Span::new(state_after.position(), 0);
                let err = ParseError::custom(
                    span,
                    format!("expected at least {n} matches, found {}", results.len()),
                    vec![],
                    state_after.label_stack().to_vec(),
                );
                (state_after.clone(), Outcome::Failure(ParseErrorBundle::single(err, state_after.source().to_string())))
            }
            Outcome::Failure(bundle) => (state_after, Outcome::Failure(bundle)),
        }
    };
    let fast_inner = inner;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Vec<T>> {
        let results = fast_inner.exec_fast(ctx)?;
        if results.len() >= n {
            Ok(results)
        } else {
            let span = Span::new(ctx.position(), 0);
            ctx.record_error(ParseError::custom(
                span,
                format!("expected at least {n} matches, found {}", results.len()),
                vec![],
                vec![],
            ));
            Err(ParseFailed)
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Run `p` via `many0`, then require exactly `n` successes. A count
/// mismatch is a `Fatal` error: it short-circuits any enclosing `or` rather
/// than letting an alternative silently try something else.
pub fn many_n_exact<T: 'static>(p: Parser<T>, n: usize) -> Parser<Vec<T>> {
    let inner = many0(p);
    let slow_inner = inner.clone();
    let run_slow = move |state: ParserState| {
        let (state_after, outcome) = slow_inner.run(state);
        match outcome {
            Outcome::Success(results) if results.len() == n => (state_after, Outcome::Success(results)),
            Outcome::Success(results) => {
                let span = Span::new(state_after.position(), 0);
                let err = ParseError::fatal(
                    span,
                    format!("expected exactly {n} matches, found {}", results.len()),
                    state_after.label_stack().to_vec(),
                );
                let failed_state = state_after.with_committed(true);
                (failed_state.clone(), Outcome::Failure(ParseErrorBundle::single(err, failed_state.source().to_string())))
            }
            Outcome::Failure(bundle) => (state_after, Outcome::Failure(bundle)),
        }
    };
    let fast_inner = inner;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Vec<T>> {
        let results = fast_inner.exec_fast(ctx)?;
        if results.len() == n {
            Ok(results)
        } else {
            let span = Span::new(ctx.position(), 0);
            ctx.record_error(ParseError::fatal(
                span,
                format!("expected exactly {n} matches, found {}", results.len()),
                vec![],
            ));
            ctx.set_committed(true);
            Err(ParseFailed)
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Run `p` exactly `n` times; unlike `many_n`, any failure (even
/// uncommitted) is terminal — there is no "stop the loop and succeed with
/// what we have" behavior.
pub fn count<T: 'static>(n: usize, p: Parser<T>) -> Parser<Vec<T>> {
    let slow_p = p.clone();
    let run_slow = move |mut state: ParserState| {
        let mut results = Vec::with_capacity(n);
        for _ in 0..n {
            let (state_after, outcome) = slow_p.run(state);
            match outcome {
                Outcome::Success(v) => {
                    results.push(v);
                    state = state_after;
                }
                Outcome::Failure(bundle) => return (state_after, Outcome::Failure(bundle)),
            }
        }
        (state, Outcome::Success(results))
    };
    let fast_p = p;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Vec<T>> {
        let mut results = Vec::with_capacity(n);
        for _ in 0..n {
            results.push(fast_p.exec_fast(ctx)?);
        }
        Ok(results)
    };
    Parser::with_fast(run_slow, run_fast)
}

/// `many0`, discarding the collected values.
pub fn skip_many0<T: 'static>(p: Parser<T>) -> Parser<()> {
    many0(p).map(|_| ())
}

/// `many1`, discarding the collected values.
pub fn skip_many1<T: 'static>(p: Parser<T>) -> Parser<()> {
    many1(p).map(|_| ())
}

/// `many_n`, discarding the collected values.
pub fn skip_many_n<T: 'static>(p: Parser<T>, n: usize) -> Parser<()> {
    many_n(p, n).map(|_| ())
}
