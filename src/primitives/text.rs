//! Multi-character primitives built on predicates and exact strings.

use crate::fast::FastCtx;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::Span;
use crate::state::ParserState;

use super::expected_at;

/// Match an exact literal string, yielding it.
pub fn string(literal: impl Into<String>) -> Parser<String> {
    let literal: std::rc::Rc<str> = literal.into().into();
    let slow_literal = literal.clone();
    let run_slow = move |state: ParserState| {
        if state.remaining().starts_with(slow_literal.as_ref()) {
            (state.advance(&slow_literal), Outcome::Success(slow_literal.to_string()))
        } else {
            let span = Span::new(state.position(), 0);
            let err = expected_at(&state, span, vec![format!("{slow_literal:?}")]);
            {
                let __src = state.source().to_string();
                (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
            }
        }
    };
    let fast_literal = literal;
    let run_fast = move |ctx: &mut FastCtx| -> Result<String, crate::fast::ParseFailed> {
        if ctx.remaining().starts_with(fast_literal.as_ref()) {
            ctx.advance(&fast_literal);
            Ok(fast_literal.to_string())
        } else {
            let span = Span::new(ctx.position(), 0);
            ctx.record_error(crate::error::ParseError::expected(span, vec![format!("{fast_literal:?}")], vec![]));
            Err(crate::fast::ParseFailed)
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Try each string in `options`, longest first, yielding whichever matched.
pub fn any_of_strings(options: Vec<&'static str>) -> Parser<String> {
    let mut sorted = options;
    sorted.sort_by_key(|s| std::cmp::Reverse(s.len()));
    let sorted: std::rc::Rc<[&'static str]> = sorted.into();

    let slow_options = sorted.clone();
    let run_slow = move |state: ParserState| {
        let remaining = state.remaining();
        match slow_options.iter().copied().find(|s| remaining.starts_with(s)) {
            Some(matched) => (state.advance(matched), Outcome::Success(matched.to_string())),
            None => {
                let span = Span::new(state.position(), 0);
                let items = slow_options.iter().map(|s| format!("{s:?}")).collect();
                let err = expected_at(&state, span, items);
                {
                    let __src = state.source().to_string();
                    (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
                }
            }
        }
    };
    let fast_options = sorted;
    let run_fast = move |ctx: &mut FastCtx| -> Result<String, crate::fast::ParseFailed> {
        let remaining = ctx.remaining();
        match fast_options.iter().copied().find(|s| remaining.starts_with(s)) {
            Some(matched) => {
                ctx.advance(matched);
                Ok(matched.to_string())
            }
            None => {
                let span = Span::new(ctx.position(), 0);
                let items = fast_options.iter().map(|s| format!("{s:?}")).collect();
                ctx.record_error(crate::error::ParseError::expected(span, items, vec![]));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Consume exactly `n` characters, yielding them as a string. Fails (without
/// consuming anything) if fewer than `n` remain.
pub fn take_n(n: usize) -> Parser<String> {
    let run_slow = move |state: ParserState| {
        let remaining = state.remaining();
        let taken: String = remaining.chars().take(n).collect();
        if taken.chars().count() == n {
            (state.advance(&taken), Outcome::Success(taken))
        } else {
            let span = Span::new(state.position(), 0);
            let err = expected_at(&state, span, vec![format!("{n} more characters")]);
            {
                let __src = state.source().to_string();
                (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<String, crate::fast::ParseFailed> {
        let remaining = ctx.remaining();
        let taken: String = remaining.chars().take(n).collect();
        if taken.chars().count() == n {
            ctx.advance(&taken);
            Ok(taken)
        } else {
            let span = Span::new(ctx.position(), 0);
            ctx.record_error(crate::error::ParseError::expected(span, vec![format!("{n} more characters")], vec![]));
            Err(crate::fast::ParseFailed)
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Consume the maximal run of characters satisfying `pred` at the current
/// position, yielding the collected string. Never fails; may yield "".
pub fn take_while_char(pred: impl Fn(char) -> bool + 'static) -> Parser<String> {
    let pred = std::rc::Rc::new(pred);
    let slow_pred = pred.clone();
    let run_slow = move |state: ParserState| {
        let taken: String = state.remaining().chars().take_while(|c| slow_pred(*c)).collect();
        (state.advance(&taken), Outcome::Success(taken))
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<String, crate::fast::ParseFailed> {
        let taken: String = ctx.remaining().chars().take_while(|c| pred(*c)).collect();
        ctx.advance(&taken);
        Ok(taken)
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Consume the maximal run of characters NOT satisfying `pred`, stopping
/// just before the first character that does (or at end of input), yielding
/// the collected string. Never fails; may yield "".
pub fn take_until_char(pred: impl Fn(char) -> bool + 'static) -> Parser<String> {
    take_while_char(move |c| !pred(c))
}
