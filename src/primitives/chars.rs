//! Single-character primitives: `char`, `not_char`, character classes.

use crate::fast::FastCtx;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::Span;
use crate::state::ParserState;

use super::expected_at;

fn describe_char(c: char) -> String {
    format!("{c:?}")
}

/// Match a single literal character, yielding it.
pub fn char(expected: char) -> Parser<char> {
    let run_slow = move |state: ParserState| {
        match state.remaining().chars().next() {
            Some(c) if c == expected => {
                let rest = &state.remaining()[..c.len_utf8()];
                (state.advance(rest), Outcome::Success(c))
            }
            _ => {
                let span = Span::new(state.position(), 0);
                let err = expected_at(&state, span, vec![describe_char(expected)]);
                {
                    let __src = state.source().to_string();
                    (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
                }
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<char, crate::fast::ParseFailed> {
        match ctx.remaining().chars().next() {
            Some(c) if c == expected => {
                ctx.advance_char(c);
                Ok(c)
            }
            _ => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(crate::error::ParseError::expected(span, vec![describe_char(expected)], vec![]));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Match any single character other than `excluded`, yielding it.
pub fn not_char(excluded: char) -> Parser<char> {
    let run_slow = move |state: ParserState| {
        match state.remaining().chars().next() {
            Some(c) if c != excluded => {
                let rest = &state.remaining()[..c.len_utf8()];
                (state.advance(rest), Outcome::Success(c))
            }
            _ => {
                let span = Span::new(state.position(), 0);
                let err = expected_at(&state, span, vec![format!("any character other than {}", describe_char(excluded))]);
                {
                    let __src = state.source().to_string();
                    (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
                }
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<char, crate::fast::ParseFailed> {
        match ctx.remaining().chars().next() {
            Some(c) if c != excluded => {
                ctx.advance_char(c);
                Ok(c)
            }
            _ => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(crate::error::ParseError::expected(
                    span,
                    vec![format!("any character other than {}", describe_char(excluded))],
                    vec![],
                ));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

fn char_class(noun: &'static str, predicate: fn(char) -> bool) -> Parser<char> {
    let run_slow = move |state: ParserState| match state.remaining().chars().next() {
        Some(c) if predicate(c) => {
            let rest = &state.remaining()[..c.len_utf8()];
            (state.advance(rest), Outcome::Success(c))
        }
        _ => {
            let span = Span::new(state.position(), 0);
            let err = expected_at(&state, span, vec![noun.to_string()]);
            {
                let __src = state.source().to_string();
                (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<char, crate::fast::ParseFailed> {
        match ctx.remaining().chars().next() {
            Some(c) if predicate(c) => {
                ctx.advance_char(c);
                Ok(c)
            }
            _ => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(crate::error::ParseError::expected(span, vec![noun.to_string()], vec![]));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Match any ASCII decimal digit `'0'..='9'`, yielding the character itself
/// (not its numeric value — compose with `.map(|c| c.to_digit(10).unwrap())`
/// for that).
pub fn digit() -> Parser<char> {
    char_class("a decimal digit", |c| c.is_ascii_digit())
}

/// Match any alphabetic character (see `char::is_alphabetic`).
pub fn alphabet() -> Parser<char> {
    char_class("a letter", char::is_alphabetic)
}

/// Match any single character in `options`, yielding it.
pub fn one_of_chars(options: &'static str) -> Parser<char> {
    let run_slow = move |state: ParserState| match state.remaining().chars().next() {
        Some(c) if options.contains(c) => {
            let rest = &state.remaining()[..c.len_utf8()];
            (state.advance(rest), Outcome::Success(c))
        }
        _ => {
            let span = Span::new(state.position(), 0);
            let err = expected_at(&state, span, vec![format!("one of {options:?}")]);
            {
                let __src = state.source().to_string();
                (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<char, crate::fast::ParseFailed> {
        match ctx.remaining().chars().next() {
            Some(c) if options.contains(c) => {
                ctx.advance_char(c);
                Ok(c)
            }
            _ => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(crate::error::ParseError::expected(span, vec![format!("one of {options:?}")], vec![]));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Match any Unicode character; fails only at end of input.
pub fn any_char() -> Parser<char> {
    let run_slow = move |state: ParserState| match state.remaining().chars().next() {
        Some(c) => {
            let rest = &state.remaining()[..c.len_utf8()];
            (state.advance(rest), Outcome::Success(c))
        }
        None => {
            let span = Span::new(state.position(), 0);
            let err = expected_at(&state, span, vec![]);
            {
                let __src = state.source().to_string();
                (state, Outcome::Failure(crate::error::ParseErrorBundle::single(err, __src)))
            }
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<char, crate::fast::ParseFailed> {
        match ctx.remaining().chars().next() {
            Some(c) => {
                ctx.advance_char(c);
                Ok(c)
            }
            None => {
                let span = Span::new(ctx.position(), 0);
                ctx.record_error(crate::error::ParseError::expected(span, vec![], vec![]));
                Err(crate::fast::ParseFailed)
            }
        }
    };
    Parser::with_fast(run_slow, run_fast)
}
