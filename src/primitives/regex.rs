//! The `regex` primitive: sticky (anchored) regex matching.

use std::rc::Rc;

use regex::Regex;

use crate::error::ParseErrorBundle;
use crate::fast::FastCtx;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::Span;
use crate::state::ParserState;

use super::expected_at;

/// Match `pattern` anchored at the current offset (no scanning ahead: the
/// match must start exactly here, as if the pattern were prefixed with
/// `\A`). The pattern is compiled once, when this parser is constructed,
/// and the compiled `Regex` is shared by every subsequent use — matching
/// never mutates it, so there is no state to reset between calls.
///
/// On success yields the matched substring and advances past it. On
/// mismatch records `Expected` with an item naming the pattern and the
/// first ten characters of the unmatched input, so the message reads like
/// `expected "[0-9]+" (found "abc123...")` instead of just naming the
/// pattern.
pub fn regex(pattern: &str) -> Parser<String> {
    let anchored = format!("\\A(?:{pattern})");
    let compiled = Rc::new(Regex::new(&anchored).expect("invalid regex pattern"));
    let display_pattern: Rc<str> = pattern.into();

    let slow_regex = compiled.clone();
    let slow_pattern = display_pattern.clone();
    let run_slow = move |state: ParserState| {
        let remaining = state.remaining();
        match slow_regex.find(remaining) {
            Some(m) => {
                let matched = m.as_str().to_string();
                (state.advance(&matched), Outcome::Success(matched))
            }
            _ => {
                let span = Span::new(state.position(), 0);
                let found = super::describe_found(remaining, 10);
                let err = expected_at(&state, span, vec![format!("{slow_pattern} (found {found})")]);
                {
                    let __src = state.source().to_string();
                    (state, Outcome::Failure(ParseErrorBundle::single(err, __src)))
                }
            }
        }
    };

    let fast_regex = compiled;
    let fast_pattern = display_pattern;
    let run_fast = move |ctx: &mut FastCtx| -> Result<String, crate::fast::ParseFailed> {
        let remaining = ctx.remaining();
        match fast_regex.find(remaining) {
            Some(m) => {
                let matched = m.as_str().to_string();
                ctx.advance(&matched);
                Ok(matched)
            }
            _ => {
                let span = Span::new(ctx.position(), 0);
                let found = super::describe_found(remaining, 10);
                ctx.record_error(crate::error::ParseError::expected(
                    span,
                    vec![format!("{fast_pattern} (found {found})")],
                    vec![],
                ));
                Err(crate::fast::ParseFailed)
            }
        }
    };

    Parser::with_fast(run_slow, run_fast)
}
