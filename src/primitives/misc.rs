//! Position-only and always-succeeding/always-failing primitives.

use crate::error::{ParseError, ParseErrorBundle};
use crate::fast::FastCtx;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::{SourcePosition, Span};
use crate::state::ParserState;

/// Succeed iff the cursor is at the end of input.
pub fn eof() -> Parser<()> {
    let run_slow = move |state: ParserState| {
        if state.at_eof() {
            (state, Outcome::Success(()))
        } else {
            let span = Span::new(state.position(), 0);
            let found = super::describe_found(state.remaining(), 10);
            let err = ParseError::unexpected(span, found, vec![], state.label_stack().to_vec());
            (state.clone(), Outcome::Failure(ParseErrorBundle::single(err, state.source().to_string())))
        }
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<(), crate::fast::ParseFailed> {
        if ctx.at_eof() {
            Ok(())
        } else {
            let span = Span::new(ctx.position(), 0);
            let found = super::describe_found(ctx.remaining(), 10);
            ctx.record_error(ParseError::unexpected(span, found, vec![], vec![]));
            Err(crate::fast::ParseFailed)
        }
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Yield the current `SourcePosition` without consuming any input. Never
/// fails.
pub fn position() -> Parser<SourcePosition> {
    let run_slow = move |state: ParserState| {
        let pos = state.position();
        (state, Outcome::Success(pos))
    };
    let run_fast = move |ctx: &mut FastCtx| -> Result<SourcePosition, crate::fast::ParseFailed> {
        Ok(ctx.position())
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Always fail with `message` as a `Custom` error at the current position,
/// without consuming input.
pub fn fail<T: 'static>(message: impl Into<String>) -> Parser<T> {
    let message: std::rc::Rc<str> = message.into().into();
    let slow_message = message.clone();
    let run_slow = move |state: ParserState| {
        let span = Span::new(state.position(), 0);
        let err = ParseError::custom(span, slow_message.to_string(), vec![], state.label_stack().to_vec());
        (state.clone(), Outcome::Failure(ParseErrorBundle::single(err, state.source().to_string())))
    };
    let fast_message = message;
    let run_fast = move |ctx: &mut FastCtx| -> Result<T, crate::fast::ParseFailed> {
        let span = Span::new(ctx.position(), 0);
        ctx.record_error(ParseError::custom(span, fast_message.to_string(), vec![], vec![]));
        Err(crate::fast::ParseFailed)
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Consume a maximal run of whitespace characters (see `char::is_whitespace`).
/// Never fails; may consume nothing.
pub fn skip_whitespace() -> Parser<()> {
    super::take_while_char(char::is_whitespace).map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn eof_succeeds_only_at_end() {
        assert_parse_eq(&eof(), "", ());
        assert_no_parse(&eof(), "x");
    }

    #[test]
    fn position_never_fails_and_does_not_advance() {
        let p = position();
        let (state, outcome) = p.run(ParserState::new(std::rc::Rc::from("abc")));
        assert_eq!(state.offset(), 0);
        assert!(matches!(outcome, Outcome::Success(pos) if pos.offset == 0));
    }

    #[test]
    fn fail_always_fails_without_consuming() {
        let p: Parser<()> = fail("nope");
        assert_parse_error(&p, "abc", "nope");
    }

    #[test]
    fn skip_whitespace_consumes_leading_space() {
        let p = skip_whitespace().then(crate::primitives::chars::char('x'));
        assert_parse_eq(&p, "   x", 'x');
    }
}
