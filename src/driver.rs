//! Entry points that run a `Parser<T>` against a whole input string.

use std::rc::Rc;

use crate::error::ParseErrorBundle;
use crate::fast::FastCtx;
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::span::SourcePosition;
use crate::state::ParserState;

/// The result of driving a parser to completion: either the parsed value or
/// the accumulated failure bundle, plus the position the parse stopped at.
#[derive(Debug, Clone)]
pub struct ParseOutcome<T> {
    /// The parsed value, or the furthest-failure bundle.
    pub result: Result<T, ParseErrorBundle>,
    /// Where the parse stopped: the end of the match on success, or the
    /// furthest position reached on failure.
    pub position: SourcePosition,
}

impl<T> ParseOutcome<T> {
    /// True if the parse succeeded.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

impl<T: 'static> Parser<T> {
    /// Run this parser on the slow path against the whole of `input`.
    pub fn parse(&self, input: &str) -> ParseOutcome<T> {
        let state = ParserState::new(Rc::from(input));
        let (state_after, outcome) = self.run(state);
        let position = state_after.position();
        match outcome {
            Outcome::Success(v) => ParseOutcome { result: Ok(v), position },
            Outcome::Failure(bundle) => ParseOutcome { result: Err(bundle), position },
        }
    }

    /// Run this parser on the fast path against the whole of `input`.
    pub fn parse_fast(&self, input: &str) -> ParseOutcome<T> {
        let mut ctx = FastCtx::new(input);
        match self.exec_fast(&mut ctx) {
            Ok(v) => ParseOutcome { result: Ok(v), position: ctx.position() },
            Err(_) => ParseOutcome { result: Err(ctx.to_bundle()), position: ctx.position() },
        }
    }

    /// Run this parser against `input`; return the value, or panic with the
    /// plain-text rendering of the failure.
    pub fn parse_or_throw(&self, input: &str) -> T {
        match self.parse(input).result {
            Ok(v) => v,
            Err(bundle) => panic!("{}", crate::format::format_error::plain(&bundle)),
        }
    }

    /// Run this parser against `input`; return a `Result` instead of the
    /// `ParseOutcome` wrapper.
    pub fn parse_or_error(&self, input: &str) -> Result<T, ParseErrorBundle> {
        self.parse(input).result
    }
}

#[cfg(test)]
mod tests {
    use crate::primitives::{char, digit};
    use crate::testing::*;

    #[test]
    fn parse_reports_final_position_on_success() {
        let p = char('a').then(char('b'));
        let outcome = p.parse("ab");
        assert!(outcome.is_success());
        assert_eq!(outcome.position.offset, 2);
    }

    #[test]
    fn parse_fast_agrees_with_parse_on_success() {
        let p = digit();
        let slow = p.parse("5");
        let fast = p.parse_fast("5");
        assert_eq!(slow.result.unwrap(), fast.result.unwrap());
        assert_eq!(slow.position.offset, fast.position.offset);
    }

    #[test]
    fn parse_or_error_surfaces_the_bundle() {
        let p = char('a');
        assert!(p.parse_or_error("b").is_err());
    }

    #[test]
    #[should_panic(expected = "expected")]
    fn parse_or_throw_panics_with_rendered_message() {
        let p = char('a');
        p.parse_or_throw("b");
    }

    #[test]
    fn assert_parse_eq_still_works_via_run() {
        assert_parse_eq(&char('a'), "a", 'a');
    }
}
