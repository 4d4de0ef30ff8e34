//! Small assertion helpers shared by every module's unit tests.
//!
//! These run a parser to completion on the slow path and check the
//! `Outcome`, rather than making every test hand-unwrap `Parser::run`.

use std::fmt::Debug;
use std::rc::Rc;

use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::state::ParserState;

/// Assert that `p` parses all of `input` and produces `expected`.
pub fn assert_parse_eq<T: PartialEq + Debug + 'static>(p: &Parser<T>, input: &str, expected: T) {
    let state = ParserState::new(Rc::from(input));
    let (_after, outcome) = p.run(state);
    match outcome {
        Outcome::Success(value) => assert_eq!(value, expected, "parsing {input:?}"),
        Outcome::Failure(bundle) => panic!("expected {input:?} to parse as {expected:?}, got error: {bundle:?}"),
    }
}

/// Assert that `p` fails to parse `input`.
pub fn assert_no_parse<T: Debug + 'static>(p: &Parser<T>, input: &str) {
    let state = ParserState::new(Rc::from(input));
    let (_after, outcome) = p.run(state);
    if let Outcome::Success(value) = outcome {
        panic!("expected {input:?} to fail to parse, got: {value:?}");
    }
}

/// Assert that `p` fails to parse `input`, and that the primary error
/// message contains `expected_substring`.
pub fn assert_parse_error<T: Debug + 'static>(p: &Parser<T>, input: &str, expected_substring: &str) {
    let state = ParserState::new(Rc::from(input));
    let (_after, outcome) = p.run(state);
    match outcome {
        Outcome::Success(value) => panic!("expected {input:?} to fail to parse, got: {value:?}"),
        Outcome::Failure(bundle) => {
            let message = bundle.primary().map(|e| e.to_string()).unwrap_or_default();
            assert!(
                message.contains(expected_substring),
                "expected error message {message:?} to contain {expected_substring:?}"
            );
        }
    }
}
