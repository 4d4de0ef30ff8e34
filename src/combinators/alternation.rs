//! Sequencing and commit-aware alternation over a list of parsers.

use crate::fast::{FastCtx, FastResult};
use crate::outcome::Outcome;
use crate::parser::Parser;
use crate::state::ParserState;

/// Run each parser in order, threading state, yielding the collected
/// results. The first failure aborts the whole sequence.
pub fn sequence<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<Vec<T>> {
    let slow_parsers = parsers.clone();
    let run_slow = move |mut state: ParserState| {
        let mut results = Vec::with_capacity(slow_parsers.len());
        for p in &slow_parsers {
            let (state_after, outcome) = p.run(state);
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
    let fast_parsers = parsers;
    let run_fast = move |ctx: &mut FastCtx| -> FastResult<Vec<T>> {
        let mut results = Vec::with_capacity(fast_parsers.len());
        for p in &fast_parsers {
            results.push(p.exec_fast(ctx)?);
        }
        Ok(results)
    };
    Parser::with_fast(run_slow, run_fast)
}

/// Try each alternative in order via `Parser::or`, so the commit/cut
/// discipline applies uniformly regardless of how many alternatives there
/// are. Panics if `parsers` is empty — there is no sensible parser that
/// tries zero alternatives.
pub fn or<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    let mut alternatives = parsers.into_iter();
    let first = alternatives.next().expect("or: at least one alternative is required");
    alternatives.fold(first, Parser::or)
}

/// Alias for `or`, matching the vocabulary some grammars prefer.
pub fn choice<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    or(parsers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::string;
    use crate::testing::*;

    #[test]
    fn sequence_runs_in_order_and_aborts_on_first_failure() {
        let p = sequence(vec![string("a"), string("b"), string("c")]);
        assert_parse_eq(&p, "abc", vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        assert_no_parse(&p, "abx");
    }

    #[test]
    fn choice_tries_alternatives_in_order() {
        let p = choice(vec![string("cat"), string("car"), string("carp")]);
        assert_parse_eq(&p, "car", "car".to_string());
    }
}
