//! End-to-end commit/cut and alternation scenarios.

use parsekit::prelude::*;

fn keyword(word: &'static str) -> Parser<String> {
    string(word)
}

#[test]
fn atomic_lets_a_partial_match_be_abandoned() {
    let p = or(vec![keyword("foo").atomic(), keyword("for")]);
    let outcome = p.parse("for");
    assert_eq!(outcome.result.unwrap(), "for");
}

#[test]
fn a_committed_failure_blocks_the_next_alternative() {
    let p = char('i').commit().then(char('f')).or(char('i').map(|_| 'm'));
    let outcome = p.parse("ix");
    // The first alternative commits on matching 'i', then fails on 'f' vs
    // 'x'. That commit prevents `or` from falling through to the second
    // alternative at all, even though it would otherwise match.
    assert!(outcome.result.is_err());
}

#[test]
fn commit_after_keyword_gives_a_targeted_error_instead_of_generic_alternatives() {
    let p = sequence(vec![
        keyword("if").commit(),
        char('(').map(|c| c.to_string()).expect("opening parenthesis"),
    ]);
    let outcome = p.parse("if x");
    let bundle = outcome.result.unwrap_err();
    let message = bundle.primary().unwrap().to_string();
    assert!(message.contains("opening parenthesis"));
    assert!(!message.contains("one of"));
}

#[test]
fn choice_is_an_alias_for_or() {
    let p = choice(vec![string("cat"), string("car"), string("carp")]);
    assert_eq!(p.parse("car").result.unwrap(), "car");
}

#[test]
fn hints_pick_the_nearest_keyword() {
    let p = any_keyword_with_hints(vec!["lambda", "let", "if"]);
    let outcome = p.parse("lamdba");
    let bundle = outcome.result.unwrap_err();
    match bundle.primary().unwrap() {
        parsekit::ParseError::Unexpected { found, hints, .. } => {
            assert_eq!(found.as_str(), "lamdba");
            assert_eq!(hints, &vec!["lambda".to_string()]);
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}
