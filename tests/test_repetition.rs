//! End-to-end repetition and separated-list scenarios.

use parsekit::prelude::*;

#[test]
fn many1_then_char_reports_furthest_failure_not_zero() {
    let digits = many1(digit()).map(|ds| ds.into_iter().collect::<String>());
    let outcome = digits.clone().parse("123x");
    assert_eq!(outcome.result.unwrap(), "123");

    let sequence_parser = digits.then(char(';'));
    let outcome = sequence_parser.parse("123x");
    let bundle = outcome.result.unwrap_err();
    assert_eq!(bundle.primary().unwrap().span().offset, 3);
}

#[test]
fn sep_by_on_empty_input() {
    let p = sep_by(digit(), char(','));
    let outcome = p.parse("");
    assert_eq!(outcome.result.unwrap(), Vec::<char>::new());
    assert_eq!(outcome.position.offset, 0);
}

#[test]
fn sep_end_by_consumes_trailing_separator() {
    let p = sep_end_by(digit(), char(','));
    let outcome = p.parse("1,2,3,");
    assert_eq!(outcome.result.unwrap(), vec!['1', '2', '3']);
    assert_eq!(outcome.position.offset, 6);
}

#[test]
fn between_reports_missing_closing_delimiter() {
    let p = between(char('('), many1(digit()), char(')'));
    let outcome = p.parse("(");
    let bundle = outcome.result.unwrap_err();
    assert!(bundle.primary().unwrap().to_string().contains("closing delimiter"));
}

#[test]
fn many_n_exact_mismatch_short_circuits_an_enclosing_or() {
    let strict_pair = many_n_exact(digit(), 2).map(|ds| ds.into_iter().collect::<String>());
    let fallback = string("xx");
    let p = strict_pair.or(fallback);
    let outcome = p.parse("1ab");
    assert!(outcome.result.is_err());
}

#[test]
fn count_is_exact_and_any_shortfall_is_terminal() {
    let p = count(3, digit());
    assert_eq!(p.parse("123x").result.unwrap(), vec!['1', '2', '3']);
    assert!(p.parse("12x").result.is_err());
}

#[test]
#[should_panic(expected = "did not advance")]
fn many0_strict_advance_guard_panics_on_zero_width_success() {
    let zero_width = digit().optional().map(|_| ());
    let p = many0(zero_width);
    let _ = p.parse("abc");
}
