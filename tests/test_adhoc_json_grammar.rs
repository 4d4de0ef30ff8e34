//! A small JSON-like grammar built entirely from the library's own
//! combinators, exercised end to end. JSON parsing is not a shipped feature
//! of this crate; this is just a realistic, whole-grammar stress test.

use parsekit::prelude::*;

#[derive(Debug, Clone, PartialEq)]
enum Json {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Json>),
}

fn ws<T: 'static>(p: Parser<T>) -> Parser<T> {
    p.trim()
}

fn json_string() -> Parser<String> {
    between(char('"'), take_until_char(|c| c == '"'), char('"'))
}

fn json_number() -> Parser<f64> {
    regex(r"-?[0-9]+(\.[0-9]+)?").map(|s| s.parse::<f64>().unwrap())
}

fn json_array(value: Parser<Json>) -> Parser<Json> {
    between(char('['), sep_by(ws(value), char(',')), char(']')).map(Json::Array)
}

fn json_value() -> Parser<Json> {
    or(vec![
        string("null").map(|_| Json::Null),
        string("true").map(|_| Json::Bool(true)),
        string("false").map(|_| Json::Bool(false)),
        json_string().map(Json::String),
        json_number().map(Json::Number),
    ])
}

fn full_value() -> Parser<Json> {
    // `json_value` handles the scalars; `json_array` needs to recurse into
    // a value parser, so it's wired up separately rather than through
    // `or`'s flat list.
    json_array(ws(json_value())).or(ws(json_value()))
}

#[test]
fn parses_scalars() {
    assert_eq!(full_value().parse("null").result.unwrap(), Json::Null);
    assert_eq!(full_value().parse("true").result.unwrap(), Json::Bool(true));
    assert_eq!(full_value().parse("3.5").result.unwrap(), Json::Number(3.5));
    assert_eq!(full_value().parse("\"hi\"").result.unwrap(), Json::String("hi".to_string()));
}

#[test]
fn parses_an_array_of_scalars() {
    let outcome = full_value().parse("[1, 2, 3]");
    assert_eq!(
        outcome.result.unwrap(),
        Json::Array(vec![Json::Number(1.0), Json::Number(2.0), Json::Number(3.0)])
    );
}

#[test]
fn parses_an_empty_array() {
    assert_eq!(full_value().parse("[]").result.unwrap(), Json::Array(vec![]));
}

#[test]
fn an_unparseable_element_surfaces_as_a_missing_closing_delimiter() {
    // `sep_by` stops cleanly (without propagating an error) as soon as an
    // element fails to parse, so the array parser's own failure comes from
    // `between`'s `expect("closing delimiter")` not finding `]` where the
    // list stopped — not from the malformed element itself.
    let outcome = full_value().parse("[1, @, 3]");
    let bundle = outcome.result.unwrap_err();
    let primary = bundle.primary().unwrap();
    assert_eq!(primary.span().offset, 2);
    assert!(primary.to_string().contains("closing delimiter"));
}
