//! End-to-end hint-generation and error-formatting scenarios.

use parsekit::prelude::*;

#[test]
fn plain_formatter_names_the_expected_token() {
    let p = char('(').expect("opening parenthesis");
    let outcome = p.parse("x");
    let bundle = outcome.result.unwrap_err();
    let text = parsekit::format_error::plain(&bundle);
    assert!(text.contains("opening parenthesis"));
    assert!(text.contains("line 1, column 1"));
}

#[test]
fn json_formatter_produces_parseable_json_with_expected_fields() {
    let p = digit();
    let outcome = p.parse("x");
    let bundle = outcome.result.unwrap_err();
    let text = parsekit::format_error::json(&bundle);
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["line"], 1);
    assert_eq!(value["column"], 1);
}

#[test]
fn html_formatter_escapes_special_characters_in_the_message() {
    let p = fail::<()>("needs <angle brackets>".to_string());
    let outcome = p.parse("x");
    let bundle = outcome.result.unwrap_err();
    let text = parsekit::format_error::html(&bundle);
    assert!(text.contains("&lt;angle brackets&gt;"));
}

#[test]
fn any_keyword_with_hints_succeeds_on_exact_match() {
    let p = any_keyword_with_hints(vec!["lambda", "let", "if"]);
    assert_eq!(p.parse("if").result.unwrap(), "if");
}

#[test]
fn levenshtein_hints_respect_the_default_threshold() {
    assert!(hints_for("xyzxyz", &["lambda"]).is_empty());
    assert_eq!(hints_for("lamdba", &["lambda"]), vec!["lambda".to_string()]);
}
