//! Edit-distance based "did you mean" suggestions, attached to `Unexpected`
//! errors produced by keyword matching.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::primitives::{any_of_strings, string, take_while_char};

const DEFAULT_TOP_K: usize = 3;
const DEFAULT_THRESHOLD: usize = 2;

/// Character-level Levenshtein distance between `a` and `b`.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ca) in a.iter().enumerate() {
        let mut prev = row[0];
        row[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cur = row[j + 1];
            row[j + 1] = if ca == cb {
                prev
            } else {
                1 + prev.min(row[j]).min(cur)
            };
            prev = cur;
        }
    }
    row[b.len()]
}

/// Top `DEFAULT_TOP_K` candidates within `DEFAULT_THRESHOLD` edit distance of
/// `found`, nearest first, ties broken by the order they appear in
/// `candidates`.
pub fn hints_for(found: &str, candidates: &[&str]) -> Vec<String> {
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(|&c| (levenshtein(found, c), c))
        .filter(|&(dist, _)| dist > 0 && dist <= DEFAULT_THRESHOLD)
        .collect();
    scored.sort_by_key(|&(dist, _)| dist);
    scored.into_iter().take(DEFAULT_TOP_K).map(|(_, c)| c.to_string()).collect()
}

/// The identifier-shaped run at the current offset, used as the "found"
/// text when a keyword match fails.
fn identifier_run() -> Parser<String> {
    take_while_char(|c| c.is_alphanumeric() || c == '_')
}

/// Build a parser that matches the literal `target`; on failure, reads the
/// identifier-shaped run at the current offset and reports it as an
/// `Unexpected` error with hints computed against `candidates`.
pub fn keyword_with_hints(candidates: Vec<&'static str>) -> impl Fn(&'static str) -> Parser<String> {
    move |target: &'static str| {
        let candidates = candidates.clone();
        string(target).or(identifier_run().flat_map(move |found| {
            let hints = hints_for(&found, &candidates);
            let found_for_fail = found.clone();
            crate::primitives::fail::<String>(format!("unexpected {found_for_fail:?}")).map_err(move |mut bundle| {
                if let Some(err) = bundle.errors.pop() {
                    let span = err.span();
                    let context = err.context().to_vec();
                    bundle.errors.push(ParseError::unexpected(span, found.clone(), hints.clone(), context));
                }
                bundle
            })
        }))
    }
}

/// Try each of `candidates` (longest first, via `any_of_strings`); on
/// failure, reads the identifier-shaped run at the current offset and
/// reports it as an `Unexpected` error with hints computed against
/// `candidates`.
pub fn any_keyword_with_hints(candidates: Vec<&'static str>) -> Parser<String> {
    any_of_strings(candidates.clone()).or(identifier_run().flat_map(move |found| {
        let hints = hints_for(&found, &candidates);
        let span_source = found.clone();
        crate::primitives::fail::<String>(format!("unexpected {span_source:?}")).map_err(move |mut bundle| {
            if let Some(err) = bundle.errors.pop() {
                let span = err.span();
                let context = err.context().to_vec();
                bundle.errors.push(ParseError::unexpected(span, found.clone(), hints.clone(), context));
            }
            bundle
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;

    #[test]
    fn levenshtein_matches_known_distances() {
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("lambda", "lamdba"), 2);
        assert_eq!(levenshtein("same", "same"), 0);
    }

    #[test]
    fn hints_for_filters_and_sorts_by_distance() {
        let hints = hints_for("lamdba", &["lambda", "let", "if"]);
        assert_eq!(hints, vec!["lambda".to_string()]);
    }

    #[test]
    fn hints_for_excludes_exact_and_far_matches() {
        let hints = hints_for("if", &["if", "xyzxyz"]);
        assert!(hints.is_empty());
    }

    #[test]
    fn any_keyword_with_hints_reports_nearest_candidate() {
        let p = any_keyword_with_hints(vec!["lambda", "let", "if"]);
        assert_parse_error(&p, "lamdba", "unexpected");
    }

    #[test]
    fn any_keyword_with_hints_matches_longest_first() {
        let p = any_keyword_with_hints(vec!["cat", "car", "carp"]);
        assert_parse_eq(&p, "carp", "carp".to_string());
    }

    #[test]
    fn keyword_with_hints_matches_the_requested_target() {
        let p = keyword_with_hints(vec!["lambda", "let", "if"])("let");
        assert_parse_eq(&p, "let", "let".to_string());
        assert_no_parse(&p, "lambda");
    }
}
