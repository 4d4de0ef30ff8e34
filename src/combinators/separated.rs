//! Delimited and separated-list combinators, built from `Parser`'s instance
//! methods and `many0` rather than hand-rolled loops, so the trailing-
//! separator rewind falls out of `many0`'s own backtracking for free.

use super::repeat::many0;
use crate::parser::Parser;

/// `open`, then `body`, then `close`. `close` is wrapped with
/// `expect("closing delimiter")` so a missing close produces a targeted
/// error instead of whatever `close` would normally say.
pub fn between<O: 'static, T: 'static, C: 'static>(open: Parser<O>, body: Parser<T>, close: Parser<C>) -> Parser<T> {
    open.then(body).then_discard(close.expect("closing delimiter"))
}

/// One or more `p`, separated by `sep`. A separator tentatively consumed
/// before a failing element is rewound (via `many0`'s snapshot/restore), so
/// the separator is never counted as part of the match.
pub fn sep_by1<T: 'static, S: 'static>(p: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>> {
    let tail = many0(sep.then(p.clone()));
    p.zip(tail).map(|(first, mut rest)| {
        rest.insert(0, first);
        rest
    })
}

/// Zero or more `p`, separated by `sep`.
pub fn sep_by<T: 'static, S: 'static>(p: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>> {
    sep_by1(p, sep).optional().map(|found| found.unwrap_or_default())
}

/// Like `sep_by`, but also consumes a trailing separator if one follows the
/// last element.
pub fn sep_end_by<T: 'static, S: 'static>(p: Parser<T>, sep: Parser<S>) -> Parser<Vec<T>> {
    sep_by(p, sep.clone()).then_discard(sep.optional())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combinators::many1;
    use crate::primitives::{char, digit};
    use crate::testing::*;

    #[test]
    fn sep_by_empty_input_succeeds_with_empty_vec() {
        let p = sep_by(digit(), char(','));
        assert_parse_eq(&p, "", vec![]);
    }

    #[test]
    fn sep_by_rewinds_trailing_separator() {
        let p = sep_by(digit(), char(',')).then(char(','));
        assert_parse_eq(&p, "1,2,", ',');
    }

    #[test]
    fn sep_by1_requires_at_least_one() {
        let p = sep_by1(digit(), char(','));
        assert_no_parse(&p, "");
        assert_parse_eq(&p, "1,2,3", vec!['1', '2', '3']);
    }

    #[test]
    fn sep_end_by_consumes_trailing_separator() {
        let p = sep_end_by(digit(), char(','));
        assert_parse_eq(&p, "1,2,3,", vec!['1', '2', '3']);
        assert_parse_eq(&p, "1,2,3", vec!['1', '2', '3']);
    }

    #[test]
    fn between_reports_closing_delimiter() {
        let p = between(char('('), many1(digit()), char(')'));
        assert_parse_error(&p, "(", "closing delimiter");
    }
}
