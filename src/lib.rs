//! A small parser combinator engine.
//!
//! A `Parser<T>` is an immutable value describing how to recognize some
//! pattern in a `&str` and, on success, produce a `T`. Parsers compose with
//! ordinary method calls (`map`, `zip`, `then`, `or`, ...) and combinator
//! functions (`many0`, `sep_by`, `between`, ...); running one against input
//! never mutates the parser itself, so the same `Parser` can be built once
//! and reused across any number of parses.
//!
//! ```
//! use parsekit::prelude::*;
//!
//! let p = many1(digit()).map(|digits| digits.into_iter().collect::<String>());
//! let outcome = p.parse("123abc");
//! assert_eq!(outcome.result.unwrap(), "123");
//! ```
//!
//! On failure, a parser reports the "furthest failure" reached across every
//! alternative it tried, as a `ParseErrorBundle`. `format::format_error`
//! renders that bundle for a human; `driver::ParseOutcome` is what every
//! `parse*` entry point returns.
//!
//! Every combinator runs on two interchangeable engines: a "slow path" that
//! threads an immutable `ParserState` (simple, easy to reason about) and a
//! "fast path" that mutates a `FastCtx` in place (fewer allocations in hot
//! loops). Both are exercised by this crate's test suite and are guaranteed
//! to agree on every input.

pub mod combinators;
pub mod driver;
pub mod error;
pub mod fast;
pub mod format;
pub mod generator;
pub mod hints;
pub mod outcome;
pub mod parser;
pub mod primitives;
pub mod span;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use driver::ParseOutcome;
pub use error::{ParseError, ParseErrorBundle};
pub use format::{format_error, ErrorFormatter, Format, FormatOptions};
pub use generator::pure;
pub use outcome::Outcome;
pub use parser::Parser;
pub use span::{SourcePosition, Span};
pub use state::ParserState;

/// Everything needed to build and run grammars: primitives, combinators,
/// and the driver entry points, all in one `use`.
pub mod prelude {
    pub use crate::combinators::{
        between, choice, count, lookahead, many0, many1, many_n, many_n_exact, not_followed_by, or, parse_until_char,
        sep_by, sep_by1, sep_end_by, sequence, skip_many0, skip_many1, skip_many_n, skip_until, take_until, take_upto,
    };
    pub use crate::generator::pure;
    pub use crate::hints::{any_keyword_with_hints, hints_for, keyword_with_hints, levenshtein};
    pub use crate::primitives::{
        alphabet, any_char, any_of_strings, char, digit, eof, fail, not_char, one_of_chars, position, regex,
        skip_whitespace, string, take_n, take_until_char, take_while_char,
    };
    pub use crate::{ErrorFormatter, Format, FormatOptions, ParseError, ParseErrorBundle, ParseOutcome, Parser};
}
