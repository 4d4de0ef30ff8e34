//! Higher-order combinators built from `Parser`'s instance methods and the
//! primitives — repetition, sequencing, separated lists, and lookahead.

mod alternation;
mod lookahead;
mod repeat;
mod separated;

pub use alternation::{choice, or, sequence};
pub use lookahead::{lookahead, not_followed_by, parse_until_char, skip_until, take_until, take_upto};
pub use repeat::{count, many0, many1, many_n, many_n_exact, skip_many0, skip_many1, skip_many_n};
pub use separated::{between, sep_by, sep_by1, sep_end_by};
