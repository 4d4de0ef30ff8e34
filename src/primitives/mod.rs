//! Primitive combinators: the leaves every grammar is built from.
//!
//! Each primitive here records its own `ParseError`, attaching whatever
//! label stack is active at the point of failure, and exposes both a slow
//! runner and a fast runner so parsers built purely from primitives get a
//! fully allocation-light `parse_fast`.

mod chars;
mod misc;
mod regex;
mod text;

pub use chars::{alphabet, any_char, char, digit, not_char, one_of_chars};
pub use misc::{eof, fail, position, skip_whitespace};
pub use regex::regex;
pub use text::{any_of_strings, string, take_n, take_until_char, take_while_char};

use crate::error::ParseError;
use crate::span::Span;
use crate::state::ParserState;

/// Build an `Expected` error at `span`, attaching `state`'s current label
/// stack. The slow-path counterpart of `FastCtx::record_error`'s implicit
/// context attachment.
pub(crate) fn expected_at(state: &ParserState, span: Span, items: Vec<String>) -> ParseError {
    ParseError::expected(span, items, state.label_stack().to_vec())
}

/// Render the first `max_chars` characters of `remaining` for use in a
/// "found ..." message, falling back to "end of input" when empty.
pub(crate) fn describe_found(remaining: &str, max_chars: usize) -> String {
    let snippet: String = remaining.chars().take(max_chars).collect();
    if snippet.is_empty() {
        "end of input".to_string()
    } else {
        format!("{snippet:?}")
    }
}
