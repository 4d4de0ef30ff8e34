//! The sum type threaded through the slow execution path.
//!
//! `Outcome<T>` is deliberately distinct from `std::result::Result` even
//! though it carries the same information: it keeps the vocabulary of the
//! engine ("did this parser succeed or fail here") separate from Rust's
//! general-purpose error handling, and gives us a place to hang conversions
//! to/from `Result` without fighting orphan rules if callers want their own
//! `Result`-based glue.

use crate::error::ParseErrorBundle;

/// The result of running a parser on the slow path: either a value, or the
/// accumulated failure bundle.
#[derive(Debug, Clone)]
pub enum Outcome<T> {
    /// The parser matched and produced `T`.
    Success(T),
    /// The parser failed; `ParseErrorBundle` carries every error recorded
    /// while trying to produce a match, plus the furthest-offset primary.
    Failure(ParseErrorBundle),
}

impl<T> Outcome<T> {
    /// True if this is `Success`.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// True if this is `Failure`.
    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// Convert to a standard `Result`, discarding the `Outcome` vocabulary.
    pub fn into_result(self) -> Result<T, ParseErrorBundle> {
        match self {
            Outcome::Success(v) => Ok(v),
            Outcome::Failure(b) => Err(b),
        }
    }

    /// Build an `Outcome` from a `Result`.
    pub fn from_result(r: Result<T, ParseErrorBundle>) -> Self {
        match r {
            Ok(v) => Outcome::Success(v),
            Err(b) => Outcome::Failure(b),
        }
    }

    /// Map the success value, leaving a failure untouched.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Success(v) => Outcome::Success(f(v)),
            Outcome::Failure(b) => Outcome::Failure(b),
        }
    }

    /// Borrow the success value, if any.
    pub fn as_ref(&self) -> Outcome<&T> {
        match self {
            Outcome::Success(v) => Outcome::Success(v),
            Outcome::Failure(b) => Outcome::Failure(b.clone()),
        }
    }
}

impl<T> From<Result<T, ParseErrorBundle>> for Outcome<T> {
    fn from(r: Result<T, ParseErrorBundle>) -> Self {
        Outcome::from_result(r)
    }
}

impl<T> From<Outcome<T>> for Result<T, ParseErrorBundle> {
    fn from(o: Outcome<T>) -> Self {
        o.into_result()
    }
}
