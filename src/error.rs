//! The error taxonomy (`ParseError`) and the furthest-failure accumulator
//! (`ParseErrorBundle`).

use std::rc::Rc;

use serde::Serialize;
use thiserror::Error;

use crate::span::Span;

/// A single recorded parse failure.
///
/// Every variant carries the `Span` at which it occurred and the
/// `context` label stack that was active when it was recorded (see
/// `Parser::label`).
#[derive(Debug, Clone, PartialEq, Error, Serialize)]
pub enum ParseError {
    /// A primitive or combinator required one of `items`.
    #[error("expected {}", describe_items(items))]
    Expected {
        /// Location of the failure.
        span: Span,
        /// Human-readable descriptions of what would have matched.
        items: Vec<String>,
        /// Active label stack at the time of recording.
        context: Vec<Rc<str>>,
    },
    /// A concrete token mismatch.
    #[error("unexpected {found}")]
    Unexpected {
        /// Location of the failure.
        span: Span,
        /// A rendering of the text actually found.
        found: String,
        /// Edit-distance based suggestions, nearest first.
        hints: Vec<String>,
        /// Active label stack at the time of recording.
        context: Vec<Rc<str>>,
    },
    /// A domain-specific failure raised via `expect`/`fail`.
    #[error("{message}")]
    Custom {
        /// Location of the failure.
        span: Span,
        /// The message supplied by the caller.
        message: String,
        /// Edit-distance based suggestions, nearest first.
        hints: Vec<String>,
        /// Active label stack at the time of recording.
        context: Vec<Rc<str>>,
    },
    /// A terminal, non-backtrackable failure.
    #[error("{message}")]
    Fatal {
        /// Location of the failure.
        span: Span,
        /// The message supplied by the caller.
        message: String,
        /// Active label stack at the time of recording.
        context: Vec<Rc<str>>,
    },
}

fn describe_items(items: &[String]) -> String {
    match items {
        [] => "input".to_string(),
        [one] => one.clone(),
        many => format!("one of {}", many.join(", ")),
    }
}

impl ParseError {
    /// Build an `Expected` error.
    pub fn expected(span: Span, items: Vec<String>, context: Vec<Rc<str>>) -> Self {
        ParseError::Expected { span, items, context }
    }

    /// Build an `Unexpected` error.
    pub fn unexpected(span: Span, found: String, hints: Vec<String>, context: Vec<Rc<str>>) -> Self {
        ParseError::Unexpected { span, found, hints, context }
    }

    /// Build a `Custom` error.
    pub fn custom(span: Span, message: String, hints: Vec<String>, context: Vec<Rc<str>>) -> Self {
        ParseError::Custom { span, message, hints, context }
    }

    /// Build a `Fatal` error.
    pub fn fatal(span: Span, message: String, context: Vec<Rc<str>>) -> Self {
        ParseError::Fatal { span, message, context }
    }

    /// The span at which this error was recorded.
    pub fn span(&self) -> Span {
        match self {
            ParseError::Expected { span, .. }
            | ParseError::Unexpected { span, .. }
            | ParseError::Custom { span, .. }
            | ParseError::Fatal { span, .. } => *span,
        }
    }

    /// The label stack active when this error was recorded.
    pub fn context(&self) -> &[Rc<str>] {
        match self {
            ParseError::Expected { context, .. }
            | ParseError::Unexpected { context, .. }
            | ParseError::Custom { context, .. }
            | ParseError::Fatal { context, .. } => context,
        }
    }

    /// Suggested corrections, if any were computed.
    pub fn hints(&self) -> &[String] {
        match self {
            ParseError::Unexpected { hints, .. } | ParseError::Custom { hints, .. } => hints,
            ParseError::Expected { .. } | ParseError::Fatal { .. } => &[],
        }
    }

    /// True for the `Fatal` variant, which short-circuits `or`/`optional`.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ParseError::Fatal { .. })
    }

    /// Push a label onto this error's recorded context, innermost-last.
    pub fn push_context(mut self, label: Rc<str>) -> Self {
        match &mut self {
            ParseError::Expected { context, .. }
            | ParseError::Unexpected { context, .. }
            | ParseError::Custom { context, .. }
            | ParseError::Fatal { context, .. } => context.push(label),
        }
        self
    }

    /// Replace this error's context wholesale with a snapshot of the active
    /// label stack (outermost first). Called once, at the point an error is
    /// recorded, so nested `label()` scopes produce a path like
    /// `["expression", "if statement", "condition"]`.
    pub fn with_context_from(mut self, labels: &[Rc<str>]) -> Self {
        match &mut self {
            ParseError::Expected { context, .. }
            | ParseError::Unexpected { context, .. }
            | ParseError::Custom { context, .. }
            | ParseError::Fatal { context, .. } => {
                context.clear();
                context.extend(labels.iter().cloned());
            }
        }
        self
    }

    /// Rewrite this error so its primary message reads "expected
    /// <description>", as `Parser::expect` requires. Preserves span,
    /// context, and any hints already attached where the variant has a
    /// hints field.
    pub fn rewrite_as_expected(self, description: &str) -> Self {
        match self {
            ParseError::Fatal { .. } => self,
            ParseError::Expected { span, context, .. } => ParseError::Expected {
                span,
                items: vec![description.to_string()],
                context,
            },
            ParseError::Unexpected { span, context, hints, .. } => ParseError::Custom {
                span,
                message: format!("expected {description}"),
                hints,
                context,
            },
            ParseError::Custom { span, context, hints, .. } => ParseError::Custom {
                span,
                message: format!("expected {description}"),
                hints,
                context,
            },
        }
    }
}

/// All errors recorded while attempting a parse, plus the source they refer
/// to (needed by the formatter to print surrounding context lines).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseErrorBundle {
    /// Every error recorded during the attempt, in the order encountered.
    pub errors: Vec<ParseError>,
    /// The full source text the parse was run against.
    pub source: String,
}

impl ParseErrorBundle {
    /// Build a bundle from a list of errors and the source they apply to.
    pub fn new(errors: Vec<ParseError>, source: String) -> Self {
        ParseErrorBundle { errors, source }
    }

    /// A bundle containing a single error.
    pub fn single(error: ParseError, source: String) -> Self {
        ParseErrorBundle::new(vec![error], source)
    }

    /// The furthest-offset error, ties broken by insertion order (the
    /// earliest-recorded of the tied errors wins).
    pub fn primary(&self) -> Option<&ParseError> {
        let mut best: Option<&ParseError> = None;
        for e in &self.errors {
            match best {
                None => best = Some(e),
                Some(cur) if e.span().offset > cur.span().offset => best = Some(e),
                _ => {}
            }
        }
        best
    }

    /// All errors tied with `primary()` for the furthest offset.
    pub fn primary_errors(&self) -> Vec<&ParseError> {
        match self.primary() {
            None => vec![],
            Some(p) => {
                let offset = p.span().offset;
                self.errors.iter().filter(|e| e.span().offset == offset).collect()
            }
        }
    }

    /// Combine two bundles recorded against the same source, keeping every
    /// error from both. Used by `or`/`choice` to accumulate across tried
    /// alternatives.
    pub fn merge(mut self, other: ParseErrorBundle) -> Self {
        self.errors.extend(other.errors);
        self
    }

    /// Collapse this bundle to a single error: the primary, rewritten to
    /// read "expected <description>". Used by `Parser::expect` so a
    /// targeted message replaces whatever noisy set of alternatives failed
    /// underneath it.
    pub fn collapse_as_expected(self, description: &str) -> Self {
        match self.primary() {
            None => self,
            Some(p) => {
                let rewritten = p.clone().rewrite_as_expected(description);
                ParseErrorBundle::single(rewritten, self.source)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(offset: usize) -> Span {
        Span::zero_width(offset, 1, offset + 1)
    }

    #[test]
    fn primary_picks_furthest_offset() {
        let bundle = ParseErrorBundle::new(
            vec![
                ParseError::expected(span(2), vec!["a".into()], vec![]),
                ParseError::expected(span(5), vec!["b".into()], vec![]),
                ParseError::expected(span(1), vec!["c".into()], vec![]),
            ],
            "abcdef".to_string(),
        );
        assert_eq!(bundle.primary().unwrap().span().offset, 5);
    }

    #[test]
    fn primary_ties_keep_earliest() {
        let bundle = ParseErrorBundle::new(
            vec![
                ParseError::expected(span(5), vec!["a".into()], vec![]),
                ParseError::expected(span(5), vec!["b".into()], vec![]),
            ],
            "abcdef".to_string(),
        );
        let primary = bundle.primary().unwrap();
        assert_eq!(primary.context().len(), 0);
        match primary {
            ParseError::Expected { items, .. } => assert_eq!(items[0], "a"),
            _ => panic!("wrong variant"),
        }
        assert_eq!(bundle.primary_errors().len(), 2);
    }

    #[test]
    fn expect_rewrite_produces_expected_message() {
        let err = ParseError::unexpected(span(0), "x".into(), vec![], vec![]);
        let rewritten = err.rewrite_as_expected("an opening parenthesis");
        assert_eq!(format!("{rewritten}"), "expected an opening parenthesis");
    }

    #[test]
    fn fatal_is_not_rewritten_by_expect() {
        let err = ParseError::fatal(span(0), "boom".into(), vec![]);
        let rewritten = err.clone().rewrite_as_expected("never mind");
        assert_eq!(rewritten, err);
    }
}
