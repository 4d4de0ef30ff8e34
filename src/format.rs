//! Rendering a `ParseErrorBundle` for a human (plain text, ANSI-colored
//! terminal, HTML) or a machine (JSON).

use std::fmt::Write as _;

use serde::Serialize;

use crate::error::{ParseError, ParseErrorBundle};

/// Output format selected for `ErrorFormatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Plain, uncolored text.
    Plain,
    /// ANSI escape codes for a terminal.
    Ansi,
    /// An HTML fragment.
    Html,
    /// A JSON object.
    Json,
}

/// Knobs controlling how much an `ErrorFormatter` shows and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// How many lines of source context to show around the error line.
    pub max_context_lines: usize,
    /// Whether to render the "Did you mean: ..." hints line.
    pub show_hints: bool,
    /// Whether to emit ANSI color codes (only meaningful for `Format::Ansi`).
    pub colorize: bool,
    /// Whether to render source context lines and the caret at all.
    pub show_context: bool,
    /// How many spaces a tab expands to when rendering source context.
    pub tab_size: usize,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            max_context_lines: 2,
            show_hints: true,
            colorize: true,
            show_context: true,
            tab_size: 4,
        }
    }
}

/// Renders a `ParseErrorBundle` according to a `Format` and `FormatOptions`.
/// Never mutates the bundle it's given; deterministic for a fixed bundle and
/// options.
pub struct ErrorFormatter {
    format: Format,
    options: FormatOptions,
}

impl ErrorFormatter {
    /// Build a formatter for `format`, with `options` controlling its
    /// level of detail.
    pub fn new(format: Format, options: FormatOptions) -> Self {
        ErrorFormatter { format, options }
    }

    /// Render `bundle`'s primary error in the configured format.
    pub fn format(&self, bundle: &ParseErrorBundle) -> String {
        match self.format {
            Format::Plain => render_plain(bundle, &self.options, false),
            Format::Ansi => render_plain(bundle, &self.options, self.options.colorize),
            Format::Html => render_html(bundle, &self.options),
            Format::Json => render_json(bundle, &self.options),
        }
    }
}

fn source_lines_around(source: &str, line: usize, max_context_lines: usize, tab_size: usize) -> Vec<(usize, String)> {
    let lines: Vec<&str> = source.split('\n').collect();
    if lines.is_empty() || line == 0 {
        return Vec::new();
    }
    let before = max_context_lines / 2;
    let after = max_context_lines.saturating_sub(before);
    let start = line.saturating_sub(before).max(1);
    let end = (line + after).min(lines.len());
    let tab_spaces = " ".repeat(tab_size);
    (start..=end)
        .filter_map(|n| lines.get(n - 1).map(|text| (n, text.replace('\t', &tab_spaces))))
        .collect()
}

fn caret_line(column: usize, length: usize, tab_size: usize) -> String {
    let _ = tab_size;
    let padding = " ".repeat(column.saturating_sub(1));
    let carets = "^".repeat(length.max(1));
    format!("{padding}{carets}")
}

fn hints_line(err: &ParseError) -> Option<String> {
    let hints = err.hints();
    if hints.is_empty() {
        None
    } else {
        Some(format!("Did you mean: {}?", hints.join(", ")))
    }
}

fn context_stack_line(err: &ParseError) -> Option<String> {
    let context = err.context();
    if context.is_empty() {
        None
    } else {
        let path: Vec<&str> = context.iter().map(|s| s.as_ref()).collect();
        Some(format!("Context: {}", path.join(" > ")))
    }
}

fn render_plain(bundle: &ParseErrorBundle, options: &FormatOptions, colorize: bool) -> String {
    let mut out = String::new();
    let Some(err) = bundle.primary() else {
        return "no error".to_string();
    };
    let span = err.span();

    if colorize {
        let _ = write!(out, "\x1b[31merror\x1b[0m at line {}, column {}: {}", span.line, span.column, err);
    } else {
        let _ = write!(out, "error at line {}, column {}: {}", span.line, span.column, err);
    }

    if options.show_context {
        for (n, text) in source_lines_around(&bundle.source, span.line, options.max_context_lines, options.tab_size) {
            let _ = write!(out, "\n{n:>4} | {text}");
            if n == span.line {
                let caret = caret_line(span.column, span.length, options.tab_size);
                if colorize {
                    let _ = write!(out, "\n     | \x1b[33m{caret}\x1b[0m");
                } else {
                    let _ = write!(out, "\n     | {caret}");
                }
            }
        }
    }

    if options.show_hints {
        if let Some(hints) = hints_line(err) {
            let _ = write!(out, "\n{hints}");
        }
    }

    if let Some(context) = context_stack_line(err) {
        let _ = write!(out, "\n{context}");
    }

    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;").replace('"', "&quot;")
}

fn render_html(bundle: &ParseErrorBundle, options: &FormatOptions) -> String {
    let Some(err) = bundle.primary() else {
        return "<pre>no error</pre>".to_string();
    };
    let span = err.span();
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"parse-error\"><p class=\"message\">error at line {}, column {}: {}</p>",
        span.line,
        span.column,
        escape_html(&err.to_string())
    );

    if options.show_context {
        let _ = write!(out, "<pre class=\"context\">");
        for (n, text) in source_lines_around(&bundle.source, span.line, options.max_context_lines, options.tab_size) {
            let _ = write!(out, "{n:>4} | {}\n", escape_html(&text));
            if n == span.line {
                let caret = caret_line(span.column, span.length, options.tab_size);
                let _ = write!(out, "     | {caret}\n");
            }
        }
        let _ = write!(out, "</pre>");
    }

    if options.show_hints {
        if let Some(hints) = hints_line(err) {
            let _ = write!(out, "<p class=\"hints\">{}</p>", escape_html(&hints));
        }
    }

    if let Some(context) = context_stack_line(err) {
        let _ = write!(out, "<p class=\"context\">{}</p>", escape_html(&context));
    }

    let _ = write!(out, "</div>");
    out
}

#[derive(Serialize)]
struct JsonError<'a> {
    message: String,
    line: usize,
    column: usize,
    offset: usize,
    hints: &'a [String],
    context: Vec<&'a str>,
}

fn render_json(bundle: &ParseErrorBundle, options: &FormatOptions) -> String {
    let Some(err) = bundle.primary() else {
        return "null".to_string();
    };
    let span = err.span();
    let payload = JsonError {
        message: err.to_string(),
        line: span.line,
        column: span.column,
        offset: span.offset,
        hints: if options.show_hints { err.hints() } else { &[] },
        context: err.context().iter().map(|s| s.as_ref()).collect(),
    };
    serde_json::to_string(&payload).unwrap_or_else(|_| "null".to_string())
}

/// Convenience functions equivalent to constructing an `ErrorFormatter`
/// with default options for each format.
pub mod format_error {
    use super::{ErrorFormatter, Format, FormatOptions};
    use crate::error::ParseErrorBundle;

    /// Render `bundle` as plain text with default options.
    pub fn plain(bundle: &ParseErrorBundle) -> String {
        ErrorFormatter::new(Format::Plain, FormatOptions::default()).format(bundle)
    }

    /// Render `bundle` with ANSI color codes and default options.
    pub fn ansi(bundle: &ParseErrorBundle) -> String {
        ErrorFormatter::new(Format::Ansi, FormatOptions::default()).format(bundle)
    }

    /// Render `bundle` as an HTML fragment with default options.
    pub fn html(bundle: &ParseErrorBundle) -> String {
        ErrorFormatter::new(Format::Html, FormatOptions::default()).format(bundle)
    }

    /// Render `bundle` as JSON with default options.
    pub fn json(bundle: &ParseErrorBundle) -> String {
        ErrorFormatter::new(Format::Json, FormatOptions::default()).format(bundle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;

    fn sample_bundle() -> ParseErrorBundle {
        let err = ParseError::expected(
            Span::new(crate::span::SourcePosition { line: 2, column: 3, offset: 5 }, 1),
            vec!["a digit".to_string()],
            vec!["expression".into(), "term".into()],
        );
        ParseErrorBundle::single(err, "let x =\n  y\n".to_string())
    }

    #[test]
    fn plain_includes_location_and_message() {
        let text = format_error::plain(&sample_bundle());
        assert!(text.contains("line 2, column 3"));
        assert!(text.contains("expected a digit"));
        assert!(text.contains("Context: expression > term"));
    }

    #[test]
    fn ansi_wraps_in_escape_codes() {
        let text = format_error::ansi(&sample_bundle());
        assert!(text.contains("\x1b["));
    }

    #[test]
    fn html_escapes_message() {
        let err = ParseError::custom(
            Span::new(crate::span::SourcePosition { line: 1, column: 1, offset: 0 }, 0),
            "expected <x>".to_string(),
            vec![],
            vec![],
        );
        let bundle = ParseErrorBundle::single(err, "x".to_string());
        let text = format_error::html(&bundle);
        assert!(text.contains("&lt;x&gt;"));
    }

    #[test]
    fn json_round_trips_as_valid_json() {
        let text = format_error::json(&sample_bundle());
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["line"], 2);
        assert_eq!(value["column"], 3);
    }

    #[test]
    fn hints_are_omitted_when_show_hints_is_false() {
        let err = ParseError::unexpected(
            Span::new(crate::span::SourcePosition { line: 1, column: 1, offset: 0 }, 1),
            "lamdba".to_string(),
            vec!["lambda".to_string()],
            vec![],
        );
        let bundle = ParseErrorBundle::single(err, "lamdba".to_string());
        let options = FormatOptions { show_hints: false, ..FormatOptions::default() };
        let text = ErrorFormatter::new(Format::Plain, options).format(&bundle);
        assert!(!text.contains("Did you mean"));
    }
}
