//! The immutable state threaded through the slow execution path.

use std::rc::Rc;

use crate::span::SourcePosition;

/// Slow-path parser state: a cheap-to-clone, logically-immutable value.
///
/// Every combinator consumes a `ParserState` and produces a new one; nothing
/// is mutated in place. `source` and `label_stack` are reference-counted so
/// cloning a state (which combinators do constantly, e.g. to snapshot
/// before trying an alternative) never copies the source text.
#[derive(Debug, Clone)]
pub struct ParserState {
    source: Rc<str>,
    position: SourcePosition,
    committed: bool,
    label_stack: Vec<Rc<str>>,
}

impl ParserState {
    /// Create the initial state for a fresh parse of `source`.
    pub fn new(source: Rc<str>) -> Self {
        ParserState {
            source,
            position: SourcePosition::start(),
            committed: false,
            label_stack: Vec::new(),
        }
    }

    /// Build a state directly from its parts. Used to bridge a `FastCtx`
    /// into the slow path for a combinator that only implements
    /// `run_slow`.
    pub fn at(
        source: Rc<str>,
        position: SourcePosition,
        committed: bool,
        label_stack: Vec<Rc<str>>,
    ) -> Self {
        ParserState {
            source,
            position,
            committed,
            label_stack,
        }
    }

    /// The full source text being parsed.
    pub fn source(&self) -> &Rc<str> {
        &self.source
    }

    /// The current byte offset into `source`.
    pub fn offset(&self) -> usize {
        self.position.offset
    }

    /// The current line/column/offset triple.
    pub fn position(&self) -> SourcePosition {
        self.position
    }

    /// The not-yet-consumed suffix of the source.
    pub fn remaining(&self) -> &str {
        &self.source[self.position.offset..]
    }

    /// Whether the current alternative scope has committed, preventing
    /// surrounding `or`/`optional` from backtracking past this point.
    pub fn committed(&self) -> bool {
        self.committed
    }

    /// The label stack currently in effect.
    pub fn label_stack(&self) -> &[Rc<str>] {
        &self.label_stack
    }

    /// True if the cursor is at the end of the source.
    pub fn at_eof(&self) -> bool {
        self.position.offset >= self.source.len()
    }

    /// Return a state advanced past `text`, which must be a prefix of
    /// `self.remaining()`.
    pub fn advance(&self, text: &str) -> Self {
        debug_assert!(self.remaining().starts_with(text));
        ParserState {
            source: self.source.clone(),
            position: self.position.advance_str(text),
            committed: self.committed,
            label_stack: self.label_stack.clone(),
        }
    }

    /// Return a state with `committed` set. Used by `Parser::commit`.
    pub fn with_committed(&self, committed: bool) -> Self {
        ParserState {
            source: self.source.clone(),
            position: self.position,
            committed,
            label_stack: self.label_stack.clone(),
        }
    }

    /// Return a state with `label` pushed onto the label stack. Used when
    /// entering a `Parser::label` scope.
    pub fn push_label(&self, label: Rc<str>) -> Self {
        let mut label_stack = self.label_stack.clone();
        label_stack.push(label);
        ParserState {
            source: self.source.clone(),
            position: self.position,
            committed: self.committed,
            label_stack,
        }
    }

    /// Return a state whose label stack has been truncated to `len`. Used
    /// when leaving a `Parser::label` scope, regardless of outcome, so the
    /// stack length discipline holds even if something went wrong inside.
    pub fn truncate_label_stack(&self, len: usize) -> Self {
        let mut label_stack = self.label_stack.clone();
        label_stack.truncate(len);
        ParserState {
            source: self.source.clone(),
            position: self.position,
            committed: self.committed,
            label_stack,
        }
    }
}
