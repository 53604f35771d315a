//! Per-document parse state

use crate::locations::Position;
use crate::schema::ElementSchema;

use super::observer::Observer;
use super::validation::ContentTracker;

/// Lifecycle state of a parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseState {
    /// No element is open
    Idle,
    /// At least one element is open
    Open,
    /// A parse error occurred; no further events are accepted
    Failed,
}

/// An element whose end tag has not been seen yet
pub(crate) struct OpenElement<'r> {
    pub schema: &'r ElementSchema,
    pub position: Option<Position>,
    pub content: ContentTracker<'r>,
}

/// State of one document: the observers, the element stack and the failure
pub(crate) struct ParseContext<'r, 'o> {
    pub observers: Vec<&'o mut dyn Observer>,
    pub stack: Vec<OpenElement<'r>>,
    pub failure: Option<String>,
    pub documents: usize,
}

impl<'r, 'o> ParseContext<'r, 'o> {
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
            stack: Vec::new(),
            failure: None,
            documents: 0,
        }
    }

    pub fn state(&self) -> ParseState {
        if self.failure.is_some() {
            ParseState::Failed
        } else if self.stack.is_empty() {
            ParseState::Idle
        } else {
            ParseState::Open
        }
    }

    /// Names of the open elements, outermost first
    pub fn path(&self) -> Vec<&str> {
        self.stack.iter().map(|open| open.schema.name()).collect()
    }

    /// Forget the document, keeping the observers
    pub fn reset(&mut self) {
        self.stack.clear();
        self.failure = None;
        self.documents = 0;
    }
}
