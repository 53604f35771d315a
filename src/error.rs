//! Error types for sdlschema
//!
//! Errors fall into two classes that never mix:
//!
//! - [`SchemaError`]: a schema definition is inconsistent. Raised while the
//!   registry is built, before any document is read.
//! - [`ParseError`]: a document does not conform to the schema, or an observer
//!   gave up. Every variant is terminal for the parse it belongs to.

use std::fmt;
use thiserror::Error;

use crate::dispatch::ObserverError;
use crate::limits::LimitError;
use crate::locations::Position;
use crate::values::ValueKind;

/// Result type alias using the sdlschema [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for sdlschema operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid schema definition
    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Document rejected while parsing
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Attribute text that does not match its kind
    #[error("coercion error: {0}")]
    Coercion(#[from] CoercionError),

    /// Published grammar out of sync with the schema
    #[error("grammar error: {0}")]
    Grammar(#[from] GrammarError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON schema source could not be read or written
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Formats an optional source position as a message suffix.
fn at(position: &Option<Position>) -> String {
    match position {
        Some(position) => format!(" ({})", position),
        None => String::new(),
    }
}

// =============================================================================
// Coercion
// =============================================================================

/// Raw attribute text could not be read as the expected kind
#[derive(Debug, Clone, PartialEq)]
pub struct CoercionError {
    /// The offending text
    pub text: String,
    /// The kind the text was coerced to
    pub expected: ValueKind,
    /// Why coercion failed, when more can be said than "not a ..."
    pub reason: Option<String>,
}

impl CoercionError {
    /// Create a new coercion error
    pub fn new(text: impl Into<String>, expected: ValueKind) -> Self {
        Self {
            text: text.into(),
            expected,
            reason: None,
        }
    }

    /// Set the reason
    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

impl fmt::Display for CoercionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot read \"{}\" as {}", self.text, self.expected)?;
        if let Some(ref reason) = self.reason {
            write!(f, ": {}", reason)?;
        }
        Ok(())
    }
}

impl std::error::Error for CoercionError {}

// =============================================================================
// Schema building
// =============================================================================

/// Inconsistent schema definition, detected when the registry is built
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Lookup of an element the registry does not declare
    #[error("element \"{element}\" is not declared")]
    NotFound {
        /// Element name
        element: String,
    },

    /// Two definitions share a name
    #[error("element \"{element}\" is declared twice")]
    DuplicateElement {
        /// Element name
        element: String,
    },

    /// Two attributes of one element share a name
    #[error("attribute \"{attribute}\" is declared twice on element \"{element}\"")]
    DuplicateAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// Element or attribute name that is not a valid XML name
    #[error("\"{name}\" is not a valid XML name")]
    InvalidName {
        /// The rejected name
        name: String,
    },

    /// Attribute-name list and type list have different lengths
    #[error("element \"{element}\" declares {names} attribute names but {types} types")]
    ArityMismatch {
        /// Element name
        element: String,
        /// Number of attribute names
        names: usize,
        /// Number of attribute types
        types: usize,
    },

    /// Containment rule naming an element the registry does not declare
    #[error("element \"{element}\" may contain undeclared element \"{child}\"")]
    UndeclaredChild {
        /// Element name
        element: String,
        /// Referenced child name
        child: String,
    },

    /// Containment rule without any child
    #[error("element \"{element}\" has an empty containment rule")]
    EmptyContainment {
        /// Element name
        element: String,
    },

    /// Value kind that cannot be used for an attribute
    #[error("attribute \"{attribute}\" of element \"{element}\" has an invalid kind: {reason}")]
    InvalidKind {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// What is wrong with the kind
        reason: String,
    },

    /// Default text that does not satisfy its own attribute kind
    #[error("default of attribute \"{attribute}\" on element \"{element}\" is invalid: {source}")]
    InvalidDefault {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Coercion failure of the default text
        #[source]
        source: CoercionError,
    },
}

// =============================================================================
// Parsing
// =============================================================================

/// Terminal failure of a parse
#[derive(Error, Debug)]
pub enum ParseError {
    /// Tag without a schema entry
    #[error("unknown element \"{element}\"{}", at(.position))]
    UnknownElement {
        /// Element name
        element: String,
        /// Position of the tag
        position: Option<Position>,
    },

    /// Required attribute absent from the tag
    #[error("element \"{element}\" requires attribute \"{attribute}\"{}", at(.position))]
    MissingAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Position of the tag
        position: Option<Position>,
    },

    /// Attribute text that does not coerce to the declared kind
    #[error("invalid attribute \"{attribute}\" on element \"{element}\"{}: {source}", at(.position))]
    InvalidAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Position of the tag
        position: Option<Position>,
        /// Coercion failure
        #[source]
        source: CoercionError,
    },

    /// Attribute the element does not declare
    #[error("element \"{element}\" has no attribute \"{attribute}\"{}", at(.position))]
    UndeclaredAttribute {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Position of the tag
        position: Option<Position>,
    },

    /// Element not allowed at this point of its parent's content
    #[error("element \"{element}\" is not allowed {}{}", parent_clause(.parent), at(.position))]
    UnexpectedElement {
        /// Element name
        element: String,
        /// Enclosing element, `None` at document level
        parent: Option<String>,
        /// Position of the tag
        position: Option<Position>,
    },

    /// Element closed before its required children appeared
    #[error("element \"{element}\" is incomplete, expected {missing}{}", at(.position))]
    IncompleteContent {
        /// Element name
        element: String,
        /// Description of the missing content
        missing: String,
        /// Position of the end tag
        position: Option<Position>,
    },

    /// End tag that does not close the innermost open element
    #[error("end tag \"{element}\" does not match open element \"{expected}\"{}", at(.position))]
    MismatchedEnd {
        /// Name in the end tag
        element: String,
        /// Innermost open element
        expected: String,
        /// Position of the end tag
        position: Option<Position>,
    },

    /// End tag while no element is open
    #[error("end tag \"{element}\" without open element{}", at(.position))]
    UnexpectedEnd {
        /// Name in the end tag
        element: String,
        /// Position of the end tag
        position: Option<Position>,
    },

    /// Document ended with an element still open
    #[error("element \"{element}\" is never closed{}", at(.position))]
    UnterminatedElement {
        /// Innermost open element
        element: String,
        /// Position of its start tag
        position: Option<Position>,
    },

    /// Document exceeds the configured limits
    #[error("element \"{element}\"{}: {source}", at(.position))]
    LimitExceeded {
        /// Element name
        element: String,
        /// Position of the tag
        position: Option<Position>,
        /// Which limit was exceeded
        #[source]
        source: LimitError,
    },

    /// An observer raised an error while handling an element
    #[error("observer failed on element \"{element}\"{}: {source}", at(.position))]
    ObserverFailure {
        /// Element name
        element: String,
        /// Position of the tag
        position: Option<Position>,
        /// Error raised by the observer
        #[source]
        source: ObserverError,
    },

    /// Event delivered after the parse already failed
    #[error("parse already failed, no further events are accepted")]
    Aborted,

    /// Document is not well-formed
    #[error("malformed document{}: {message}", at(.position))]
    Syntax {
        /// Tokenizer message
        message: String,
        /// Where the tokenizer stopped
        position: Option<Position>,
    },
}

fn parent_clause(parent: &Option<String>) -> String {
    match parent {
        Some(parent) => format!("in element \"{}\"", parent),
        None => "as document element".to_string(),
    }
}

impl ParseError {
    /// Name of the element the error is attached to, if any
    pub fn element(&self) -> Option<&str> {
        match self {
            ParseError::UnknownElement { element, .. }
            | ParseError::MissingAttribute { element, .. }
            | ParseError::InvalidAttribute { element, .. }
            | ParseError::UndeclaredAttribute { element, .. }
            | ParseError::UnexpectedElement { element, .. }
            | ParseError::IncompleteContent { element, .. }
            | ParseError::MismatchedEnd { element, .. }
            | ParseError::UnexpectedEnd { element, .. }
            | ParseError::UnterminatedElement { element, .. }
            | ParseError::LimitExceeded { element, .. }
            | ParseError::ObserverFailure { element, .. } => Some(element),
            ParseError::Aborted | ParseError::Syntax { .. } => None,
        }
    }

    /// Source position of the offending tag, if known
    pub fn position(&self) -> Option<Position> {
        match self {
            ParseError::UnknownElement { position, .. }
            | ParseError::MissingAttribute { position, .. }
            | ParseError::InvalidAttribute { position, .. }
            | ParseError::UndeclaredAttribute { position, .. }
            | ParseError::UnexpectedElement { position, .. }
            | ParseError::IncompleteContent { position, .. }
            | ParseError::MismatchedEnd { position, .. }
            | ParseError::UnexpectedEnd { position, .. }
            | ParseError::UnterminatedElement { position, .. }
            | ParseError::LimitExceeded { position, .. }
            | ParseError::ObserverFailure { position, .. }
            | ParseError::Syntax { position, .. } => *position,
            ParseError::Aborted => None,
        }
    }
}

// =============================================================================
// Observer arguments
// =============================================================================

/// Typed access to a dispatched argument failed
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ArgumentError {
    /// The element does not declare this attribute
    #[error("element \"{element}\" has no attribute \"{attribute}\"")]
    Unknown {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// The attribute is nullable and was not given
    #[error("attribute \"{attribute}\" of element \"{element}\" is absent")]
    Absent {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
    },

    /// The value has another kind than requested
    #[error("attribute \"{attribute}\" of element \"{element}\" is {found}, not {expected}")]
    WrongKind {
        /// Element name
        element: String,
        /// Attribute name
        attribute: String,
        /// Requested kind
        expected: String,
        /// Actual kind
        found: String,
    },
}

// =============================================================================
// Grammar
// =============================================================================

/// Published grammar does not match the schema
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GrammarError {
    /// First line where the published grammar and a fresh rendering differ
    #[error("published grammar differs at line {line}: expected {expected:?}, found {found:?}")]
    Drift {
        /// 1-based line number
        line: usize,
        /// Line rendered from the schema
        expected: String,
        /// Line found in the published grammar
        found: String,
    },
}
