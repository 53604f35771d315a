//! Attribute declarations

use std::fmt;

use crate::names::ID_ATTRIBUTE;
use crate::values::ValueKind;

/// How an attribute may be omitted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttributeUse {
    /// Attribute must be present
    #[default]
    Required,
    /// Attribute may be omitted; the default text is coerced instead
    Default(String),
    /// Attribute may be omitted; observers then see it as absent
    Nullable,
}

impl AttributeUse {
    /// Get the default text, if any
    pub fn default_text(&self) -> Option<&str> {
        match self {
            AttributeUse::Default(text) => Some(text),
            _ => None,
        }
    }

    /// Get the use as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeUse::Required => "required",
            AttributeUse::Default(_) => "default",
            AttributeUse::Nullable => "nullable",
        }
    }
}

impl fmt::Display for AttributeUse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeUse::Default(text) => write!(f, "default \"{}\"", text),
            other => f.write_str(other.as_str()),
        }
    }
}

/// One attribute of an element
///
/// The position of a spec within its element is the position of the value in
/// the argument list handed to observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeSpec {
    name: String,
    kind: ValueKind,
    usage: AttributeUse,
}

impl AttributeSpec {
    /// Create an attribute declaration
    pub fn new(name: impl Into<String>, kind: ValueKind, usage: AttributeUse) -> Self {
        Self {
            name: name.into(),
            kind,
            usage,
        }
    }

    /// Create a required attribute
    pub fn required(name: impl Into<String>, kind: ValueKind) -> Self {
        Self::new(name, kind, AttributeUse::Required)
    }

    /// Get the attribute name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the value kind
    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Get the use mode
    pub fn usage(&self) -> &AttributeUse {
        &self.usage
    }

    /// Check if the attribute must be present
    pub fn is_required(&self) -> bool {
        self.usage == AttributeUse::Required
    }

    /// Check if the attribute names another element
    pub fn is_reference(&self) -> bool {
        self.kind.is_reference()
    }

    /// Check if the attribute carries the identity of its element
    pub fn is_identity(&self) -> bool {
        self.name == ID_ATTRIBUTE
    }
}
