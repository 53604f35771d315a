//! Declarative schema definitions
//!
//! An [`ElementDef`] is the unchecked, data-only description of one element,
//! as written by hand in Rust or loaded from JSON:
//!
//! ```json
//! {
//!   "name": "PointLight",
//!   "attributes": ["position", "intensity", "color", "name"],
//!   "types": [
//!     { "kind": "tuple<3>" },
//!     { "kind": "number", "default": "1" },
//!     { "kind": "tuple<3>", "default": "1 1 1" },
//!     { "kind": "text" }
//!   ]
//! }
//! ```
//!
//! Attribute names and types are kept in two parallel lists, so a definition
//! can be inconsistent; [`SchemaRegistry::build`](super::SchemaRegistry::build)
//! rejects such definitions.

use serde::{Deserialize, Serialize};

use super::containment::Cardinality;
use crate::values::ValueKind;

/// Type and optionality of one attribute
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Value kind
    pub kind: ValueKind,
    /// Default text used when the attribute is absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Whether the attribute may be absent without a default
    #[serde(default, skip_serializing_if = "is_false")]
    pub optional: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl TypeDef {
    /// A required attribute
    pub fn required(kind: ValueKind) -> Self {
        Self {
            kind,
            default: None,
            optional: false,
        }
    }

    /// An optional attribute with a default value
    pub fn with_default(kind: ValueKind, default: impl Into<String>) -> Self {
        Self {
            kind,
            default: Some(default.into()),
            optional: true,
        }
    }

    /// An optional attribute without default
    pub fn optional(kind: ValueKind) -> Self {
        Self {
            kind,
            default: None,
            optional: true,
        }
    }
}

/// Children of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainsDef {
    /// Allowed child names; a trailing `?` marks a child optional
    pub children: Vec<String>,
    /// How the group of children repeats
    #[serde(default)]
    pub many: Cardinality,
}

/// Unchecked definition of one element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementDef {
    /// Element name
    pub name: String,
    /// Attribute names, in argument order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<String>,
    /// Attribute types, parallel to `attributes`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<TypeDef>,
    /// Allowed children, `None` for an empty element
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contains: Option<ContainsDef>,
}

impl ElementDef {
    /// Start the definition of an element without attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            types: Vec::new(),
            contains: None,
        }
    }

    /// Append an attribute
    pub fn attribute(mut self, name: impl Into<String>, type_def: TypeDef) -> Self {
        self.attributes.push(name.into());
        self.types.push(type_def);
        self
    }

    /// Set the allowed children
    pub fn contains<I, S>(mut self, children: I, many: Cardinality) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.contains = Some(ContainsDef {
            children: children.into_iter().map(Into::into).collect(),
            many,
        });
        self
    }
}

/// A complete declarative schema
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SchemaDef {
    /// Element definitions, in registry order
    pub elements: Vec<ElementDef>,
}
