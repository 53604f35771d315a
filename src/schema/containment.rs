//! Containment rules
//!
//! A containment rule lists the children an element may hold and how often
//! the group of children repeats. It corresponds to a DTD content model:
//!
//! | Cardinality  | Content model  | Meaning                                  |
//! |--------------|----------------|------------------------------------------|
//! | `Single`     | `(A,B?,C)`     | each child once (`?`: at most once)      |
//! | `ZeroOrMore` | `(A\|B)*`      | any number of children from the set      |
//! | `OneOrMore`  | `(A\|B)+`      | at least one child from the set          |

use std::fmt;

use serde::{Deserialize, Serialize};

/// How often the group of allowed children repeats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cardinality {
    /// Every listed child appears once, in any order
    #[default]
    Single,
    /// Zero or more children from the set
    ZeroOrMore,
    /// One or more children from the set
    OneOrMore,
}

impl Cardinality {
    /// Separator between child names in a content model
    pub fn separator(&self) -> &'static str {
        match self {
            Cardinality::Single => ",",
            Cardinality::ZeroOrMore | Cardinality::OneOrMore => "|",
        }
    }

    /// Repetition suffix of a content model
    pub fn indicator(&self) -> &'static str {
        match self {
            Cardinality::Single => "",
            Cardinality::ZeroOrMore => "*",
            Cardinality::OneOrMore => "+",
        }
    }

    /// Check if the element may be left without children
    pub fn is_emptiable(&self) -> bool {
        matches!(self, Cardinality::ZeroOrMore)
    }
}

/// A child element allowed by a containment rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildRef {
    /// Element name of the child
    pub name: String,
    /// Whether the child may be left out of a `Single` group
    pub optional: bool,
}

impl ChildRef {
    /// Parse a child reference; a trailing `?` marks it optional
    pub fn parse(s: &str) -> Self {
        match s.strip_suffix('?') {
            Some(name) => Self {
                name: name.to_string(),
                optional: true,
            },
            None => Self {
                name: s.to_string(),
                optional: false,
            },
        }
    }
}

impl fmt::Display for ChildRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if self.optional {
            f.write_str("?")?;
        }
        Ok(())
    }
}

/// Children an element may contain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainmentRule {
    children: Vec<ChildRef>,
    cardinality: Cardinality,
}

impl ContainmentRule {
    /// Create a containment rule
    pub fn new(children: Vec<ChildRef>, cardinality: Cardinality) -> Self {
        Self {
            children,
            cardinality,
        }
    }

    /// Get the allowed children, in declaration order
    pub fn children(&self) -> &[ChildRef] {
        &self.children
    }

    /// Get the cardinality
    pub fn cardinality(&self) -> Cardinality {
        self.cardinality
    }

    /// Index of `name` among the allowed children
    pub fn position(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.name == name)
    }

    /// Check if `name` may appear as a child
    pub fn allows(&self, name: &str) -> bool {
        self.position(name).is_some()
    }
}
