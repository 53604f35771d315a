//! Value kinds
//!
//! Kinds are written in declarative schemas as short names:
//!
//! | Kind              | Example text      |
//! |-------------------|-------------------|
//! | `boolean`         | `true`            |
//! | `number`          | `0.5`, `-1e3`     |
//! | `integer`         | `42`              |
//! | `text`            | `any text`        |
//! | `idref`           | `red-plastic`     |
//! | `tuple<3>`        | `1 0 0`           |
//! | `array<integer>`  | `0, 1, 2`         |
//! | `array<tuple<3>>` | `0 0 0, 1 0 0`    |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of one item of an array attribute
///
/// Arrays are split on commas, so an item can never itself be an array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// `true` or `false`
    Boolean,
    /// Floating point number
    Number,
    /// Signed integer
    Integer,
    /// Free text
    Text,
    /// Fixed number of space-separated numbers
    Tuple(usize),
    /// Name of another element, resolved by the consumer
    Reference,
}

/// Kind of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ValueKind {
    /// `true` or `false`
    Boolean,
    /// Floating point number
    Number,
    /// Signed integer
    Integer,
    /// Free text
    Text,
    /// Fixed number of space-separated numbers
    Tuple(usize),
    /// Name of another element, resolved by the consumer
    Reference,
    /// Comma-separated list of items
    Array(ItemKind),
}

impl ItemKind {
    /// Parse a kind name such as `number` or `tuple<3>`
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "boolean" => Some(ItemKind::Boolean),
            "number" => Some(ItemKind::Number),
            "integer" => Some(ItemKind::Integer),
            "text" => Some(ItemKind::Text),
            "idref" => Some(ItemKind::Reference),
            other => {
                let arity = other.strip_prefix("tuple<")?.strip_suffix('>')?;
                arity.trim().parse().ok().map(ItemKind::Tuple)
            }
        }
    }

    /// Get the kind name
    pub fn name(&self) -> String {
        match self {
            ItemKind::Boolean => "boolean".to_string(),
            ItemKind::Number => "number".to_string(),
            ItemKind::Integer => "integer".to_string(),
            ItemKind::Text => "text".to_string(),
            ItemKind::Tuple(n) => format!("tuple<{}>", n),
            ItemKind::Reference => "idref".to_string(),
        }
    }
}

impl ValueKind {
    /// Parse a kind name such as `number`, `tuple<3>` or `array<integer>`
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if let Some(item) = s.strip_prefix("array<").and_then(|rest| rest.strip_suffix('>')) {
            return ItemKind::parse(item).map(ValueKind::Array);
        }
        ItemKind::parse(s).map(ValueKind::from)
    }

    /// Get the kind name
    pub fn name(&self) -> String {
        match self {
            ValueKind::Array(item) => format!("array<{}>", item.name()),
            scalar => scalar.item().map(|item| item.name()).unwrap_or_default(),
        }
    }

    /// The scalar kind, or `None` for arrays
    pub fn item(&self) -> Option<ItemKind> {
        match *self {
            ValueKind::Boolean => Some(ItemKind::Boolean),
            ValueKind::Number => Some(ItemKind::Number),
            ValueKind::Integer => Some(ItemKind::Integer),
            ValueKind::Text => Some(ItemKind::Text),
            ValueKind::Tuple(n) => Some(ItemKind::Tuple(n)),
            ValueKind::Reference => Some(ItemKind::Reference),
            ValueKind::Array(_) => None,
        }
    }

    /// Whether the value names another element
    pub fn is_reference(&self) -> bool {
        matches!(self, ValueKind::Reference)
    }

    /// Arity of a tuple kind, including tuples nested in arrays
    pub fn tuple_arity(&self) -> Option<usize> {
        match *self {
            ValueKind::Tuple(n) | ValueKind::Array(ItemKind::Tuple(n)) => Some(n),
            _ => None,
        }
    }
}

impl From<ItemKind> for ValueKind {
    fn from(item: ItemKind) -> Self {
        match item {
            ItemKind::Boolean => ValueKind::Boolean,
            ItemKind::Number => ValueKind::Number,
            ItemKind::Integer => ValueKind::Integer,
            ItemKind::Text => ValueKind::Text,
            ItemKind::Tuple(n) => ValueKind::Tuple(n),
            ItemKind::Reference => ValueKind::Reference,
        }
    }
}

impl TryFrom<String> for ValueKind {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        ValueKind::parse(&s).ok_or_else(|| format!("unknown value kind '{}'", s))
    }
}

impl From<ValueKind> for String {
    fn from(kind: ValueKind) -> Self {
        kind.name()
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
