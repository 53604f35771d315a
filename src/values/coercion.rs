//! Coercion of raw attribute text into typed values

use std::fmt;

use crate::error::CoercionError;

use super::kinds::{ItemKind, ValueKind};

/// A coerced attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Boolean value
    Boolean(bool),
    /// Floating point number
    Number(f64),
    /// Signed integer
    Integer(i64),
    /// Free text
    Text(String),
    /// Fixed-arity tuple of numbers
    Tuple(Vec<f64>),
    /// Name of another element, unresolved
    Reference(String),
    /// List of items of one kind
    Array(Vec<Value>),
}

impl Value {
    /// Get the boolean, if this is one
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the number, if this is one
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get the integer, if this is one
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the text of a text or reference value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) | Value::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Get the referenced name, if this is a reference
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Value::Reference(s) => Some(s),
            _ => None,
        }
    }

    /// Get the tuple components, if this is a tuple
    pub fn as_tuple(&self) -> Option<&[f64]> {
        match self {
            Value::Tuple(t) => Some(t),
            _ => None,
        }
    }

    /// Get the items, if this is an array
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Short description of the value's kind, for error messages
    pub fn kind_name(&self) -> String {
        match self {
            Value::Boolean(_) => "boolean".to_string(),
            Value::Number(_) => "number".to_string(),
            Value::Integer(_) => "integer".to_string(),
            Value::Text(_) => "text".to_string(),
            Value::Tuple(t) => format!("tuple<{}>", t.len()),
            Value::Reference(_) => "idref".to_string(),
            Value::Array(_) => "array".to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Text(s) | Value::Reference(s) => f.write_str(s),
            Value::Tuple(components) => {
                for (i, c) in components.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{}", c)?;
                }
                Ok(())
            }
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

/// Coerce raw attribute text into a value of the given kind
///
/// - booleans accept exactly `true` and `false`
/// - numbers and integers are trimmed, then parsed
/// - tuples are split on single spaces and need exactly the declared number
///   of numeric tokens
/// - arrays are split on commas, each item trimmed and coerced; empty
///   segments are skipped and blank text is the empty array
/// - text and references are taken verbatim
pub fn coerce(raw: &str, kind: ValueKind) -> Result<Value, CoercionError> {
    match kind {
        ValueKind::Array(item) => coerce_array(raw, item),
        ValueKind::Boolean => coerce_item(raw, ItemKind::Boolean),
        ValueKind::Number => coerce_item(raw, ItemKind::Number),
        ValueKind::Integer => coerce_item(raw, ItemKind::Integer),
        ValueKind::Text => coerce_item(raw, ItemKind::Text),
        ValueKind::Tuple(n) => coerce_item(raw, ItemKind::Tuple(n)),
        ValueKind::Reference => coerce_item(raw, ItemKind::Reference),
    }
}

/// Coerce raw text into a single (non-array) value
pub fn coerce_item(raw: &str, kind: ItemKind) -> Result<Value, CoercionError> {
    match kind {
        ItemKind::Boolean => boolean(raw).map(Value::Boolean),
        ItemKind::Number => number(raw).map(Value::Number),
        ItemKind::Integer => integer(raw).map(Value::Integer),
        ItemKind::Text => Ok(Value::Text(raw.to_string())),
        ItemKind::Tuple(n) => tuple(raw, n).map(Value::Tuple),
        ItemKind::Reference => Ok(Value::Reference(raw.to_string())),
    }
}

// =============================================================================
// Scalars
// =============================================================================

fn boolean(raw: &str) -> Result<bool, CoercionError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(CoercionError::new(raw, ValueKind::Boolean)
            .with_reason("expected \"true\" or \"false\"")),
    }
}

fn number(raw: &str) -> Result<f64, CoercionError> {
    float(raw.trim())
        .ok_or_else(|| CoercionError::new(raw, ValueKind::Number).with_reason("not a number"))
}

/// Parse a decimal or scientific float literal
///
/// Named specials (`inf`, `NaN`, ...) are not literals, and a literal too
/// large for `f64` is rejected rather than rounded to infinity.
fn float(token: &str) -> Option<f64> {
    let literal = token.bytes().any(|b| b.is_ascii_digit())
        && token
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !literal {
        return None;
    }
    token.parse::<f64>().ok().filter(|n| n.is_finite())
}

fn integer(raw: &str) -> Result<i64, CoercionError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|e| CoercionError::new(raw, ValueKind::Integer).with_reason(e.to_string()))
}

// =============================================================================
// Compound values
// =============================================================================

fn tuple(raw: &str, arity: usize) -> Result<Vec<f64>, CoercionError> {
    let kind = ValueKind::Tuple(arity);
    let tokens: Vec<&str> = raw.split(' ').collect();

    if tokens.len() != arity {
        return Err(CoercionError::new(raw, kind).with_reason(format!(
            "expected {} space-separated numbers, found {} tokens",
            arity,
            tokens.len()
        )));
    }

    tokens
        .into_iter()
        .map(|token| {
            float(token).ok_or_else(|| {
                CoercionError::new(raw, kind).with_reason(format!("\"{}\" is not a number", token))
            })
        })
        .collect()
}

/// Number of items an array attribute holds, counted without coercing them
pub fn array_len(raw: &str) -> usize {
    segments(raw).count()
}

/// Non-empty comma segments of array text; blank text has none
fn segments(raw: &str) -> impl Iterator<Item = &str> {
    let text = if raw.trim().is_empty() { "" } else { raw };
    text.split(',').filter(|segment| !segment.is_empty())
}

fn coerce_array(raw: &str, item: ItemKind) -> Result<Value, CoercionError> {
    segments(raw)
        .map(|segment| {
            coerce_item(segment.trim(), item).map_err(|e| {
                let reason = format!("item {}", e);
                CoercionError::new(raw, ValueKind::Array(item)).with_reason(reason)
            })
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Value::Array)
}
