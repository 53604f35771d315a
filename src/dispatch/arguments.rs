//! Coerced arguments of one element call

use crate::error::ArgumentError;
use crate::schema::{AttributeSpec, ElementSchema};
use crate::values::Value;

/// The positional arguments of an element call
///
/// Arguments follow the element's attribute order. A nullable attribute that
/// was not given is absent (`None`); every other position holds a value.
#[derive(Debug, Clone, PartialEq)]
pub struct Arguments<'s> {
    element: &'s ElementSchema,
    values: Vec<Option<Value>>,
}

impl<'s> Arguments<'s> {
    /// Create arguments for an element; `values` is parallel to its attributes
    pub fn new(element: &'s ElementSchema, values: Vec<Option<Value>>) -> Self {
        debug_assert_eq!(element.attributes().len(), values.len());
        Self { element, values }
    }

    /// The element these arguments belong to
    pub fn element(&self) -> &'s ElementSchema {
        self.element
    }

    /// Number of positional arguments
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the element takes no argument
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Argument at a position, `None` if absent or out of range
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index).and_then(Option::as_ref)
    }

    /// Iterate over attribute specs and their arguments
    pub fn iter(&self) -> impl Iterator<Item = (&'s AttributeSpec, Option<&Value>)> {
        self.element
            .attributes()
            .iter()
            .zip(self.values.iter().map(Option::as_ref))
    }

    /// Argument of a named attribute, `None` if it was absent
    pub fn optional(&self, name: &str) -> Result<Option<&Value>, ArgumentError> {
        match self.element.attribute(name) {
            Some((index, _)) => Ok(self.get(index)),
            None => Err(ArgumentError::Unknown {
                element: self.element.name().to_string(),
                attribute: name.to_string(),
            }),
        }
    }

    /// Argument of a named attribute that must be present
    pub fn value(&self, name: &str) -> Result<&Value, ArgumentError> {
        self.optional(name)?.ok_or_else(|| ArgumentError::Absent {
            element: self.element.name().to_string(),
            attribute: name.to_string(),
        })
    }

    /// Boolean argument
    pub fn boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        let value = self.value(name)?;
        value.as_bool().ok_or_else(|| self.wrong_kind(name, "boolean", value))
    }

    /// Number argument
    pub fn number(&self, name: &str) -> Result<f64, ArgumentError> {
        let value = self.value(name)?;
        value.as_number().ok_or_else(|| self.wrong_kind(name, "number", value))
    }

    /// Integer argument
    pub fn integer(&self, name: &str) -> Result<i64, ArgumentError> {
        let value = self.value(name)?;
        value.as_integer().ok_or_else(|| self.wrong_kind(name, "integer", value))
    }

    /// Text or reference argument
    pub fn text(&self, name: &str) -> Result<&str, ArgumentError> {
        let value = self.value(name)?;
        value.as_text().ok_or_else(|| self.wrong_kind(name, "text", value))
    }

    /// Tuple argument of arity `N`
    pub fn tuple<const N: usize>(&self, name: &str) -> Result<[f64; N], ArgumentError> {
        let value = self.value(name)?;
        value
            .as_tuple()
            .and_then(|components| <[f64; N]>::try_from(components).ok())
            .ok_or_else(|| self.wrong_kind(name, &format!("tuple<{}>", N), value))
    }

    /// Array argument
    pub fn array(&self, name: &str) -> Result<&[Value], ArgumentError> {
        let value = self.value(name)?;
        value.as_array().ok_or_else(|| self.wrong_kind(name, "array", value))
    }

    fn wrong_kind(&self, name: &str, expected: &str, found: &Value) -> ArgumentError {
        ArgumentError::WrongKind {
            element: self.element.name().to_string(),
            attribute: name.to_string(),
            expected: expected.to_string(),
            found: found.kind_name(),
        }
    }
}
