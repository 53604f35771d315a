//! Element declarations

use super::attributes::AttributeSpec;
use super::containment::ContainmentRule;

/// Declaration of one element kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSchema {
    name: String,
    attributes: Vec<AttributeSpec>,
    containment: Option<ContainmentRule>,
}

impl ElementSchema {
    /// Create an element declaration
    ///
    /// Consistency is checked by the registry, not here.
    pub fn new(
        name: impl Into<String>,
        attributes: Vec<AttributeSpec>,
        containment: Option<ContainmentRule>,
    ) -> Self {
        Self {
            name: name.into(),
            attributes,
            containment,
        }
    }

    /// Get the element name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the attributes in argument order
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    /// Get an attribute and its argument index by name
    pub fn attribute(&self, name: &str) -> Option<(usize, &AttributeSpec)> {
        self.attributes
            .iter()
            .enumerate()
            .find(|(_, spec)| spec.name() == name)
    }

    /// Get the containment rule, `None` if the element has no children
    pub fn containment(&self) -> Option<&ContainmentRule> {
        self.containment.as_ref()
    }

    /// Check if the element must be empty
    pub fn is_empty(&self) -> bool {
        self.containment.is_none()
    }
}
