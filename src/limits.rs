//! Limits for document processing
//!
//! These bound the resources a single document may claim: nesting depth,
//! attributes per tag and items per array attribute.

use thiserror::Error;

/// A document exceeded one of the configured [`Limits`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{what} {actual} exceeds maximum {max}")]
pub struct LimitError {
    /// Which quantity was measured
    pub what: &'static str,
    /// Measured value
    pub actual: usize,
    /// Configured maximum
    pub max: usize,
}

/// Limits configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum element nesting depth
    pub max_depth: usize,

    /// Maximum number of attributes on one tag
    pub max_attributes: usize,

    /// Maximum number of items in one array attribute
    pub max_array_items: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_depth: 256,
            max_attributes: 64,
            max_array_items: 1_000_000,
        }
    }
}

impl Limits {
    /// Create a new Limits with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict limits (more restrictive)
    pub fn strict() -> Self {
        Self {
            max_depth: 32,
            max_attributes: 16,
            max_array_items: 10_000,
        }
    }

    /// Create permissive limits (less restrictive, use with caution)
    pub fn permissive() -> Self {
        Self {
            max_depth: 4096,
            max_attributes: 1024,
            max_array_items: 100_000_000,
        }
    }

    /// Check if nesting depth is within limits
    pub fn check_depth(&self, depth: usize) -> Result<(), LimitError> {
        check("nesting depth", depth, self.max_depth)
    }

    /// Check if number of attributes is within limits
    pub fn check_attributes(&self, count: usize) -> Result<(), LimitError> {
        check("attribute count", count, self.max_attributes)
    }

    /// Check if number of array items is within limits
    pub fn check_array_items(&self, count: usize) -> Result<(), LimitError> {
        check("array length", count, self.max_array_items)
    }
}

fn check(what: &'static str, actual: usize, max: usize) -> Result<(), LimitError> {
    if actual > max {
        Err(LimitError { what, actual, max })
    } else {
        Ok(())
    }
}
