//! XML name validation
//!
//! Element and attribute names of a schema end up verbatim in tags and in the
//! generated DTD, so they must be valid XML names. SDL does not use
//! namespaces, which restricts names further to NCNames.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SchemaError;

/// Attribute that carries the identity of an element.
///
/// Rendered as `ID` in the grammar; cross-reference attributes point at
/// values of this attribute.
pub const ID_ATTRIBUTE: &str = "name";

// Simplified to the ASCII and Latin-1 ranges of the XML NameStartChar production
static NCNAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}][A-Z_a-z\u{C0}-\u{D6}\u{D8}-\u{F6}\u{F8}-\u{2FF}\-\.0-9\u{B7}]*$")
        .unwrap()
});

/// Check if a string is a valid NCName (non-colonized XML name)
pub fn is_valid_ncname(name: &str) -> bool {
    NCNAME.is_match(name)
}

/// Validate a schema name and return an error if invalid
pub fn validate_name(name: &str) -> Result<(), SchemaError> {
    if is_valid_ncname(name) {
        Ok(())
    } else {
        Err(SchemaError::InvalidName {
            name: name.to_string(),
        })
    }
}
