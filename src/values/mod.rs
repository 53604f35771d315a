//! Attribute values
//!
//! Attribute text is coerced into typed [`Value`]s according to a
//! [`ValueKind`]. Coercion is a pure function of the text and the kind; a
//! value formatted with `Display` coerces back to an equal value.

mod coercion;
mod kinds;

pub use coercion::{array_len, coerce, coerce_item, Value};
pub use kinds::{ItemKind, ValueKind};
