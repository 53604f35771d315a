//! The element/attribute schema
//!
//! The schema is written once as data ([`SchemaDef`]) and validated into a
//! [`SchemaRegistry`]. Parsing, dispatch and grammar generation all read the
//! same registry.

mod attributes;
mod containment;
mod definitions;
mod elements;
mod registry;

pub use attributes::{AttributeSpec, AttributeUse};
pub use containment::{Cardinality, ChildRef, ContainmentRule};
pub use definitions::{ContainsDef, ElementDef, SchemaDef, TypeDef};
pub use elements::ElementSchema;
pub use registry::{SchemaRegistry, SDL_SCHEMA};
