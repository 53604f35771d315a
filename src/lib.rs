//! # sdlschema
//!
//! Schema-driven parsing and dispatch for SDL, the XML scene description format.
//!
//! One declarative schema drives both sides of the format:
//!
//! - parsing: every tag is looked up in the [`SchemaRegistry`], its attributes
//!   are coerced into typed [`Value`]s and the resulting call is fanned out to
//!   every registered [`Observer`], in registration order
//! - grammar: [`grammar::generate`] renders the same registry into a DTD, so the
//!   published grammar and the parser cannot disagree
//!
//! ## Example
//!
//! ```rust,ignore
//! use sdlschema::{documents, Dispatcher, EchoObserver, SchemaRegistry};
//!
//! let registry = SchemaRegistry::sdl();
//! let mut echo = EchoObserver::new(Vec::new());
//!
//! let mut dispatcher = Dispatcher::new(registry);
//! dispatcher.add_observer(&mut echo);
//! documents::parse_file(&mut dispatcher, "scene.sdl")?;
//! drop(dispatcher);
//!
//! print!("{}", String::from_utf8_lossy(echo.get_ref()));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Foundation
pub mod error;
pub mod limits;
pub mod locations;
pub mod names;

// Attribute values and the schema model
pub mod values;
pub mod schema;

// Consumers of the schema
pub mod grammar;
pub mod dispatch;
pub mod echo;

// Document reading
pub mod documents;

// Re-exports for convenience
pub use dispatch::{
    Arguments, AttributeMap, Dispatcher, HandlerTable, Observer, ObserverError, ObserverResult,
    ParseOptions, ParseState,
};
pub use echo::EchoObserver;
pub use error::{
    ArgumentError, CoercionError, Error, GrammarError, ParseError, Result, SchemaError,
};
pub use grammar::GrammarDocument;
pub use limits::Limits;
pub use locations::Position;
pub use schema::{
    AttributeSpec, AttributeUse, Cardinality, ChildRef, ContainmentRule, ElementDef,
    ElementSchema, SchemaDef, SchemaRegistry, TypeDef,
};
pub use values::{coerce, ItemKind, Value, ValueKind};

/// Version of the sdlschema library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
