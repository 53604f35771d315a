//! Event dispatch
//!
//! The [`Dispatcher`] receives start and end tags, resolves them against a
//! [`SchemaRegistry`](crate::SchemaRegistry), coerces attributes into
//! [`Arguments`] and fans the resulting calls out to every registered
//! [`Observer`].
//!
//! Observers are borrowed for the duration of one parse, so the same observer
//! can be inspected once the dispatcher is dropped. Observers that only care
//! about a few elements can be written as a [`HandlerTable`].

mod arguments;
mod context;
mod dispatcher;
mod handlers;
mod observer;
mod validation;

pub use arguments::Arguments;
pub use context::ParseState;
pub use dispatcher::{AttributeMap, Dispatcher, ParseOptions};
pub use handlers::HandlerTable;
pub use observer::{Observer, ObserverError, ObserverResult};
pub use validation::ContentTracker;
