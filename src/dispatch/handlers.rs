//! Per-element handler tables

use std::collections::HashMap;
use std::fmt;

use crate::error::SchemaError;
use crate::schema::{ElementSchema, SchemaRegistry};

use super::arguments::Arguments;
use super::observer::{Observer, ObserverResult};

type BeginHandler<S> = Box<dyn FnMut(&mut S, &Arguments<'_>) -> ObserverResult>;
type EndHandler<S> = Box<dyn FnMut(&mut S) -> ObserverResult>;

/// An observer assembled from one closure per element
///
/// Elements without a handler are ignored. The closures share a state value
/// of type `S`, which is handed back by [`into_state`](HandlerTable::into_state)
/// once the parse is over.
///
/// ```rust,ignore
/// let mut table = HandlerTable::new(Vec::new())
///     .on_begin("Sphere", |spheres: &mut Vec<f64>, args| {
///         spheres.push(args.number("radius")?);
///         Ok(())
///     });
/// ```
pub struct HandlerTable<S> {
    state: S,
    begin: HashMap<String, BeginHandler<S>>,
    end: HashMap<String, EndHandler<S>>,
}

impl<S> HandlerTable<S> {
    /// Create a table without handlers
    pub fn new(state: S) -> Self {
        Self {
            state,
            begin: HashMap::new(),
            end: HashMap::new(),
        }
    }

    /// Handle the start of an element
    pub fn on_begin<F>(mut self, element: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut S, &Arguments<'_>) -> ObserverResult + 'static,
    {
        self.begin.insert(element.into(), Box::new(handler));
        self
    }

    /// Handle the end of an element
    pub fn on_end<F>(mut self, element: impl Into<String>, handler: F) -> Self
    where
        F: FnMut(&mut S) -> ObserverResult + 'static,
    {
        self.end.insert(element.into(), Box::new(handler));
        self
    }

    /// Check that every handled element is declared in `registry`
    pub fn check(&self, registry: &SchemaRegistry) -> Result<(), SchemaError> {
        for name in self.begin.keys().chain(self.end.keys()) {
            registry.get(name)?;
        }
        Ok(())
    }

    /// Get the shared state
    pub fn state(&self) -> &S {
        &self.state
    }

    /// Get the shared state mutably
    pub fn state_mut(&mut self) -> &mut S {
        &mut self.state
    }

    /// Consume the table, returning the shared state
    pub fn into_state(self) -> S {
        self.state
    }
}

impl<S> Observer for HandlerTable<S> {
    fn begin(&mut self, element: &ElementSchema, args: &Arguments<'_>) -> ObserverResult {
        match self.begin.get_mut(element.name()) {
            Some(handler) => handler(&mut self.state, args),
            None => Ok(()),
        }
    }

    fn end(&mut self, element: &ElementSchema) -> ObserverResult {
        match self.end.get_mut(element.name()) {
            Some(handler) => handler(&mut self.state),
            None => Ok(()),
        }
    }
}

impl<S: fmt::Debug> fmt::Debug for HandlerTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("state", &self.state)
            .field("begin", &self.begin.keys().collect::<Vec<_>>())
            .field("end", &self.end.keys().collect::<Vec<_>>())
            .finish()
    }
}
