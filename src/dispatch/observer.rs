//! The observer capability

use crate::schema::ElementSchema;

use super::arguments::Arguments;

/// Error raised by an observer; aborts the parse
pub type ObserverError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an observer call
pub type ObserverResult = Result<(), ObserverError>;

/// Receiver of typed element calls
///
/// An observer handles every element of the registry it is used with: the
/// dispatcher calls [`begin`](Observer::begin) once an element's attributes
/// are all coerced, and [`end`](Observer::end) when the element closes.
/// Returning an error stops the parse; observers registered after the failing
/// one do not see the event.
pub trait Observer {
    /// An element opened
    fn begin(&mut self, element: &ElementSchema, args: &Arguments<'_>) -> ObserverResult;

    /// An element closed
    fn end(&mut self, element: &ElementSchema) -> ObserverResult;
}

impl<O: Observer + ?Sized> Observer for Box<O> {
    fn begin(&mut self, element: &ElementSchema, args: &Arguments<'_>) -> ObserverResult {
        (**self).begin(element, args)
    }

    fn end(&mut self, element: &ElementSchema) -> ObserverResult {
        (**self).end(element)
    }
}
