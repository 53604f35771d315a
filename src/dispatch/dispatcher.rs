//! The dispatch loop

use indexmap::IndexMap;

use crate::error::ParseError;
use crate::limits::Limits;
use crate::locations::Position;
use crate::schema::{AttributeUse, ElementSchema, SchemaRegistry};
use crate::values::{array_len, coerce, Value, ValueKind};

use super::arguments::Arguments;
use super::context::{OpenElement, ParseContext, ParseState};
use super::observer::Observer;
use super::validation::ContentTracker;

/// Raw attributes of a tag, in document order
pub type AttributeMap = IndexMap<String, String>;

/// Options for a parse
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Check content models and reject undeclared attributes
    pub validate: bool,
    /// Resource limits
    pub limits: Limits,
    /// Required name of the document element
    pub root: Option<String>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            validate: true,
            limits: Limits::default(),
            root: None,
        }
    }
}

impl ParseOptions {
    /// Create default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable content-model validation
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set the limits
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Require a document element
    pub fn root(mut self, name: impl Into<String>) -> Self {
        self.root = Some(name.into());
        self
    }
}

/// Turns tag events into typed observer calls
///
/// For every start tag the dispatcher looks the element up in the registry,
/// coerces all of its attributes and only then calls
/// [`Observer::begin`] on each observer, in registration order. End tags call
/// [`Observer::end`] the same way. The first error is terminal: it is returned
/// from the event that caused it and every later event returns
/// [`ParseError::Aborted`].
///
/// ```rust,ignore
/// let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
/// dispatcher.add_observer(&mut builder);
/// dispatcher.start_element("Sdl", &AttributeMap::new(), None)?;
/// ```
pub struct Dispatcher<'r, 'o> {
    registry: &'r SchemaRegistry,
    options: ParseOptions,
    context: ParseContext<'r, 'o>,
}

impl<'r, 'o> Dispatcher<'r, 'o> {
    /// Create a dispatcher with default options
    pub fn new(registry: &'r SchemaRegistry) -> Self {
        Self::with_options(registry, ParseOptions::default())
    }

    /// Create a dispatcher with the given options
    pub fn with_options(registry: &'r SchemaRegistry, options: ParseOptions) -> Self {
        Self {
            registry,
            options,
            context: ParseContext::new(),
        }
    }

    /// Register an observer; observers are called in registration order
    pub fn add_observer(&mut self, observer: &'o mut dyn Observer) {
        self.context.observers.push(observer);
    }

    /// Get the registry
    pub fn registry(&self) -> &'r SchemaRegistry {
        self.registry
    }

    /// Get the options
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Get the current state
    pub fn state(&self) -> ParseState {
        self.context.state()
    }

    /// Number of open elements
    pub fn depth(&self) -> usize {
        self.context.stack.len()
    }

    /// Names of the open elements, outermost first
    pub fn path(&self) -> Vec<&str> {
        self.context.path()
    }

    /// Message of the error that failed the parse
    pub fn failure(&self) -> Option<&str> {
        self.context.failure.as_deref()
    }

    /// Handle a start tag
    pub fn start_element(
        &mut self,
        name: &str,
        attributes: &AttributeMap,
        position: Option<Position>,
    ) -> Result<(), ParseError> {
        self.ensure_active()?;
        tracing::trace!(element = name, depth = self.depth(), "start element");
        let result = self.open(name, attributes, position);
        self.record(result)
    }

    /// Handle an end tag
    pub fn end_element(&mut self, name: &str, position: Option<Position>) -> Result<(), ParseError> {
        self.ensure_active()?;
        tracing::trace!(element = name, depth = self.depth(), "end element");
        let result = self.close(name, position);
        self.record(result)
    }

    /// Handle the end of the document
    ///
    /// Fails if an element is still open. On success the dispatcher is ready
    /// for the next document.
    pub fn finish(&mut self) -> Result<(), ParseError> {
        self.ensure_active()?;

        if let Some(open) = self.context.stack.last() {
            let err = ParseError::UnterminatedElement {
                element: open.schema.name().to_string(),
                position: open.position,
            };
            return self.record(Err(err));
        }

        tracing::debug!(documents = self.context.documents, "document finished");
        self.context.reset();
        Ok(())
    }

    /// Forget the current document, including a failure
    pub fn reset(&mut self) {
        self.context.reset();
    }

    fn ensure_active(&self) -> Result<(), ParseError> {
        match self.state() {
            ParseState::Failed => Err(ParseError::Aborted),
            _ => Ok(()),
        }
    }

    fn record(&mut self, result: Result<(), ParseError>) -> Result<(), ParseError> {
        result.map_err(|err| self.fail(err))
    }

    /// Fail the current document with an error raised outside the dispatcher
    ///
    /// The first failure is kept; later ones, including `Aborted`, leave it
    /// in place.
    pub(crate) fn fail(&mut self, err: ParseError) -> ParseError {
        if self.state() != ParseState::Failed {
            tracing::debug!(error = %err, "parse failed");
            self.context.failure = Some(err.to_string());
        }
        err
    }

    fn open(
        &mut self,
        name: &str,
        attributes: &AttributeMap,
        position: Option<Position>,
    ) -> Result<(), ParseError> {
        let registry = self.registry;
        let schema = registry
            .lookup(name)
            .ok_or_else(|| ParseError::UnknownElement {
                element: name.to_string(),
                position,
            })?;

        let limits = &self.options.limits;
        limits
            .check_depth(self.depth() + 1)
            .and_then(|_| limits.check_attributes(attributes.len()))
            .map_err(|source| ParseError::LimitExceeded {
                element: name.to_string(),
                position,
                source,
            })?;

        if self.options.validate {
            self.check_placement(schema, position)?;
            if let Some(attribute) = attributes.keys().find(|a| schema.attribute(a).is_none()) {
                return Err(ParseError::UndeclaredAttribute {
                    element: name.to_string(),
                    attribute: attribute.clone(),
                    position,
                });
            }
        }

        let values = self.arguments(schema, attributes, position)?;
        let args = Arguments::new(schema, values);

        for observer in self.context.observers.iter_mut() {
            observer
                .begin(schema, &args)
                .map_err(|source| ParseError::ObserverFailure {
                    element: name.to_string(),
                    position,
                    source,
                })?;
        }

        self.context.stack.push(OpenElement {
            schema,
            position,
            content: ContentTracker::new(schema.containment()),
        });
        Ok(())
    }

    fn close(&mut self, name: &str, position: Option<Position>) -> Result<(), ParseError> {
        let Some(open) = self.context.stack.last() else {
            return Err(ParseError::UnexpectedEnd {
                element: name.to_string(),
                position,
            });
        };

        let schema = open.schema;
        if schema.name() != name {
            return Err(ParseError::MismatchedEnd {
                element: name.to_string(),
                expected: schema.name().to_string(),
                position,
            });
        }

        if self.options.validate {
            if let Some(missing) = open.content.missing() {
                return Err(ParseError::IncompleteContent {
                    element: name.to_string(),
                    missing,
                    position,
                });
            }
        }

        for observer in self.context.observers.iter_mut() {
            observer.end(schema).map_err(|source| ParseError::ObserverFailure {
                element: name.to_string(),
                position,
                source,
            })?;
        }

        self.context.stack.pop();
        if self.context.stack.is_empty() {
            self.context.documents += 1;
        }
        Ok(())
    }

    /// Check that an element may appear where it was found
    fn check_placement(
        &mut self,
        schema: &ElementSchema,
        position: Option<Position>,
    ) -> Result<(), ParseError> {
        let unexpected = |parent: Option<&str>| ParseError::UnexpectedElement {
            element: schema.name().to_string(),
            parent: parent.map(str::to_string),
            position,
        };

        match self.context.stack.last_mut() {
            Some(parent) => {
                if !parent.content.accept(schema.name()) {
                    return Err(unexpected(Some(parent.schema.name())));
                }
            }
            None => {
                let wrong_root = self
                    .options
                    .root
                    .as_deref()
                    .is_some_and(|root| root != schema.name());
                if wrong_root || self.context.documents > 0 {
                    return Err(unexpected(None));
                }
            }
        }
        Ok(())
    }

    /// Coerce the attributes of a tag into positional arguments
    fn arguments(
        &self,
        schema: &ElementSchema,
        attributes: &AttributeMap,
        position: Option<Position>,
    ) -> Result<Vec<Option<Value>>, ParseError> {
        let mut values = Vec::with_capacity(schema.attributes().len());

        for spec in schema.attributes() {
            let invalid = |source| ParseError::InvalidAttribute {
                element: schema.name().to_string(),
                attribute: spec.name().to_string(),
                position,
                source,
            };

            let raw = match (attributes.get(spec.name()), spec.usage()) {
                (Some(raw), _) => raw.as_str(),
                (None, AttributeUse::Required) => {
                    return Err(ParseError::MissingAttribute {
                        element: schema.name().to_string(),
                        attribute: spec.name().to_string(),
                        position,
                    })
                }
                (None, AttributeUse::Default(text)) => text.as_str(),
                (None, AttributeUse::Nullable) => {
                    values.push(None);
                    continue;
                }
            };

            if matches!(spec.kind(), ValueKind::Array(_)) {
                self.options
                    .limits
                    .check_array_items(array_len(raw))
                    .map_err(|source| ParseError::LimitExceeded {
                        element: schema.name().to_string(),
                        position,
                        source,
                    })?;
            }

            let value = coerce(raw, spec.kind()).map_err(invalid)?;
            values.push(Some(value));
        }

        Ok(values)
    }
}
