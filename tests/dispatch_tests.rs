//! Dispatch integration tests
//!
//! These tests drive the dispatcher through the public API only, both with
//! hand-made events and with documents read by the `documents` adapter.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sdlschema::{
    documents, Arguments, AttributeMap, Cardinality, Dispatcher, ElementDef, ElementSchema,
    HandlerTable, Observer, ObserverResult, ParseError, ParseState, SchemaRegistry, TypeDef,
    Value, ValueKind,
};

// ============================================================================
// Helpers
// ============================================================================

/// Appends every call, tagged with the observer's label, to a shared log
struct Tagged {
    label: &'static str,
    log: Rc<RefCell<Vec<String>>>,
    fail_on: Option<&'static str>,
    fail_on_end: Option<&'static str>,
}

impl Tagged {
    fn new(label: &'static str, log: &Rc<RefCell<Vec<String>>>) -> Self {
        Self {
            label,
            log: Rc::clone(log),
            fail_on: None,
            fail_on_end: None,
        }
    }
}

impl Observer for Tagged {
    fn begin(&mut self, element: &ElementSchema, args: &Arguments<'_>) -> ObserverResult {
        if self.fail_on == Some(element.name()) {
            return Err(format!("{} refuses {}", self.label, element.name()).into());
        }
        let values: Vec<String> = args
            .iter()
            .map(|(_, v)| v.map_or("-".to_string(), |v| format!("{:?}", v)))
            .collect();
        self.log.borrow_mut().push(format!(
            "{}: begin {}({})",
            self.label,
            element.name(),
            values.join(", ")
        ));
        Ok(())
    }

    fn end(&mut self, element: &ElementSchema) -> ObserverResult {
        if self.fail_on_end == Some(element.name()) {
            return Err(format!("{} cannot close {}", self.label, element.name()).into());
        }
        self.log
            .borrow_mut()
            .push(format!("{}: end {}", self.label, element.name()));
        Ok(())
    }
}

fn root_and_child() -> SchemaRegistry {
    SchemaRegistry::build([
        ElementDef::new("Root")
            .attribute("a", TypeDef::required(ValueKind::Boolean))
            .contains(["Child"], Cardinality::Single),
        ElementDef::new("Child").attribute("x", TypeDef::required(ValueKind::Tuple(3))),
    ])
    .unwrap()
}

fn attrs(pairs: &[(&str, &str)]) -> AttributeMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

const ROOT_AND_CHILD: &str = r#"<Root a="true"><Child x="1 2 3"/></Root>"#;

// ============================================================================
// Ordering
// ============================================================================

#[test]
fn test_end_to_end_order() {
    let registry = root_and_child();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut observer = Tagged::new("A", &log);

    let mut dispatcher = Dispatcher::new(&registry);
    dispatcher.add_observer(&mut observer);
    documents::parse_str(&mut dispatcher, ROOT_AND_CHILD).unwrap();

    assert_eq!(
        *log.borrow(),
        vec![
            "A: begin Root(Boolean(true))",
            "A: begin Child(Tuple([1.0, 2.0, 3.0]))",
            "A: end Child",
            "A: end Root",
        ]
    );
}

#[test]
fn test_observers_are_called_in_registration_order() {
    let registry = root_and_child();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut first = Tagged::new("A", &log);
    let mut second = Tagged::new("B", &log);

    let mut dispatcher = Dispatcher::new(&registry);
    dispatcher.add_observer(&mut first);
    dispatcher.add_observer(&mut second);
    documents::parse_str(&mut dispatcher, ROOT_AND_CHILD).unwrap();

    let log = log.borrow();
    assert_eq!(log.len(), 8);
    for pair in log.chunks(2) {
        assert!(pair[0].starts_with("A: "));
        assert!(pair[1].starts_with("B: "));
        assert_eq!(pair[0][3..], pair[1][3..]);
    }
    assert_eq!(log[7], "B: end Root");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_missing_attribute_calls_no_observer() {
    let registry = root_and_child();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut observer = Tagged::new("A", &log);

    let mut dispatcher = Dispatcher::new(&registry);
    dispatcher.add_observer(&mut observer);
    dispatcher.start_element("Root", &attrs(&[("a", "false")]), None).unwrap();
    let err = dispatcher.start_element("Child", &attrs(&[]), None).unwrap_err();

    assert!(matches!(
        err,
        ParseError::MissingAttribute { ref element, ref attribute, .. }
            if element == "Child" && attribute == "x"
    ));
    assert_eq!(*log.borrow(), vec!["A: begin Root(Boolean(false))"]);
}

#[test]
fn test_observer_failure_stops_remaining_observers() {
    let registry = root_and_child();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut first = Tagged::new("A", &log);
    first.fail_on = Some("Child");
    let mut second = Tagged::new("B", &log);

    let mut dispatcher = Dispatcher::new(&registry);
    dispatcher.add_observer(&mut first);
    dispatcher.add_observer(&mut second);
    let err = documents::parse_str(&mut dispatcher, ROOT_AND_CHILD).unwrap_err();

    match err {
        ParseError::ObserverFailure {
            ref element,
            position,
            ref source,
        } => {
            assert_eq!(element, "Child");
            assert_eq!(position.map(|p| p.column), Some(16));
            assert_eq!(source.to_string(), "A refuses Child");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(dispatcher.state(), ParseState::Failed);
    assert!(matches!(
        dispatcher.end_element("Root", None),
        Err(ParseError::Aborted)
    ));
    drop(dispatcher);

    // No end calls are made up for the elements left open
    assert_eq!(
        *log.borrow(),
        vec!["A: begin Root(Boolean(true))", "B: begin Root(Boolean(true))"]
    );
}

#[test]
fn test_observer_failure_on_end_tag() {
    let registry = root_and_child();
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut first = Tagged::new("A", &log);
    first.fail_on_end = Some("Child");
    let mut second = Tagged::new("B", &log);

    let mut dispatcher = Dispatcher::new(&registry);
    dispatcher.add_observer(&mut first);
    dispatcher.add_observer(&mut second);
    let source = "<Root a=\"true\">\n  <Child x=\"1 2 3\">\n  </Child>\n</Root>";
    let err = documents::parse_str(&mut dispatcher, source).unwrap_err();

    match err {
        ParseError::ObserverFailure {
            ref element,
            position,
            ref source,
        } => {
            assert_eq!(element, "Child");
            assert_eq!(position.map(|p| (p.line, p.column)), Some((3, 3)));
            assert_eq!(source.to_string(), "A cannot close Child");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(dispatcher.state(), ParseState::Failed);
    // The failing element stays open
    assert_eq!(dispatcher.path(), vec!["Root", "Child"]);
    drop(dispatcher);

    assert_eq!(
        *log.borrow(),
        vec![
            "A: begin Root(Boolean(true))",
            "B: begin Root(Boolean(true))",
            "A: begin Child(Tuple([1.0, 2.0, 3.0]))",
            "B: begin Child(Tuple([1.0, 2.0, 3.0]))",
        ]
    );
}

#[test]
fn test_unknown_element() {
    let registry = root_and_child();
    let mut dispatcher = Dispatcher::new(&registry);
    let err = documents::parse_str(&mut dispatcher, "<Root a=\"true\"><Spoon/></Root>").unwrap_err();
    assert_eq!(err.element(), Some("Spoon"));
    assert!(err.to_string().starts_with("unknown element \"Spoon\""));
}

#[test]
fn test_invalid_tuple_reports_coercion_failure() {
    let registry = root_and_child();
    let mut dispatcher = Dispatcher::new(&registry);
    let err = documents::parse_str(&mut dispatcher, "<Root a=\"true\"><Child x=\"1 2\"/></Root>")
        .unwrap_err();
    match err {
        ParseError::InvalidAttribute { source, .. } => {
            assert_eq!(source.expected, ValueKind::Tuple(3));
            assert_eq!(source.text, "1 2");
        }
        other => panic!("unexpected error: {}", other),
    }
}

// ============================================================================
// Defaults and handler tables
// ============================================================================

#[test]
fn test_defaults_reach_observers_coerced() {
    let registry = SchemaRegistry::sdl();
    let mut table = HandlerTable::new(Vec::new()).on_begin(
        "PointLight",
        |lights: &mut Vec<(f64, [f64; 3])>, args: &Arguments<'_>| {
            lights.push((args.number("intensity")?, args.tuple::<3>("color")?));
            Ok(())
        },
    );
    table.check(registry).unwrap();

    let mut dispatcher = Dispatcher::new(registry);
    dispatcher.add_observer(&mut table);
    dispatcher
        .start_element("PointLight", &attrs(&[("position", "0 0 0"), ("name", "p")]), None)
        .unwrap();
    dispatcher.end_element("PointLight", None).unwrap();
    dispatcher.finish().unwrap();
    drop(dispatcher);

    assert_eq!(table.into_state(), vec![(1.0, [1.0, 1.0, 1.0])]);
}

#[test]
fn test_nullable_attributes_are_absent() {
    let registry = SchemaRegistry::sdl();
    let mut table = HandlerTable::new(Vec::new()).on_begin(
        "Shape",
        |shapes: &mut Vec<Option<Value>>, args: &Arguments<'_>| {
            shapes.push(args.optional("material")?.cloned());
            Ok(())
        },
    );

    let mut dispatcher = Dispatcher::new(registry);
    dispatcher.add_observer(&mut table);
    dispatcher
        .start_element("Shape", &attrs(&[("geometry", "ball")]), None)
        .unwrap();
    drop(dispatcher);

    assert_eq!(table.into_state(), vec![None]);
}
