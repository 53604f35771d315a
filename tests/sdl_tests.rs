//! Tests against the built-in SDL schema and the shipped artifacts

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use sdlschema::{
    documents, grammar, Dispatcher, EchoObserver, HandlerTable, ParseError, SchemaRegistry,
};

fn manifest_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> PathBuf {
    manifest_dir().join("tests").join("fixtures").join(name)
}

fn echo(source: &str) -> String {
    let mut echo = EchoObserver::new(Vec::new());
    let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
    dispatcher.add_observer(&mut echo);
    documents::parse_str(&mut dispatcher, source).unwrap();
    drop(dispatcher);
    String::from_utf8(echo.into_inner()).unwrap()
}

// ============================================================================
// Published artifacts
// ============================================================================

#[test]
fn test_published_dtd_is_current() {
    let published = std::fs::read_to_string(manifest_dir().join("schemas").join("sdl.dtd")).unwrap();
    grammar::check(SchemaRegistry::sdl(), &published).unwrap();
    assert_eq!(grammar::generate(SchemaRegistry::sdl()).as_str(), published);
}

#[test]
fn test_dtd_declares_identity_and_references() {
    let dtd = grammar::generate(SchemaRegistry::sdl()).into_string();

    assert!(dtd.starts_with("<!ELEMENT Sdl (Cameras,Lights,Geometry,Textures?,Materials?,Scene)>\n<!ATTLIST Sdl>\n\n"));
    assert!(dtd.contains("<!ELEMENT Scene (Shape|Rotate|Translate|Scale)+>"));
    assert!(dtd.contains("\tname\t\t\t\t\t\tID\t\t\t\t#REQUIRED\n"));
    assert!(dtd.contains("\tmaterial\t\t\t\t\tIDREF\t\t\t#IMPLIED\n"));
    assert!(dtd.contains("\tcapped\t\t\t\t\t\tCDATA\t\t\t\"true\"\n"));
}

#[test]
fn test_schema_json_round_trip() {
    let sdl = SchemaRegistry::sdl();
    let json = sdl.to_json().unwrap();
    let reloaded = SchemaRegistry::from_json(&json).unwrap();
    assert_eq!(&reloaded, sdl);
    assert_eq!(grammar::generate(&reloaded), grammar::generate(sdl));
}

// ============================================================================
// Scene documents
// ============================================================================

#[test]
fn test_parse_scene_fixture() {
    let mut table = HandlerTable::new(Vec::<String>::new())
        .on_begin("Shape", |shapes: &mut Vec<String>, args: &sdlschema::Arguments<'_>| {
            shapes.push(args.text("geometry")?.to_string());
            Ok(())
        });

    let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
    dispatcher.add_observer(&mut table);
    documents::parse_file(&mut dispatcher, fixture("scene.sdl")).unwrap();
    drop(dispatcher);

    assert_eq!(table.into_state(), vec!["floor", "ball", "pillar"]);
}

#[test]
fn test_echo_of_scene() {
    let source = std::fs::read_to_string(fixture("scene.sdl")).unwrap();
    let text = echo(&source);

    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "<Sdl>");
    assert_eq!(lines[1], "   <Cameras>");
    assert_eq!(
        lines[2],
        "      <Camera position=\"0 0 10\" direction=\"0 0 -1\" up=\"0 1 0\" fovy=\"45\" name=\"main\">"
    );
    assert!(text.contains(
        "<DirectionalLight direction=\"0 -1 0\" intensity=\"1\" color=\"1 1 1\" name=\"sun\">"
    ));
    assert!(text.contains("coordinateIndices=\"0, 1, 2, 0, 2, 3\""));
    assert!(text.contains("<Scene camera=\"main\" lights=\"sun, bulb\" background=\"0 0 0\">"));
    assert!(text.contains("<Shape geometry=\"ball\" material=\"red\">"));
    assert_eq!(*lines.last().unwrap(), "</Sdl>");
}

#[test]
fn test_echo_output_parses_to_itself() {
    let source = std::fs::read_to_string(fixture("scene.sdl")).unwrap();
    let first = echo(&source);
    let second = echo(&first);
    assert_eq!(first, second);
}

#[test]
fn test_scene_without_required_section() {
    let source = r#"<Sdl>
  <Cameras><Camera position="0 0 1" direction="0 0 -1" up="0 1 0" fovy="60" name="c"/></Cameras>
  <Lights><PointLight position="0 1 0" name="l"/></Lights>
  <Geometry><Teapot size="1" name="t"/></Geometry>
</Sdl>"#;

    let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
    let err = documents::parse_str(&mut dispatcher, source).unwrap_err();
    assert!(matches!(err, ParseError::IncompleteContent { ref element, ref missing, .. }
        if element == "Sdl" && missing == "Scene"));
}

#[test]
fn test_scene_element_out_of_place() {
    let source = r#"<Sdl><Sphere radius="1" name="s"/></Sdl>"#;

    let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
    let err = documents::parse_str(&mut dispatcher, source).unwrap_err();
    assert!(matches!(err, ParseError::UnexpectedElement { ref element, ref parent, .. }
        if element == "Sphere" && parent.as_deref() == Some("Sdl")));
}

#[test]
fn test_registry_is_shared_across_threads() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            std::thread::spawn(|| {
                let source = std::fs::read_to_string(fixture("scene.sdl")).unwrap();
                echo(&source).len()
            })
        })
        .collect();

    let lengths: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(lengths.windows(2).all(|w| w[0] == w[1]));
}
