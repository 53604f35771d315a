//! Echo Example
//!
//! This example parses an SDL scene and echoes it back to stdout, using
//! nothing but the built-in schema.
//!
//! Run with: cargo run --example echo [FILE]

use std::path::PathBuf;

use sdlschema::{documents, Dispatcher, EchoObserver, SchemaRegistry};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scene.sdl"));

    println!("Parsing: {}\n", path.display());

    let mut echo = EchoObserver::stdout();
    let mut dispatcher = Dispatcher::new(SchemaRegistry::sdl());
    dispatcher.add_observer(&mut echo);

    match documents::parse_file(&mut dispatcher, &path) {
        Ok(()) => println!("\nDocument is valid!"),
        Err(e) => println!("\nDocument is invalid: {}", e),
    }

    Ok(())
}
