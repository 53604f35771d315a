//! Handler Table Example
//!
//! This example collects a summary of an SDL scene with per-element closures
//! instead of a full observer implementation.
//!
//! Run with: cargo run --example handlers

use sdlschema::{documents, Arguments, Dispatcher, HandlerTable, SchemaRegistry};

/// What the handlers gather
#[derive(Debug, Default)]
struct Summary {
    cameras: Vec<(String, f64)>,
    lights: usize,
    shapes: Vec<String>,
    depth: usize,
    max_depth: usize,
}

fn enter(summary: &mut Summary) {
    summary.depth += 1;
    summary.max_depth = summary.max_depth.max(summary.depth);
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let registry = SchemaRegistry::sdl();

    let mut table = HandlerTable::new(Summary::default())
        .on_begin("Camera", |s: &mut Summary, args: &Arguments<'_>| {
            s.cameras.push((args.text("name")?.to_string(), args.number("fovy")?));
            Ok(())
        })
        .on_begin("Lights", |s: &mut Summary, _: &Arguments<'_>| {
            s.lights = 0;
            Ok(())
        })
        .on_begin("PointLight", |s: &mut Summary, _: &Arguments<'_>| {
            s.lights += 1;
            Ok(())
        })
        .on_begin("DirectionalLight", |s: &mut Summary, _: &Arguments<'_>| {
            s.lights += 1;
            Ok(())
        })
        .on_begin("SpotLight", |s: &mut Summary, _: &Arguments<'_>| {
            s.lights += 1;
            Ok(())
        })
        .on_begin("Shape", |s: &mut Summary, args: &Arguments<'_>| {
            let material = match args.optional("material")? {
                Some(material) => material.to_string(),
                None => "default".to_string(),
            };
            s.shapes.push(format!("{} ({})", args.text("geometry")?, material));
            Ok(())
        });

    for transform in ["Rotate", "Translate", "Scale"] {
        table = table
            .on_begin(transform, |s: &mut Summary, _: &Arguments<'_>| {
                enter(s);
                Ok(())
            })
            .on_end(transform, |s: &mut Summary| {
                s.depth -= 1;
                Ok(())
            });
    }
    table.check(registry)?;

    let scene = std::fs::read_to_string(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/scene.sdl"),
    )?;

    let mut dispatcher = Dispatcher::new(registry);
    dispatcher.add_observer(&mut table);
    documents::parse_str(&mut dispatcher, &scene)?;
    drop(dispatcher);

    let summary = table.into_state();
    println!("Cameras:");
    for (name, fovy) in &summary.cameras {
        println!("  {} (fovy {})", name, fovy);
    }
    println!("Lights: {}", summary.lights);
    println!("Shapes:");
    for shape in &summary.shapes {
        println!("  {}", shape);
    }
    println!("Deepest transform nesting: {}", summary.max_depth);

    Ok(())
}
