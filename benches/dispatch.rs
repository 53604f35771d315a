//! Dispatch benchmarks.

use criterion::{criterion_group, criterion_main, Criterion};
use sdlschema::{coerce, documents, grammar, Dispatcher, ItemKind, SchemaRegistry, ValueKind};
use std::hint::black_box;

const SCENE: &str = include_str!("../tests/fixtures/scene.sdl");

fn benchmark_parse_scene(c: &mut Criterion) {
    let registry = SchemaRegistry::sdl();

    c.bench_function("parse_scene", |b| {
        b.iter(|| {
            let mut dispatcher = Dispatcher::new(registry);
            documents::parse_str(&mut dispatcher, black_box(SCENE))
        })
    });
}

fn benchmark_coerce_arrays(c: &mut Criterion) {
    let points: Vec<String> = (0..1000).map(|i| format!("{} {} {}", i, i + 1, i + 2)).collect();
    let text = points.join(", ");
    let kind = ValueKind::Array(ItemKind::Tuple(3));

    c.bench_function("coerce_1000_points", |b| {
        b.iter(|| coerce(black_box(&text), kind))
    });
}

fn benchmark_generate_dtd(c: &mut Criterion) {
    let registry = SchemaRegistry::sdl();

    c.bench_function("generate_dtd", |b| {
        b.iter(|| grammar::generate(black_box(registry)))
    });
}

criterion_group!(
    benches,
    benchmark_parse_scene,
    benchmark_coerce_arrays,
    benchmark_generate_dtd
);
criterion_main!(benches);
