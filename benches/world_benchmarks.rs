//! Benchmarks for text world operations.
//!
//! Run with: cargo bench

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use textworld_api::{Action, World};
use textworld_text::{Caret, Command, TextWorld};

/// Generates file content with `lines` lines of sample text.
fn generate_text(lines: usize) -> String {
    (0..lines)
        .map(|i| format!("line {i} of sample text for benchmarking"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Builds a world whose actor sits on a file with `lines` lines.
fn world_on_file(lines: usize) -> (TextWorld, Vec<Action<Command>>) {
    let mut world = TextWorld::new();
    world
        .write_file(world.root(), "bench.txt", &generate_text(lines))
        .unwrap();
    let (actor, actions) = world.new_actor(&[]);
    let enter = actions.iter().find(|a| a.name() == "itemEnter").unwrap();
    assert!(world.act(enter));
    world.position_mut(actor).unwrap().caret = Caret::new(lines / 2, 0);
    (world, actions)
}

/// Benchmarks rendering observations.
fn bench_look(c: &mut Criterion) {
    let mut group = c.benchmark_group("look");

    for size in [10, 1_000, 100_000] {
        let (world, actions) = world_on_file(size);
        let actor = actions[0].actor();
        group.bench_with_input(BenchmarkId::new("file", size), &world, |b, world| {
            b.iter(|| black_box(world.look(black_box(actor))))
        });
    }

    for size in [10, 1_000] {
        let mut world = TextWorld::new();
        for i in 0..size {
            world.new_file(world.root(), format!("f{i}")).unwrap();
        }
        let (actor, _) = world.new_actor(&[]);
        group.bench_with_input(BenchmarkId::new("directory", size), &world, |b, world| {
            b.iter(|| black_box(world.look(black_box(actor))))
        });
    }

    group.finish();
}

/// Benchmarks typing through the ready/step cycle.
fn bench_typing(c: &mut Criterion) {
    let mut group = c.benchmark_group("typing");

    group.bench_function("poll_all_actions", |b| {
        let (world, actions) = world_on_file(100);
        b.iter(|| {
            let ready = actions.iter().filter(|a| world.ready(a)).count();
            black_box(ready)
        })
    });

    group.bench_function("type_and_erase", |b| {
        let (mut world, actions) = world_on_file(100);
        let key = actions.iter().find(|a| a.name() == "keyx").unwrap();
        let backspace = actions.iter().find(|a| a.name() == "backspace").unwrap();
        b.iter(|| {
            world.step(black_box(key));
            world.step(black_box(backspace));
        })
    });

    group.bench_function("split_lines", |b| {
        b.iter_with_setup(
            || world_on_file(1_000),
            |(mut world, actions)| {
                let enter = actions.iter().find(|a| a.name() == "enter").unwrap();
                for _ in 0..100 {
                    world.step(enter);
                }
                black_box(world)
            },
        )
    });

    group.finish();
}

criterion_group!(benches, bench_look, bench_typing);
criterion_main!(benches);
