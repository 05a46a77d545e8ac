//! Benchmarks for the CPU side of a frame.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chaindrive::{Grid, Recorder, ShapeBatch, Simulation, SimulationConfig, Viewport};

fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");

    for (w, h) in [(500.0, 500.0), (1920.0, 1080.0), (3840.0, 2160.0)] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{}x{}", w, h)),
            &Viewport::new(w, h),
            |b, &viewport| b.iter(|| black_box(Grid::build(50.0, viewport))),
        );
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");
    let viewport = Viewport::new(1920.0, 1080.0);

    for count in [1u32, 20, 200] {
        let config = SimulationConfig::default().with_entity_count(count);

        group.bench_with_input(BenchmarkId::new("recorder", count), &config, |b, config| {
            let mut sim = Simulation::with_seed(config.clone(), viewport, 42).unwrap();
            let mut canvas = Recorder::new();
            b.iter(|| {
                sim.tick(&mut canvas);
                black_box(canvas.take());
            })
        });

        group.bench_with_input(BenchmarkId::new("shape_batch", count), &config, |b, config| {
            let mut sim = Simulation::with_seed(config.clone(), viewport, 42).unwrap();
            let mut batch = ShapeBatch::new();
            b.iter(|| {
                sim.tick(&mut batch);
                black_box(batch.vertices().len());
            })
        });
    }

    group.finish();
}

fn bench_reset(c: &mut Criterion) {
    let mut sim = Simulation::with_seed(SimulationConfig::default(), Viewport::new(1920.0, 1080.0), 7).unwrap();
    c.bench_function("reset", |b| b.iter(|| sim.reset()));
}

criterion_group!(benches, bench_grid_build, bench_tick, bench_reset);
criterion_main!(benches);
