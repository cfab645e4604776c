//! Benchmarks for point generation and the per-frame animation step.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use starsphere::{geometry, DeviceProfile, Rotation, Scene, SceneConfig, SceneState};

fn bench_generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("geometry");
    let config = SceneConfig::for_profile(DeviceProfile::Full);

    group.bench_function("sphere_shell", |b| {
        b.iter(|| black_box(geometry::sphere_shell(&config.sphere)))
    });

    group.bench_function("horizontal_rings", |b| {
        b.iter(|| black_box(geometry::horizontal_rings(&config.horizontal_rings)))
    });

    group.bench_function("vertical_rings", |b| {
        b.iter(|| black_box(geometry::vertical_rings(&config.vertical_rings)))
    });

    for stars in &config.stars {
        group.bench_with_input(
            BenchmarkId::new("star_field", stars.count),
            stars,
            |b, stars| {
                let mut rng = StdRng::seed_from_u64(7);
                b.iter(|| black_box(geometry::star_field(stars, &mut rng)))
            },
        );
    }

    group.finish();
}

fn bench_scene_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_build");

    for (name, profile) in [("reduced", DeviceProfile::Reduced), ("full", DeviceProfile::Full)] {
        let config = SceneConfig::for_profile(profile);
        group.bench_function(name, |b| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(Scene::build(&config, &mut rng)))
        });
    }

    group.finish();
}

fn bench_advance(c: &mut Criterion) {
    let mut state = SceneState::new();
    state.set_target(Rotation::new(0.2, -0.1));

    c.bench_function("scene_state_advance", |b| {
        b.iter(|| black_box(black_box(state).advance(1.0 / 60.0)))
    });
}

criterion_group!(benches, bench_generators, bench_scene_build, bench_advance);
criterion_main!(benches);
