mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use mint::Vector2;
use terrain_sketch::field::{build_field, FieldGrid};
use terrain_sketch::render::{
    compose_relief, compose_sites, Colormap, CompositeOptions, ReliefOptions,
};
use terrain_sketch::terrain::AltitudeSampler;

const OUTPUT_SIZES: [u32; 3] = [128, 256, 512];

struct Dunes;

impl AltitudeSampler for Dunes {
    fn sample_altitude(&self, p: Vector2<f32>) -> Option<f32> {
        Some(1000.0 + 800.0 * (p.x * 0.05).sin() * (p.y * 0.03).cos())
    }
}

fn compose_sites_benches(c: &mut Criterion) {
    let extent = Vec2::new(512.0, 512.0);
    let grid = FieldGrid::try_new(extent, 2.0).expect("valid grid");
    let sites = common::random_sites(128, extent, 0xC0A57);
    let field = build_field(&sites, &grid).expect("non-empty sites");
    let colormap = Colormap::erodibility();
    let options = CompositeOptions::default();

    let mut group = c.benchmark_group("render/compose_sites");

    for &size in &OUTPUT_SIZES {
        group.throughput(common::elements_throughput((size * size) as usize));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let buffer = compose_sites(Some(&field), &sites, &colormap, &options, (size, size));
                black_box(buffer.as_bytes().len());
            });
        });
    }

    group.finish();
}

fn compose_relief_benches(c: &mut Criterion) {
    let extent = Vec2::new(512.0, 512.0);
    let colormap = Colormap::terrain();
    let options = ReliefOptions::default().with_seed(7);

    let mut group = c.benchmark_group("render/compose_relief");

    for &size in &OUTPUT_SIZES {
        group.throughput(common::elements_throughput((size * size) as usize));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| {
                let buffer = compose_relief(&Dunes, extent, &colormap, &options, (size, size));
                black_box(buffer.as_bytes().len());
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = compose_sites_benches, compose_relief_benches
}
criterion_main!(benches);
