mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::Vec2;
use terrain_sketch::field::{build_field, FieldGrid};

const SITE_COUNTS: [usize; 4] = [8, 64, 512, 4096];
const SCALES: [f32; 3] = [4.0, 2.0, 1.0];

fn field_build_site_count_benches(c: &mut Criterion) {
    let extent = Vec2::new(512.0, 512.0);
    let grid = FieldGrid::try_new(extent, 2.0).expect("valid grid");

    let mut group = c.benchmark_group("field/build/sites");
    group.throughput(common::elements_throughput(grid.len()));

    for &count in &SITE_COUNTS {
        let sites = common::random_sites(count, extent, 0x517E_u64 ^ count as u64);
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| {
                let field = build_field(black_box(&sites), &grid);
                black_box(field.map(|f| f.owners().len()));
            });
        });
    }

    group.finish();
}

fn field_build_scale_benches(c: &mut Criterion) {
    let extent = Vec2::new(512.0, 512.0);
    let sites = common::random_sites(64, extent, 0xF1E1D);

    let mut group = c.benchmark_group("field/build/scale");

    for &scale in &SCALES {
        let grid = FieldGrid::try_new(extent, scale).expect("valid grid");
        group.throughput(common::elements_throughput(grid.len()));
        group.bench_with_input(BenchmarkId::from_parameter(scale), &scale, |b, _| {
            b.iter(|| {
                let field = build_field(black_box(&sites), &grid);
                black_box(field.map(|f| f.owners().len()));
            });
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = field_build_site_count_benches, field_build_scale_benches
}
criterion_main!(benches);
