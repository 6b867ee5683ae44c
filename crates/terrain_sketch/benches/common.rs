use std::time::Duration;

use criterion::{Criterion, Throughput};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use terrain_sketch::site::Site;

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// `count` seeded random sites over `extent`, roughly one in five of them ocean.
pub fn random_sites(count: usize, extent: Vec2, seed: u64) -> Vec<Site> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut unit = move || (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0);
    (0..count)
        .map(|_| {
            let p = Vec2::new(unit() * extent.x, unit() * extent.y);
            let erodibility = 0.2 + unit() * 0.6;
            Site::new(p, erodibility, unit() < 0.2)
        })
        .collect()
}
