//! Shaded relief from an altitude sampler.
//!
//! Altitude is normalized against `max_altitude` and colored through a [`Colormap`]. Shading
//! compares each sample with one offset diagonally down-right; the difference is compressed with
//! `atan` so steep slopes darken without clipping, and a little dither breaks up banding.
use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::render::{Colormap, PixelBuffer, PLACEHOLDER_COLOR};
use crate::terrain::AltitudeSampler;

/// Options for [`compose_relief`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct ReliefOptions {
    /// Altitude mapped to the top of the colormap.
    pub max_altitude: f32,
    /// Altitude difference that darkens a pixel by roughly half the shading range.
    pub shadow_altitude: f32,
    /// Diagonal offset of the comparison sample, in surface units.
    pub shade_offset: f32,
    /// Amplitude of the random brightness dither.
    pub dither: f32,
    /// Applies slope shading; when off, pixels take the plain colormap color.
    pub shading: bool,
    /// Color of pixels the sampler has no altitude for.
    pub placeholder_color: [u8; 3],
    /// Seed of the dither noise.
    pub seed: u64,
}

impl Default for ReliefOptions {
    fn default() -> Self {
        Self {
            max_altitude: 2000.0,
            shadow_altitude: 350.0,
            shade_offset: 1.0,
            dither: 0.05,
            shading: true,
            placeholder_color: PLACEHOLDER_COLOR,
            seed: 0,
        }
    }
}

impl ReliefOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_altitude(mut self, max_altitude: f32) -> Self {
        self.max_altitude = max_altitude;
        self
    }

    pub fn with_shadow_altitude(mut self, shadow_altitude: f32) -> Self {
        self.shadow_altitude = shadow_altitude;
        self
    }

    pub fn with_shade_offset(mut self, offset: f32) -> Self {
        self.shade_offset = offset;
        self
    }

    pub fn with_dither(mut self, dither: f32) -> Self {
        self.dither = dither;
        self
    }

    pub fn with_shading(mut self, shading: bool) -> Self {
        self.shading = shading;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Renders the altitude of `sampler` over `surface_extent` into `output` `(width, height)` pixels.
pub fn compose_relief(
    sampler: &dyn AltitudeSampler,
    surface_extent: Vec2,
    colormap: &Colormap,
    options: &ReliefOptions,
    output: (u32, u32),
) -> PixelBuffer {
    let (out_w, out_h) = output;
    let mut buffer = PixelBuffer::filled(out_w, out_h, options.placeholder_color);
    if out_w == 0 || out_h == 0 {
        return buffer;
    }

    let mut rng = StdRng::seed_from_u64(options.seed);
    let offset = Vec2::splat(options.shade_offset);
    let max_altitude = options.max_altitude.max(f32::EPSILON);

    for py in 0..out_h {
        for px in 0..out_w {
            let p = Vec2::new(
                px as f32 * surface_extent.x / out_w as f32,
                py as f32 * surface_extent.y / out_h as f32,
            );
            let Some(altitude) = sampler.sample_altitude(p.into()) else {
                continue;
            };
            let prop = altitude / max_altitude;
            let color = colormap.color_at(prop);

            if !options.shading {
                buffer.put_rgb(px, py, color);
                continue;
            }
            let Some(neighbour) = sampler.sample_altitude((p + offset).into()) else {
                continue;
            };
            let noise = options.dither * rand01(&mut rng);
            let brightness = shade(altitude, neighbour, prop, options.shadow_altitude) + noise;
            buffer.put_rgb(px, py, scale_color(color, brightness));
        }
    }
    buffer
}

/// Brightness factor for a sample given its diagonal neighbour.
///
/// Uphill towards the neighbour brightens, downhill darkens; higher ground darkens more.
pub fn shade(altitude: f32, neighbour: f32, prop: f32, shadow_altitude: f32) -> f32 {
    let slope = ((altitude - neighbour) / shadow_altitude.max(f32::EPSILON)).atan() / 1.57;
    1.0 - slope.min(1.0) * (prop * 0.8 + 0.2)
}

fn scale_color(rgb: [u8; 3], brightness: f32) -> [u8; 3] {
    rgb.map(|c| (c as f32 * brightness).clamp(0.0, 255.0) as u8)
}

#[inline]
fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

#[cfg(test)]
mod tests {
    use mint::Vector2;

    use super::*;

    struct Slope;

    impl AltitudeSampler for Slope {
        fn sample_altitude(&self, p: Vector2<f32>) -> Option<f32> {
            if p.x < 0.0 || p.y < 0.0 {
                return None;
            }
            Some(p.x * 10.0)
        }
    }

    struct Flat(f32);

    impl AltitudeSampler for Flat {
        fn sample_altitude(&self, _p: Vector2<f32>) -> Option<f32> {
            Some(self.0)
        }
    }

    #[test]
    fn flat_terrain_without_dither_keeps_colormap_color() {
        let map = Colormap::terrain();
        let options = ReliefOptions::default().with_dither(0.0);
        let buffer = compose_relief(&Flat(1500.0), Vec2::new(4.0, 4.0), &map, &options, (4, 4));
        let expected = map.color_at(0.75);
        assert_eq!(
            buffer.pixel(2, 2),
            Some([expected[0], expected[1], expected[2], 255])
        );
    }

    #[test]
    fn shade_darkens_downhill_and_brightens_uphill() {
        assert!(shade(500.0, 100.0, 0.25, 350.0) < 1.0);
        assert!(shade(100.0, 500.0, 0.05, 350.0) > 1.0);
        assert_eq!(shade(300.0, 300.0, 0.15, 350.0), 1.0);
    }

    #[test]
    fn dither_is_deterministic_per_seed() {
        let map = Colormap::terrain();
        let options = ReliefOptions::default().with_seed(7);
        let a = compose_relief(&Slope, Vec2::new(16.0, 16.0), &map, &options, (16, 16));
        let b = compose_relief(&Slope, Vec2::new(16.0, 16.0), &map, &options, (16, 16));
        assert_eq!(a, b);
    }

    #[test]
    fn missing_altitude_keeps_placeholder() {
        struct Nothing;
        impl AltitudeSampler for Nothing {
            fn sample_altitude(&self, _p: Vector2<f32>) -> Option<f32> {
                None
            }
        }
        let buffer = compose_relief(
            &Nothing,
            Vec2::new(2.0, 2.0),
            &Colormap::terrain(),
            &ReliefOptions::default(),
            (2, 2),
        );
        assert_eq!(buffer.pixel(1, 1), Some([0xaa, 0xaa, 0xaa, 255]));
    }

    #[test]
    fn shading_can_be_disabled() {
        let map = Colormap::terrain();
        let options = ReliefOptions::default().with_shading(false);
        let buffer = compose_relief(&Slope, Vec2::new(8.0, 8.0), &map, &options, (8, 8));
        let expected = map.color_at(50.0 / 2000.0);
        assert_eq!(
            buffer.pixel(5, 3),
            Some([expected[0], expected[1], expected[2], 255])
        );
    }
}
