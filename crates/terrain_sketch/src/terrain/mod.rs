//! Bridge to an external terrain-synthesis engine.
//!
//! The engine is opaque: it receives a [`TerrainRequest`] built from the site list and returns an
//! [`AltitudeSampler`]. Points crossing this boundary use [`mint`] types so engines built on any
//! math library can implement the traits.
//! - Implement [`TerrainSynthesizer`] for an engine.
//! - Wrap its sampler in a [`TerrainSurface`] to sample in canvas coordinates.
use std::fmt;

use glam::Vec2;
use mint::Vector2;

use crate::error::Result;

pub mod request;

pub use request::{TerrainOptions, TerrainRequest};

/// Continuous altitude function over a terrain surface.
pub trait AltitudeSampler: Send + Sync {
    /// Altitude at `p`, or `None` outside the sampled surface.
    fn sample_altitude(&self, p: Vector2<f32>) -> Option<f32>;
}

/// An elevation engine turning a prepared site list into an altitude function.
pub trait TerrainSynthesizer {
    fn synthesize(&self, request: &TerrainRequest) -> Result<Box<dyn AltitudeSampler>>;
}

/// Synthesized terrain sampled in canvas coordinates.
pub struct TerrainSurface {
    sampler: Box<dyn AltitudeSampler>,
    canvas_extent: Vec2,
    canvas_to_surface: Vec2,
}

impl TerrainSurface {
    /// Wraps `sampler`, which works in the surface space of `request`.
    pub fn new(sampler: Box<dyn AltitudeSampler>, request: &TerrainRequest) -> Self {
        Self {
            sampler,
            canvas_extent: request.canvas_extent,
            canvas_to_surface: request.canvas_to_surface(),
        }
    }

    /// Size of the canvas this surface is sampled over.
    pub fn canvas_extent(&self) -> Vec2 {
        self.canvas_extent
    }
}

impl fmt::Debug for TerrainSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TerrainSurface")
            .field("canvas_extent", &self.canvas_extent)
            .field("canvas_to_surface", &self.canvas_to_surface)
            .finish_non_exhaustive()
    }
}

impl AltitudeSampler for TerrainSurface {
    fn sample_altitude(&self, p: Vector2<f32>) -> Option<f32> {
        let surface = Vec2::from(p) * self.canvas_to_surface;
        self.sampler.sample_altitude(surface.into())
    }
}
