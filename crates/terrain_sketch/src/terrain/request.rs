//! Preparation of the site list handed to a terrain engine.
//!
//! Canvas sites are scaled onto a terrain surface of fixed width, the surface border is padded
//! with nodes that copy their nearest site so the engine sees a closed boundary, and the interior
//! is densified with scattered nodes whose attributes are interpolated from the sites.
use glam::Vec2;
use rand::Rng;
use tracing::info;

use crate::error::{Error, Result};
use crate::site::{nearest_site, Site};

/// Options controlling [`TerrainRequest::prepare`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct TerrainOptions {
    /// Width of the terrain surface in engine units (meters).
    pub surface_width: f32,
    /// Number of scattered interior nodes.
    pub node_count_hint: usize,
    /// Number of padding nodes per surface side.
    pub edge_padding: usize,
    /// Uplift rate applied to every node.
    pub uplift_rate: f32,
}

impl Default for TerrainOptions {
    fn default() -> Self {
        Self {
            surface_width: 200.0 * 1e3,
            node_count_hint: 50_000,
            edge_padding: 4,
            uplift_rate: 100.0,
        }
    }
}

impl TerrainOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_surface_width(mut self, width: f32) -> Self {
        self.surface_width = width;
        self
    }

    pub fn with_node_count_hint(mut self, count: usize) -> Self {
        self.node_count_hint = count;
        self
    }

    pub fn with_edge_padding(mut self, nodes_per_side: usize) -> Self {
        self.edge_padding = nodes_per_side;
        self
    }

    pub fn with_uplift_rate(mut self, rate: f32) -> Self {
        self.uplift_rate = rate;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.surface_width.is_finite() || self.surface_width <= 0.0 {
            return Err(Error::InvalidConfig("surface_width must be > 0".into()));
        }
        if !self.uplift_rate.is_finite() {
            return Err(Error::InvalidConfig("uplift_rate must be finite".into()));
        }
        Ok(())
    }
}

/// Everything a terrain engine needs to synthesize altitude for a site list.
#[derive(Debug, Clone)]
pub struct TerrainRequest {
    /// Size of the editing canvas the sites were placed on.
    pub canvas_extent: Vec2,
    /// Size of the terrain surface in engine units.
    pub surface_extent: Vec2,
    /// User sites scaled onto the surface, followed by the border padding nodes.
    pub seeds: Vec<Site>,
    /// Scattered interior nodes with interpolated attributes.
    pub nodes: Vec<Site>,
    /// Indices into `nodes` of ocean nodes, where drainage leaves the surface.
    pub outlets: Vec<usize>,
    /// Requested number of interior nodes.
    pub node_count_hint: usize,
    /// Padding nodes per surface side.
    pub edge_padding: usize,
    /// Uplift rate applied to every node.
    pub uplift_rate: f32,
}

impl TerrainRequest {
    /// Builds a request from canvas-space `sites`.
    pub fn prepare(
        sites: &[Site],
        canvas_extent: Vec2,
        options: &TerrainOptions,
        rng: &mut dyn Rng,
    ) -> Result<Self> {
        options.validate()?;
        if sites.is_empty() {
            return Err(Error::Terrain(
                "cannot synthesize terrain without sites".into(),
            ));
        }
        if !canvas_extent.is_finite() || canvas_extent.min_element() <= 0.0 {
            return Err(Error::InvalidConfig(
                "canvas extent must be > 0 in both components".into(),
            ));
        }

        let surface_extent = Vec2::new(
            options.surface_width,
            options.surface_width * (canvas_extent.y / canvas_extent.x),
        );
        let scale = surface_extent / canvas_extent;

        let scaled: Vec<Site> = sites
            .iter()
            .map(|s| Site::new(s.position * scale, s.erodibility, s.is_ocean))
            .collect();

        let mut seeds = scaled.clone();
        seeds.extend(border_nodes(&scaled, surface_extent, options.edge_padding));

        let nodes: Vec<Site> = (0..options.node_count_hint)
            .map(|_| {
                let p = Vec2::new(
                    rand01(rng) * surface_extent.x,
                    rand01(rng) * surface_extent.y,
                );
                interpolate(&seeds, p)
            })
            .collect();

        let outlets: Vec<usize> = nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_ocean)
            .map(|(i, _)| i)
            .collect();

        info!(
            "Prepared terrain request: {} sites, {} seeds, {} nodes, {} outlets over {}x{}.",
            sites.len(),
            seeds.len(),
            nodes.len(),
            outlets.len(),
            surface_extent.x,
            surface_extent.y
        );

        Ok(Self {
            canvas_extent,
            surface_extent,
            seeds,
            nodes,
            outlets,
            node_count_hint: options.node_count_hint,
            edge_padding: options.edge_padding,
            uplift_rate: options.uplift_rate,
        })
    }

    /// Factor converting canvas coordinates to surface coordinates.
    pub fn canvas_to_surface(&self) -> Vec2 {
        self.surface_extent / self.canvas_extent
    }
}

/// `per_side` nodes along each side of the surface, walking the corners clockwise.
fn border_nodes(sites: &[Site], extent: Vec2, per_side: usize) -> Vec<Site> {
    let corners = [
        Vec2::ZERO,
        Vec2::new(extent.x, 0.0),
        extent,
        Vec2::new(0.0, extent.y),
    ];
    let mut out = Vec::with_capacity(per_side * corners.len());
    for (i, &from) in corners.iter().enumerate() {
        let to = corners[(i + 1) % corners.len()];
        for j in 0..per_side {
            let p = from.lerp(to, j as f32 / per_side as f32);
            if let Some(nearest) = nearest_site(sites, p) {
                out.push(Site::inheriting(p, &sites[nearest]));
            }
        }
    }
    out
}

/// Node at `p` with inverse-square-distance erodibility and the nearest seed's ocean flag.
fn interpolate(seeds: &[Site], p: Vec2) -> Site {
    let mut weight_sum = 0.0f32;
    let mut value_sum = 0.0f32;
    let mut nearest = (0usize, f32::INFINITY);
    for (i, seed) in seeds.iter().enumerate() {
        let d = seed.position.distance_squared(p);
        if d < nearest.1 {
            nearest = (i, d);
        }
        if d == 0.0 {
            return Site::inheriting(p, seed);
        }
        let w = 1.0 / d;
        weight_sum += w;
        value_sum += w * seed.erodibility;
    }
    let erodibility = if weight_sum > 0.0 {
        value_sum / weight_sum
    } else {
        seeds[nearest.0].erodibility
    };
    Site::new(p, erodibility, seeds[nearest.0].is_ocean)
}

#[inline]
fn rand01(rng: &mut dyn Rng) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}
