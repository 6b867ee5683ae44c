//! Erodibility and coastline view of a nearest-site field.
//!
//! Each cell takes its color from its owning site: ocean sites draw water, with a shadow band
//! along the coast, and land sites draw their normalized erodibility through a [`Colormap`].
//! Output pixels map back to cells by nearest neighbour, so the output size is independent of
//! the field resolution.
use tracing::warn;

use crate::field::NearestSiteField;
use crate::render::{Colormap, PixelBuffer, PLACEHOLDER_COLOR};
use crate::site::{ErodibilityRange, Site};

/// Options for [`compose_sites`].
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct CompositeOptions {
    /// Base color of ocean cells.
    pub water_color: [u8; 3],
    /// Color of ocean cells along the coast.
    pub shadow_color: [u8; 3],
    /// Fill for missing fields and stale site indices.
    pub placeholder_color: [u8; 3],
    /// Diagonal lookback, in cells, that decides whether an ocean cell is coastal.
    pub coast_lookback: usize,
    /// Maps high erodibility to the low end of the colormap.
    pub invert_erodibility: bool,
    /// Range used to normalize erodibility into `[0, 1]`.
    pub erodibility_range: ErodibilityRange,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            water_color: [30, 150, 255],
            shadow_color: [15, 120, 240],
            placeholder_color: PLACEHOLDER_COLOR,
            coast_lookback: 2,
            invert_erodibility: false,
            erodibility_range: ErodibilityRange::default(),
        }
    }
}

impl CompositeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_water_colors(mut self, water: [u8; 3], shadow: [u8; 3]) -> Self {
        self.water_color = water;
        self.shadow_color = shadow;
        self
    }

    pub fn with_placeholder_color(mut self, color: [u8; 3]) -> Self {
        self.placeholder_color = color;
        self
    }

    pub fn with_coast_lookback(mut self, cells: usize) -> Self {
        self.coast_lookback = cells;
        self
    }

    pub fn with_inverted_erodibility(mut self, invert: bool) -> Self {
        self.invert_erodibility = invert;
        self
    }

    pub fn with_erodibility_range(mut self, range: ErodibilityRange) -> Self {
        self.erodibility_range = range;
        self
    }
}

/// Renders `field` over `sites` into a buffer of `output` `(width, height)` pixels.
///
/// A missing field or an empty site list yields a placeholder fill.
pub fn compose_sites(
    field: Option<&NearestSiteField>,
    sites: &[Site],
    colormap: &Colormap,
    options: &CompositeOptions,
    output: (u32, u32),
) -> PixelBuffer {
    let (out_w, out_h) = output;
    let mut buffer = PixelBuffer::filled(out_w, out_h, options.placeholder_color);
    let Some(field) = field else {
        return buffer;
    };
    if sites.is_empty() || out_w == 0 || out_h == 0 {
        return buffer;
    }

    let palette = cell_colors(field, sites, colormap, options);
    let grid = field.grid();

    let columns = axis_cells(out_w, grid.surface_extent.x, grid.scale, grid.width);
    let rows = axis_cells(out_h, grid.surface_extent.y, grid.scale, grid.height);

    for (py, &cy) in rows.iter().enumerate() {
        for (px, &cx) in columns.iter().enumerate() {
            buffer.put_rgb(px as u32, py as u32, palette[grid.index(cx, cy)]);
        }
    }
    buffer
}

/// Cell index along one axis for every output pixel on that axis.
fn axis_cells(pixels: u32, extent: f32, scale: f32, cells: usize) -> Vec<usize> {
    let last = cells.saturating_sub(1);
    (0..pixels)
        .map(|p| {
            let surface = p as f32 * extent / pixels as f32;
            ((surface / scale).floor().max(0.0) as usize).min(last)
        })
        .collect()
}

fn cell_colors(
    field: &NearestSiteField,
    sites: &[Site],
    colormap: &Colormap,
    options: &CompositeOptions,
) -> Vec<[u8; 3]> {
    let grid = field.grid();
    let owners = field.owners();
    let lookback = options.coast_lookback;
    let mut stale = 0usize;

    let is_ocean = |cell: usize| {
        sites
            .get(owners[cell] as usize)
            .is_some_and(|s| s.is_ocean)
    };

    let mut colors = Vec::with_capacity(owners.len());
    for (cell, &owner) in owners.iter().enumerate() {
        let Some(site) = sites.get(owner as usize) else {
            stale += 1;
            colors.push(options.placeholder_color);
            continue;
        };

        let color = if site.is_ocean {
            let (x, y) = grid.coords(cell);
            let coastal = x < lookback
                || y < lookback
                || !is_ocean(grid.index(x - lookback, y - lookback));
            if coastal {
                options.shadow_color
            } else {
                options.water_color
            }
        } else {
            let mut t = options.erodibility_range.normalize(site.erodibility);
            if options.invert_erodibility {
                t = 1.0 - t;
            }
            colormap.color_at(t)
        };
        colors.push(color);
    }

    if stale > 0 {
        warn!(
            "{} cells reference sites past the end of the store ({} sites); field is stale.",
            stale,
            sites.len()
        );
    }
    colors
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::field::{build_field, FieldGrid};

    fn land(x: f32, y: f32, erodibility: f32) -> Site {
        Site::new(Vec2::new(x, y), erodibility, false)
    }

    #[test]
    fn missing_field_renders_placeholder() {
        let buffer = compose_sites(
            None,
            &[],
            &Colormap::erodibility(),
            &CompositeOptions::default(),
            (4, 3),
        );
        assert!(buffer
            .as_bytes()
            .chunks(4)
            .all(|px| px == [0xaa, 0xaa, 0xaa, 255]));
    }

    #[test]
    fn land_uses_normalized_erodibility() {
        let sites = [land(1.0, 1.0, 0.2), land(7.0, 1.0, 0.8)];
        let grid = FieldGrid::try_new(Vec2::new(8.0, 2.0), 1.0).unwrap();
        let field = build_field(&sites, &grid).unwrap();
        let map = Colormap::erodibility();

        let buffer = compose_sites(Some(&field), &sites, &map, &CompositeOptions::default(), (8, 2));
        assert_eq!(buffer.pixel(0, 0), Some([149, 149, 149, 255]));
        assert_eq!(buffer.pixel(7, 1), Some([221, 221, 221, 255]));

        let inverted = CompositeOptions::default().with_inverted_erodibility(true);
        let buffer = compose_sites(Some(&field), &sites, &map, &inverted, (8, 2));
        assert_eq!(buffer.pixel(0, 0), Some([221, 221, 221, 255]));
    }

    #[test]
    fn scale_blocks_share_one_cell() {
        let sites = [land(0.0, 0.0, 0.2), land(8.0, 0.0, 0.8)];
        let grid = FieldGrid::try_new(Vec2::new(10.0, 4.0), 2.0).unwrap();
        let field = build_field(&sites, &grid).unwrap();
        let buffer = compose_sites(
            Some(&field),
            &sites,
            &Colormap::erodibility(),
            &CompositeOptions::default(),
            (10, 4),
        );
        for y in 0..4 {
            assert_eq!(buffer.pixel(0, y), buffer.pixel(1, y));
            assert_eq!(buffer.pixel(8, y), buffer.pixel(9, y));
        }
        assert_ne!(buffer.pixel(0, 0), buffer.pixel(9, 0));
    }

    #[test]
    fn output_size_is_decoupled_from_grid() {
        let sites = [land(0.0, 0.0, 0.2), land(8.0, 0.0, 0.8)];
        let grid = FieldGrid::try_new(Vec2::new(10.0, 10.0), 1.0).unwrap();
        let field = build_field(&sites, &grid).unwrap();
        let buffer = compose_sites(
            Some(&field),
            &sites,
            &Colormap::erodibility(),
            &CompositeOptions::default(),
            (40, 40),
        );
        assert_eq!((buffer.width(), buffer.height()), (40, 40));
        assert_eq!(buffer.pixel(0, 0), Some([149, 149, 149, 255]));
        assert_eq!(buffer.pixel(39, 0), Some([221, 221, 221, 255]));
    }

    #[test]
    fn stale_indices_fall_back_to_placeholder() {
        let sites = [land(0.0, 0.0, 0.5), land(5.0, 0.0, 0.5)];
        let grid = FieldGrid::try_new(Vec2::new(6.0, 1.0), 1.0).unwrap();
        let field = build_field(&sites, &grid).unwrap();
        let buffer = compose_sites(
            Some(&field),
            &sites[..1],
            &Colormap::erodibility(),
            &CompositeOptions::default(),
            (6, 1),
        );
        assert_eq!(buffer.pixel(5, 0), Some([0xaa, 0xaa, 0xaa, 255]));
        assert_ne!(buffer.pixel(0, 0), Some([0xaa, 0xaa, 0xaa, 255]));
    }

    #[test]
    fn ocean_at_top_left_border_is_shadowed() {
        let sites = [Site::new(Vec2::new(3.0, 3.0), 0.5, true)];
        let grid = FieldGrid::try_new(Vec2::new(6.0, 6.0), 1.0).unwrap();
        let field = build_field(&sites, &grid).unwrap();
        let buffer = compose_sites(
            Some(&field),
            &sites,
            &Colormap::erodibility(),
            &CompositeOptions::default(),
            (6, 6),
        );
        assert_eq!(buffer.pixel(1, 4), Some([15, 120, 240, 255]));
        assert_eq!(buffer.pixel(4, 1), Some([15, 120, 240, 255]));
        assert_eq!(buffer.pixel(2, 2), Some([30, 150, 255, 255]));
    }
}
