//! Grid geometry for nearest-site fields.
//!
//! This module defines [`FieldGrid`], which partitions a surface into square cells of `scale`
//! surface units. Cell `(ix, iy)` sits at surface position `(ix * scale, iy * scale)`.
use glam::Vec2;

use crate::error::{Error, Result};

/// Defines the cell layout covering a surface.
#[derive(Clone, Debug, PartialEq)]
pub struct FieldGrid {
    /// Size of the covered surface in surface units.
    pub surface_extent: Vec2,
    /// Surface units per cell.
    pub scale: f32,
    /// Number of cells in X.
    pub width: usize,
    /// Number of cells in Y.
    pub height: usize,
}

impl FieldGrid {
    /// Creates a grid of `ceil(extent / scale)` cells on each axis.
    pub fn try_new(surface_extent: Vec2, scale: f32) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidConfig("cell scale must be > 0".into()));
        }
        if !(surface_extent.x > 0.0 && surface_extent.y > 0.0)
            || !surface_extent.is_finite()
        {
            return Err(Error::InvalidConfig(
                "surface extent must be > 0 in both components".into(),
            ));
        }
        Ok(Self {
            surface_extent,
            scale,
            width: (surface_extent.x / scale).ceil() as usize,
            height: (surface_extent.y / scale).ceil() as usize,
        })
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn contains(&self, ix: isize, iy: isize) -> bool {
        ix >= 0 && iy >= 0 && (ix as usize) < self.width && (iy as usize) < self.height
    }

    /// Linear index of an in-bounds cell.
    #[inline]
    pub fn index(&self, ix: usize, iy: usize) -> usize {
        iy * self.width + ix
    }

    /// Cell coordinates of a linear index.
    #[inline]
    pub fn coords(&self, index: usize) -> (usize, usize) {
        (index % self.width, index / self.width)
    }

    /// Surface position of a cell.
    #[inline]
    pub fn cell_to_surface(&self, ix: usize, iy: usize) -> Vec2 {
        Vec2::new(ix as f32 * self.scale, iy as f32 * self.scale)
    }

    /// Cell containing a surface position, or `None` outside the grid.
    pub fn surface_to_cell(&self, p: Vec2) -> Option<(usize, usize)> {
        let ix = (p.x / self.scale).floor();
        let iy = (p.y / self.scale).floor();
        if !ix.is_finite() || !iy.is_finite() {
            return None;
        }
        let (ix, iy) = (ix as isize, iy as isize);
        if self.contains(ix, iy) {
            Some((ix as usize, iy as usize))
        } else {
            None
        }
    }

    /// Cell whose position is closest to `p`, clamped into the grid.
    ///
    /// The flag is `false` when clamping moved the cell.
    pub fn seed_cell(&self, p: Vec2) -> ((usize, usize), bool) {
        let rx = (p.x / self.scale).round();
        let ry = (p.y / self.scale).round();
        let max_x = self.width.saturating_sub(1) as f32;
        let max_y = self.height.saturating_sub(1) as f32;
        let cx = rx.clamp(0.0, max_x);
        let cy = ry.clamp(0.0, max_y);
        ((cx as usize, cy as usize), cx == rx && cy == ry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_grid() -> FieldGrid {
        FieldGrid::try_new(Vec2::new(9.0, 6.0), 2.0).expect("valid grid")
    }

    #[test]
    fn dimensions_round_up() {
        let grid = sample_grid();
        assert_eq!((grid.width, grid.height), (5, 3));
        assert_eq!(grid.len(), 15);
    }

    #[test]
    fn rejects_degenerate_inputs() {
        assert!(FieldGrid::try_new(Vec2::new(10.0, 10.0), 0.0).is_err());
        assert!(FieldGrid::try_new(Vec2::new(0.0, 10.0), 1.0).is_err());
        assert!(FieldGrid::try_new(Vec2::new(f32::INFINITY, 10.0), 1.0).is_err());
    }

    #[test]
    fn surface_to_cell_floors_and_bounds() {
        let grid = sample_grid();
        assert_eq!(grid.surface_to_cell(Vec2::new(0.0, 0.0)), Some((0, 0)));
        assert_eq!(grid.surface_to_cell(Vec2::new(3.9, 5.9)), Some((1, 2)));
        assert_eq!(grid.surface_to_cell(Vec2::new(-0.1, 1.0)), None);
        assert_eq!(grid.surface_to_cell(Vec2::new(10.0, 1.0)), None);
    }

    #[test]
    fn seed_cell_rounds_and_clamps() {
        let grid = sample_grid();
        assert_eq!(grid.seed_cell(Vec2::new(2.9, 1.1)), ((1, 1), true));
        assert_eq!(grid.seed_cell(Vec2::new(-8.0, 40.0)), ((0, 2), false));
    }

    #[test]
    fn index_coords_roundtrip() {
        let grid = sample_grid();
        let i = grid.index(3, 2);
        assert_eq!(grid.coords(i), (3, 2));
        assert_eq!(grid.cell_to_surface(3, 2), Vec2::new(6.0, 4.0));
    }
}
