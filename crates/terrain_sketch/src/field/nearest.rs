//! Storage for built nearest-site fields.
use glam::Vec2;

use super::grid::FieldGrid;

/// A dense grid of site indices, one per cell.
///
/// Fields are immutable snapshots: a rebuild produces a new value rather than editing this one.
#[derive(Clone, Debug, PartialEq)]
pub struct NearestSiteField {
    pub(crate) grid: FieldGrid,
    pub(crate) owners: Vec<u32>,
}

impl NearestSiteField {
    pub(crate) fn new(grid: FieldGrid, owners: Vec<u32>) -> Self {
        debug_assert_eq!(grid.len(), owners.len());
        Self { grid, owners }
    }

    pub fn grid(&self) -> &FieldGrid {
        &self.grid
    }

    /// Size of the field as `(width, height)` in cells.
    pub fn size(&self) -> (usize, usize) {
        (self.grid.width, self.grid.height)
    }

    /// Owner indices in row-major order.
    pub fn owners(&self) -> &[u32] {
        &self.owners
    }

    /// Owning site of a cell, or `None` when the cell lies outside the grid.
    pub fn owner(&self, ix: isize, iy: isize) -> Option<usize> {
        if !self.grid.contains(ix, iy) {
            return None;
        }
        let i = self.grid.index(ix as usize, iy as usize);
        Some(self.owners[i] as usize)
    }

    /// Owning site of the cell under a surface position, e.g. the cursor.
    pub fn site_at(&self, p: Vec2) -> Option<usize> {
        let (ix, iy) = self.grid.surface_to_cell(p)?;
        Some(self.owners[self.grid.index(ix, iy)] as usize)
    }
}
