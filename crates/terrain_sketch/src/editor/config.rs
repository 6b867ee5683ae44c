use glam::Vec2;

use crate::error::{Error, Result};
use crate::field::FieldGrid;
use crate::render::{Colormap, CompositeOptions};
use crate::site::ErodibilityRange;

/// Configuration of an [`crate::editor::Editor`] session.
#[non_exhaustive]
#[derive(Debug, Clone)]
pub struct EditorConfig {
    /// Size of the editing canvas in surface units.
    pub canvas_extent: Vec2,
    /// Side length of one field cell in surface units.
    pub cell_scale: f32,
    /// Admissible erodibility; also the slider range.
    pub erodibility_range: ErodibilityRange,
    /// Compositing of the site view.
    pub composite: CompositeOptions,
    /// Colormap for land erodibility.
    pub colormap: Colormap,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            canvas_extent: Vec2::new(512.0, 512.0),
            cell_scale: 2.0,
            erodibility_range: ErodibilityRange::default(),
            composite: CompositeOptions::default(),
            colormap: Colormap::erodibility(),
        }
    }
}

impl EditorConfig {
    /// Creates a new [`EditorConfig`] for a canvas of the given size.
    pub fn new(canvas_extent: Vec2) -> Self {
        Self {
            canvas_extent,
            ..Default::default()
        }
    }

    pub fn with_cell_scale(mut self, cell_scale: f32) -> Self {
        self.cell_scale = cell_scale;
        self
    }

    /// Sets the erodibility range, keeping the compositor normalization in sync.
    pub fn with_erodibility_range(mut self, range: ErodibilityRange) -> Self {
        self.erodibility_range = range;
        self.composite.erodibility_range = range;
        self
    }

    pub fn with_composite(mut self, composite: CompositeOptions) -> Self {
        self.composite = composite;
        self
    }

    pub fn with_colormap(mut self, colormap: Colormap) -> Self {
        self.colormap = colormap;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !self.canvas_extent.is_finite() || self.canvas_extent.min_element() <= 0.0 {
            return Err(Error::InvalidConfig(
                "canvas_extent must be > 0 in both components".into(),
            ));
        }
        if !self.cell_scale.is_finite() || self.cell_scale <= 0.0 {
            return Err(Error::InvalidConfig("cell_scale must be > 0".into()));
        }
        self.erodibility_range.validate()?;
        self.composite.erodibility_range.validate()?;
        Ok(())
    }

    /// Field grid covering the canvas.
    pub fn grid(&self) -> Result<FieldGrid> {
        FieldGrid::try_new(self.canvas_extent, self.cell_scale)
    }
}
