#![forbid(unsafe_code)]
//! terrain_sketch: Sketch terrain with weighted sites, nearest-site fields and relief rendering.
//!
//! Modules:
//! - site: sites, the ordered site store, JSON persistence and template presets
//! - field: discrete nearest-site fields built with a multi-source priority flood
//! - render: colormaps, the erodibility/coastline compositor and shaded relief
//! - terrain: the bridge to an external terrain-synthesis engine
//! - editor: an interactive editing session tying the pieces together
//!
//! For examples and docs, see README.
pub mod editor;
pub mod error;
pub mod field;
pub mod render;
pub mod site;
pub mod terrain;

/// Convenient re-exports for common types. Import with `use terrain_sketch::prelude::*;`.
pub mod prelude {
    pub use crate::editor::{CreationMode, Editor, EditorConfig};
    pub use crate::error::{Error, Result};
    pub use crate::field::{build_field, FieldGrid, NearestSiteField};
    pub use crate::render::{
        compose_relief, compose_sites, ColorStop, Colormap, CompositeOptions, PixelBuffer,
        ReliefOptions,
    };
    #[cfg(feature = "serde")]
    pub use crate::site::{sites_from_json, sites_to_json, SiteRecord};
    pub use crate::site::{
        nearest_site, rescale_erodibility, ErodibilityRange, Site, SiteStore, TemplateRegistry,
    };
    pub use crate::terrain::{
        AltitudeSampler, TerrainOptions, TerrainRequest, TerrainSurface, TerrainSynthesizer,
    };
}
