//! Interactive site editing session.
//!
//! [`Editor`] owns the site list, the selection and the current nearest-site field. Every
//! position change (add, move, delete, load) rebuilds the field synchronously and publishes it
//! by swapping the [`Arc`]; attribute edits only change what the next render draws.
use std::sync::Arc;

use glam::Vec2;
use rand::Rng;
use tracing::{info, warn};

use crate::error::Result;
use crate::field::{build_field, FieldGrid, NearestSiteField};
use crate::render::{compose_sites, PixelBuffer};
use crate::site::{Site, SiteStore, TemplateRegistry};
use crate::terrain::{TerrainOptions, TerrainRequest, TerrainSurface, TerrainSynthesizer};

pub mod config;

pub use config::EditorConfig;

/// Whether clicks on the canvas create sites.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CreationMode {
    /// Clicks select the site owning the clicked cell.
    #[default]
    Off,
    /// The next click creates one site, then the mode returns to `Off`.
    Single,
    /// Every click creates a site until cancelled.
    Repeat,
}

/// A site editing session over a fixed canvas.
#[derive(Debug)]
pub struct Editor {
    config: EditorConfig,
    grid: FieldGrid,
    sites: SiteStore,
    selection: Option<usize>,
    mode: CreationMode,
    field: Option<Arc<NearestSiteField>>,
}

impl Editor {
    pub fn try_new(config: EditorConfig) -> Result<Self> {
        config.validate()?;
        let grid = config.grid()?;
        Ok(Self {
            config,
            grid,
            sites: SiteStore::new(),
            selection: None,
            mode: CreationMode::Off,
            field: None,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn sites(&self) -> &SiteStore {
        &self.sites
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn selected_site(&self) -> Option<&Site> {
        self.selection.and_then(|i| self.sites.get(i))
    }

    pub fn creation_mode(&self) -> CreationMode {
        self.mode
    }

    /// Current field snapshot; `None` while the store is empty.
    pub fn field(&self) -> Option<&Arc<NearestSiteField>> {
        self.field.as_ref()
    }

    pub fn begin_creation(&mut self, mode: CreationMode) {
        self.mode = mode;
    }

    /// Leaves creation mode if active, otherwise clears the selection.
    pub fn cancel(&mut self) {
        if self.mode != CreationMode::Off {
            self.mode = CreationMode::Off;
        } else {
            self.selection = None;
        }
    }

    /// Handles a click at canvas position `p` and returns the selected site.
    ///
    /// In creation mode a site is added at `p`, copying the attributes of the site owning the
    /// clicked cell. Otherwise the owner of the clicked cell becomes the selection; clicks that
    /// hit no cell keep the previous selection.
    pub fn click(&mut self, p: Vec2) -> Option<usize> {
        if self.mode == CreationMode::Off {
            if let Some(owner) = self.hover(p) {
                self.selection = Some(owner);
            }
            return self.selection;
        }

        if self.grid.surface_to_cell(p).is_none() {
            return self.selection;
        }
        let site = match self.hover(p).and_then(|i| self.sites.get(i)) {
            Some(parent) => Site::inheriting(p, parent),
            None => Site::with_defaults(p, &self.config.erodibility_range),
        };
        let index = self.add_site(site);
        self.selection = Some(index);
        if self.mode == CreationMode::Single {
            self.mode = CreationMode::Off;
        }
        Some(index)
    }

    /// Site owning the cell under canvas position `p`.
    pub fn hover(&self, p: Vec2) -> Option<usize> {
        self.field.as_ref()?.site_at(p)
    }

    /// Appends a site, rebuilds and returns its index.
    pub fn add_site(&mut self, site: Site) -> usize {
        let index = self.sites.push(site);
        self.rebuild();
        index
    }

    /// Moves a site and rebuilds. Returns `false` for an unknown index.
    pub fn move_site(&mut self, index: usize, p: Vec2) -> bool {
        let Some(site) = self.sites.get_mut(index) else {
            return false;
        };
        site.position = p;
        self.rebuild();
        true
    }

    /// Deletes the selected site and clears the selection.
    pub fn delete_selected(&mut self) -> Option<Site> {
        let index = self.selection.take()?;
        self.delete_site(index)
    }

    /// Deletes a site and rebuilds. A selection after `index` follows its site.
    pub fn delete_site(&mut self, index: usize) -> Option<Site> {
        let removed = self.sites.remove(index)?;
        self.selection = match self.selection {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.rebuild();
        Some(removed)
    }

    /// Removes every site.
    pub fn clear(&mut self) {
        self.sites.clear();
        self.selection = None;
        self.field = None;
        info!("Cleared all sites.");
    }

    /// Sets the erodibility of the selected site, clamped into the configured range.
    pub fn set_selected_erodibility(&mut self, erodibility: f32) -> bool {
        let range = self.config.erodibility_range;
        let Some(site) = self.selected_mut() else {
            return false;
        };
        site.erodibility = erodibility.clamp(range.min, range.max);
        true
    }

    /// Sets the erodibility of the selected site from a slider ratio in `[0, 1]`.
    pub fn set_selected_erodibility_ratio(&mut self, ratio: f32) -> bool {
        let value = self.config.erodibility_range.lerp(ratio);
        self.set_selected_erodibility(value)
    }

    /// Slider ratio of the selected site's erodibility.
    pub fn selected_erodibility_ratio(&self) -> Option<f32> {
        let site = self.selected_site()?;
        Some(self.config.erodibility_range.normalize(site.erodibility))
    }

    pub fn set_selected_ocean(&mut self, is_ocean: bool) -> bool {
        let Some(site) = self.selected_mut() else {
            return false;
        };
        site.is_ocean = is_ocean;
        true
    }

    /// Replaces the site list after validating every site.
    ///
    /// On error nothing changes.
    pub fn load_sites(&mut self, sites: Vec<Site>) -> Result<()> {
        let range = self.config.erodibility_range;
        for (index, site) in sites.iter().enumerate() {
            if let Err(err) = site.validate(index, &range) {
                warn!("Rejected site list: {}", err);
                return Err(err);
            }
        }
        self.sites.replace(sites);
        self.selection = None;
        self.mode = CreationMode::Off;
        info!("Loaded {} sites.", self.sites.len());
        self.rebuild();
        Ok(())
    }

    /// Parses and loads a JSON site list. On error nothing changes.
    #[cfg(feature = "serde")]
    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let sites = crate::site::sites_from_json(json, &self.config.erodibility_range)
            .inspect_err(|err| warn!("Rejected site list: {}", err))?;
        self.load_sites(sites)
    }

    /// Loads a registered template by name. On error nothing changes.
    pub fn load_template(&mut self, templates: &TemplateRegistry, name: &str) -> Result<()> {
        let sites = templates.require(name)?.to_vec();
        self.load_sites(sites)?;
        info!("Loaded template '{}'.", name);
        Ok(())
    }

    #[cfg(feature = "serde")]
    pub fn export_json(&self) -> Result<String> {
        crate::site::sites_to_json(self.sites.as_slice())
    }

    /// Composites the site view at canvas resolution.
    pub fn render(&self) -> PixelBuffer {
        let extent = self.config.canvas_extent;
        let output = (extent.x.ceil() as u32, extent.y.ceil() as u32);
        self.compose(output)
    }

    /// Composites the site view into a `size` x `size` raster.
    pub fn export_raster(&self, size: u32) -> PixelBuffer {
        self.compose((size, size))
    }

    /// Hands the current sites to a terrain engine.
    pub fn synthesize_terrain(
        &self,
        engine: &dyn TerrainSynthesizer,
        options: &TerrainOptions,
        rng: &mut dyn Rng,
    ) -> Result<TerrainSurface> {
        let request = TerrainRequest::prepare(
            self.sites.as_slice(),
            self.config.canvas_extent,
            options,
            rng,
        )?;
        let sampler = engine.synthesize(&request)?;
        Ok(TerrainSurface::new(sampler, &request))
    }

    fn compose(&self, output: (u32, u32)) -> PixelBuffer {
        compose_sites(
            self.field.as_deref(),
            self.sites.as_slice(),
            &self.config.colormap,
            &self.config.composite,
            output,
        )
    }

    fn selected_mut(&mut self) -> Option<&mut Site> {
        let index = self.selection?;
        self.sites.get_mut(index)
    }

    fn rebuild(&mut self) {
        self.field = build_field(self.sites.as_slice(), &self.grid).map(Arc::new);
        info!(
            "Rebuilt nearest-site field for {} sites.",
            self.sites.len()
        );
    }
}
