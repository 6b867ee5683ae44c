//! Sites and the ordered store that owns them.
//!
//! A site is identified by its position in the [`SiteStore`]. Removing a site shifts every later
//! index down by one, so any [`crate::field::NearestSiteField`] built before a removal is stale
//! and must be rebuilt.
use glam::Vec2;

use crate::error::{Error, Result};

#[cfg(feature = "serde")]
pub mod persist;
pub mod template;

#[cfg(feature = "serde")]
pub use persist::{sites_from_json, sites_to_json, SiteRecord};
pub use template::TemplateRegistry;

/// Lower bound of the default erodibility range.
pub const MIN_ERODIBILITY: f32 = 0.2;
/// Upper bound of the default erodibility range.
pub const MAX_ERODIBILITY: f32 = 0.8;

/// Closed range of admissible erodibility values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ErodibilityRange {
    pub min: f32,
    pub max: f32,
}

impl Default for ErodibilityRange {
    fn default() -> Self {
        Self {
            min: MIN_ERODIBILITY,
            max: MAX_ERODIBILITY,
        }
    }
}

impl ErodibilityRange {
    /// Creates a range, rejecting empty, inverted or non-finite bounds.
    pub fn try_new(min: f32, max: f32) -> Result<Self> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(Error::InvalidConfig(
                "erodibility bounds must be finite".into(),
            ));
        }
        if self.max <= self.min {
            return Err(Error::InvalidConfig(format!(
                "erodibility range [{}, {}] is empty",
                self.min, self.max
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Midpoint of the range, used for sites created with nothing to inherit from.
    #[inline]
    pub fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }

    /// Maps `value` into `[0, 1]`, clamping values outside the range.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0)
    }

    /// Maps a ratio in `[0, 1]` back into the range.
    #[inline]
    pub fn lerp(&self, ratio: f32) -> f32 {
        self.min + ratio.clamp(0.0, 1.0) * (self.max - self.min)
    }
}

/// A weighted point feature seeding one region of the nearest-site field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Site {
    /// Position in continuous surface (canvas) coordinates.
    pub position: Vec2,
    /// How easily the underlying rock erodes.
    pub erodibility: f32,
    /// Ocean sites are drawn as water and act as drainage outlets for the terrain engine.
    pub is_ocean: bool,
}

impl Site {
    pub fn new(position: Vec2, erodibility: f32, is_ocean: bool) -> Self {
        Self {
            position,
            erodibility,
            is_ocean,
        }
    }

    /// Creates a land site at `position` with the midpoint erodibility of `range`.
    pub fn with_defaults(position: Vec2, range: &ErodibilityRange) -> Self {
        Self::new(position, range.midpoint(), false)
    }

    /// Creates a site at `position` that copies the attributes of `parent`.
    pub fn inheriting(position: Vec2, parent: &Site) -> Self {
        Self::new(position, parent.erodibility, parent.is_ocean)
    }

    /// Rejects non-finite positions and erodibility outside `range`.
    ///
    /// `index` is the site's position in its list and is reported in the error.
    pub fn validate(&self, index: usize, range: &ErodibilityRange) -> Result<()> {
        if !self.position.is_finite() {
            return Err(Error::invalid_site(
                index,
                format!(
                    "position ({}, {}) is not finite",
                    self.position.x, self.position.y
                ),
            ));
        }
        if !self.erodibility.is_finite() || !range.contains(self.erodibility) {
            return Err(Error::invalid_site(
                index,
                format!(
                    "erodibility {} outside [{}, {}]",
                    self.erodibility, range.min, range.max
                ),
            ));
        }
        Ok(())
    }
}

/// Ordered collection of sites. Identity is the current index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SiteStore {
    sites: Vec<Site>,
}

impl SiteStore {
    pub fn new() -> Self {
        Self { sites: Vec::new() }
    }

    pub fn from_sites(sites: Vec<Site>) -> Self {
        Self { sites }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// Appends a site and returns its index.
    pub fn push(&mut self, site: Site) -> usize {
        self.sites.push(site);
        self.sites.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Site> {
        self.sites.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Site> {
        self.sites.get_mut(index)
    }

    /// Removes the site at `index`, shifting later sites down by one.
    pub fn remove(&mut self, index: usize) -> Option<Site> {
        if index < self.sites.len() {
            Some(self.sites.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.sites.clear();
    }

    /// Replaces the whole content of the store.
    pub fn replace(&mut self, sites: Vec<Site>) {
        self.sites = sites;
    }

    pub fn as_slice(&self) -> &[Site] {
        &self.sites
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Site> {
        self.sites.iter()
    }

    /// Index of the site closest to `p` by direct search; lower index wins ties.
    pub fn nearest(&self, p: Vec2) -> Option<usize> {
        nearest_site(&self.sites, p)
    }
}

impl<'a> IntoIterator for &'a SiteStore {
    type Item = &'a Site;
    type IntoIter = std::slice::Iter<'a, Site>;

    fn into_iter(self) -> Self::IntoIter {
        self.sites.iter()
    }
}

/// Index of the site closest to `p` by direct search; lower index wins ties.
pub fn nearest_site(sites: &[Site], p: Vec2) -> Option<usize> {
    let mut best: Option<(usize, f32)> = None;
    for (i, site) in sites.iter().enumerate() {
        let d = site.position.distance_squared(p);
        match best {
            Some((_, bd)) if bd <= d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

/// Linearly remaps every erodibility value from `from` into `to`.
///
/// Used to migrate site lists authored against a different slider range.
pub fn rescale_erodibility(sites: &mut [Site], from: &ErodibilityRange, to: &ErodibilityRange) {
    for site in sites {
        let t = (site.erodibility - from.min) / (from.max - from.min);
        site.erodibility = to.min + t * (to.max - to.min);
    }
}
