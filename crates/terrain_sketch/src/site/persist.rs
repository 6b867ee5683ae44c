//! Flat JSON site lists used for export, import and template presets.
//!
//! The persisted format is an array of `{x, y, erodibility, is_ocean}` records. Records are
//! validated at this boundary; the field builder and compositor assume valid sites.
use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::site::{ErodibilityRange, Site};

/// One persisted site.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SiteRecord {
    pub x: f32,
    pub y: f32,
    pub erodibility: f32,
    pub is_ocean: bool,
}

impl SiteRecord {
    /// Checks the record and converts it into a [`Site`].
    ///
    /// `index` is the record's position in its list and is reported in the error.
    pub fn validate(&self, index: usize, range: &ErodibilityRange) -> Result<Site> {
        let site = Site::new(Vec2::new(self.x, self.y), self.erodibility, self.is_ocean);
        site.validate(index, range)?;
        Ok(site)
    }
}

impl From<&Site> for SiteRecord {
    fn from(site: &Site) -> Self {
        Self {
            x: site.position.x,
            y: site.position.y,
            erodibility: site.erodibility,
            is_ocean: site.is_ocean,
        }
    }
}

/// Validates every record, failing on the first bad one.
pub fn sites_from_records(records: &[SiteRecord], range: &ErodibilityRange) -> Result<Vec<Site>> {
    records
        .iter()
        .enumerate()
        .map(|(i, r)| r.validate(i, range))
        .collect()
}

/// Parses and validates a JSON site list.
pub fn sites_from_json(json: &str, range: &ErodibilityRange) -> Result<Vec<Site>> {
    let records: Vec<SiteRecord> = serde_json::from_str(json)?;
    sites_from_records(&records, range)
}

/// Serializes sites into the flat JSON format.
pub fn sites_to_json(sites: &[Site]) -> Result<String> {
    let records: Vec<SiteRecord> = sites.iter().map(SiteRecord::from).collect();
    Ok(serde_json::to_string(&records)?)
}
