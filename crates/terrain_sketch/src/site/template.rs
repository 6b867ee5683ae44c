//! Named site-list presets.
//!
//! Templates are kept in registration order so they can be offered by index as well as by name.
//! Re-registering an existing name replaces its sites in place.
use tracing::warn;

use crate::error::{Error, Result};
use crate::site::Site;

struct TemplateEntry {
    name: String,
    sites: Vec<Site>,
}

/// Ordered registry of site-list presets keyed by unique names.
#[derive(Default)]
pub struct TemplateRegistry {
    entries: Vec<TemplateEntry>,
}

impl TemplateRegistry {
    /// Creates a new, empty [`TemplateRegistry`].
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Returns the number of registered templates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no registered templates.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Registers `sites` under `name`, returning the template's index.
    pub fn register(&mut self, name: impl Into<String>, sites: Vec<Site>) -> usize {
        let name = name.into();
        if let Some(i) = self.position(&name) {
            self.entries[i].sites = sites;
            return i;
        }
        self.entries.push(TemplateEntry { name, sites });
        self.entries.len() - 1
    }

    /// Parses, validates and registers a JSON preset.
    #[cfg(feature = "serde")]
    pub fn register_json(
        &mut self,
        name: impl Into<String>,
        json: &str,
        range: &crate::site::ErodibilityRange,
    ) -> Result<usize> {
        let sites = crate::site::persist::sites_from_json(json, range)?;
        Ok(self.register(name, sites))
    }

    /// Reads a JSON preset from `path` and registers it like [`Self::register_json`].
    #[cfg(feature = "serde")]
    pub fn register_file(
        &mut self,
        name: impl Into<String>,
        path: impl AsRef<std::path::Path>,
        range: &crate::site::ErodibilityRange,
    ) -> Result<usize> {
        let json = std::fs::read_to_string(path)?;
        self.register_json(name, &json, range)
    }

    /// Unregisters a template by name. Returns `true` if it was found and removed.
    pub fn unregister(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(i) => {
                self.entries.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Template names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn get(&self, name: &str) -> Option<&[Site]> {
        self.position(name).map(|i| self.entries[i].sites.as_slice())
    }

    /// Looks up a template by its registration index, returning its name and sites.
    pub fn get_index(&self, index: usize) -> Option<(&str, &[Site])> {
        self.entries
            .get(index)
            .map(|e| (e.name.as_str(), e.sites.as_slice()))
    }

    /// Like [`TemplateRegistry::get`], but reports a missing name as an error.
    pub fn require(&self, name: &str) -> Result<&[Site]> {
        self.get(name).ok_or_else(|| {
            warn!("Unknown template '{}'.", name);
            Error::UnknownTemplate {
                name: name.to_owned(),
            }
        })
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.name == name)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;

    fn sites(n: usize) -> Vec<Site> {
        (0..n)
            .map(|i| Site::new(Vec2::splat(i as f32), 0.5, i % 2 == 0))
            .collect()
    }

    #[test]
    fn lookup_by_name_and_index() {
        let mut registry = TemplateRegistry::new();
        assert_eq!(registry.register("islands", sites(3)), 0);
        assert_eq!(registry.register("continent", sites(5)), 1);

        assert_eq!(registry.get("islands").map(|s| s.len()), Some(3));
        let (name, preset) = registry.get_index(1).expect("second template");
        assert_eq!(name, "continent");
        assert_eq!(preset.len(), 5);
        assert!(registry.get_index(2).is_none());
        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["islands", "continent"]
        );
    }

    #[test]
    fn re_register_replaces_in_place() {
        let mut registry = TemplateRegistry::new();
        registry.register("a", sites(1));
        registry.register("b", sites(2));
        assert_eq!(registry.register("a", sites(4)), 0);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("a").map(|s| s.len()), Some(4));
    }

    #[test]
    fn require_reports_unknown_name() {
        let registry = TemplateRegistry::new();
        assert!(matches!(
            registry.require("missing"),
            Err(Error::UnknownTemplate { .. })
        ));
    }

    #[test]
    fn unregister_removes_entry() {
        let mut registry = TemplateRegistry::new();
        registry.register("a", sites(1));
        assert!(registry.unregister("a"));
        assert!(!registry.unregister("a"));
        assert!(registry.is_empty());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn register_json_validates_records() {
        let mut registry = TemplateRegistry::new();
        let range = crate::site::ErodibilityRange::default();
        let ok = r#"[{"x": 1.0, "y": 2.0, "erodibility": 0.4, "is_ocean": true}]"#;
        let bad = r#"[{"x": 1.0, "y": 2.0, "erodibility": 9.0, "is_ocean": true}]"#;
        assert_eq!(registry.register_json("ok", ok, &range).unwrap(), 0);
        assert!(registry.register_json("bad", bad, &range).is_err());
        assert!(!registry.contains("bad"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn register_file_reports_io_errors() {
        let mut registry = TemplateRegistry::new();
        let range = crate::site::ErodibilityRange::default();
        let dir = std::env::temp_dir()
            .join(format!("terrain_sketch_templates_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("shelf.json");
        std::fs::write(
            &path,
            r#"[{"x": 3.0, "y": 4.0, "erodibility": 0.5, "is_ocean": false}]"#,
        )
        .unwrap();

        assert_eq!(registry.register_file("shelf", &path, &range).unwrap(), 0);
        assert_eq!(registry.get("shelf").map(|s| s.len()), Some(1));

        let missing = dir.join("missing.json");
        let err = registry.register_file("missing", &missing, &range).unwrap_err();
        assert!(matches!(err, Error::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound));
        assert!(!registry.contains("missing"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
