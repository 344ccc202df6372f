//! The master gazetteer: known location names, aliases and bounding boxes.

use locations_common::BoundingBox;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::error::CatalogError;

/// On-disk gazetteer layout.
///
/// ```json
/// {
///     "locations": {"A_1": [lon_min, lon_max, lat_min, lat_max]},
///     "aliases": {"Alias_A1": "A_1"}
/// }
/// ```
#[derive(Debug, Deserialize)]
struct GazetteerFile {
    locations: BTreeMap<String, [f64; 4]>,
    #[serde(default)]
    aliases: BTreeMap<String, String>,
}

/// Read-only catalog of recognised locations.
///
/// Safe to share between concurrent loads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResourceCatalog {
    valid_locations: BTreeMap<String, BoundingBox>,
    location_aliases: BTreeMap<String, String>,
}

impl ResourceCatalog {
    /// Parse and check a gazetteer JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let file: GazetteerFile = serde_json::from_str(json)?;

        let mut valid_locations = BTreeMap::new();
        for (name, values) in file.locations {
            let bbox = BoundingBox::from_gazetteer(values).map_err(|source| {
                CatalogError::InvalidBounds {
                    name: name.clone(),
                    source,
                }
            })?;
            valid_locations.insert(name, bbox);
        }

        for (alias, target) in &file.aliases {
            if !valid_locations.contains_key(target) {
                return Err(CatalogError::DanglingAlias {
                    alias: alias.clone(),
                    target: target.clone(),
                });
            }
        }

        Ok(Self {
            valid_locations,
            location_aliases: file.aliases,
        })
    }

    /// Load a gazetteer JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let content = fs::read_to_string(path.as_ref())?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            path = %path.as_ref().display(),
            locations = catalog.valid_locations.len(),
            aliases = catalog.location_aliases.len(),
            "Loaded gazetteer"
        );
        Ok(catalog)
    }

    pub fn location_aliases(&self) -> &BTreeMap<String, String> {
        &self.location_aliases
    }

    pub fn is_primary(&self, name: &str) -> bool {
        self.valid_locations.contains_key(name)
    }

    pub fn is_alias(&self, name: &str) -> bool {
        self.location_aliases.contains_key(name)
    }

    /// Name is a primary location name or an alias.
    pub fn is_known(&self, name: &str) -> bool {
        self.is_primary(name) || self.is_alias(name)
    }

    /// Canonical name for `name`. Aliases take precedence over primary names.
    pub fn resolve<'a>(&'a self, name: &'a str) -> Option<&'a str> {
        match self.location_aliases.get(name) {
            Some(target) => Some(target.as_str()),
            None if self.is_primary(name) => Some(name),
            None => None,
        }
    }

    pub fn bounds(&self, name: &str) -> Option<&BoundingBox> {
        self.valid_locations.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::GAZETTEER_JSON;

    #[test]
    fn test_from_json_str() {
        let catalog = ResourceCatalog::from_json_str(GAZETTEER_JSON).unwrap();
        assert!(catalog.is_primary("A_1"));
        assert!(catalog.is_alias("Alias_A1"));
        assert!(catalog.is_known("Old_B"));
        assert!(!catalog.is_known("Z_9"));
        assert_eq!(
            catalog.bounds("A1"),
            Some(&BoundingBox::new(10.0, 20.0, 0.0, 5.0))
        );
    }

    #[test]
    fn test_resolve() {
        let catalog = ResourceCatalog::from_json_str(GAZETTEER_JSON).unwrap();
        assert_eq!(catalog.resolve("A_2"), Some("A_2"));
        assert_eq!(catalog.resolve("Alias_A1"), Some("A_1"));
        assert_eq!(catalog.resolve("nowhere"), None);
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let json = r#"{"locations": {"X": [20, 10, 0, 5]}}"#;
        let result = ResourceCatalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::InvalidBounds { ref name, .. }) if name == "X"));
    }

    #[test]
    fn test_rejects_dangling_alias() {
        let json = r#"{"locations": {"X": [10, 20, 0, 5]}, "aliases": {"Y": "Z"}}"#;
        let result = ResourceCatalog::from_json_str(json);
        assert!(matches!(result, Err(CatalogError::DanglingAlias { .. })));
    }

    #[test]
    fn test_aliases_optional() {
        let json = r#"{"locations": {"X": [10, 20, 0, 5]}}"#;
        let catalog = ResourceCatalog::from_json_str(json).unwrap();
        assert!(catalog.location_aliases().is_empty());
    }
}
