//! TOML catalog loading.
//!
//! Provides two loading methods:
//! - `default_catalog()` - Builds the catalog compiled into the binary
//! - `load_catalog(path)` - Loads an operator-supplied catalog file

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use super::registry::PresetCatalog;
use super::types::CatalogFile;

/// Default catalog embedded in the binary at compile time.
const DEFAULT_CATALOG: &str = include_str!("../../config/catalog.toml");

/// Parse and validate a catalog from TOML text.
pub fn parse_catalog(content: &str) -> Result<PresetCatalog> {
    let file: CatalogFile = toml::from_str(content).context("Invalid catalog TOML")?;
    let catalog = PresetCatalog::from_file(file)?;
    Ok(catalog)
}

/// Load a catalog from a TOML file at the given path.
///
/// # Returns
/// * `Ok(PresetCatalog)` - Parsed and validated catalog
/// * `Err` - If the file cannot be read, the TOML is invalid, or the
///   catalog breaks a consistency rule
pub fn load_catalog(path: &Path) -> Result<PresetCatalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog {:?}", path))?;
    let catalog = parse_catalog(&content).with_context(|| format!("Catalog {:?}", path))?;

    info!(
        "Loaded catalog from {:?}: {} presets, {} component groups",
        path,
        catalog.list_presets().len(),
        catalog.list_component_groups().len()
    );
    Ok(catalog)
}

/// Get the default catalog embedded in the binary.
///
/// Ships the Voron Trident and Ender-3 presets with controller, extruder,
/// probe and bed surface groups.
///
/// # Panics
/// Panics if the embedded TOML is invalid (this would be a compile-time bug).
pub fn default_catalog() -> PresetCatalog {
    parse_catalog(DEFAULT_CATALOG).expect("embedded catalog.toml must be a valid catalog")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_catalog_loads() {
        let catalog = default_catalog();
        assert!(!catalog.list_presets().is_empty(), "Should have presets");
        assert!(
            !catalog.list_component_groups().is_empty(),
            "Should have component groups"
        );
    }

    #[test]
    fn test_default_catalog_category_order() {
        let catalog = default_catalog();
        let categories: Vec<&str> = catalog
            .list_component_groups()
            .iter()
            .map(|g| g.category.as_str())
            .collect();
        assert_eq!(categories, vec!["controller", "extruder", "probe", "bed_surface"]);
    }

    #[test]
    fn test_default_presets_resolve_their_defaults() {
        let catalog = default_catalog();
        for summary in catalog.list_presets() {
            let preset = catalog.get_preset(&summary.id).unwrap();
            for (category, component) in &preset.default_components {
                assert!(
                    catalog.get_component(category, component).is_some(),
                    "Preset {} default {}={} should resolve",
                    preset.id,
                    category,
                    component
                );
            }
        }
    }

    #[test]
    fn test_voron_trident_defaults_to_inductive_probe() {
        let catalog = default_catalog();
        let trident = catalog.get_preset("voron-trident").unwrap();
        assert_eq!(
            trident.default_components.get("probe").map(String::as_str),
            Some("inductive")
        );
        let klicky = catalog.get_component("probe", "klicky").unwrap();
        assert!(klicky.parameter("probe_z_offset").is_some());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[groups]]
            category = "probe"
            label = "Z Probe"

            [[groups.components]]
            id = "none"
            label = "No Probe"

            [[presets]]
            id = "bare"
            name = "Bare"
            base_snippets = ["[printer]\nkinematics: none"]
            default_components = {{ probe = "none" }}
            "#
        )
        .unwrap();

        let catalog = load_catalog(file.path()).unwrap();
        assert!(catalog.get_preset("bare").is_some());
    }

    #[test]
    fn test_load_catalog_rejects_inconsistent_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
            [[presets]]
            id = "bare"
            name = "Bare"
            default_components = {{ probe = "none" }}
            "#
        )
        .unwrap();

        let err = load_catalog(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("unknown category 'probe'"));
    }

    #[test]
    fn test_load_catalog_missing_file() {
        assert!(load_catalog(Path::new("/nonexistent/catalog.toml")).is_err());
    }
}
