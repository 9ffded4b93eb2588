//! Catalog data model.
//!
//! These types deserialize from the catalog TOML and serialize to JSON for the
//! HTTP surface. They are never mutated after the catalog is built.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root of a catalog file.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    /// Component groups, in the order their sections appear in generated output
    #[serde(default)]
    pub groups: Vec<ComponentGroup>,
    /// Printer presets, in listing order
    #[serde(default)]
    pub presets: Vec<PrinterPreset>,
}

/// A named bundle of base configuration text and default component choices.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrinterPreset {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base configuration blocks, emitted in declaration order
    #[serde(default)]
    pub base_snippets: Vec<String>,
    /// Category id -> component id
    #[serde(default)]
    pub default_components: BTreeMap<String, String>,
}

/// Listing view of a preset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetSummary {
    pub id: String,
    pub name: String,
    pub description: String,
}

impl From<&PrinterPreset> for PresetSummary {
    fn from(preset: &PrinterPreset) -> Self {
        Self {
            id: preset.id.clone(),
            name: preset.name.clone(),
            description: preset.description.clone(),
        }
    }
}

/// A hardware category (e.g. "probe") and its selectable variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentGroup {
    pub category: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ComponentGroup {
    pub fn component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id == id)
    }
}

/// A selectable hardware variant carrying its own configuration snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Raw configuration text. `${name}` marks a declared parameter.
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub parameters: Vec<Parameter>,
}

impl Component {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// A tunable value inside a component snippet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}
