//! Request, result and warning types for configuration generation.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// INPUT TYPES
// =============================================================================

/// A request to assemble one configuration file.
///
/// Maps are ordered so that processing order never depends on hashing.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationRequest {
    /// Must name a preset in the catalog
    pub printer_preset_id: String,
    /// Category id -> component id, replacing the preset defaults
    #[serde(default)]
    pub components: BTreeMap<String, String>,
    /// Parameter name -> value
    #[serde(default)]
    pub parameter_overrides: BTreeMap<String, String>,
    /// Appended after everything else, in this order
    #[serde(default)]
    pub custom_macros: Vec<CustomMacro>,
}

/// A user-defined `[gcode_macro]` block.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomMacro {
    pub name: String,
    pub body: String,
    #[serde(default)]
    pub description: Option<String>,
}

// =============================================================================
// OUTPUT TYPES
// =============================================================================

/// Assembled configuration text plus every non-fatal anomaly, in the order
/// it was detected.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationResult {
    pub configuration: String,
    pub warnings: Vec<MergeWarning>,
}

impl GenerationResult {
    pub fn warning_messages(&self) -> Vec<String> {
        self.warnings.iter().map(ToString::to_string).collect()
    }
}

/// Anomalies that degrade to a warning instead of failing the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeWarning {
    /// Override names a category the catalog does not have
    UnknownCategory { category: String },
    /// Override names a component missing from a known category
    UnresolvedComponentOverride { category: String, component: String },
    /// Neither the preset nor the request selects a component for a category
    NoComponentSelected { category: String },
    /// Override key matches no parameter of the selected components
    UnmatchedParameterOverride { parameter: String },
    /// A later macro replaced an earlier one with the same name
    DuplicateMacroName { name: String },
    /// Macro with a blank name was dropped
    EmptyMacroName,
    /// Override whose key or value would break the line structure was dropped
    InvalidParameterOverride { parameter: String },
    /// Macro whose name cannot sit inside a section header was dropped
    InvalidMacroName { name: String },
}

impl fmt::Display for MergeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeWarning::UnknownCategory { category } => {
                write!(f, "unknown category {}", category)
            }
            MergeWarning::UnresolvedComponentOverride {
                category,
                component,
            } => write!(f, "unknown component {} in category {}", component, category),
            MergeWarning::NoComponentSelected { category } => {
                write!(f, "no component selected for category {}", category)
            }
            MergeWarning::UnmatchedParameterOverride { parameter } => {
                write!(f, "override {} has no matching declared parameter", parameter)
            }
            MergeWarning::DuplicateMacroName { name } => {
                write!(f, "duplicate macro name {}", name)
            }
            MergeWarning::EmptyMacroName => write!(f, "macro with empty name ignored"),
            MergeWarning::InvalidParameterOverride { parameter } => {
                write!(f, "override {:?} ignored: invalid key or value", parameter)
            }
            MergeWarning::InvalidMacroName { name } => {
                write!(f, "macro {:?} ignored: invalid name", name)
            }
        }
    }
}
