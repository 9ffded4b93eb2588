//! Configuration merge engine.
//!
//! The `ConfigMerger` turns a `GenerationRequest` into one Klipper
//! configuration, collecting warnings for every anomaly it can recover from.

use std::collections::{BTreeMap, HashSet};

use tracing::{debug, warn};

use crate::catalog::{Component, PresetCatalog};
use crate::error::ConfiguratorError;

use super::render::{join_sections, render_component, render_macro, render_overrides, MACROS_HEADER};
use super::types::*;

/// Merges presets, components, overrides and macros into configuration text.
///
/// Holds a shared reference to the catalog and no other state, so one merger
/// can serve any number of requests.
pub struct ConfigMerger<'a> {
    catalog: &'a PresetCatalog,
}

impl<'a> ConfigMerger<'a> {
    pub fn new(catalog: &'a PresetCatalog) -> Self {
        Self { catalog }
    }

    /// Assemble a configuration.
    ///
    /// Section order is fixed: preset base snippets, one section per
    /// component category (catalog order), parameter overrides, custom macros.
    ///
    /// # Errors
    /// `ConfiguratorError::UnknownPreset` if the preset id is not in the
    /// catalog. Every other anomaly becomes a `MergeWarning`.
    pub fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, ConfiguratorError> {
        let preset = self
            .catalog
            .get_preset(&request.printer_preset_id)
            .ok_or_else(|| ConfiguratorError::UnknownPreset(request.printer_preset_id.clone()))?;

        debug!(
            "Generating configuration for preset {} ({} component overrides, {} parameter overrides, {} macros)",
            preset.id,
            request.components.len(),
            request.parameter_overrides.len(),
            request.custom_macros.len()
        );

        let mut warnings = Vec::new();
        let selection = self.resolve_selection(&preset.default_components, request, &mut warnings);
        let overrides = accepted_overrides(&request.parameter_overrides, &mut warnings);

        let mut sections: Vec<String> = preset.base_snippets.clone();

        // Components, in catalog category order
        let mut declared: HashSet<&str> = HashSet::new();
        let mut matched_lines: Vec<(String, String)> = Vec::new();
        for group in self.catalog.list_component_groups() {
            let Some(component) = selection.get(group.category.as_str()) else {
                push_warning(
                    &mut warnings,
                    MergeWarning::NoComponentSelected {
                        category: group.category.clone(),
                    },
                );
                continue;
            };

            declared.extend(component.parameters.iter().map(|p| p.name.as_str()));
            let rendered = render_component(component, &overrides);
            matched_lines.extend(rendered.overridden);
            sections.push(rendered.body);
        }

        // Overrides nobody declared are still emitted verbatim
        let mut unmatched: Vec<(&str, &str)> = Vec::new();
        for (key, value) in &overrides {
            if !declared.contains(key.as_str()) {
                push_warning(
                    &mut warnings,
                    MergeWarning::UnmatchedParameterOverride {
                        parameter: key.clone(),
                    },
                );
                unmatched.push((key.as_str(), value.as_str()));
            }
        }
        sections.push(render_overrides(&matched_lines, &unmatched));

        let macros = collect_macros(&request.custom_macros, &mut warnings);
        if !macros.is_empty() {
            let blocks: Vec<String> = macros.iter().map(|m| render_macro(m)).collect();
            sections.push(format!("{}\n{}", MACROS_HEADER, blocks.join("\n\n")));
        }

        let configuration = join_sections(&sections);

        debug!(
            "Generated {} bytes for preset {} with {} warnings",
            configuration.len(),
            preset.id,
            warnings.len()
        );

        Ok(GenerationResult {
            configuration,
            warnings,
        })
    }

    /// Start from the preset defaults and apply the request's component
    /// overrides. Unresolvable overrides keep the default and warn.
    fn resolve_selection(
        &self,
        defaults: &BTreeMap<String, String>,
        request: &GenerationRequest,
        warnings: &mut Vec<MergeWarning>,
    ) -> BTreeMap<&'a str, &'a Component> {
        let catalog: &'a PresetCatalog = self.catalog;
        let mut selection: BTreeMap<&'a str, &'a Component> = BTreeMap::new();

        for (category, component_id) in defaults {
            if let Some(group) = catalog.get_group(category) {
                if let Some(component) = group.component(component_id) {
                    selection.insert(group.category.as_str(), component);
                }
            }
        }

        for (category, component_id) in &request.components {
            let Some(group) = catalog.get_group(category) else {
                push_warning(
                    warnings,
                    MergeWarning::UnknownCategory {
                        category: category.clone(),
                    },
                );
                continue;
            };

            match group.component(component_id) {
                Some(component) => {
                    debug!("Selected {} for category {}", component.id, group.category);
                    selection.insert(group.category.as_str(), component);
                }
                None => push_warning(
                    warnings,
                    MergeWarning::UnresolvedComponentOverride {
                        category: category.clone(),
                        component: component_id.clone(),
                    },
                ),
            }
        }

        selection
    }
}

/// Keep only overrides that render as a single `key: value` line.
fn accepted_overrides(
    overrides: &BTreeMap<String, String>,
    warnings: &mut Vec<MergeWarning>,
) -> BTreeMap<String, String> {
    let mut accepted = BTreeMap::new();
    for (key, value) in overrides {
        if is_valid_override_key(key) && !value.contains(is_line_break) {
            accepted.insert(key.clone(), value.clone());
        } else {
            push_warning(
                warnings,
                MergeWarning::InvalidParameterOverride {
                    parameter: key.clone(),
                },
            );
        }
    }
    accepted
}

fn is_valid_override_key(key: &str) -> bool {
    !key.is_empty()
        && !key
            .chars()
            .any(|c| breaks_header(c) || matches!(c, ':' | '=' | '#' | ';'))
}

/// Macro names end up inside `[gcode_macro NAME]`.
fn is_valid_macro_name(name: &str) -> bool {
    !name.chars().any(breaks_header)
}

fn breaks_header(c: char) -> bool {
    c.is_whitespace() || c.is_control() || matches!(c, '[' | ']')
}

fn is_line_break(c: char) -> bool {
    c == '\n' || c == '\r'
}

/// Drop blank or invalid names and collapse duplicates. A repeated name (compared
/// case-insensitively, as Klipper does for commands) replaces the earlier
/// macro in its original position.
fn collect_macros<'m>(
    macros: &'m [CustomMacro],
    warnings: &mut Vec<MergeWarning>,
) -> Vec<&'m CustomMacro> {
    let mut collected: Vec<&CustomMacro> = Vec::new();

    for custom in macros {
        let name = custom.name.trim();
        if name.is_empty() {
            push_warning(warnings, MergeWarning::EmptyMacroName);
            continue;
        }
        if !is_valid_macro_name(name) {
            push_warning(
                warnings,
                MergeWarning::InvalidMacroName {
                    name: name.to_string(),
                },
            );
            continue;
        }

        match collected
            .iter()
            .position(|m| m.name.trim().eq_ignore_ascii_case(name))
        {
            Some(idx) => {
                push_warning(
                    warnings,
                    MergeWarning::DuplicateMacroName {
                        name: name.to_string(),
                    },
                );
                collected[idx] = custom;
            }
            None => collected.push(custom),
        }
    }

    collected
}

fn push_warning(warnings: &mut Vec<MergeWarning>, warning: MergeWarning) {
    warn!("{}", warning);
    warnings.push(warning);
}
