use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::snippet::{placeholders, section_header};
use super::types::{CatalogFile, Component, ComponentGroup, PresetSummary, PrinterPreset};
use crate::error::CatalogError;

/// Read-only registry of printer presets and component groups.
///
/// Built once at startup and shared by reference afterwards. Declaration
/// order is preserved: presets list in the order they were authored, and
/// group order is the fixed category order of generated output.
#[derive(Debug)]
pub struct PresetCatalog {
    presets: Vec<PrinterPreset>,
    groups: Vec<ComponentGroup>,
    preset_index: HashMap<String, usize>,
    group_index: HashMap<String, usize>,
}

impl PresetCatalog {
    /// Build a catalog, rejecting authoring errors.
    pub fn from_parts(
        presets: Vec<PrinterPreset>,
        groups: Vec<ComponentGroup>,
    ) -> Result<Self, CatalogError> {
        let mut preset_index = HashMap::new();
        for (idx, preset) in presets.iter().enumerate() {
            if preset_index.insert(preset.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicatePreset(preset.id.clone()));
            }
        }

        let mut group_index = HashMap::new();
        for (idx, group) in groups.iter().enumerate() {
            if group_index.insert(group.category.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateCategory(group.category.clone()));
            }
        }

        let catalog = Self {
            presets,
            groups,
            preset_index,
            group_index,
        };
        catalog.validate()?;

        debug!(
            "Built catalog with {} presets and {} component groups",
            catalog.presets.len(),
            catalog.groups.len()
        );
        Ok(catalog)
    }

    pub fn from_file(file: CatalogFile) -> Result<Self, CatalogError> {
        Self::from_parts(file.presets, file.groups)
    }

    /// Look up a preset by id.
    pub fn get_preset(&self, id: &str) -> Option<&PrinterPreset> {
        self.preset_index.get(id).map(|&idx| &self.presets[idx])
    }

    /// Summaries of all presets, in declaration order.
    pub fn list_presets(&self) -> Vec<PresetSummary> {
        self.presets.iter().map(PresetSummary::from).collect()
    }

    /// All component groups, in output order.
    pub fn list_component_groups(&self) -> &[ComponentGroup] {
        &self.groups
    }

    pub fn get_group(&self, category: &str) -> Option<&ComponentGroup> {
        self.group_index.get(category).map(|&idx| &self.groups[idx])
    }

    /// Look up a component within one category.
    pub fn get_component(&self, category: &str, component_id: &str) -> Option<&Component> {
        self.get_group(category)?.component(component_id)
    }

    /// Check the self-consistency rules every catalog must satisfy.
    ///
    /// - component ids are unique within their group
    /// - preset defaults resolve to an existing category and component
    /// - snippet placeholders and declared parameters match one to one
    /// - placeholders only appear inside a `[section]`, on unindented lines
    pub fn validate(&self) -> Result<(), CatalogError> {
        for group in &self.groups {
            let mut seen = HashSet::new();
            for component in &group.components {
                if !seen.insert(component.id.as_str()) {
                    return Err(CatalogError::DuplicateComponent {
                        category: group.category.clone(),
                        component: component.id.clone(),
                    });
                }
                validate_parameters(component)?;
            }
        }

        for preset in &self.presets {
            for (category, component_id) in &preset.default_components {
                let group = self.get_group(category).ok_or_else(|| {
                    CatalogError::UnknownDefaultCategory {
                        preset: preset.id.clone(),
                        category: category.clone(),
                    }
                })?;
                if group.component(component_id).is_none() {
                    return Err(CatalogError::UnknownDefaultComponent {
                        preset: preset.id.clone(),
                        category: category.clone(),
                        component: component_id.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

fn validate_parameters(component: &Component) -> Result<(), CatalogError> {
    let mut used: HashSet<&str> = HashSet::new();
    let mut in_section = false;

    for line in component.snippet.lines() {
        if section_header(line).is_some() {
            in_section = true;
            continue;
        }
        for name in placeholders(line) {
            if component.parameter(name).is_none() {
                return Err(CatalogError::UndeclaredParameter {
                    component: component.id.clone(),
                    parameter: name.to_string(),
                });
            }
            if !in_section {
                return Err(CatalogError::ParameterOutsideSection {
                    component: component.id.clone(),
                    parameter: name.to_string(),
                });
            }
            // Overrides move single lines; a continuation line cannot stand alone
            if line.starts_with(char::is_whitespace) {
                return Err(CatalogError::ParameterOnContinuationLine {
                    component: component.id.clone(),
                    parameter: name.to_string(),
                });
            }
            used.insert(name);
        }
    }

    if let Some(unused) = component
        .parameters
        .iter()
        .find(|p| !used.contains(p.name.as_str()))
    {
        return Err(CatalogError::UnusedParameter {
            component: component.id.clone(),
            parameter: unused.name.clone(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::types::Parameter;
    use std::collections::BTreeMap;

    fn probe_group() -> ComponentGroup {
        ComponentGroup {
            category: "probe".to_string(),
            label: "Z Probe".to_string(),
            description: String::new(),
            components: vec![
                Component {
                    id: "inductive".to_string(),
                    label: "Inductive".to_string(),
                    description: String::new(),
                    snippet: "[probe]\npin: ^PG15\nz_offset: 1.0\n".to_string(),
                    parameters: vec![],
                },
                Component {
                    id: "klicky".to_string(),
                    label: "Klicky".to_string(),
                    description: String::new(),
                    snippet: "[probe]\npin: ^PG15\nz_offset: ${probe_z_offset}\n".to_string(),
                    parameters: vec![Parameter {
                        name: "probe_z_offset".to_string(),
                        default: "6.0".to_string(),
                        description: None,
                    }],
                },
            ],
        }
    }

    fn preset(id: &str, probe: &str) -> PrinterPreset {
        PrinterPreset {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            base_snippets: vec!["[printer]\nkinematics: corexy".to_string()],
            default_components: BTreeMap::from([("probe".to_string(), probe.to_string())]),
        }
    }

    #[test]
    fn test_lookups() {
        let catalog =
            PresetCatalog::from_parts(vec![preset("trident", "inductive")], vec![probe_group()])
                .unwrap();

        assert!(catalog.get_preset("trident").is_some());
        assert!(catalog.get_preset("ender").is_none());
        assert_eq!(catalog.list_presets().len(), 1);
        assert_eq!(catalog.list_component_groups().len(), 1);
        assert!(catalog.get_component("probe", "klicky").is_some());
        assert!(catalog.get_component("probe", "bltouch").is_none());
        assert!(catalog.get_component("extruder", "klicky").is_none());
    }

    #[test]
    fn test_list_presets_keeps_declaration_order() {
        let catalog = PresetCatalog::from_parts(
            vec![preset("zeta", "inductive"), preset("alpha", "klicky")],
            vec![probe_group()],
        )
        .unwrap();
        let ids: Vec<String> = catalog.list_presets().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_rejects_duplicate_preset() {
        let err = PresetCatalog::from_parts(
            vec![preset("trident", "inductive"), preset("trident", "klicky")],
            vec![probe_group()],
        )
        .unwrap_err();
        assert_eq!(err, CatalogError::DuplicatePreset("trident".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_category() {
        let err = PresetCatalog::from_parts(vec![], vec![probe_group(), probe_group()])
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateCategory("probe".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_component() {
        let mut group = probe_group();
        let copy = group.components[0].clone();
        group.components.push(copy);
        let err = PresetCatalog::from_parts(vec![], vec![group]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::DuplicateComponent {
                category: "probe".to_string(),
                component: "inductive".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_dangling_default_component() {
        let err =
            PresetCatalog::from_parts(vec![preset("trident", "euclid")], vec![probe_group()])
                .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::UnknownDefaultComponent { ref component, .. } if component == "euclid"
        ));
    }

    #[test]
    fn test_rejects_dangling_default_category() {
        let mut bad = preset("trident", "inductive");
        bad.default_components
            .insert("toolhead".to_string(), "stealthburner".to_string());
        let err = PresetCatalog::from_parts(vec![bad], vec![probe_group()]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownDefaultCategory { .. }));
    }

    #[test]
    fn test_rejects_undeclared_placeholder() {
        let mut group = probe_group();
        group.components[0].snippet = "[probe]\nz_offset: ${mystery}\n".to_string();
        let err = PresetCatalog::from_parts(vec![], vec![group]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::UndeclaredParameter {
                component: "inductive".to_string(),
                parameter: "mystery".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_unused_parameter() {
        let mut group = probe_group();
        group.components[1].snippet = "[probe]\nz_offset: 6.0\n".to_string();
        let err = PresetCatalog::from_parts(vec![], vec![group]).unwrap_err();
        assert!(matches!(err, CatalogError::UnusedParameter { .. }));
    }

    #[test]
    fn test_rejects_placeholder_outside_section() {
        let mut group = probe_group();
        group.components[1].snippet = "z_offset: ${probe_z_offset}\n[probe]\n".to_string();
        let err = PresetCatalog::from_parts(vec![], vec![group]).unwrap_err();
        assert!(matches!(err, CatalogError::ParameterOutsideSection { .. }));
    }

    #[test]
    fn test_rejects_placeholder_on_continuation_line() {
        let mut group = probe_group();
        group.components[1].snippet =
            "[board_pins octo]\naliases:\n    X_STEP=${probe_z_offset}, X_DIR=PB12\n    Y_STEP=PB10\n"
                .to_string();
        let err = PresetCatalog::from_parts(vec![], vec![group]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::ParameterOnContinuationLine {
                component: "klicky".to_string(),
                parameter: "probe_z_offset".to_string(),
            }
        );
    }
}
