//! Text rendering for generated configuration sections.

use std::collections::BTreeMap;

use crate::catalog::snippet::{placeholders, section_header, substitute};
use crate::catalog::Component;

use super::types::CustomMacro;

/// Heading for assignments that the request overrode.
pub const OVERRIDES_HEADER: &str = "# Parameter overrides";
/// Section holding overrides with no declared parameter behind them.
pub const USER_OVERRIDES_SECTION: &str = "[user_overrides]";
/// Heading for the custom macro section.
pub const MACROS_HEADER: &str = "# Custom macros";

/// A component snippet after parameter substitution.
#[derive(Debug, Default)]
pub struct RenderedComponent {
    /// Snippet text with defaults filled in and overridden lines removed
    pub body: String,
    /// Overridden lines, paired with the section header they belong to
    pub overridden: Vec<(String, String)>,
}

/// Fill a component's placeholders.
///
/// Lines referencing an overridden parameter leave the component body and
/// are returned separately so they can be re-emitted in the overrides section
/// under their original section header.
pub fn render_component(
    component: &Component,
    overrides: &BTreeMap<String, String>,
) -> RenderedComponent {
    let mut rendered = RenderedComponent::default();
    let mut body_lines: Vec<String> = Vec::new();
    let mut current_header: Option<&str> = None;

    for line in component.snippet.lines() {
        if let Some(header) = section_header(line) {
            current_header = Some(header);
            body_lines.push(line.to_string());
            continue;
        }

        let names = placeholders(line);
        if names.is_empty() {
            body_lines.push(line.to_string());
            continue;
        }

        let mut text = line.to_string();
        let mut overridden = false;
        for name in names {
            let value = match overrides.get(name) {
                Some(value) => {
                    overridden = true;
                    value.as_str()
                }
                None => component
                    .parameter(name)
                    .map(|p| p.default.as_str())
                    .unwrap_or_default(),
            };
            text = substitute(&text, name, value);
        }

        match (overridden, current_header) {
            (true, Some(header)) => rendered.overridden.push((header.to_string(), text)),
            _ => body_lines.push(text),
        }
    }

    rendered.body = body_lines.join("\n");
    rendered
}

/// Build the overrides section.
///
/// Consecutive lines sharing a header are grouped under one repeat of that
/// header. Unmatched overrides go last, under `[user_overrides]`.
pub fn render_overrides(matched: &[(String, String)], unmatched: &[(&str, &str)]) -> String {
    if matched.is_empty() && unmatched.is_empty() {
        return String::new();
    }

    let mut blocks: Vec<String> = Vec::new();
    let mut last_header: Option<&str> = None;
    for (header, line) in matched {
        let same_header = last_header == Some(header.as_str());
        match blocks.last_mut() {
            Some(block) if same_header => {
                block.push('\n');
                block.push_str(line);
            }
            _ => blocks.push(format!("{}\n{}", header, line)),
        }
        last_header = Some(header.as_str());
    }

    if !unmatched.is_empty() {
        let mut block = USER_OVERRIDES_SECTION.to_string();
        for (key, value) in unmatched {
            block.push_str(&format!("\n{}: {}", key, value));
        }
        blocks.push(block);
    }

    format!("{}\n{}", OVERRIDES_HEADER, blocks.join("\n\n"))
}

/// Render a `[gcode_macro]` block. The body is indented under `gcode:`.
pub fn render_macro(custom: &CustomMacro) -> String {
    let mut out = format!("[gcode_macro {}]", custom.name.trim());
    if let Some(description) = custom.description.as_deref() {
        // Folded onto one line so it cannot open a new section
        let description = split_lines(description)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !description.is_empty() {
            out.push_str(&format!("\ndescription: {}", description));
        }
    }
    out.push_str("\ngcode:");

    let body = custom.body.trim_end();
    for line in split_lines(body).skip_while(|l| l.trim().is_empty()) {
        out.push_str("\n    ");
        out.push_str(line);
    }
    out
}

/// Split on `\n`, `\r\n` and bare `\r`, all of which Klipper treats as line ends.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|l| l.strip_suffix('\r').unwrap_or(l).split('\r'))
}

/// Join sections with one blank line between them.
///
/// Empty sections are dropped, trailing whitespace is stripped from every
/// line, and non-empty output ends with exactly one newline.
pub fn join_sections<S: AsRef<str>>(sections: &[S]) -> String {
    let cleaned: Vec<String> = sections
        .iter()
        .map(|s| {
            s.as_ref()
                .lines()
                .map(str::trim_end)
                .collect::<Vec<_>>()
                .join("\n")
                .trim_matches('\n')
                .to_string()
        })
        .filter(|s| !s.is_empty())
        .collect();

    if cleaned.is_empty() {
        return String::new();
    }

    let mut out = cleaned.join("\n\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Parameter;

    fn klicky() -> Component {
        Component {
            id: "klicky".to_string(),
            label: "Klicky".to_string(),
            description: String::new(),
            snippet: "[probe]\npin: ^PG15\nz_offset: ${probe_z_offset}\nspeed: 5\n".to_string(),
            parameters: vec![Parameter {
                name: "probe_z_offset".to_string(),
                default: "6.42".to_string(),
                description: None,
            }],
        }
    }

    #[test]
    fn test_render_component_uses_defaults() {
        let rendered = render_component(&klicky(), &BTreeMap::new());
        assert_eq!(rendered.body, "[probe]\npin: ^PG15\nz_offset: 6.42\nspeed: 5");
        assert!(rendered.overridden.is_empty());
    }

    #[test]
    fn test_render_component_moves_overridden_line() {
        let overrides = BTreeMap::from([("probe_z_offset".to_string(), "0.4".to_string())]);
        let rendered = render_component(&klicky(), &overrides);
        assert_eq!(rendered.body, "[probe]\npin: ^PG15\nspeed: 5");
        assert_eq!(
            rendered.overridden,
            vec![("[probe]".to_string(), "z_offset: 0.4".to_string())]
        );
    }

    #[test]
    fn test_render_overrides_groups_by_header() {
        let matched = vec![
            ("[extruder]".to_string(), "rotation_distance: 22.2".to_string()),
            ("[extruder]".to_string(), "pressure_advance: 0.03".to_string()),
            ("[probe]".to_string(), "z_offset: 0.4".to_string()),
        ];
        let unmatched = vec![("max_velocity", "250")];
        let text = render_overrides(&matched, &unmatched);
        assert_eq!(
            text,
            "# Parameter overrides\n\
             [extruder]\nrotation_distance: 22.2\npressure_advance: 0.03\n\n\
             [probe]\nz_offset: 0.4\n\n\
             [user_overrides]\nmax_velocity: 250"
        );
    }

    #[test]
    fn test_render_overrides_empty() {
        assert_eq!(render_overrides(&[], &[]), "");
    }

    #[test]
    fn test_render_macro() {
        let custom = CustomMacro {
            name: "START_PRINT".to_string(),
            body: "\nG28\nZ_TILT_ADJUST\n\n".to_string(),
            description: Some("Home and level".to_string()),
        };
        assert_eq!(
            render_macro(&custom),
            "[gcode_macro START_PRINT]\ndescription: Home and level\ngcode:\n    G28\n    Z_TILT_ADJUST"
        );
    }

    #[test]
    fn test_render_macro_keeps_every_line_indented() {
        let custom = CustomMacro {
            name: "PARK".to_string(),
            body: "G28\r\nG1 X0\r[mcu]\nserial: /dev/null".to_string(),
            description: Some("Park\n[stepper_x]\nstep_pin: PZ9".to_string()),
        };
        assert_eq!(
            render_macro(&custom),
            "[gcode_macro PARK]\n\
             description: Park [stepper_x] step_pin: PZ9\n\
             gcode:\n    G28\n    G1 X0\n    [mcu]\n    serial: /dev/null"
        );
    }

    #[test]
    fn test_join_sections_strips_and_separates() {
        let joined = join_sections(&["\n[printer]  \nkinematics: corexy\t\n", "", "[mcu]\n"]);
        assert_eq!(joined, "[printer]\nkinematics: corexy\n\n[mcu]\n");
    }

    #[test]
    fn test_join_sections_empty() {
        let empty: [&str; 0] = [];
        assert_eq!(join_sections(&empty), "");
    }
}
