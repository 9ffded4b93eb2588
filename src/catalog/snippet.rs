//! Helpers for reading Klipper snippet text.
//!
//! Snippets are plain Klipper config. Two things matter to the merger:
//! section headers (`[probe]`) and parameter placeholders (`${probe_z_offset}`).

/// Return the section header if `line` is one, e.g. `[stepper_x]`.
///
/// Headers start at column zero; indented bracket lines belong to
/// multi-line values (pin alias lists, gcode bodies).
pub fn section_header(line: &str) -> Option<&str> {
    let trimmed = line.trim_end();
    if trimmed.starts_with('[') && trimmed.ends_with(']') && trimmed.len() > 2 {
        Some(trimmed)
    } else {
        None
    }
}

/// Names of all `${name}` placeholders in `line`, in order of appearance.
///
/// Malformed markers (no closing brace, empty or non-identifier names) are
/// treated as literal text.
pub fn placeholders(line: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = line;
    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                if is_identifier(name) {
                    names.push(name);
                }
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

/// Replace every `${name}` in `line` with `value`.
pub fn substitute(line: &str, name: &str, value: &str) -> String {
    line.replace(&format!("${{{}}}", name), value)
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
