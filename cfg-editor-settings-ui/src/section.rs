//! Collapsible setting sections with search filtering.
//!
//! Provides consistent styling for the per-setting blocks the editor draws.

use std::collections::HashSet;

/// Standard width for text input controls
pub const INPUT_WIDTH: f32 = 300.0;

/// Check whether a section matches the (already lowercased) search query.
///
/// The title and every keyword are compared case-insensitively; an empty
/// query matches everything.
pub fn section_matches(query: &str, title: &str, keywords: &[&str]) -> bool {
    if query.is_empty() {
        return true;
    }
    title.to_lowercase().contains(query)
        || keywords.iter().any(|k| k.to_lowercase().contains(query))
}

/// Show a collapsible section with persistent state tracking.
///
/// The `collapsed_sections` set stores section IDs that have been toggled from
/// their default state, so the collapse state survives editor reloads.
pub fn collapsing_section<R>(
    ui: &mut egui::Ui,
    title: &str,
    id: &str,
    default_open: bool,
    collapsed_sections: &mut HashSet<String>,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> egui::CollapsingResponse<R> {
    // toggled + default_open => closed, toggled + !default_open => open
    let is_toggled = collapsed_sections.contains(id);
    let should_be_open = is_toggled != default_open;

    let response = egui::CollapsingHeader::new(title)
        .id_salt(id)
        .default_open(should_be_open)
        .show(ui, add_contents);

    if response.header_response.clicked() {
        let section_id = id.to_string();
        if collapsed_sections.contains(&section_id) {
            collapsed_sections.remove(&section_id);
        } else {
            collapsed_sections.insert(section_id);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_matches() {
        assert!(section_matches("", "LDAP Profiles", &[]));
        assert!(section_matches("ldap", "LDAP Profiles", &[]));
        assert!(section_matches("secondary", "LDAP Profiles", &["default", "Secondary"]));
        assert!(!section_matches("domain", "LDAP Profiles", &["default"]));
    }
}
