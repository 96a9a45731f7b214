//! Render model for a list setting.
//!
//! [`render_list`] is a pure function of the schema and the cached values.
//! Each [`RowView`] carries its own index, and every interaction is a
//! [`RowCommand`] built from that row, so a handler can never pick up another
//! row's position.

use cfg_editor_config::{SettingKey, SettingSchema, SettingSyntax};
use serde::Serialize;

/// Text appended to profile list descriptions
pub const PROFILE_NAMING_RULES: &str = "Profile names must be unique, start with a letter, \
     and contain only letters, numbers, dashes and underscores.";

/// Interactions a row can offer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowCommandKind {
    Edit,
    Copy,
    MoveDown,
    MoveUp,
    Delete,
}

impl RowCommandKind {
    /// Tooltip / accessible name
    pub fn title(&self) -> &'static str {
        match self {
            RowCommandKind::Edit => "Edit",
            RowCommandKind::Copy => "Copy",
            RowCommandKind::MoveDown => "Move Down",
            RowCommandKind::MoveUp => "Move Up",
            RowCommandKind::Delete => "Delete",
        }
    }
}

/// A user interaction bound to one row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowCommand {
    pub index: usize,
    pub kind: RowCommandKind,
}

/// Visibility of the per-setting header controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HeaderChrome {
    pub show_reset: bool,
    pub show_help: bool,
    pub show_modified_notice: bool,
}

impl HeaderChrome {
    pub fn for_syntax(syntax: SettingSyntax) -> Self {
        let visible = syntax.shows_header_chrome();
        Self {
            show_reset: visible,
            show_help: visible,
            show_modified_notice: visible,
        }
    }
}

/// One rendered list row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub index: usize,
    pub value: String,
    pub edit: bool,
    pub copy: bool,
    pub move_down: bool,
    pub move_up: bool,
    pub delete: bool,
}

impl RowView {
    /// Whether this row offers `kind`
    pub fn offers(&self, kind: RowCommandKind) -> bool {
        match kind {
            RowCommandKind::Edit => self.edit,
            RowCommandKind::Copy => self.copy,
            RowCommandKind::MoveDown => self.move_down,
            RowCommandKind::MoveUp => self.move_up,
            RowCommandKind::Delete => self.delete,
        }
    }

    /// Command for `kind`, if offered on this row
    pub fn command(&self, kind: RowCommandKind) -> Option<RowCommand> {
        self.offers(kind).then_some(RowCommand {
            index: self.index,
            kind,
        })
    }

    /// All commands this row offers, in display order
    pub fn commands(&self) -> Vec<RowCommand> {
        [
            RowCommandKind::Edit,
            RowCommandKind::Copy,
            RowCommandKind::MoveDown,
            RowCommandKind::MoveUp,
            RowCommandKind::Delete,
        ]
        .into_iter()
        .filter_map(|kind| self.command(kind))
        .collect()
    }
}

/// The add control below the rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddButton {
    pub label: &'static str,
}

/// Everything needed to draw one list setting
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListView {
    pub key: SettingKey,
    pub label: String,
    /// Only set for profile lists
    pub description: Option<String>,
    pub chrome: HeaderChrome,
    pub rows: Vec<RowView>,
    pub add: Option<AddButton>,
}

impl ListView {
    pub fn row(&self, index: usize) -> Option<&RowView> {
        self.rows.get(index)
    }
}

/// Build the row for `value` at `index` in a list of `total` items.
pub fn render_row(schema: &SettingSchema, index: usize, value: &str, total: usize) -> RowView {
    let syntax = schema.syntax;
    let reorder = syntax.allows_reorder() && total > 1;
    RowView {
        index,
        value: value.to_string(),
        edit: syntax.allows_inline_edit(),
        copy: syntax.copy_kind().is_some(),
        move_down: reorder && index + 1 != total,
        move_up: reorder && index != 0,
        delete: schema.can_delete(total),
    }
}

/// Build the complete view for a list.
pub fn render_list(schema: &SettingSchema, values: &[String]) -> ListView {
    let total = values.len();
    let rows = values
        .iter()
        .enumerate()
        .map(|(index, value)| render_row(schema, index, value, total))
        .collect();

    let description = match schema.syntax {
        SettingSyntax::Profile => Some(if schema.description.is_empty() {
            PROFILE_NAMING_RULES.to_string()
        } else {
            format!("{}\n{}", schema.description, PROFILE_NAMING_RULES)
        }),
        SettingSyntax::StringArray | SettingSyntax::Domain => None,
    };

    ListView {
        key: schema.key.clone(),
        label: schema.label.clone(),
        description,
        chrome: HeaderChrome::for_syntax(schema.syntax),
        rows,
        add: schema.can_add(total).then_some(AddButton {
            label: schema.syntax.add_label(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_plain_minimum_one_single_item_has_no_delete() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_minimum(1);
        let view = render_list(&schema, &values(&["a"]));
        assert_eq!(view.rows.len(), 1);
        assert!(!view.rows[0].delete);
        assert!(view.rows[0].edit);
        assert!(!view.rows[0].move_up && !view.rows[0].move_down);
        assert_eq!(view.add.map(|a| a.label), Some("Add Value"));
    }

    #[test]
    fn test_plain_two_items_offer_delete_on_both_rows() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_minimum(1);
        let view = render_list(&schema, &values(&["a", "b"]));
        assert!(view.rows.iter().all(|r| r.delete));
    }

    #[test]
    fn test_profile_rows() {
        let schema = SettingSchema::new("profiles", SettingSyntax::Profile);
        let view = render_list(&schema, &values(&["default", "secondary"]));

        let first = &view.rows[0];
        assert!(!first.move_up);
        assert!(first.move_down);
        let second = &view.rows[1];
        assert!(second.move_up);
        assert!(!second.move_down);

        assert!(view.rows.iter().all(|r| r.copy && !r.edit));
        assert_eq!(view.add.map(|a| a.label), Some("Add Profile"));
        assert!(!view.chrome.show_reset);
        assert!(!view.chrome.show_help);
        assert!(!view.chrome.show_modified_notice);
        assert!(
            view.description
                .as_deref()
                .is_some_and(|d| d.contains(PROFILE_NAMING_RULES))
        );
    }

    #[test]
    fn test_domain_rows_never_move() {
        let schema = SettingSchema::new("domains", SettingSyntax::Domain);
        let view = render_list(&schema, &values(&["a", "b", "c"]));
        assert!(view.rows.iter().all(|r| !r.move_up && !r.move_down));
        assert!(view.rows.iter().all(|r| r.copy && !r.edit));
        assert!(view.description.is_none());
        assert!(view.chrome.show_help);
    }

    #[test]
    fn test_add_hidden_at_maximum() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_maximum(2);
        assert!(render_list(&schema, &values(&["a"])).add.is_some());
        assert!(render_list(&schema, &values(&["a", "b"])).add.is_none());
    }

    #[test]
    fn test_delete_hidden_at_minimum() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_minimum(2);
        assert!(
            render_list(&schema, &values(&["a", "b"]))
                .rows
                .iter()
                .all(|r| !r.delete)
        );
        assert!(
            render_list(&schema, &values(&["a", "b", "c"]))
                .rows
                .iter()
                .all(|r| r.delete)
        );
    }

    #[test]
    fn test_row_commands_carry_own_index() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_minimum(0);
        let view = render_list(&schema, &values(&["a", "b", "c"]));
        for row in &view.rows {
            assert!(row.commands().iter().all(|c| c.index == row.index));
        }
        let middle = view.row(1).expect("middle row");
        assert_eq!(
            middle.commands().iter().map(|c| c.kind).collect::<Vec<_>>(),
            vec![
                RowCommandKind::Edit,
                RowCommandKind::MoveDown,
                RowCommandKind::MoveUp,
                RowCommandKind::Delete
            ]
        );
    }

    #[test]
    fn test_list_view_serializes() {
        let schema = SettingSchema::new("k", SettingSyntax::Domain);
        let json = serde_json::to_value(render_list(&schema, &values(&["x"]))).expect("json");
        assert_eq!(json["key"], "k");
        assert_eq!(json["rows"][0]["value"], "x");
        assert_eq!(json["rows"][0]["copy"], true);
        assert_eq!(json["add"]["label"], "Add Value");
    }
}
