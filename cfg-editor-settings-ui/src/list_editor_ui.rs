//! egui front end for [`ListEditor`].
//!
//! Drawing never mutates the editor while its view is borrowed: row clicks
//! are collected during the frame and dispatched afterwards.

use crate::dialogs::{DialogOutcome, show_dialog, show_error_dialog};
use crate::list_editor::{EditorError, EditorPhase, ListEditor};
use crate::registry::EditorRegistry;
use crate::rows::{ListView, RowCommand, RowCommandKind, RowView};
use crate::section::{INPUT_WIDTH, collapsing_section, section_matches};
use crate::EditorEffect;

/// What the user clicked this frame
enum Click {
    Row(RowCommand),
    Add,
    Reset,
}

/// Draw one list setting and return the effects its interactions produced.
pub fn show(ui: &mut egui::Ui, editor: &mut ListEditor) -> Vec<EditorEffect> {
    let mut effects = Vec::new();
    let mut click = None;
    let busy = editor.is_busy();

    let chrome = editor.header_chrome();
    ui.horizontal(|ui| {
        ui.strong(&editor.schema().label);
        if chrome.show_help && !editor.schema().description.is_empty() {
            ui.label(egui::RichText::new("(?)").color(egui::Color32::GRAY))
                .on_hover_text(&editor.schema().description);
        }
        if chrome.show_modified_notice && editor.has_unsaved_changes() {
            ui.colored_label(egui::Color32::YELLOW, "* Modified");
        }
        if chrome.show_reset {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add_enabled(!busy, egui::Button::new("Reset").small())
                    .on_hover_text("Reload the stored value")
                    .clicked()
                {
                    click = Some(Click::Reset);
                }
            });
        }
    });

    match editor.render() {
        Some(view) => {
            ui.add_enabled_ui(!busy, |ui| {
                if let Some(clicked) = show_view(ui, &view) {
                    click = Some(clicked);
                }
            });
        }
        None => match editor.phase() {
            EditorPhase::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
            }
            _ => {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new("Not loaded")
                            .italics()
                            .color(egui::Color32::GRAY),
                    );
                    if ui.small_button("Load").clicked() {
                        click = Some(Click::Reset);
                    }
                });
            }
        },
    }

    if let Some(click) = click {
        let result = match click {
            Click::Row(command) => editor.dispatch(command),
            Click::Add => editor.begin_add().map(|()| None),
            Click::Reset => editor.init().map(Some),
        };
        collect(&mut effects, result);
    }

    let ctx = ui.ctx().clone();
    let outcome = editor
        .dialog_mut()
        .map(|dialog| show_dialog(&ctx, dialog));
    match outcome {
        Some(DialogOutcome::Confirmed) => match editor.confirm_dialog() {
            Err(EditorError::InvalidValue(reason)) => {
                log::debug!("{}: value rejected: {}", editor.key(), reason);
            }
            result => collect(&mut effects, result),
        },
        Some(DialogOutcome::Cancelled) => editor.cancel_dialog(),
        Some(DialogOutcome::Open) | None => {}
    }

    if let Some(message) = editor.last_error().map(str::to_string)
        && show_error_dialog(&ctx, &message)
    {
        editor.dismiss_error();
    }

    effects
}

fn show_view(ui: &mut egui::Ui, view: &ListView) -> Option<Click> {
    let mut click = None;

    if let Some(description) = &view.description {
        ui.label(egui::RichText::new(description).small().color(egui::Color32::GRAY));
        ui.add_space(4.0);
    }

    if view.rows.is_empty() {
        ui.label(
            egui::RichText::new("No values")
                .italics()
                .color(egui::Color32::GRAY),
        );
    }

    egui::Grid::new(("list_rows", view.key.as_str()))
        .num_columns(2)
        .striped(true)
        .show(ui, |ui| {
            for row in &view.rows {
                if let Some(command) = show_row(ui, row) {
                    click = Some(Click::Row(command));
                }
                ui.end_row();
            }
        });

    if let Some(add) = view.add
        && ui.button(format!("+ {}", add.label)).clicked()
    {
        click = Some(Click::Add);
    }

    click
}

fn show_row(ui: &mut egui::Ui, row: &RowView) -> Option<RowCommand> {
    let mut clicked = None;
    ui.push_id(row.index, |ui| {
        ui.add_sized(
            [INPUT_WIDTH, 18.0],
            egui::Label::new(egui::RichText::new(&row.value).monospace()).truncate(),
        );
    });
    ui.horizontal(|ui| {
        for command in row.commands() {
            if ui
                .small_button(command_icon(command))
                .on_hover_text(command.kind.title())
                .clicked()
            {
                clicked = Some(command);
            }
        }
    });
    clicked
}

fn command_icon(command: RowCommand) -> &'static str {
    match command.kind {
        RowCommandKind::Edit => "✏",
        RowCommandKind::Copy => "⧉",
        RowCommandKind::MoveDown => "Dn",
        RowCommandKind::MoveUp => "Up",
        RowCommandKind::Delete => "🗑",
    }
}

fn collect(effects: &mut Vec<EditorEffect>, result: Result<Option<EditorEffect>, EditorError>) {
    match result {
        Ok(Some(effect)) => effects.push(effect),
        Ok(None) => {}
        Err(e) => log::warn!("List editor action refused: {}", e),
    }
}

/// Draw every editor in `registry` as a searchable collapsible section.
pub fn show_registry(ui: &mut egui::Ui, registry: &mut EditorRegistry) -> Vec<EditorEffect> {
    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.add(egui::TextEdit::singleline(&mut registry.search_query).desired_width(INPUT_WIDTH));
    });
    ui.separator();

    let query = registry.search_query.trim().to_lowercase();
    let mut effects = Vec::new();
    let (editors, collapsed) = registry.sections_mut();
    for editor in editors {
        // stored values are searchable too
        let matches = {
            let keywords: Vec<&str> = editor
                .values()
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect();
            section_matches(&query, &editor.schema().label, &keywords)
        };
        if !matches {
            continue;
        }
        let title = editor.schema().label.clone();
        let id = editor.key().to_string();
        collapsing_section(ui, &title, &id, true, collapsed, |ui| {
            effects.extend(show(ui, editor));
        });
    }
    effects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreResponse;
    use cfg_editor_config::{SchemaCatalog, SettingKey, SettingSchema, SettingSyntax};

    fn loaded_registry() -> EditorRegistry {
        let mut catalog = SchemaCatalog::new();
        catalog
            .insert(SettingSchema::new("profiles", SettingSyntax::Profile).with_label("Profiles"))
            .expect("insert");
        catalog
            .insert(SettingSchema::new("hosts", SettingSyntax::StringArray).with_label("Hosts"))
            .expect("insert");
        let mut registry = EditorRegistry::from_catalog(&catalog);
        registry.init_all();
        for key in ["profiles", "hosts"] {
            registry.route(StoreResponse::Read {
                key: SettingKey::from(key),
                result: Ok(vec!["default".to_string(), "secondary".to_string()]),
            });
        }
        registry
    }

    #[test]
    fn test_show_registry_headless_without_input() {
        let ctx = egui::Context::default();
        let mut registry = loaded_registry();
        let mut effects = Vec::new();
        for _ in 0..2 {
            let _ = ctx.run(egui::RawInput::default(), |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    effects.extend(show_registry(ui, &mut registry));
                });
            });
        }
        assert!(effects.is_empty());
        assert_eq!(
            registry.get("hosts").and_then(|e| e.values()).map(<[String]>::len),
            Some(2)
        );
    }

    #[test]
    fn test_show_with_open_dialog_keeps_it_open() {
        let ctx = egui::Context::default();
        let mut registry = loaded_registry();
        let editor = registry.get_mut("hosts").expect("editor");
        editor.begin_add().expect("add");
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert!(show(ui, editor).is_empty());
            });
        });
        assert!(editor.dialog().is_some());
    }

    #[test]
    fn test_show_unloaded_editor() {
        let ctx = egui::Context::default();
        let mut editor = ListEditor::new(SettingSchema::new("k", SettingSyntax::Domain));
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                assert!(show(ui, &mut editor).is_empty());
            });
        });
        assert_eq!(editor.phase(), EditorPhase::Unloaded);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_frame_loop_with_store_driver() {
        use crate::driver::StoreDriver;
        use crate::memory_store::MemoryStore;
        use std::sync::Arc;

        let store = Arc::new(MemoryStore::new());
        store.insert("hosts", &["a", "b"]);
        let mut catalog = SchemaCatalog::new();
        catalog
            .insert(SettingSchema::new("hosts", SettingSyntax::StringArray).with_label("Hosts"))
            .expect("insert");
        let mut registry = EditorRegistry::from_catalog(&catalog);
        let mut driver = StoreDriver::new(Arc::clone(&store), tokio::runtime::Handle::current());

        driver.dispatch(registry.init_all());
        assert!(driver.settle(&mut registry).await.is_empty());

        let ctx = egui::Context::default();
        let mut surfaced = Vec::new();
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let effects = show_registry(ui, &mut registry);
                surfaced.extend(driver.dispatch(effects));
                surfaced.extend(driver.pump(&mut registry));
            });
        });
        assert!(surfaced.is_empty());
        assert_eq!(
            registry.get("hosts").and_then(|e| e.values()).map(<[String]>::len),
            Some(2)
        );
    }
}
