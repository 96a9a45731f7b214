//! Modal dialogs used by the list editor.
//!
//! Dialog state is plain data owned by the editor; the `show_*` functions
//! draw it as foreground egui windows and report what the user did.

use cfg_editor_config::{DistinguishedName, DnError};
use regex::Regex;

/// Single-string prompt with pattern validation
#[derive(Debug, Clone)]
pub struct StringEditorDialog {
    pub title: String,
    pub instructions: Option<String>,
    pub placeholder: String,
    /// Current text in the input field
    pub value: String,
    pattern: Option<Regex>,
}

impl StringEditorDialog {
    /// Create a prompt. An uncompilable pattern disables validation.
    pub fn new(
        title: impl Into<String>,
        pattern: &str,
        placeholder: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let pattern = if pattern.is_empty() {
            None
        } else {
            match Regex::new(pattern) {
                Ok(re) => Some(re),
                Err(e) => {
                    log::warn!("Ignoring invalid value pattern {:?}: {}", pattern, e);
                    None
                }
            }
        };
        Self {
            title: title.into(),
            instructions: None,
            placeholder: placeholder.into(),
            value: value.into(),
            pattern,
        }
    }

    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = Some(instructions.into());
        self
    }

    /// Pattern source, empty when none
    pub fn pattern(&self) -> &str {
        self.pattern.as_ref().map(Regex::as_str).unwrap_or_default()
    }

    /// The OK button is enabled only for non-empty text matching the pattern.
    pub fn is_valid(&self) -> bool {
        !self.value.is_empty()
            && self
                .pattern
                .as_ref()
                .is_none_or(|re| re.is_match(&self.value))
    }
}

/// Editor for LDAP distinguished names
#[derive(Debug, Clone, Default)]
pub struct DnEditorDialog {
    pub title: String,
    pub value: String,
}

impl DnEditorDialog {
    pub fn new(title: impl Into<String>, current_value: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            value: current_value.into(),
        }
    }

    /// Parsed form of the current text
    pub fn parsed(&self) -> Result<DistinguishedName, DnError> {
        DistinguishedName::parse(&self.value)
    }

    pub fn is_valid(&self) -> bool {
        self.parsed().is_ok()
    }
}

/// Yes/no question
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmDialog {
    pub title: String,
    pub text: String,
}

/// The dialog currently open over a list editor
#[derive(Debug, Clone)]
pub enum PendingDialog {
    Text(StringEditorDialog),
    DistinguishedName(DnEditorDialog),
    Confirm(ConfirmDialog),
}

impl PendingDialog {
    pub fn title(&self) -> &str {
        match self {
            PendingDialog::Text(d) => &d.title,
            PendingDialog::DistinguishedName(d) => &d.title,
            PendingDialog::Confirm(d) => &d.title,
        }
    }

    /// Whether OK may be pressed
    pub fn can_confirm(&self) -> bool {
        match self {
            PendingDialog::Text(d) => d.is_valid(),
            PendingDialog::DistinguishedName(d) => d.is_valid(),
            PendingDialog::Confirm(_) => true,
        }
    }

    /// Text entered by the user, for value prompts
    pub fn entered_value(&self) -> Option<&str> {
        match self {
            PendingDialog::Text(d) => Some(&d.value),
            PendingDialog::DistinguishedName(d) => Some(&d.value),
            PendingDialog::Confirm(_) => None,
        }
    }

    /// Replace the text of a value prompt; no-op for confirmations
    pub fn set_value(&mut self, value: impl Into<String>) {
        match self {
            PendingDialog::Text(d) => d.value = value.into(),
            PendingDialog::DistinguishedName(d) => d.value = value.into(),
            PendingDialog::Confirm(_) => {}
        }
    }
}

/// What the user did with a dialog this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    Open,
    Confirmed,
    Cancelled,
}

fn modal_window(title: &str, ctx: &egui::Context) -> egui::Window<'static> {
    egui::Window::new(title.to_string())
        .collapsible(false)
        .resizable(false)
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_rgba_unmultiplied(40, 40, 40, 255))
                .inner_margin(egui::Margin::same(20)),
        )
}

/// Draw `dialog` and report the outcome. Escape cancels.
pub fn show_dialog(ctx: &egui::Context, dialog: &mut PendingDialog) -> DialogOutcome {
    if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        return DialogOutcome::Cancelled;
    }

    let mut outcome = DialogOutcome::Open;
    let title = dialog.title().to_string();
    modal_window(&title, ctx).show(ctx, |ui| {
        match dialog {
            PendingDialog::Text(d) => show_text_body(ui, d),
            PendingDialog::DistinguishedName(d) => show_dn_body(ui, d),
            PendingDialog::Confirm(d) => {
                ui.vertical_centered(|ui| {
                    ui.label(&d.text);
                    ui.add_space(8.0);
                    ui.label(
                        egui::RichText::new("This action cannot be undone.")
                            .color(egui::Color32::YELLOW),
                    );
                });
            }
        }

        ui.add_space(16.0);
        let can_confirm = dialog.can_confirm();
        ui.horizontal(|ui| {
            let ok_label = match dialog {
                PendingDialog::Confirm(_) => "Delete",
                PendingDialog::Text(_) | PendingDialog::DistinguishedName(_) => "OK",
            };
            if ui
                .add_enabled(can_confirm, egui::Button::new(ok_label))
                .clicked()
            {
                outcome = DialogOutcome::Confirmed;
            }
            if ui.button("Cancel").clicked() {
                outcome = DialogOutcome::Cancelled;
            }
        });
    });

    outcome
}

fn show_text_body(ui: &mut egui::Ui, dialog: &mut StringEditorDialog) {
    if let Some(instructions) = &dialog.instructions {
        ui.label(instructions);
        ui.add_space(8.0);
    }
    let response = ui.add(
        egui::TextEdit::singleline(&mut dialog.value)
            .hint_text(dialog.placeholder.as_str())
            .desired_width(crate::section::INPUT_WIDTH),
    );
    response.request_focus();
    if !dialog.value.is_empty() && !dialog.is_valid() {
        ui.colored_label(
            egui::Color32::from_rgb(200, 80, 80),
            format!("Value must match {}", dialog.pattern()),
        );
    }
}

fn show_dn_body(ui: &mut egui::Ui, dialog: &mut DnEditorDialog) {
    ui.add(
        egui::TextEdit::singleline(&mut dialog.value)
            .hint_text("ou=People,o=example")
            .desired_width(crate::section::INPUT_WIDTH),
    );
    ui.add_space(4.0);
    match dialog.parsed() {
        Ok(dn) => {
            for (depth, rdn) in dn.rdns().iter().rev().enumerate() {
                ui.horizontal(|ui| {
                    ui.add_space(depth as f32 * 12.0);
                    ui.label(
                        egui::RichText::new(rdn.to_string())
                            .monospace()
                            .color(egui::Color32::LIGHT_GRAY),
                    );
                });
            }
        }
        Err(DnError::Empty) => {}
        Err(e) => {
            ui.colored_label(egui::Color32::from_rgb(200, 80, 80), e.to_string());
        }
    }
}

/// Draw a store error. Returns true once dismissed.
pub fn show_error_dialog(ctx: &egui::Context, message: &str) -> bool {
    let mut dismissed = false;
    modal_window("Error", ctx).show(ctx, |ui| {
        ui.vertical_centered(|ui| {
            ui.colored_label(egui::Color32::from_rgb(200, 80, 80), message);
            ui.add_space(16.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });
    });
    dismissed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_dialog_validation() {
        let mut dialog = StringEditorDialog::new("t", "^[a-z]+$", "name", "");
        assert!(!dialog.is_valid(), "empty input never validates");
        dialog.value = "abc".to_string();
        assert!(dialog.is_valid());
        dialog.value = "ab1".to_string();
        assert!(!dialog.is_valid());
        assert_eq!(dialog.pattern(), "^[a-z]+$");
    }

    #[test]
    fn test_string_dialog_invalid_pattern_disables_validation() {
        let dialog = StringEditorDialog::new("t", "([", "", "anything");
        assert!(dialog.is_valid());
        assert_eq!(dialog.pattern(), "");
    }

    #[test]
    fn test_dn_dialog_validation() {
        let mut dialog = DnEditorDialog::new("DN", "ou=People,o=example");
        assert!(dialog.is_valid());
        dialog.value = "People".to_string();
        assert!(!dialog.is_valid());
    }

    #[test]
    fn test_pending_dialog_value_access() {
        let mut dialog = PendingDialog::Text(StringEditorDialog::new("t", "", "", "a"));
        dialog.set_value("b");
        assert_eq!(dialog.entered_value(), Some("b"));

        let mut confirm = PendingDialog::Confirm(ConfirmDialog {
            title: "Confirm".to_string(),
            text: "sure?".to_string(),
        });
        confirm.set_value("ignored");
        assert_eq!(confirm.entered_value(), None);
        assert!(confirm.can_confirm());
    }

    #[test]
    fn test_show_dialog_headless_stays_open() {
        let ctx = egui::Context::default();
        let mut dialog = PendingDialog::Text(StringEditorDialog::new("Add", "", "", ""));
        let mut outcome = DialogOutcome::Confirmed;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            outcome = show_dialog(ctx, &mut dialog);
        });
        assert_eq!(outcome, DialogOutcome::Open);
    }
}
