//! List editor state machine for one string-array setting.
//!
//! The editor owns the cached value of its setting and never touches a store
//! itself. Every operation returns the [`EditorEffect`] the host has to carry
//! out (a store request, a navigation, or an error to display), and store
//! completions come back through [`ListEditor::handle_response`].
//!
//! ```text
//! Unloaded -> Loading -> Rendered <-> Editing | ConfirmingDelete | Copying
//!                          |  ^
//!                          v  |
//!                       Persisting / CopyPending -> Departed
//! ```

use crate::dialogs::{ConfirmDialog, DnEditorDialog, PendingDialog, StringEditorDialog};
use crate::rows::{HeaderChrome, ListView, RowCommand, RowCommandKind, RowView, render_list, render_row};
use crate::traits::{CopyRequest, StoreError, StoreRequest, StoreResponse};
use crate::{EditorEffect, NavigationTarget};
use cfg_editor_config::{
    CopyKind, EditTarget, ListError, SettingKey, SettingSchema, apply_edit,
    move_item, remove_item,
};
use thiserror::Error;

/// Where the editor is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    /// No value cached
    Unloaded,
    /// Waiting for the initial read
    Loading,
    /// Idle, showing the cached value
    Rendered,
    /// Value prompt open for adding or editing
    Editing(EditTarget),
    /// Delete confirmation open for this row
    ConfirmingDelete(usize),
    /// Copy prompt open for this row
    Copying(usize),
    /// Write-through in flight
    Persisting { full_reload: bool },
    /// Identifier copy in flight
    CopyPending,
    /// The host was told to navigate away; the editor is finished
    Departed,
}

impl EditorPhase {
    /// A store request is outstanding
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            EditorPhase::Loading | EditorPhase::Persisting { .. } | EditorPhase::CopyPending
        )
    }
}

/// Operations refused by the editor
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error("setting {0} has not been loaded")]
    NotLoaded(SettingKey),
    #[error("setting {key} is busy ({phase:?})")]
    Busy { key: SettingKey, phase: EditorPhase },
    #[error("{action} is not offered for row {index:?} of {key}")]
    NotOffered {
        key: SettingKey,
        action: &'static str,
        index: Option<usize>,
    },
    #[error("no dialog is open for {0}")]
    NoDialog(SettingKey),
    #[error("invalid value: {0}")]
    InvalidValue(String),
    #[error(transparent)]
    List(#[from] ListError),
}

/// Editor for a single list setting
#[derive(Debug)]
pub struct ListEditor {
    schema: SettingSchema,
    /// Local cache, the only source for rendering
    values: Option<Vec<String>>,
    phase: EditorPhase,
    dialog: Option<PendingDialog>,
    /// Cache differs from what the store last acknowledged
    unsaved: bool,
    last_error: Option<String>,
}

impl ListEditor {
    pub fn new(schema: SettingSchema) -> Self {
        Self {
            schema,
            values: None,
            phase: EditorPhase::Unloaded,
            dialog: None,
            unsaved: false,
            last_error: None,
        }
    }

    pub fn key(&self) -> &SettingKey {
        &self.schema.key
    }

    pub fn schema(&self) -> &SettingSchema {
        &self.schema
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    /// Cached values, once loaded
    pub fn values(&self) -> Option<&[String]> {
        self.values.as_deref()
    }

    pub fn dialog(&self) -> Option<&PendingDialog> {
        self.dialog.as_ref()
    }

    pub fn dialog_mut(&mut self) -> Option<&mut PendingDialog> {
        self.dialog.as_mut()
    }

    pub fn is_busy(&self) -> bool {
        self.phase.is_in_flight()
    }

    /// The cache holds changes the store has not acknowledged
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Message of the last store failure, until dismissed
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn dismiss_error(&mut self) {
        self.last_error = None;
    }

    /// Header controls for this setting
    pub fn header_chrome(&self) -> HeaderChrome {
        HeaderChrome::for_syntax(self.schema.syntax)
    }

    // ========================================================================
    // Load / render
    // ========================================================================

    /// Drop the cache and request the stored value.
    pub fn init(&mut self) -> Result<EditorEffect, EditorError> {
        if self.phase.is_in_flight() {
            return Err(self.busy());
        }
        log::info!("List editor init for {}", self.key());
        self.values = None;
        self.dialog = None;
        self.unsaved = false;
        self.phase = EditorPhase::Loading;
        Ok(EditorEffect::Request(StoreRequest::Read(self.key().clone())))
    }

    /// Render the cached value, or `None` before the first load completes.
    pub fn render(&self) -> Option<ListView> {
        self.values
            .as_ref()
            .map(|values| render_list(&self.schema, values))
    }

    /// Row view for one index of the cache
    pub fn row(&self, index: usize) -> Option<RowView> {
        let values = self.values.as_ref()?;
        values
            .get(index)
            .map(|value| render_row(&self.schema, index, value, values.len()))
    }

    // ========================================================================
    // User operations
    // ========================================================================

    /// Route a row interaction to its operation
    pub fn dispatch(&mut self, command: RowCommand) -> Result<Option<EditorEffect>, EditorError> {
        let RowCommand { index, kind } = command;
        match kind {
            RowCommandKind::Edit => self.begin_edit(EditTarget::Existing(index)).map(|()| None),
            RowCommandKind::Copy => self.begin_copy(index).map(|()| None),
            RowCommandKind::MoveUp => self.move_item(true, index).map(Some),
            RowCommandKind::MoveDown => self.move_item(false, index).map(Some),
            RowCommandKind::Delete => self.delete_item(index),
        }
    }

    /// Open the value prompt for a new item
    pub fn begin_add(&mut self) -> Result<(), EditorError> {
        self.begin_edit(EditTarget::Add)
    }

    /// Open the value prompt for adding or editing.
    pub fn begin_edit(&mut self, target: EditTarget) -> Result<(), EditorError> {
        let values = self.ready()?;
        let current = match target {
            EditTarget::Add => {
                if !self.schema.can_add(values.len()) {
                    return Err(self.not_offered("add", None));
                }
                String::new()
            }
            EditTarget::Existing(index) => {
                self.require_offered(index, RowCommandKind::Edit)?;
                values[index].clone()
            }
        };

        let verb = if target.is_add() { "Add" } else { "Edit" };
        let title = format!("{} - {} Value", self.schema.label, verb);
        let dialog = if self.schema.is_ldap_dn() {
            PendingDialog::DistinguishedName(DnEditorDialog::new(title, current))
        } else {
            PendingDialog::Text(StringEditorDialog::new(
                title,
                &self.schema.pattern,
                self.schema.placeholder.clone(),
                current,
            ))
        };

        log::debug!("{}: open value editor for {:?}", self.key(), target);
        self.dialog = Some(dialog);
        self.phase = EditorPhase::Editing(target);
        Ok(())
    }

    /// Open the copy prompt for the identifier at `index`
    pub fn begin_copy(&mut self, index: usize) -> Result<(), EditorError> {
        self.ready()?;
        self.require_offered(index, RowCommandKind::Copy)?;
        let Some(kind) = self.schema.syntax.copy_kind() else {
            return Err(self.not_offered("copy", Some(index)));
        };
        let source = self.cached()?[index].clone();
        let noun = kind.noun();
        let dialog = StringEditorDialog::new(
            kind.dialog_title(),
            &self.schema.pattern,
            self.schema.placeholder.clone(),
            String::new(),
        )
        .with_instructions(format!(
            "Copy {noun} and all {noun} settings from existing \"{source}\" {noun} to a new {noun}."
        ));

        self.dialog = Some(PendingDialog::Text(dialog));
        self.phase = EditorPhase::Copying(index);
        Ok(())
    }

    /// Move the item at `index` one position up or down and persist.
    pub fn move_item(&mut self, move_up: bool, index: usize) -> Result<EditorEffect, EditorError> {
        self.ready()?;
        let kind = if move_up {
            RowCommandKind::MoveUp
        } else {
            RowCommandKind::MoveDown
        };
        self.require_offered(index, kind)?;

        let to = if move_up { index - 1 } else { index + 1 };
        move_item(self.cached_mut()?, index, to)?;
        log::debug!("{}: moved item {} -> {}", self.key(), index, to);
        self.persist(false)
    }

    /// Delete the item at `index`.
    ///
    /// Identifier lists ask for confirmation first and return `Ok(None)`;
    /// plain lists remove immediately and return the write request.
    pub fn delete_item(&mut self, index: usize) -> Result<Option<EditorEffect>, EditorError> {
        self.ready()?;
        self.require_offered(index, RowCommandKind::Delete)?;

        match self.schema.syntax.copy_kind() {
            Some(kind) => {
                let identifier = self.cached()?[index].clone();
                self.dialog = Some(PendingDialog::Confirm(delete_confirmation(kind, &identifier)));
                self.phase = EditorPhase::ConfirmingDelete(index);
                Ok(None)
            }
            None => self.remove_and_persist(index).map(Some),
        }
    }

    /// Accept the open dialog.
    ///
    /// Value prompts write their text into the cache (or issue a copy), the
    /// delete confirmation removes its row. A prompt whose text does not
    /// validate stays open and returns [`EditorError::InvalidValue`].
    pub fn confirm_dialog(&mut self) -> Result<Option<EditorEffect>, EditorError> {
        let Some(dialog) = self.dialog.as_mut() else {
            return Err(EditorError::NoDialog(self.key().clone()));
        };
        // New identifiers are validated and created without surrounding whitespace
        if let EditorPhase::Copying(_) = self.phase
            && let Some(trimmed) = dialog.entered_value().map(|v| v.trim().to_string())
        {
            dialog.set_value(trimmed);
        }
        if !dialog.can_confirm() {
            let reason = match dialog {
                PendingDialog::DistinguishedName(d) => d
                    .parsed()
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_default(),
                _ => format!("\"{}\" does not match the required format", dialog.entered_value().unwrap_or_default()),
            };
            return Err(EditorError::InvalidValue(reason));
        }

        match self.phase {
            EditorPhase::Editing(target) => {
                let value = self.take_entered_value();
                apply_edit(self.cached_mut()?, target, value)?;
                self.persist(false).map(Some)
            }
            EditorPhase::ConfirmingDelete(index) => {
                self.dialog = None;
                self.remove_and_persist(index).map(Some)
            }
            EditorPhase::Copying(index) => {
                let destination = self.take_entered_value();
                let Some(kind) = self.schema.syntax.copy_kind() else {
                    return Err(self.not_offered("copy", Some(index)));
                };
                let source = self.cached()?[index].clone();
                log::info!(
                    "{}: {} {} -> {}",
                    self.key(),
                    kind.action_name(),
                    source,
                    destination
                );
                self.phase = EditorPhase::CopyPending;
                Ok(Some(EditorEffect::Request(StoreRequest::Copy(CopyRequest {
                    setting: self.key().clone(),
                    source_id: source,
                    destination_id: destination,
                    kind,
                }))))
            }
            _ => {
                self.dialog = None;
                Err(EditorError::NoDialog(self.key().clone()))
            }
        }
    }

    /// Close the open dialog without touching the cache.
    pub fn cancel_dialog(&mut self) {
        if self.dialog.take().is_some() {
            log::debug!("{}: dialog cancelled", self.key());
            self.phase = EditorPhase::Rendered;
        }
    }

    /// Write the whole cached list through to the store.
    ///
    /// `full_reload` re-reads the setting after a successful write instead of
    /// redrawing from the cache.
    pub fn persist(&mut self, full_reload: bool) -> Result<EditorEffect, EditorError> {
        if self.phase.is_in_flight() {
            return Err(self.busy());
        }
        let values = self.cached()?.to_vec();
        self.dialog = None;
        self.unsaved = true;
        self.phase = EditorPhase::Persisting { full_reload };
        Ok(EditorEffect::Request(StoreRequest::Write {
            key: self.key().clone(),
            values,
        }))
    }

    // ========================================================================
    // Store completions
    // ========================================================================

    /// Apply a store completion and return the follow-up effect, if any.
    pub fn handle_response(&mut self, response: StoreResponse) -> Option<EditorEffect> {
        if response.key() != self.key() {
            log::warn!(
                "{}: ignoring response for {}",
                self.key(),
                response.key()
            );
            return None;
        }

        match (self.phase, response) {
            (EditorPhase::Loading, StoreResponse::Read { result, .. }) => match result {
                Ok(values) => {
                    log::debug!("{}: loaded {} values", self.key(), values.len());
                    self.values = Some(values);
                    self.unsaved = false;
                    self.phase = EditorPhase::Rendered;
                    None
                }
                Err(error) => {
                    self.phase = EditorPhase::Unloaded;
                    Some(self.fail("read", error))
                }
            },
            (EditorPhase::Persisting { full_reload }, StoreResponse::Write { result, .. }) => {
                match result {
                    Ok(()) => {
                        self.unsaved = false;
                        self.phase = EditorPhase::Rendered;
                        if self.schema.syntax.navigates_after_write() {
                            log::info!("{}: profile list changed, leaving editor", self.key());
                            self.phase = EditorPhase::Departed;
                            Some(EditorEffect::Navigate(NavigationTarget::EditorRoot))
                        } else if full_reload {
                            self.init().ok()
                        } else {
                            None
                        }
                    }
                    Err(error) => {
                        self.phase = EditorPhase::Rendered;
                        Some(self.fail("write", error))
                    }
                }
            }
            (EditorPhase::CopyPending, StoreResponse::Copy { result, .. }) => match result {
                Ok(()) => {
                    self.phase = EditorPhase::Departed;
                    Some(EditorEffect::Navigate(NavigationTarget::EditorRoot))
                }
                Err(error) => {
                    self.phase = EditorPhase::Rendered;
                    Some(self.fail("copy", error))
                }
            },
            (phase, response) => {
                log::warn!(
                    "{}: unexpected {:?} in phase {:?}",
                    self.key(),
                    response,
                    phase
                );
                None
            }
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn fail(&mut self, operation: &str, error: StoreError) -> EditorEffect {
        log::error!("{}: {} failed: {}", self.key(), operation, error);
        let message = format!("Unable to {} {}: {}", operation, self.schema.label, error);
        self.last_error = Some(message.clone());
        EditorEffect::ShowError {
            key: self.key().clone(),
            message,
        }
    }

    fn busy(&self) -> EditorError {
        EditorError::Busy {
            key: self.key().clone(),
            phase: self.phase,
        }
    }

    fn not_offered(&self, action: &'static str, index: Option<usize>) -> EditorError {
        EditorError::NotOffered {
            key: self.key().clone(),
            action,
            index,
        }
    }

    /// Idle and loaded: the only state that accepts user operations
    fn ready(&self) -> Result<&[String], EditorError> {
        match self.phase {
            EditorPhase::Rendered => self.cached(),
            EditorPhase::Unloaded => Err(EditorError::NotLoaded(self.key().clone())),
            _ => Err(self.busy()),
        }
    }

    fn cached(&self) -> Result<&[String], EditorError> {
        self.values
            .as_deref()
            .ok_or_else(|| EditorError::NotLoaded(self.key().clone()))
    }

    fn cached_mut(&mut self) -> Result<&mut Vec<String>, EditorError> {
        let key = self.key().clone();
        self.values.as_mut().ok_or(EditorError::NotLoaded(key))
    }

    /// The rendered row must offer `kind`
    fn require_offered(&self, index: usize, kind: RowCommandKind) -> Result<(), EditorError> {
        match self.row(index) {
            Some(row) if row.offers(kind) => Ok(()),
            _ => Err(self.not_offered(kind.title(), Some(index))),
        }
    }

    fn take_entered_value(&mut self) -> String {
        self.dialog
            .take()
            .and_then(|d| d.entered_value().map(str::to_string))
            .unwrap_or_default()
    }

    fn remove_and_persist(&mut self, index: usize) -> Result<EditorEffect, EditorError> {
        let removed = remove_item(self.cached_mut()?, index)?;
        log::info!("{}: removed {:?}", self.key(), removed);
        self.persist(false)
    }
}

fn delete_confirmation(kind: CopyKind, identifier: &str) -> ConfirmDialog {
    let noun = kind.noun();
    ConfirmDialog {
        title: "Confirm Delete".to_string(),
        text: format!(
            "Are you sure you want to remove the {noun} \"{identifier}\"? \
             All settings for the {noun} will be removed."
        ),
    }
}
