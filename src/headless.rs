//! Headless list editing.
//!
//! A [`HeadlessSession`] drives a [`ListEditor`] against a store without a
//! UI: dialog answers are supplied by the caller instead of a user.

use anyhow::{Result, bail};
use cfg_editor_settings_ui::{
    EditTarget, EditorEffect, EditorError, ListEditor, ListView, NavigationTarget, PendingDialog,
    SettingSchema, SettingStore, drive,
};

/// How a headless operation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The list was written and the editor redrew in place
    Saved,
    /// The editor asked to reload the whole configuration editor
    Reloaded(NavigationTarget),
    /// A confirmation was declined; nothing changed
    Declined,
}

/// One editor bound to one store
pub struct HeadlessSession<'a, S: SettingStore> {
    editor: ListEditor,
    store: &'a S,
}

impl<'a, S: SettingStore> HeadlessSession<'a, S> {
    /// Load `schema`'s setting from `store`
    pub async fn open(schema: SettingSchema, store: &'a S) -> Result<Self> {
        let mut session = Self {
            editor: ListEditor::new(schema),
            store,
        };
        let effect = session.editor.init()?;
        session.run(effect).await?;
        Ok(session)
    }

    pub fn editor(&self) -> &ListEditor {
        &self.editor
    }

    /// Current row model
    pub fn view(&self) -> Result<ListView> {
        match self.editor.render() {
            Some(view) => Ok(view),
            None => bail!("{} is not loaded", self.editor.key()),
        }
    }

    /// Append `value`
    pub async fn add(&mut self, value: &str) -> Result<Outcome> {
        self.editor.begin_add()?;
        self.answer(value).await
    }

    /// Replace the value at `index`
    pub async fn edit(&mut self, index: usize, value: &str) -> Result<Outcome> {
        self.editor.begin_edit(EditTarget::Existing(index))?;
        self.answer(value).await
    }

    /// Move the value at `index` one step
    pub async fn move_item(&mut self, move_up: bool, index: usize) -> Result<Outcome> {
        let effect = self.editor.move_item(move_up, index)?;
        self.run(effect).await
    }

    /// Delete the value at `index`. `confirm` answers the confirmation
    /// prompt identifier lists show, given its text.
    pub async fn delete(
        &mut self,
        index: usize,
        confirm: impl FnOnce(&str) -> bool,
    ) -> Result<Outcome> {
        if let Some(effect) = self.editor.delete_item(index)? {
            return self.run(effect).await;
        }
        let question = match self.editor.dialog() {
            Some(PendingDialog::Confirm(dialog)) => dialog.text.clone(),
            _ => bail!("delete of row {} did not ask for confirmation", index),
        };
        if !confirm(&question) {
            self.editor.cancel_dialog();
            return Ok(Outcome::Declined);
        }
        self.confirm().await
    }

    /// Copy the identifier at `index` to `new_id`
    pub async fn copy(&mut self, index: usize, new_id: &str) -> Result<Outcome> {
        self.editor.begin_copy(index)?;
        self.answer(new_id).await
    }

    async fn answer(&mut self, value: &str) -> Result<Outcome> {
        if let Some(dialog) = self.editor.dialog_mut() {
            dialog.set_value(value);
        }
        self.confirm().await
    }

    async fn confirm(&mut self) -> Result<Outcome> {
        match self.editor.confirm_dialog() {
            Ok(Some(effect)) => self.run(effect).await,
            Ok(None) => Ok(Outcome::Saved),
            Err(error @ EditorError::InvalidValue(_)) => {
                self.editor.cancel_dialog();
                Err(error.into())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Drive `effect` to completion and translate what surfaces
    async fn run(&mut self, effect: EditorEffect) -> Result<Outcome> {
        let mut outcome = Outcome::Saved;
        for surfaced in drive(&mut self.editor, self.store, effect).await {
            match surfaced {
                EditorEffect::ShowError { message, .. } => bail!(message),
                EditorEffect::Navigate(target) => outcome = Outcome::Reloaded(target),
                EditorEffect::Request(request) => {
                    log::warn!("Unexecuted request for {}", request.key());
                }
            }
        }
        Ok(outcome)
    }
}
