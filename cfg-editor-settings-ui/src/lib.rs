//! String-array setting editor for cfg-editor.
//!
//! This crate provides the list editor widget: a headless state machine
//! ([`ListEditor`]) plus an egui front end for it. It is decoupled from any
//! concrete storage through the [`SettingStore`] trait; the editor only ever
//! returns [`EditorEffect`]s for the host to carry out.
//!
//! No window is created here. The `cfg-editor` binary hosts the editor
//! headlessly; a GUI host owns the egui context and window, and each frame
//! draws the editors, submits their requests and pumps completions:
//!
//! ```no_run
//! use cfg_editor_settings_ui::{
//!     EditorEffect, EditorRegistry, SettingStore, StoreDriver, list_editor_ui,
//! };
//!
//! fn settings_frame<S: SettingStore + 'static>(
//!     ui: &mut egui::Ui,
//!     registry: &mut EditorRegistry,
//!     driver: &mut StoreDriver<S>,
//! ) -> Vec<EditorEffect> {
//!     let effects = list_editor_ui::show_registry(ui, registry);
//!     let mut surfaced = driver.dispatch(effects);
//!     surfaced.extend(driver.pump(registry));
//!     // Navigate and ShowError effects are left to the host
//!     surfaced
//! }
//! ```

// Trait interfaces for decoupling from storage
mod traits;
pub use traits::*;

// In-memory store for embedding and tests
pub mod memory_store;
pub use memory_store::MemoryStore;

// Pure render model
pub mod rows;
pub use rows::{
    AddButton, HeaderChrome, ListView, PROFILE_NAMING_RULES, RowCommand, RowCommandKind, RowView,
    render_list, render_row,
};

// Editor state machine
pub mod list_editor;
pub use list_editor::{EditorError, EditorPhase, ListEditor};

// Modal dialogs
pub mod dialogs;
pub use dialogs::{
    ConfirmDialog, DialogOutcome, DnEditorDialog, PendingDialog, StringEditorDialog,
};

// egui drawing
pub mod list_editor_ui;
pub mod section;

// Editors for every list setting of a schema catalog
pub mod registry;
pub use registry::EditorRegistry;

// Background execution of store requests
pub mod driver;
pub use driver::{StoreDriver, drive};

// Re-export types that editor consumers need
pub use cfg_editor_config::{
    self as config, CopyKind, EditTarget, SettingKey, SettingSchema, SettingSyntax,
};

/// Where the host should take the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTarget {
    /// Reload the whole configuration editor from its root
    EditorRoot,
}

/// Work the editor hands back to its host.
///
/// The host executes requests against its [`SettingStore`], performs
/// navigations, and displays errors. Store completions are fed back through
/// [`ListEditor::handle_response`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEffect {
    /// Execute a store call
    Request(StoreRequest),
    /// Leave the editor
    Navigate(NavigationTarget),
    /// Show a store failure for a setting
    ShowError { key: SettingKey, message: String },
}
