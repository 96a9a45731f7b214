//! One list editor per setting of a schema catalog.

use crate::list_editor::ListEditor;
use crate::traits::StoreResponse;
use crate::EditorEffect;
use cfg_editor_config::{SchemaCatalog, SettingKey};
use std::collections::{BTreeMap, HashSet};

/// Owns the editors shown on one configuration page and routes store
/// completions to the editor they belong to.
#[derive(Debug, Default)]
pub struct EditorRegistry {
    editors: BTreeMap<SettingKey, ListEditor>,
    /// Search filter for the settings page (lowercased on use)
    pub search_query: String,
    /// Sections toggled away from their default collapse state
    pub collapsed: HashSet<String>,
}

impl EditorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an unloaded editor for every setting in `catalog`
    pub fn from_catalog(catalog: &SchemaCatalog) -> Self {
        let editors = catalog
            .iter()
            .map(|schema| (schema.key.clone(), ListEditor::new(schema.clone())))
            .collect();
        Self {
            editors,
            ..Self::default()
        }
    }

    pub fn get(&self, key: &str) -> Option<&ListEditor> {
        self.editors.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut ListEditor> {
        self.editors.get_mut(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ListEditor> {
        self.editors.values()
    }

    /// Editors together with the collapse state, for drawing sections
    pub fn sections_mut(
        &mut self,
    ) -> (impl Iterator<Item = &mut ListEditor>, &mut HashSet<String>) {
        (self.editors.values_mut(), &mut self.collapsed)
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    /// Start loading every idle editor
    pub fn init_all(&mut self) -> Vec<EditorEffect> {
        self.editors
            .values_mut()
            .filter_map(|editor| match editor.init() {
                Ok(effect) => Some(effect),
                Err(e) => {
                    log::debug!("Skipping init: {}", e);
                    None
                }
            })
            .collect()
    }

    /// Hand a store completion to the editor owning its key
    pub fn route(&mut self, response: StoreResponse) -> Option<EditorEffect> {
        match self.editors.get_mut(response.key()) {
            Some(editor) => editor.handle_response(response),
            None => {
                log::warn!("No editor registered for {}", response.key());
                None
            }
        }
    }
}
