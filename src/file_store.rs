//! YAML-backed [`SettingStore`].
//!
//! Every call re-reads the settings file so edits made by other processes
//! are picked up, mutates the document under a lock and writes it back
//! atomically.

use cfg_editor_config::{ConfigError, SchemaCatalog, SettingKey, StoredSettings};
use cfg_editor_settings_ui::{CopyRequest, SettingStore, StoreError};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Setting store persisting a [`StoredSettings`] document to disk
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    /// Serialises load-modify-save cycles
    lock: Mutex<()>,
    /// Keys this store accepts; `None` accepts any key
    known_keys: Option<HashSet<SettingKey>>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            known_keys: None,
        }
    }

    /// Only accept settings declared in `catalog`
    pub fn with_catalog(mut self, catalog: &SchemaCatalog) -> Self {
        self.known_keys = Some(catalog.iter().map(|s| s.key.clone()).collect());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current on-disk document
    pub fn load(&self) -> Result<StoredSettings, StoreError> {
        let _guard = self.lock.lock();
        StoredSettings::load(&self.path).map_err(io_error)
    }

    fn check_key(&self, key: &SettingKey) -> Result<(), StoreError> {
        match &self.known_keys {
            Some(keys) if !keys.contains(key) => Err(StoreError::UnknownSetting(key.clone())),
            _ => Ok(()),
        }
    }

    /// Load, apply `update`, and save when it succeeds
    fn modify(
        &self,
        update: impl FnOnce(&mut StoredSettings) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock();
        let mut document = StoredSettings::load(&self.path).map_err(io_error)?;
        update(&mut document)?;
        document.save(&self.path).map_err(io_error)
    }
}

fn io_error(error: ConfigError) -> StoreError {
    StoreError::Io(error.to_string())
}

impl SettingStore for FileStore {
    async fn read_setting(&self, key: &SettingKey) -> Result<Vec<String>, StoreError> {
        self.check_key(key)?;
        Ok(self.load()?.get(key))
    }

    async fn write_setting(&self, key: &SettingKey, values: Vec<String>) -> Result<(), StoreError> {
        self.check_key(key)?;
        log::info!("FileStore: write {} ({} values) to {:?}", key, values.len(), self.path);
        self.modify(|document| {
            document.set(key, values);
            Ok(())
        })
    }

    async fn copy_identifier(&self, request: &CopyRequest) -> Result<(), StoreError> {
        self.check_key(&request.setting)?;
        log::info!(
            "FileStore: {} {} -> {}",
            request.kind.action_name(),
            request.source_id,
            request.destination_id
        );
        self.modify(|document| {
            document.copy_identifier(&request.setting, &request.source_id, &request.destination_id)?;
            Ok(())
        })
    }
}
