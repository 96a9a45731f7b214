//! In-memory [`SettingStore`] for embedding and tests.

use crate::traits::{CopyRequest, SettingStore, StoreError};
use cfg_editor_config::{SettingKey, StoredSettings};
use parking_lot::Mutex;

/// Setting store holding a [`StoredSettings`] document in memory.
///
/// Failures can be injected per operation to exercise error paths.
#[derive(Debug, Default)]
pub struct MemoryStore {
    document: Mutex<StoredSettings>,
    failures: Mutex<InjectedFailures>,
    writes: Mutex<usize>,
}

#[derive(Debug, Default)]
struct InjectedFailures {
    read: Option<StoreError>,
    write: Option<StoreError>,
    copy: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a single setting
    pub fn insert(&self, key: impl Into<SettingKey>, values: &[&str]) {
        let key = key.into();
        self.document
            .lock()
            .settings
            .insert(key, values.iter().map(|v| v.to_string()).collect());
    }

    /// Snapshot of a setting's stored value
    pub fn get(&self, key: &str) -> Option<Vec<String>> {
        self.document.lock().settings.get(key).cloned()
    }

    /// Snapshot of the whole document
    pub fn document(&self) -> StoredSettings {
        self.document.lock().clone()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        *self.writes.lock()
    }

    /// Make the next read fail with `error`
    pub fn fail_next_read(&self, error: StoreError) {
        self.failures.lock().read = Some(error);
    }

    /// Make the next write fail with `error`
    pub fn fail_next_write(&self, error: StoreError) {
        self.failures.lock().write = Some(error);
    }

    /// Make the next copy fail with `error`
    pub fn fail_next_copy(&self, error: StoreError) {
        self.failures.lock().copy = Some(error);
    }
}

impl SettingStore for MemoryStore {
    async fn read_setting(&self, key: &SettingKey) -> Result<Vec<String>, StoreError> {
        if let Some(error) = self.failures.lock().read.take() {
            return Err(error);
        }
        Ok(self.document.lock().get(key))
    }

    async fn write_setting(&self, key: &SettingKey, values: Vec<String>) -> Result<(), StoreError> {
        if let Some(error) = self.failures.lock().write.take() {
            return Err(error);
        }
        log::debug!("MemoryStore: write {} ({} values)", key, values.len());
        self.document.lock().set(key, values);
        *self.writes.lock() += 1;
        Ok(())
    }

    async fn copy_identifier(&self, request: &CopyRequest) -> Result<(), StoreError> {
        if let Some(error) = self.failures.lock().copy.take() {
            return Err(error);
        }
        self.document.lock().copy_identifier(
            &request.setting,
            &request.source_id,
            &request.destination_id,
        )?;
        Ok(())
    }
}
