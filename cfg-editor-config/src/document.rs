//! Stored-settings document persisted by file-backed setting stores.
//!
//! Layout:
//!
//! ```yaml
//! settings:
//!   ldap.profile.list: [default, secondary]
//! scoped:
//!   default:
//!     ldap.serverUrls: ["ldaps://dir.example.com"]
//! ```
//!
//! `scoped` holds settings owned by a profile or domain identifier.
//! Identifiers share one namespace across profile and domain lists.

use crate::error::ConfigError;
use crate::types::SettingKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Reasons an identifier copy is refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierError {
    #[error("new identifier must not be empty")]
    EmptyDestination,
    #[error("\"{0}\" does not exist in {1}")]
    UnknownSource(String, SettingKey),
    #[error("\"{0}\" already exists in {1}")]
    DuplicateDestination(String, SettingKey),
}

/// All stored setting values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    /// Top-level list settings
    #[serde(default)]
    pub settings: BTreeMap<SettingKey, Vec<String>>,

    /// Settings scoped to a profile or domain identifier
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub scoped: BTreeMap<String, BTreeMap<SettingKey, Vec<String>>>,
}

impl StoredSettings {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml_ng::from_str(yaml)?)
    }

    /// Load the document, or an empty one when the file does not exist yet
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("Settings file {:?} not found, starting empty", path);
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Save the document atomically (temp file then rename)
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml_ng::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)?;
        fs::rename(&temp_path, path)?;
        log::debug!("Saved {} settings to {:?}", self.settings.len(), path);
        Ok(())
    }

    /// Current value of a setting; unset settings read as empty lists
    pub fn get(&self, key: &SettingKey) -> Vec<String> {
        self.settings.get(key).cloned().unwrap_or_default()
    }

    /// Replace a setting's value and drop scopes no list refers to anymore.
    pub fn set(&mut self, key: &SettingKey, values: Vec<String>) {
        self.settings.insert(key.clone(), values);
        self.prune_orphan_scopes();
    }

    /// Settings scoped to an identifier
    pub fn scope(&self, identifier: &str) -> Option<&BTreeMap<SettingKey, Vec<String>>> {
        self.scoped.get(identifier)
    }

    /// Append `destination` to the `setting` list and duplicate the scoped
    /// settings of `source` under it.
    pub fn copy_identifier(
        &mut self,
        setting: &SettingKey,
        source: &str,
        destination: &str,
    ) -> Result<(), IdentifierError> {
        if destination.trim().is_empty() {
            return Err(IdentifierError::EmptyDestination);
        }

        let Some(list) = self
            .settings
            .get_mut(setting)
            .filter(|list| list.iter().any(|v| v == source))
        else {
            return Err(IdentifierError::UnknownSource(
                source.to_string(),
                setting.clone(),
            ));
        };
        if list.iter().any(|v| v == destination) {
            return Err(IdentifierError::DuplicateDestination(
                destination.to_string(),
                setting.clone(),
            ));
        }
        list.push(destination.to_string());

        if let Some(scope) = self.scoped.get(source).cloned() {
            self.scoped.insert(destination.to_string(), scope);
        }
        log::info!(
            "Copied identifier {} -> {} in {}",
            source,
            destination,
            setting
        );
        Ok(())
    }

    fn prune_orphan_scopes(&mut self) {
        let settings = &self.settings;
        self.scoped.retain(|identifier, _| {
            let referenced = settings
                .values()
                .any(|values| values.iter().any(|v| v == identifier));
            if !referenced {
                log::info!("Removing settings of unreferenced identifier {}", identifier);
            }
            referenced
        });
    }
}
