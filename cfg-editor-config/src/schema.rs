//! Setting schemas and the schema catalog.
//!
//! A schema describes one list setting: its syntax kind, item-count bounds,
//! the validation pattern offered to value editors, and free-form flags.
//! Catalogs are loaded from YAML:
//!
//! ```yaml
//! settings:
//!   - key: ldap.serverUrls
//!     label: LDAP URLs
//!     syntax: STRING_ARRAY
//!     required: true
//!     minimum: 1
//!     pattern: "^ldaps?://.+"
//!   - key: ldap.profile.list
//!     label: LDAP Profiles
//!     syntax: PROFILE
//! ```

use crate::error::ConfigError;
use crate::types::{SettingFlag, SettingKey, SettingSyntax};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Read-only description of a list setting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingSchema {
    /// Key of the setting this schema describes
    pub key: SettingKey,

    /// Human readable label, used in dialog titles
    #[serde(default)]
    pub label: String,

    /// Longer description shown above profile lists
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,

    /// Syntax kind governing the allowed operations
    #[serde(default)]
    pub syntax: SettingSyntax,

    /// Whether the setting must keep at least one value
    #[serde(default)]
    pub required: bool,

    /// Minimum number of items. Delete is never offered while unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<usize>,

    /// Maximum number of items
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<usize>,

    /// Validation regex for new values (empty accepts anything)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,

    /// Placeholder text for value editors
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub placeholder: String,

    /// Schema tags such as `ldapDNsyntax`
    #[serde(default, skip_serializing_if = "HashSet::is_empty")]
    pub flags: HashSet<SettingFlag>,
}

impl SettingSchema {
    /// Create a schema with defaults for everything but key and syntax
    pub fn new(key: impl Into<SettingKey>, syntax: SettingSyntax) -> Self {
        let key = key.into();
        Self {
            label: key.to_string(),
            key,
            description: String::new(),
            syntax,
            required: false,
            minimum: None,
            maximum: None,
            pattern: String::new(),
            placeholder: String::new(),
            flags: HashSet::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = Some(minimum);
        self
    }

    pub fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = Some(maximum);
        self
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_flag(mut self, flag: SettingFlag) -> Self {
        self.flags.insert(flag);
        self
    }

    /// Check whether the schema carries a flag
    pub fn has_flag(&self, flag: &SettingFlag) -> bool {
        self.flags.contains(flag)
    }

    /// Values are distinguished names and get the DN editor.
    pub fn is_ldap_dn(&self) -> bool {
        self.has_flag(&SettingFlag::LdapDnSyntax)
    }

    /// Compile the validation pattern. `None` when no pattern is set.
    pub fn compiled_pattern(&self) -> Result<Option<Regex>, regex::Error> {
        if self.pattern.is_empty() {
            return Ok(None);
        }
        Regex::new(&self.pattern).map(Some)
    }

    /// Test a candidate value against the pattern.
    ///
    /// Matching is unanchored; patterns that must cover the whole value
    /// carry their own `^`/`$`.
    pub fn value_matches(&self, value: &str) -> bool {
        match self.compiled_pattern() {
            Ok(Some(re)) => re.is_match(value),
            Ok(None) => true,
            Err(e) => {
                log::warn!("Invalid pattern for setting {}: {}", self.key, e);
                true
            }
        }
    }

    /// Whether another value may be added to a list of `count` items.
    pub fn can_add(&self, count: usize) -> bool {
        self.maximum.is_none_or(|max| count < max)
    }

    /// Whether items may be deleted from a list of `count` items.
    ///
    /// Literal rule: `(count > 1 || !required) && minimum set && count > minimum`.
    /// A schema without a minimum never offers deletion.
    pub fn can_delete(&self, count: usize) -> bool {
        (count > 1 || !self.required) && self.minimum.is_some_and(|min| count > min)
    }

    /// Semantic validation of the schema itself
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.key.as_str().trim().is_empty() {
            return Err(ConfigError::Validation(
                "setting key must not be empty".to_string(),
            ));
        }
        if let (Some(min), Some(max)) = (self.minimum, self.maximum)
            && min > max
        {
            return Err(ConfigError::Validation(format!(
                "setting {}: minimum {} exceeds maximum {}",
                self.key, min, max
            )));
        }
        if let Err(e) = self.compiled_pattern() {
            return Err(ConfigError::Validation(format!(
                "setting {}: invalid pattern: {}",
                self.key, e
            )));
        }
        Ok(())
    }
}

/// On-disk layout of a schema catalog file
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    settings: Vec<SettingSchema>,
}

/// Collection of setting schemas keyed by setting key.
#[derive(Debug, Clone, Default)]
pub struct SchemaCatalog {
    schemas: BTreeMap<SettingKey, SettingSchema>,
}

impl SchemaCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a catalog from YAML text
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let file: CatalogFile = serde_yaml_ng::from_str(yaml)?;
        let mut catalog = Self::new();
        for schema in file.settings {
            catalog.insert(schema)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading schema catalog from {:?}", path);
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_yaml_str(&contents)?;
        log::info!("Loaded {} setting schemas", catalog.len());
        Ok(catalog)
    }

    /// Serialize the catalog back to YAML
    pub fn to_yaml_string(&self) -> Result<String, ConfigError> {
        let file = CatalogFile {
            settings: self.schemas.values().cloned().collect(),
        };
        Ok(serde_yaml_ng::to_string(&file)?)
    }

    /// Add a schema after validating it. Duplicate keys are rejected.
    pub fn insert(&mut self, schema: SettingSchema) -> Result<(), ConfigError> {
        schema.validate()?;
        if self.schemas.contains_key(&schema.key) {
            return Err(ConfigError::Validation(format!(
                "duplicate setting key {}",
                schema.key
            )));
        }
        self.schemas.insert(schema.key.clone(), schema);
        Ok(())
    }

    /// Look up the schema for a setting
    pub fn get(&self, key: &str) -> Option<&SettingSchema> {
        self.schemas.get(key)
    }

    /// Iterate schemas in key order
    pub fn iter(&self) -> impl Iterator<Item = &SettingSchema> {
        self.schemas.values()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delete_rule_requires_minimum() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray);
        assert!(!schema.can_delete(5), "unset minimum never offers delete");

        let schema = schema.with_minimum(1);
        assert!(!schema.can_delete(1));
        assert!(schema.can_delete(2));
    }

    #[test]
    fn test_delete_rule_required_single_item() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray)
            .required(true)
            .with_minimum(0);
        assert!(!schema.can_delete(1), "required setting keeps its last item");
        assert!(schema.can_delete(2));

        let optional = schema.clone().required(false);
        assert!(optional.can_delete(1));
        assert!(!optional.can_delete(0));
    }

    #[test]
    fn test_add_rule_respects_maximum() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_maximum(2);
        assert!(schema.can_add(1));
        assert!(!schema.can_add(2));
        assert!(SettingSchema::new("k", SettingSyntax::Domain).can_add(10_000));
    }

    #[test]
    fn test_value_matches_unanchored() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_pattern("[a-z]+");
        assert!(schema.value_matches("abc"));
        assert!(schema.value_matches("ABC-def"));
        assert!(!schema.value_matches("123"));

        let anchored = schema.with_pattern("^[a-z]+$");
        assert!(!anchored.value_matches("ABC-def"));
    }

    #[test]
    fn test_validate_rejects_inverted_bounds() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray)
            .with_minimum(3)
            .with_maximum(2);
        assert!(matches!(schema.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_bad_pattern() {
        let schema = SettingSchema::new("k", SettingSyntax::StringArray).with_pattern("([a-z");
        assert!(matches!(schema.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_catalog_from_yaml() {
        let yaml = r#"
settings:
  - key: ldap.serverUrls
    label: LDAP URLs
    required: true
    minimum: 1
    pattern: "^ldaps?://.+"
  - key: ldap.profile.list
    label: LDAP Profiles
    syntax: PROFILE
    description: Profiles for LDAP directories
  - key: ldap.baseDNs
    flags: [ldapDNsyntax]
"#;
        let catalog = SchemaCatalog::from_yaml_str(yaml).expect("parse catalog");
        assert_eq!(catalog.len(), 3);

        let urls = catalog.get("ldap.serverUrls").expect("urls schema");
        assert_eq!(urls.syntax, SettingSyntax::StringArray);
        assert!(urls.required);
        assert_eq!(urls.minimum, Some(1));
        assert_eq!(urls.maximum, None);

        let profiles = catalog.get("ldap.profile.list").expect("profile schema");
        assert_eq!(profiles.syntax, SettingSyntax::Profile);

        assert!(catalog.get("ldap.baseDNs").expect("dn schema").is_ldap_dn());
        assert!(catalog.get("missing").is_none());
    }

    #[test]
    fn test_catalog_rejects_duplicates() {
        let yaml = "settings:\n  - key: a\n  - key: a\n";
        assert!(matches!(
            SchemaCatalog::from_yaml_str(yaml),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_catalog_yaml_roundtrip_keeps_bounds() {
        let mut catalog = SchemaCatalog::new();
        catalog
            .insert(
                SettingSchema::new("a", SettingSyntax::Domain)
                    .with_minimum(1)
                    .with_maximum(4),
            )
            .expect("insert");
        let yaml = catalog.to_yaml_string().expect("serialize");
        let reloaded = SchemaCatalog::from_yaml_str(&yaml).expect("reload");
        assert_eq!(reloaded.get("a"), catalog.get("a"));
    }

    #[test]
    fn test_catalog_load_from_file() {
        let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("schema.yaml");
        std::fs::write(&path, "settings:\n  - key: a\n    syntax: DOMAIN\n")
            .expect("Failed to write schema");
        let catalog = SchemaCatalog::load(&path).expect("load");
        assert_eq!(catalog.get("a").map(|s| s.syntax), Some(SettingSyntax::Domain));
    }
}
