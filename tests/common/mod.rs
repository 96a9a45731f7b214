//! Shared integration test helpers for cfg-editor.
//!
//! Include this module at the top of each test file that needs it:
//!
//! ```ignore
//! mod common;
//! use common::TestContext;
//! ```
//!
//! The `#[allow(dead_code)]` attribute suppresses warnings when only a subset
//! of helpers is used per file.

#![allow(dead_code)]

use cfg_editor::FileStore;
use cfg_editor::cli::{self, Cli};
use cfg_editor_config::{SchemaCatalog, SettingKey, StoredSettings};
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Schema catalog covering every list syntax
pub const SCHEMA_YAML: &str = r#"
settings:
  - key: ldap.serverUrls
    label: LDAP URLs
    syntax: STRING_ARRAY
    required: true
    minimum: 1
    pattern: "^ldaps?://.+"
  - key: ldap.contexts
    label: LDAP Contexts
    syntax: STRING_ARRAY
    minimum: 0
    flags: [ldapDNsyntax]
  - key: ldap.profile.list
    label: LDAP Profiles
    description: Directory profiles.
    syntax: PROFILE
    minimum: 1
  - key: domain.list
    label: Domains
    syntax: DOMAIN
    minimum: 1
"#;

/// Stored settings matching [`SCHEMA_YAML`]
pub const SETTINGS_YAML: &str = r#"
settings:
  ldap.serverUrls: ["ldaps://a.example.com", "ldaps://b.example.com"]
  ldap.contexts: ["ou=People,o=example"]
  ldap.profile.list: [default, secondary]
  domain.list: [acme]
scoped:
  default:
    ldap.serverUrls: ["ldaps://default.example.com"]
  secondary:
    ldap.serverUrls: ["ldaps://secondary.example.com"]
"#;

/// A temp directory holding `schema.yaml` and `settings.yaml`.
///
/// Keep the context alive until all file I/O of the test has completed.
pub struct TestContext {
    pub dir: TempDir,
    pub schema_path: PathBuf,
    pub store_path: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let schema_path = dir.path().join("schema.yaml");
        let store_path = dir.path().join("settings.yaml");
        fs::write(&schema_path, SCHEMA_YAML).expect("Failed to write schema");
        fs::write(&store_path, SETTINGS_YAML).expect("Failed to write settings");
        Self {
            dir,
            schema_path,
            store_path,
        }
    }

    pub fn catalog(&self) -> SchemaCatalog {
        SchemaCatalog::load(&self.schema_path).expect("Failed to load schema")
    }

    pub fn store(&self) -> FileStore {
        FileStore::new(&self.store_path).with_catalog(&self.catalog())
    }

    /// Current on-disk settings
    pub fn stored(&self) -> StoredSettings {
        StoredSettings::load(&self.store_path).expect("Failed to load settings")
    }

    pub fn stored_values(&self, key: &str) -> Vec<String> {
        self.stored().get(&SettingKey::from(key))
    }

    /// Run the CLI with `args` (after the path flags) and `stdin`; returns
    /// the command result and everything written to stdout.
    pub async fn run_cli(&self, args: &[&str], stdin: &str) -> (anyhow::Result<()>, String) {
        let schema = self.schema_path.to_string_lossy().to_string();
        let store = self.store_path.to_string_lossy().to_string();
        let mut argv = vec!["cfg-editor", "--schema", &schema, "--store", &store];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("Failed to parse arguments");

        let mut input = stdin.as_bytes();
        let mut out = Vec::new();
        let result = cli::run(cli, &mut input, &mut out).await;
        (result, String::from_utf8(out).expect("utf-8 output"))
    }
}

/// Owned strings from literals
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
