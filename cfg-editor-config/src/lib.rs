//! Configuration data model for the cfg-editor string-array editor.
//!
//! This crate holds everything the list editor needs that is not UI:
//!
//! - Setting keys, syntax kinds and schema flags
//! - Setting schemas and the schema catalog
//! - List mutation primitives (move, remove, add/replace)
//! - Distinguished-name parsing for LDAP DN settings
//! - The stored-settings document persisted by file-backed stores
//! - Platform paths for default schema/store locations

pub mod document;
pub mod dn;
pub mod error;
pub mod list_ops;
pub mod paths;
pub mod schema;
mod types;

pub use document::{IdentifierError, StoredSettings};
pub use dn::{DistinguishedName, DnError, Rdn};
pub use error::ConfigError;
pub use list_ops::{EditTarget, ListError, apply_edit, move_item, remove_item};
pub use schema::{SchemaCatalog, SettingSchema};
pub use types::{CopyKind, SettingFlag, SettingKey, SettingSyntax};
