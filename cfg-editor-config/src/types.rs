//! Core setting types: keys, syntax kinds, schema flags and copy kinds.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

// ============================================================================
// Setting Key
// ============================================================================

/// Opaque identifier of a configuration item, e.g. `"ldap.profile.list"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingKey(String);

impl SettingKey {
    /// Create a key from anything string-like
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SettingKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for SettingKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for SettingKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

// ============================================================================
// Syntax
// ============================================================================

/// Schema-declared category of a list setting.
///
/// Every affordance and action decision in the list editor matches on this
/// enum exhaustively, so a new kind cannot silently fall through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SettingSyntax {
    /// Plain list of free-text strings (also used for LDAP DN lists)
    #[default]
    StringArray,
    /// List of profile identifiers
    Profile,
    /// List of domain identifiers
    Domain,
}

impl SettingSyntax {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            SettingSyntax::StringArray => "String List",
            SettingSyntax::Profile => "Profile List",
            SettingSyntax::Domain => "Domain List",
        }
    }

    /// Whether list items can be edited as free text in place.
    pub fn allows_inline_edit(&self) -> bool {
        match self {
            SettingSyntax::StringArray => true,
            SettingSyntax::Profile | SettingSyntax::Domain => false,
        }
    }

    /// Whether move up/down affordances exist at all for this syntax.
    pub fn allows_reorder(&self) -> bool {
        match self {
            SettingSyntax::StringArray | SettingSyntax::Profile => true,
            SettingSyntax::Domain => false,
        }
    }

    /// The server-side copy action for identifier lists.
    pub fn copy_kind(&self) -> Option<CopyKind> {
        match self {
            SettingSyntax::StringArray => None,
            SettingSyntax::Profile => Some(CopyKind::Profile),
            SettingSyntax::Domain => Some(CopyKind::Domain),
        }
    }

    /// Label of the add button
    pub fn add_label(&self) -> &'static str {
        match self {
            SettingSyntax::Profile => "Add Profile",
            SettingSyntax::StringArray | SettingSyntax::Domain => "Add Value",
        }
    }

    /// Profiles are managed outside the ordinary reset/help/modified chrome.
    pub fn shows_header_chrome(&self) -> bool {
        !matches!(self, SettingSyntax::Profile)
    }

    /// A successful write of this syntax changes the editor's structure, so
    /// the host must navigate back to the editor root.
    pub fn navigates_after_write(&self) -> bool {
        matches!(self, SettingSyntax::Profile)
    }
}

/// Which identifier family a copy request creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyKind {
    Profile,
    Domain,
}

impl CopyKind {
    /// Name of the store action performing the copy
    pub fn action_name(&self) -> &'static str {
        match self {
            CopyKind::Profile => "copyProfile",
            CopyKind::Domain => "copyDomain",
        }
    }

    /// Lowercase noun used in dialog text
    pub fn noun(&self) -> &'static str {
        match self {
            CopyKind::Profile => "profile",
            CopyKind::Domain => "domain",
        }
    }

    /// Title of the copy dialog
    pub fn dialog_title(&self) -> &'static str {
        match self {
            CopyKind::Profile => "Copy Profile",
            CopyKind::Domain => "Copy Domain",
        }
    }
}

// ============================================================================
// Flags
// ============================================================================

/// Tag attached to a setting schema.
///
/// Unknown tags are preserved verbatim so catalogs written for newer editors
/// still load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SettingFlag {
    /// Values are LDAP distinguished names and use the DN editor
    LdapDnSyntax,
    /// Any other tag
    Other(String),
}

impl SettingFlag {
    pub fn as_str(&self) -> &str {
        match self {
            SettingFlag::LdapDnSyntax => "ldapDNsyntax",
            SettingFlag::Other(tag) => tag,
        }
    }
}

impl From<String> for SettingFlag {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "ldapDNsyntax" => SettingFlag::LdapDnSyntax,
            _ => SettingFlag::Other(tag),
        }
    }
}

impl From<SettingFlag> for String {
    fn from(flag: SettingFlag) -> Self {
        flag.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_affordance_table() {
        assert!(SettingSyntax::StringArray.allows_inline_edit());
        assert!(!SettingSyntax::Profile.allows_inline_edit());
        assert!(!SettingSyntax::Domain.allows_inline_edit());

        assert!(SettingSyntax::StringArray.allows_reorder());
        assert!(SettingSyntax::Profile.allows_reorder());
        assert!(!SettingSyntax::Domain.allows_reorder());

        assert_eq!(SettingSyntax::StringArray.copy_kind(), None);
        assert_eq!(SettingSyntax::Profile.copy_kind(), Some(CopyKind::Profile));
        assert_eq!(SettingSyntax::Domain.copy_kind(), Some(CopyKind::Domain));
    }

    #[test]
    fn test_add_label_differs_for_profiles() {
        assert_eq!(SettingSyntax::Profile.add_label(), "Add Profile");
        assert_eq!(SettingSyntax::StringArray.add_label(), "Add Value");
        assert_eq!(SettingSyntax::Domain.add_label(), "Add Value");
    }

    #[test]
    fn test_syntax_serde_names() {
        let yaml = serde_yaml_ng::to_string(&SettingSyntax::StringArray).expect("serialize");
        assert_eq!(yaml.trim(), "STRING_ARRAY");
        let parsed: SettingSyntax = serde_yaml_ng::from_str("DOMAIN").expect("deserialize");
        assert_eq!(parsed, SettingSyntax::Domain);
    }

    #[test]
    fn test_flag_roundtrip_preserves_unknown_tags() {
        let flags: Vec<SettingFlag> =
            serde_yaml_ng::from_str("[ldapDNsyntax, emailSyntax]").expect("deserialize");
        assert_eq!(flags[0], SettingFlag::LdapDnSyntax);
        assert_eq!(flags[1], SettingFlag::Other("emailSyntax".to_string()));
        assert_eq!(flags[1].as_str(), "emailSyntax");
    }

    #[test]
    fn test_setting_key_borrow_lookup() {
        let mut map = std::collections::HashMap::new();
        map.insert(SettingKey::from("a.b"), 1);
        assert_eq!(map.get("a.b"), Some(&1));
        assert_eq!(SettingKey::new("a.b").to_string(), "a.b");
    }
}
