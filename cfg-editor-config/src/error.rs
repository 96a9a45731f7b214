//! Typed error variants for the cfg-editor-config crate.
//!
//! Provides structured error types for schema catalog and stored-settings
//! I/O. Callers that use `anyhow` get these coerced automatically through
//! the `From` impl `anyhow` provides for any `std::error::Error`.
//!
//! # Example
//!
//! ```rust,no_run
//! use cfg_editor_config::ConfigError;
//!
//! fn check_load_err(e: &anyhow::Error) {
//!     if let Some(cfg_err) = e.downcast_ref::<ConfigError>() {
//!         match cfg_err {
//!             ConfigError::Io(io) => eprintln!("I/O error: {io}"),
//!             ConfigError::Parse(p) => eprintln!("YAML parse error: {p}"),
//!             ConfigError::Validation(msg) => eprintln!("Validation: {msg}"),
//!         }
//!     }
//! }
//! ```

use std::fmt;

/// Errors that can occur when loading or saving schemas and stored settings.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred reading or writing a file.
    Io(std::io::Error),

    /// The file contained invalid YAML that could not be parsed.
    Parse(serde_yaml_ng::Error),

    /// A schema or document failed semantic validation.
    ///
    /// The inner string names the offending setting and the problem.
    Validation(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "YAML parse error: {e}"),
            ConfigError::Validation(msg) => write!(f, "Validation error: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_yaml_ng::Error> for ConfigError {
    fn from(e: serde_yaml_ng::Error) -> Self {
        ConfigError::Parse(e)
    }
}
