//! Default file locations (XDG convention on every platform but Windows).

use std::path::PathBuf;

const APP_DIR: &str = "cfg-editor";

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join(APP_DIR)
        } else {
            PathBuf::from(".")
        }
    }
    #[cfg(not(target_os = "windows"))]
    {
        // ~/.config/cfg-editor
        if let Some(home_dir) = dirs::home_dir() {
            home_dir.join(".config").join(APP_DIR)
        } else {
            PathBuf::from(".")
        }
    }
}

/// Default schema catalog path
pub fn schema_path() -> PathBuf {
    config_dir().join("schema.yaml")
}

/// Default stored-settings path
pub fn store_path() -> PathBuf {
    config_dir().join("settings.yaml")
}
