//! Filesystem locations for device-local Espiritnu data.

use std::env;
use std::path::PathBuf;

/// Application directory name under the platform data directory.
const APP_DIR: &str = "Espiritnu";

/// Returns the directory holding the local SQLite database.
///
/// Uses the platform-specific data directory, creating it if necessary.
/// `ESPIRITNU_STORAGE_DIR` overrides the location entirely.
///
/// # Returns
/// String path to the data directory.
pub fn db_storage_path() -> String {
    storage_dir(env::var("ESPIRITNU_STORAGE_DIR").ok())
        .to_string_lossy()
        .to_string()
}

/// Resolve and create the data directory, preferring `override_dir`.
fn storage_dir(override_dir: Option<String>) -> PathBuf {
    let data_dir = override_dir
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| platform_data_dir().join(APP_DIR));

    // Create the directory if it doesn't exist
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        log::warn!("Could not create data directory {}: {}", data_dir.display(), e);
    }

    data_dir
}

/// Platform data directory.
///
/// On Linux: ~/.local/share
/// On macOS: ~/Library/Application Support
/// On Windows: %LOCALAPPDATA%
fn platform_data_dir() -> PathBuf {
    if cfg!(target_os = "linux") {
        let home = env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home).join(".local").join("share")
    } else if cfg!(target_os = "macos") {
        let home = env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home)
            .join("Library")
            .join("Application Support")
    } else if cfg!(target_os = "windows") {
        let local_app_data = env::var("LOCALAPPDATA")
            .unwrap_or_else(|_| env::var("APPDATA").unwrap_or_else(|_| "C:\\tmp".to_string()));
        PathBuf::from(local_app_data)
    } else {
        PathBuf::from("/tmp")
    }
}
