// Platform paths for the bookmark bridge.
//
// Uses `cfg(target_os)` to pick the platform implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Directory name used on case-sensitive platforms.
pub const APP_DIR: &str = "bukubridge";
/// Directory name used on macOS and Windows.
pub const APP_DIR_TITLE: &str = "Bukubridge";

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DATABASE_FILE_NAME: &str = "bukubridge.db";

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/bukubridge` or `~/.config/bukubridge`
/// - **macOS**: `~/Library/Application Support/Bukubridge`
/// - **Windows**: `%APPDATA%/Bukubridge`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_appdata_dir()
    }
}

/// Returns the platform-specific data directory holding the local cache.
///
/// - **Linux**: `$XDG_DATA_HOME/bukubridge` or `~/.local/share/bukubridge`
/// - **macOS**: `~/Library/Application Support/Bukubridge`
/// - **Windows**: `%APPDATA%/Bukubridge`
pub fn get_data_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_data_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_support_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_appdata_dir()
    }
}

/// Default location of the JSON config file.
pub fn default_config_path() -> PathBuf {
    get_config_dir().join(CONFIG_FILE_NAME)
}

/// Default location of the SQLite cache.
pub fn default_database_path() -> PathBuf {
    get_data_dir().join(DATABASE_FILE_NAME)
}
