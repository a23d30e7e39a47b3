// macOS keeps both config and data under Application Support.

use std::env;
use std::path::PathBuf;

use super::APP_DIR_TITLE;

/// `~/Library/Application Support/Bukubridge`
pub fn get_support_dir() -> PathBuf {
    PathBuf::from(env::var("HOME").unwrap_or_else(|_| String::from("/tmp")))
        .join("Library")
        .join("Application Support")
        .join(APP_DIR_TITLE)
}
