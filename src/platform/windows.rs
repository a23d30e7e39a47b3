// Windows keeps both config and data under the roaming AppData folder.

use std::env;
use std::path::PathBuf;

use super::APP_DIR_TITLE;

/// `%APPDATA%/Bukubridge`
pub fn get_appdata_dir() -> PathBuf {
    let appdata =
        env::var("APPDATA").unwrap_or_else(|_| String::from("C:\\Users\\Default\\AppData\\Roaming"));
    PathBuf::from(appdata).join(APP_DIR_TITLE)
}
