mod atomic;
mod hash;

pub use atomic::atomic_write;
pub use hash::salted_digest;

use std::path::{Path, PathBuf};

/// The name of the per-user application folder
pub const APP_FOLDER: &str = ".identity-admin";

/// The name of the JSON document backing the file store
pub const STORE_FILE: &str = "identity.json";

/// Get the application home (`~/.identity-admin`), falling back to the
/// current directory when no home directory can be determined.
#[must_use]
pub fn get_app_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_FOLDER)
}

/// Default location of the store document
#[must_use]
pub fn default_store_path() -> PathBuf {
    get_store_path(&get_app_home())
}

/// Get the path to the store document inside a directory
#[must_use]
pub fn get_store_path(dir: &Path) -> PathBuf {
    dir.join(STORE_FILE)
}

/// Get current timestamp in ISO 8601 format
#[must_use]
pub fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339()
}
