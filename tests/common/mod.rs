//! Common test utilities

use identity_admin::store::FileStore;
use identity_admin::utils::get_store_path;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Create a temporary directory for testing
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Path of the store document inside a test directory
pub fn store_path(dir: &Path) -> PathBuf {
    get_store_path(dir)
}

/// Open (or seed) the file store inside a test directory
pub async fn open_store(dir: &Path) -> FileStore {
    FileStore::open(&store_path(dir))
        .await
        .expect("Failed to open identity store")
}

/// One import record with the given identity and roles
#[allow(dead_code)] // Not every integration test builds records
pub fn record(username: &str, email: &str, roles: &[&str]) -> Value {
    json!({
        "firstname": "First",
        "lastname": "Last",
        "username": username,
        "email": email,
        "roles": roles
    })
}
