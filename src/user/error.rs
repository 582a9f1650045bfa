use crate::import::ValidationReport;
use crate::store::StoreError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by user and role-membership operations
#[derive(Error, Debug)]
pub enum UserError {
    #[error("Input file didn't pass validation. See below:\n{0}")]
    Validation(ValidationReport),

    #[error("\"{name}\" is not a valid role. Valid roles are: {}", valid.join(", "))]
    UnknownRole { name: String, valid: Vec<String> },

    #[error("Changing the username is not allowed - please delete and recreate the user with email '{email}'")]
    IdentityConflict { email: String },

    #[error("User \"{username}\" is already a member of role \"{role}\"")]
    AlreadyMember { username: String, role: String },

    #[error("User \"{username}\" is not a member of role \"{role}\"")]
    NotMember { username: String, role: String },

    #[error("User \"{key}\" does not exist")]
    NotFound { key: String },

    #[error("Missing args: must supply one of --username or --email")]
    MissingLookup,

    #[error("Conflicting args: must supply either --username or --email, but not both")]
    ConflictingLookup,

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("File '{}' does not exist", path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to read file '{}': {source}", path.display())]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("File '{}' is not valid JSON. Error: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
