use super::types::UserId;
use thiserror::Error;

/// Errors raised by an identity store backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("A user with {field} '{value}' already exists")]
    Duplicate { field: &'static str, value: String },

    #[error("User with id {0} does not exist in the store")]
    UnknownUser(UserId),

    #[error("A user must be created with at least one role")]
    EmptyRoles,

    #[error("Store rejected the request: {0}")]
    Rejected(String),
}
