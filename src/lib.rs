// Allow panic/unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(
    test,
    allow(
        clippy::panic,
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic_in_result_fn,
        clippy::unwrap_in_result,
        clippy::indexing_slicing
    )
)]

pub mod cli;
pub mod config;
pub mod export;
pub mod import;
pub mod logging;
pub mod store;
pub mod user;
pub mod utils;

// Re-export commonly used types
pub use config::{load_config, AdminConfig, ConfigError};
pub use export::{export_file, export_users, render_export, UserSnapshot};
pub use import::{import_file, import_users, ImportRecord, ImportSummary, ValidationReport};
pub use store::{
    FileStore, IdentityStore, MemoryStore, NewUser, Role, RoleSet, StoreError, StoreSession, User,
    UserId, UserLookup,
};
pub use user::{
    add_role, create_user, delete_user, find_user, remove_role, reset_password, CreateOutcome,
    CreateUserRequest, UserError,
};
