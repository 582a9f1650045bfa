//! Command-line surface.
//!
//! Argument definitions live here; [`commands::run`] executes a parsed command
//! against an open store.

pub mod commands;
mod output;
mod password;

pub use commands::run;
pub use output::{render_user_table, OutputFormat};
pub use password::{generate_password, PasswordArgs};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// identity-admin - manage users and role memberships in an identity store
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path of the JSON identity store document
    #[arg(long, global = true, env = "IDENTITY_ADMIN_STORE")]
    pub store: Option<PathBuf>,

    /// Config file (default: ~/.identity-admin/config.toml)
    #[arg(long, global = true, env = "IDENTITY_ADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Custom log directory (default: ~/.identity-admin/logs)
    #[arg(long, global = true, env = "IDENTITY_ADMIN_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    #[arg(long, global = true, env = "IDENTITY_ADMIN_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Enable JSON log format
    #[arg(long, global = true, env = "IDENTITY_ADMIN_LOG_JSON")]
    pub log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, global = true, env = "IDENTITY_ADMIN_LOG_ROTATION")]
    pub log_rotation: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List users
    List(ListArgs),
    /// Create a user
    Create(CreateArgs),
    /// Delete a user
    Delete(UserSelector),
    /// Reset a user's password
    ResetPassword(ResetPasswordArgs),
    /// Add a role to a user
    AddRole(RoleArgs),
    /// Remove a role from a user
    RemoveRole(RoleArgs),
    /// Export all users to a JSON file
    Export(FileArgs),
    /// Import users from a JSON file, creating or updating them by email
    Import(FileArgs),
}

impl Command {
    /// Short name used to label the store session
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Create(_) => "create",
            Self::Delete(_) => "delete",
            Self::ResetPassword(_) => "reset-password",
            Self::AddRole(_) => "add-role",
            Self::RemoveRole(_) => "remove-role",
            Self::Export(_) => "export",
            Self::Import(_) => "import",
        }
    }
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    pub output: OutputFormat,
}

/// Selects one user by username or email
#[derive(Args, Debug)]
pub struct UserSelector {
    /// Username of the user
    #[arg(short, long)]
    pub username: Option<String>,

    /// Email of the user
    #[arg(short, long)]
    pub email: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Username of the user
    #[arg(short, long)]
    pub username: String,

    /// First name of the user
    #[arg(short, long)]
    pub firstname: String,

    /// Last name of the user
    #[arg(short, long)]
    pub lastname: String,

    /// Email of the user
    #[arg(short, long)]
    pub email: String,

    /// Role of the user
    #[arg(short, long)]
    pub role: String,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Args, Debug)]
pub struct ResetPasswordArgs {
    #[command(flatten)]
    pub user: UserSelector,

    #[command(flatten)]
    pub password: PasswordArgs,
}

#[derive(Args, Debug)]
pub struct RoleArgs {
    #[command(flatten)]
    pub user: UserSelector,

    /// Role name
    #[arg(short, long)]
    pub role: String,
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// JSON file path
    pub file: PathBuf,
}
