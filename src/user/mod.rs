//! User management operations.
//!
//! Single-record operations against an [`IdentityStore`](crate::store::IdentityStore):
//! - Looking up users by username or email
//! - Listing, creating, and resetting passwords
//! - Adding and removing a single role membership
//! - Deleting users

mod crud;
mod delete;
mod error;
mod lookup;
mod membership;

pub use crud::{create_user, list_users, reset_password, CreateOutcome, CreateUserRequest};
pub use delete::delete_user;
pub use error::UserError;
pub use lookup::{find_user, lookup_from_args, resolve_role};
pub use membership::{add_role, remove_role};

#[cfg(test)]
#[path = "delete_tests.rs"]
mod delete_tests;
