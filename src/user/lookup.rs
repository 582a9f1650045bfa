//! Single-user lookup and role resolution shared by the single-record operations.

use super::error::UserError;
use crate::store::{IdentityStore, Role, User, UserLookup};
use tracing::debug;

/// Turn the `--username` / `--email` pair into a lookup; exactly one must be set.
pub fn lookup_from_args(
    username: Option<&str>,
    email: Option<&str>,
) -> Result<UserLookup, UserError> {
    match (username, email) {
        (Some(_), Some(_)) => Err(UserError::ConflictingLookup),
        (Some(username), None) => Ok(UserLookup::Username(username.to_string())),
        (None, Some(email)) => Ok(UserLookup::Email(email.to_string())),
        (None, None) => Err(UserError::MissingLookup),
    }
}

/// Find a user, failing with `NotFound` if nobody matches
pub async fn find_user(store: &dyn IdentityStore, lookup: &UserLookup) -> Result<User, UserError> {
    debug!("Looking up user {:?}", lookup);
    store
        .find_user(lookup)
        .await?
        .ok_or_else(|| UserError::NotFound {
            key: lookup.key().to_string(),
        })
}

/// Resolve a role name, failing with `UnknownRole` and the list of valid names
pub async fn resolve_role(store: &dyn IdentityStore, name: &str) -> Result<Role, UserError> {
    if let Some(role) = store.find_role(name).await? {
        return Ok(role);
    }
    let valid = store
        .list_roles()
        .await?
        .into_iter()
        .map(|r| r.name)
        .collect();
    Err(UserError::UnknownRole {
        name: name.to_string(),
        valid,
    })
}
