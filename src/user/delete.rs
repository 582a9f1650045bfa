//! User deletion.
//!
//! Deletion happens in two phases: the user's role memberships are cleared
//! and persisted, then the user record is deleted. The phases are not atomic.
//! If the delete request fails, the cleared memberships stay cleared and the
//! user remains in the store without roles.

use super::error::UserError;
use crate::store::{IdentityStore, RoleSet, User};
use tracing::{info, warn};

/// Delete a user after clearing its role memberships
pub async fn delete_user(store: &dyn IdentityStore, user: User) -> Result<(), UserError> {
    let username = user.username.clone();
    let cleared = user.with_roles(RoleSet::empty());
    store.update_user(&cleared).await?;

    if let Err(e) = store.delete_user(&cleared).await {
        warn!(
            "Deleting user {} failed after its roles were cleared: {}",
            username, e
        );
        return Err(e.into());
    }

    info!("Deleted user {}", username);
    Ok(())
}
