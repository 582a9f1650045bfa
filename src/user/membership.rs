//! Single-role membership changes.
//!
//! Both operations are checked: adding a role the user already holds, or
//! removing one they do not hold, is an error rather than a silent no-op.

use super::error::UserError;
use super::lookup::resolve_role;
use crate::store::{IdentityStore, User};
use tracing::info;

/// Add one role to a user and persist the new role set
pub async fn add_role(
    store: &dyn IdentityStore,
    user: User,
    role_name: &str,
) -> Result<User, UserError> {
    let role = resolve_role(store, role_name).await?;
    if user.roles.contains(&role.name) {
        return Err(UserError::AlreadyMember {
            username: user.username,
            role: role.name,
        });
    }

    let roles = user.roles.with_role(&role.name);
    let updated = user.with_roles(roles);
    store.update_user(&updated).await?;

    info!("Added user {} to role {}", updated.username, role.name);
    Ok(updated)
}

/// Remove one role from a user and persist the new role set
pub async fn remove_role(
    store: &dyn IdentityStore,
    user: User,
    role_name: &str,
) -> Result<User, UserError> {
    let role = resolve_role(store, role_name).await?;
    if !user.roles.contains(&role.name) {
        return Err(UserError::NotMember {
            username: user.username,
            role: role.name,
        });
    }

    let roles = user.roles.without_role(&role.name);
    let updated = user.with_roles(roles);
    store.update_user(&updated).await?;

    info!("Removed user {} from role {}", updated.username, role.name);
    Ok(updated)
}
