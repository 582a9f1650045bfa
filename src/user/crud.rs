//! User list, create and password reset operations.

use super::error::UserError;
use super::lookup::resolve_role;
use crate::store::{IdentityStore, NewUser, RoleSet, User, UserLookup};
use tracing::info;

/// Options for creating a user
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: String,
    pub password: String,
}

/// Result of creating a user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Created(User),
    /// A user with this username was already present; nothing was written
    AlreadyExists(String),
}

/// List all users in store order
pub async fn list_users(store: &dyn IdentityStore) -> Result<Vec<User>, UserError> {
    Ok(store.list_users().await?)
}

/// Create a new user with a single role
pub async fn create_user(
    store: &dyn IdentityStore,
    request: CreateUserRequest,
) -> Result<CreateOutcome, UserError> {
    let role = resolve_role(store, &request.role).await?;

    let existing = store
        .find_user(&UserLookup::Username(request.username.clone()))
        .await?;
    if existing.is_some() {
        info!("User {} already exists, skipping create", request.username);
        return Ok(CreateOutcome::AlreadyExists(request.username));
    }

    let user = store
        .add_user(NewUser {
            username: request.username,
            email: request.email,
            first_name: request.first_name,
            last_name: request.last_name,
            roles: RoleSet::empty().with_role(&role.name),
            password: Some(request.password),
        })
        .await?;

    info!("Created user {} with role {}", user.username, role.name);
    Ok(CreateOutcome::Created(user))
}

/// Replace the user's credential
pub async fn reset_password(
    store: &dyn IdentityStore,
    user: &User,
    secret: &str,
) -> Result<(), UserError> {
    store.reset_password(user.id, secret).await?;
    info!("Reset password for user {}", user.username);
    Ok(())
}
