//! Identity store access.
//!
//! The rest of the crate talks to users and roles only through the
//! [`IdentityStore`] trait. Two backends are provided:
//! - [`FileStore`]: a JSON document on disk, written through on every mutation
//! - [`MemoryStore`]: an in-process store
//!
//! Operations borrow a store through a [`StoreSession`], which is released on
//! every exit path.

mod error;
mod file;
mod memory;
mod session;
mod state;
mod types;

pub use error::StoreError;
pub use file::FileStore;
pub use memory::MemoryStore;
pub use session::StoreSession;
pub use state::{StoreState, StoredUser, DEFAULT_ROLES};
pub use types::{NewUser, Role, RoleSet, User, UserId, UserLookup};

use async_trait::async_trait;
use std::sync::Arc;

/// Capability set every identity store backend provides
#[async_trait]
pub trait IdentityStore: Send + Sync {
    /// Find a single user by username or email
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, StoreError>;

    /// Find a role by its unique name
    async fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError>;

    /// Create a user; the store assigns the id
    async fn add_user(&self, new_user: NewUser) -> Result<User, StoreError>;

    /// Persist the given record over the stored user with the same id
    async fn update_user(&self, user: &User) -> Result<(), StoreError>;

    async fn delete_user(&self, user: &User) -> Result<(), StoreError>;

    async fn reset_password(&self, id: UserId, secret: &str) -> Result<(), StoreError>;

    /// All users, in store enumeration order
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError>;
}

/// A shared store is a store
#[async_trait]
impl<S: IdentityStore + ?Sized> IdentityStore for Arc<S> {
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, StoreError> {
        (**self).find_user(lookup).await
    }

    async fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError> {
        (**self).find_role(name).await
    }

    async fn add_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        (**self).add_user(new_user).await
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        (**self).update_user(user).await
    }

    async fn delete_user(&self, user: &User) -> Result<(), StoreError> {
        (**self).delete_user(user).await
    }

    async fn reset_password(&self, id: UserId, secret: &str) -> Result<(), StoreError> {
        (**self).reset_password(id, secret).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        (**self).list_users().await
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        (**self).list_roles().await
    }
}
