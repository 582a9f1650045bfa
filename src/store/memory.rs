use super::error::StoreError;
use super::state::StoreState;
use super::types::{NewUser, Role, User, UserId, UserLookup};
use super::IdentityStore;
use async_trait::async_trait;
use tokio::sync::Mutex;

/// Identity store held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: Mutex<StoreState>,
}

impl MemoryStore {
    #[must_use]
    pub fn new(state: StoreState) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    /// A store with the given roles and no users
    #[must_use]
    pub fn with_roles(roles: &[&str]) -> Self {
        Self::new(StoreState::with_roles(roles))
    }

    /// Copy of the current document
    pub async fn snapshot(&self) -> StoreState {
        self.state.lock().await.clone()
    }
}

#[async_trait]
impl IdentityStore for MemoryStore {
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, StoreError> {
        Ok(self.state.lock().await.find_user(lookup))
    }

    async fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError> {
        Ok(self.state.lock().await.find_role(name))
    }

    async fn add_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.state.lock().await.add_user(new_user)
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        self.state.lock().await.update_user(user)
    }

    async fn delete_user(&self, user: &User) -> Result<(), StoreError> {
        self.state.lock().await.delete_user(user)
    }

    async fn reset_password(&self, id: UserId, secret: &str) -> Result<(), StoreError> {
        self.state.lock().await.reset_password(id, secret)
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.state.lock().await.list_users())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        Ok(self.state.lock().await.roles.clone())
    }
}
