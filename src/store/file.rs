//! JSON-document identity store.
//!
//! The document is loaded once when the store is opened. Every mutation is
//! applied to a copy, written to disk atomically, and only then committed in
//! memory, so a failed write leaves both the file and the in-memory view
//! unchanged.

use super::error::StoreError;
use super::state::StoreState;
use super::types::{NewUser, Role, User, UserId, UserLookup};
use super::IdentityStore;
use crate::utils::atomic_write;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// Identity store persisted as a single JSON file
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    state: Mutex<StoreState>,
}

async fn write_state(path: &Path, state: &StoreState) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(path, &content).await?;
    Ok(())
}

impl FileStore {
    /// Open the store at `path`, seeding a new document with the default
    /// roles if the file does not exist yet.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        let state = if fs::try_exists(path).await? {
            let content = fs::read_to_string(path).await?;
            let state: StoreState = serde_json::from_str(&content)?;
            debug!(
                "Loaded identity store {} ({} users, {} roles)",
                path.display(),
                state.users.len(),
                state.roles.len()
            );
            state
        } else {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).await?;
            }
            let state = StoreState::default();
            write_state(path, &state).await?;
            info!("Initialized identity store at {}", path.display());
            state
        };

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(state),
        })
    }

    /// Location of the backing document
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn mutate<T, F>(&self, apply: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut StoreState) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = apply(&mut next)?;
        write_state(&self.path, &next).await?;
        *state = next;
        Ok(value)
    }
}

#[async_trait]
impl IdentityStore for FileStore {
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, StoreError> {
        Ok(self.state.lock().await.find_user(lookup))
    }

    async fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError> {
        Ok(self.state.lock().await.find_role(name))
    }

    async fn add_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.mutate(|state| state.add_user(new_user)).await
    }

    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        self.mutate(|state| state.update_user(user)).await
    }

    async fn delete_user(&self, user: &User) -> Result<(), StoreError> {
        self.mutate(|state| state.delete_user(user)).await
    }

    async fn reset_password(&self, id: UserId, secret: &str) -> Result<(), StoreError> {
        self.mutate(|state| state.reset_password(id, secret)).await
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.state.lock().await.list_users())
    }

    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        Ok(self.state.lock().await.roles.clone())
    }
}
