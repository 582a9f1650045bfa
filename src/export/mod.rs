//! Snapshot export of every user in the store.
//!
//! The rendered document is a JSON array whose objects have their keys in
//! lexical order and are indented by four spaces, so successive exports diff
//! cleanly. The field names mirror the import schema, which means an export
//! can be fed straight back into an import.

use crate::store::{IdentityStore, User, UserId};
use crate::user::UserError;
use crate::utils::atomic_write;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// One exported user. Fields are declared in lexical order, which is the
/// order they are serialized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSnapshot {
    pub email: String,
    pub firstname: String,
    pub id: UserId,
    pub lastname: String,
    pub roles: Vec<String>,
    pub username: String,
}

impl From<User> for UserSnapshot {
    fn from(user: User) -> Self {
        Self {
            email: user.email,
            firstname: user.first_name,
            id: user.id,
            lastname: user.last_name,
            roles: user.roles.into(),
            username: user.username,
        }
    }
}

/// Snapshot every user, in store enumeration order
pub async fn export_users(store: &dyn IdentityStore) -> Result<Vec<UserSnapshot>, UserError> {
    let users = store.list_users().await?;
    Ok(users.into_iter().map(UserSnapshot::from).collect())
}

/// Render snapshots as a key-sorted JSON array with 4-space indentation
pub fn render_export(snapshots: &[UserSnapshot]) -> Result<String, UserError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    snapshots.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| {
        UserError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}

/// Export every user to `path`, returning how many were written
pub async fn export_file(store: &dyn IdentityStore, path: &Path) -> Result<usize, UserError> {
    let snapshots = export_users(store).await?;
    let content = render_export(&snapshots)?;
    atomic_write(path, &content).await?;

    info!("Exported {} users to {}", snapshots.len(), path.display());
    Ok(snapshots.len())
}
