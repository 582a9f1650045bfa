//! Backend-independent store document and its mutation rules.
//!
//! Both backends hold a [`StoreState`]; `MemoryStore` keeps it in memory only,
//! `FileStore` writes it to disk after every successful mutation.

use super::error::StoreError;
use super::types::{NewUser, Role, RoleSet, User, UserId, UserLookup};
use crate::utils::{now_iso, salted_digest};
use serde::{Deserialize, Serialize};

/// Roles seeded into a freshly created store
pub const DEFAULT_ROLES: [&str; 5] = ["Admin", "Op", "User", "Viewer", "Public"];

/// A user record as persisted, including its credential
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub changed_on: String,
}

/// The whole store document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreState {
    pub next_id: u64,
    pub roles: Vec<Role>,
    pub users: Vec<StoredUser>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            roles: DEFAULT_ROLES.iter().map(|name| Role::new(*name)).collect(),
            users: Vec::new(),
        }
    }
}

fn hash_password(secret: &str) -> String {
    let salt = uuid::Uuid::new_v4().simple().to_string();
    salted_digest(&salt, secret)
}

impl StoreState {
    /// A store with the given roles and no users
    #[must_use]
    pub fn with_roles(roles: &[&str]) -> Self {
        Self {
            roles: roles.iter().map(|name| Role::new(*name)).collect(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn find_user(&self, lookup: &UserLookup) -> Option<User> {
        self.users
            .iter()
            .find(|u| lookup.matches(&u.user))
            .map(|u| u.user.clone())
    }

    #[must_use]
    pub fn find_role(&self, name: &str) -> Option<Role> {
        self.roles.iter().find(|r| r.name == name).cloned()
    }

    #[must_use]
    pub fn list_users(&self) -> Vec<User> {
        self.users.iter().map(|u| u.user.clone()).collect()
    }

    #[must_use]
    pub fn password_hash(&self, id: UserId) -> Option<&str> {
        self.users
            .iter()
            .find(|u| u.user.id == id)
            .and_then(|u| u.password_hash.as_deref())
    }

    fn ensure_unique(
        &self,
        field: &'static str,
        value: &str,
        except: Option<UserId>,
        key: fn(&User) -> &str,
    ) -> Result<(), StoreError> {
        let taken = self
            .users
            .iter()
            .any(|u| Some(u.user.id) != except && key(&u.user) == value);
        if taken {
            return Err(StoreError::Duplicate {
                field,
                value: value.to_string(),
            });
        }
        Ok(())
    }

    fn ensure_roles_exist(&self, roles: &RoleSet) -> Result<(), StoreError> {
        match roles.names().iter().find(|name| self.find_role(name).is_none()) {
            Some(missing) => Err(StoreError::Rejected(format!(
                "role '{missing}' does not exist"
            ))),
            None => Ok(()),
        }
    }

    fn position(&self, id: UserId) -> Result<usize, StoreError> {
        self.users
            .iter()
            .position(|u| u.user.id == id)
            .ok_or(StoreError::UnknownUser(id))
    }

    pub fn add_user(&mut self, new_user: NewUser) -> Result<User, StoreError> {
        if new_user.roles.is_empty() {
            return Err(StoreError::EmptyRoles);
        }
        self.ensure_unique("username", &new_user.username, None, |u| u.username.as_str())?;
        self.ensure_unique("email", &new_user.email, None, |u| u.email.as_str())?;
        self.ensure_roles_exist(&new_user.roles)?;

        let id = UserId(self.next_id);
        self.next_id = self.next_id.saturating_add(1);

        let user = User {
            id,
            username: new_user.username,
            email: new_user.email,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            roles: new_user.roles,
        };
        self.users.push(StoredUser {
            user: user.clone(),
            password_hash: new_user.password.as_deref().map(hash_password),
            changed_on: now_iso(),
        });
        Ok(user)
    }

    pub fn update_user(&mut self, user: &User) -> Result<(), StoreError> {
        let idx = self.position(user.id)?;
        self.ensure_unique("email", &user.email, Some(user.id), |u| u.email.as_str())?;
        self.ensure_roles_exist(&user.roles)?;

        let stored = self
            .users
            .get_mut(idx)
            .ok_or(StoreError::UnknownUser(user.id))?;
        if stored.user.username != user.username {
            return Err(StoreError::Rejected(format!(
                "username of user {} cannot be changed",
                user.id
            )));
        }
        stored.user = user.clone();
        stored.changed_on = now_iso();
        Ok(())
    }

    pub fn delete_user(&mut self, user: &User) -> Result<(), StoreError> {
        let idx = self.position(user.id)?;
        self.users.remove(idx);
        Ok(())
    }

    pub fn reset_password(&mut self, id: UserId, secret: &str) -> Result<(), StoreError> {
        let idx = self.position(id)?;
        let stored = self.users.get_mut(idx).ok_or(StoreError::UnknownUser(id))?;
        stored.password_hash = Some(hash_password(secret));
        stored.changed_on = now_iso();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str, email: &str, roles: &[&str]) -> NewUser {
        NewUser {
            username: username.to_string(),
            email: email.to_string(),
            first_name: "First".to_string(),
            last_name: "Last".to_string(),
            roles: roles.iter().map(ToString::to_string).collect::<Vec<_>>().into(),
            password: None,
        }
    }

    #[test]
    fn test_default_state_seeds_roles() {
        let state = StoreState::default();
        let names: Vec<&str> = state.roles.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, DEFAULT_ROLES);
        assert!(state.users.is_empty());
    }

    #[test]
    fn test_add_user_assigns_increasing_ids() {
        let mut state = StoreState::default();
        let a = state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();
        let b = state.add_user(new_user("b", "b@x.com", &["Viewer"])).unwrap();
        assert_eq!(a.id, UserId(1));
        assert_eq!(b.id, UserId(2));
    }

    #[test]
    fn test_add_user_rejects_duplicates() {
        let mut state = StoreState::default();
        state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();

        let dup_name = state.add_user(new_user("a", "other@x.com", &["Viewer"]));
        assert!(matches!(dup_name, Err(StoreError::Duplicate { field: "username", .. })));

        let dup_email = state.add_user(new_user("other", "a@x.com", &["Viewer"]));
        assert!(matches!(dup_email, Err(StoreError::Duplicate { field: "email", .. })));
    }

    #[test]
    fn test_add_user_requires_roles() {
        let mut state = StoreState::default();
        let result = state.add_user(new_user("a", "a@x.com", &[]));
        assert!(matches!(result, Err(StoreError::EmptyRoles)));
    }

    #[test]
    fn test_add_user_rejects_unknown_role() {
        let mut state = StoreState::default();
        let result = state.add_user(new_user("a", "a@x.com", &["Ghost"]));
        assert!(matches!(result, Err(StoreError::Rejected(_))));
    }

    #[test]
    fn test_password_is_hashed() {
        let mut state = StoreState::default();
        let mut fields = new_user("a", "a@x.com", &["Viewer"]);
        fields.password = Some("hunter2".to_string());
        let user = state.add_user(fields).unwrap();

        let hash = state.password_hash(user.id).unwrap();
        assert!(hash.starts_with("sha256$"));
        assert!(!hash.contains("hunter2"));
    }

    #[test]
    fn test_reset_password_replaces_hash() {
        let mut state = StoreState::default();
        let user = state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();
        assert!(state.password_hash(user.id).is_none());

        state.reset_password(user.id, "s3cret").unwrap();
        assert!(state.password_hash(user.id).is_some());

        assert!(matches!(
            state.reset_password(UserId(99), "x"),
            Err(StoreError::UnknownUser(UserId(99)))
        ));
    }

    #[test]
    fn test_update_user_allows_empty_roles() {
        let mut state = StoreState::default();
        let user = state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();

        state.update_user(&user.with_roles(RoleSet::empty())).unwrap();
        let stored = state.find_user(&UserLookup::Username("a".to_string())).unwrap();
        assert!(stored.roles.is_empty());
    }

    #[test]
    fn test_update_user_rejects_username_change() {
        let mut state = StoreState::default();
        let mut user = state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();
        user.username = "renamed".to_string();

        assert!(matches!(state.update_user(&user), Err(StoreError::Rejected(_))));
    }

    #[test]
    fn test_update_user_rejects_email_collision() {
        let mut state = StoreState::default();
        state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();
        let mut b = state.add_user(new_user("b", "b@x.com", &["Viewer"])).unwrap();
        b.email = "a@x.com".to_string();

        assert!(matches!(
            state.update_user(&b),
            Err(StoreError::Duplicate { field: "email", .. })
        ));
    }

    #[test]
    fn test_delete_user() {
        let mut state = StoreState::default();
        let user = state.add_user(new_user("a", "a@x.com", &["Viewer"])).unwrap();

        state.delete_user(&user).unwrap();
        assert!(state.list_users().is_empty());
        assert!(matches!(state.delete_user(&user), Err(StoreError::UnknownUser(_))));
    }
}
