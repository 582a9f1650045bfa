//! Identity store type definitions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Store-assigned user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub u64);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A role known to the store. Permissions are owned by the store and are
/// carried through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permissions: Vec<String>,
}

impl Role {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            permissions: Vec::new(),
        }
    }
}

/// An ordered, duplicate-free set of role names.
///
/// Never edited in place: every change produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    #[must_use]
    pub fn empty() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|r| r == name)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Role names in assignment order
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// A copy of this set with `name` appended (unchanged if already present)
    #[must_use]
    pub fn with_role(&self, name: &str) -> Self {
        let mut names = self.0.clone();
        if !self.contains(name) {
            names.push(name.to_string());
        }
        Self(names)
    }

    /// A copy of this set without `name`
    #[must_use]
    pub fn without_role(&self, name: &str) -> Self {
        Self(self.0.iter().filter(|r| *r != name).cloned().collect())
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(names: Vec<String>) -> Self {
        let mut set: Vec<String> = Vec::with_capacity(names.len());
        for name in names {
            if !set.contains(&name) {
                set.push(name);
            }
        }
        Self(set)
    }
}

impl From<RoleSet> for Vec<String> {
    fn from(set: RoleSet) -> Self {
        set.0
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter()
            .map(|r| r.name)
            .collect::<Vec<_>>()
            .into()
    }
}

impl fmt::Display for RoleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(", "))
    }
}

/// A user account as held by the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: RoleSet,
}

impl User {
    /// Replace the role set, returning the updated user
    #[must_use]
    pub fn with_roles(self, roles: RoleSet) -> Self {
        Self { roles, ..self }
    }

    /// Replace first and last name, returning the updated user
    #[must_use]
    pub fn with_names(self, first_name: String, last_name: String) -> Self {
        Self {
            first_name,
            last_name,
            ..self
        }
    }
}

/// Fields for a user that does not exist yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub roles: RoleSet,
    pub password: Option<String>,
}

/// How to find a single user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserLookup {
    Username(String),
    Email(String),
}

impl UserLookup {
    /// The value being looked up
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Username(k) | Self::Email(k) => k,
        }
    }

    #[must_use]
    pub fn matches(&self, user: &User) -> bool {
        match self {
            Self::Username(name) => user.username == *name,
            Self::Email(email) => user.email == *email,
        }
    }
}
