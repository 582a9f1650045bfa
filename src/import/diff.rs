//! Create-or-update decision for a single import record.

use super::types::ImportRecord;
use crate::store::{IdentityStore, NewUser, RoleSet, User, UserLookup};
use crate::user::UserError;
use tracing::info;

/// What applying one record to the store will do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserAction {
    Create(NewUser),
    Update(User),
}

/// Decide how `record` maps onto the store, matching existing users by email.
///
/// A matched user keeps its id, username and email; its names and roles are
/// replaced wholesale. No values are compared, so an unchanged record still
/// yields an update.
pub async fn plan_user_action(
    store: &dyn IdentityStore,
    record: &ImportRecord,
    roles: RoleSet,
) -> Result<UserAction, UserError> {
    let existing = store
        .find_user(&UserLookup::Email(record.email.clone()))
        .await?;

    let Some(existing) = existing else {
        info!("Creating new user with email '{}'", record.email);
        return Ok(UserAction::Create(NewUser {
            username: record.username.clone(),
            email: record.email.clone(),
            first_name: record.firstname.clone(),
            last_name: record.lastname.clone(),
            roles,
            password: None,
        }));
    };

    info!("Found existing user with email '{}'", record.email);
    if existing.username != record.username {
        return Err(UserError::IdentityConflict {
            email: record.email.clone(),
        });
    }

    Ok(UserAction::Update(
        existing
            .with_roles(roles)
            .with_names(record.firstname.clone(), record.lastname.clone()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn record(username: &str, roles: &[&str]) -> ImportRecord {
        ImportRecord {
            id: None,
            firstname: "Ann".to_string(),
            lastname: "Lee".to_string(),
            username: username.to_string(),
            email: "a@x.com".to_string(),
            roles: roles.iter().map(ToString::to_string).collect(),
        }
    }

    fn role_set(names: &[&str]) -> RoleSet {
        names.iter().map(ToString::to_string).collect::<Vec<_>>().into()
    }

    async fn store_with_alee() -> (MemoryStore, User) {
        let store = MemoryStore::with_roles(&["Admin", "Viewer"]);
        let user = store
            .add_user(NewUser {
                username: "alee".to_string(),
                email: "a@x.com".to_string(),
                first_name: "Ann".to_string(),
                last_name: "Lee".to_string(),
                roles: role_set(&["Viewer"]),
                password: None,
            })
            .await
            .unwrap();
        (store, user)
    }

    #[tokio::test]
    async fn test_unknown_email_plans_create() {
        let store = MemoryStore::with_roles(&["Viewer"]);
        let action = plan_user_action(&store, &record("alee", &["Viewer"]), role_set(&["Viewer"]))
            .await
            .unwrap();

        let UserAction::Create(new_user) = action else {
            panic!("expected Create");
        };
        assert_eq!(new_user.username, "alee");
        assert_eq!(new_user.first_name, "Ann");
        assert_eq!(new_user.roles.names(), ["Viewer"]);
        assert!(new_user.password.is_none());
    }

    #[tokio::test]
    async fn test_matching_email_plans_full_replacement() {
        let (store, existing) = store_with_alee().await;
        let mut incoming = record("alee", &["Admin"]);
        incoming.firstname = "Anne".to_string();

        let action = plan_user_action(&store, &incoming, role_set(&["Admin"]))
            .await
            .unwrap();

        let UserAction::Update(user) = action else {
            panic!("expected Update");
        };
        assert_eq!(user.id, existing.id);
        assert_eq!(user.username, "alee");
        assert_eq!(user.first_name, "Anne");
        assert_eq!(user.roles.names(), ["Admin"]);
    }

    #[tokio::test]
    async fn test_unchanged_record_still_plans_update() {
        let (store, existing) = store_with_alee().await;

        let action = plan_user_action(&store, &record("alee", &["Viewer"]), role_set(&["Viewer"]))
            .await
            .unwrap();

        assert_eq!(action, UserAction::Update(existing));
    }

    #[tokio::test]
    async fn test_username_change_is_conflict() {
        let (store, _) = store_with_alee().await;

        let result =
            plan_user_action(&store, &record("aleesmith", &["Viewer"]), role_set(&["Viewer"])).await;

        assert!(matches!(
            result,
            Err(UserError::IdentityConflict { ref email }) if email == "a@x.com"
        ));
    }
}
