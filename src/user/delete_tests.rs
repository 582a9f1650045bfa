use super::*;
use crate::store::{
    IdentityStore, MemoryStore, NewUser, Role, StoreError, User, UserId, UserLookup,
};
use async_trait::async_trait;

/// Wraps a memory store and refuses every delete request
struct RefusingDeletes(MemoryStore);

#[async_trait]
impl IdentityStore for RefusingDeletes {
    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<User>, StoreError> {
        self.0.find_user(lookup).await
    }
    async fn find_role(&self, name: &str) -> Result<Option<Role>, StoreError> {
        self.0.find_role(name).await
    }
    async fn add_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        self.0.add_user(new_user).await
    }
    async fn update_user(&self, user: &User) -> Result<(), StoreError> {
        self.0.update_user(user).await
    }
    async fn delete_user(&self, _user: &User) -> Result<(), StoreError> {
        Err(StoreError::Rejected("delete refused".to_string()))
    }
    async fn reset_password(&self, id: UserId, secret: &str) -> Result<(), StoreError> {
        self.0.reset_password(id, secret).await
    }
    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.0.list_users().await
    }
    async fn list_roles(&self) -> Result<Vec<Role>, StoreError> {
        self.0.list_roles().await
    }
}

fn alee() -> NewUser {
    NewUser {
        username: "alee".to_string(),
        email: "a@x.com".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        roles: vec!["Admin".to_string(), "Viewer".to_string()].into(),
        password: None,
    }
}

#[tokio::test]
async fn test_delete_user_removes_record() {
    let store = MemoryStore::with_roles(&["Admin", "Viewer"]);
    let user = store.add_user(alee()).await.unwrap();

    delete_user(&store, user).await.unwrap();

    assert!(list_users(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_delete_leaves_user_without_roles() {
    let store = RefusingDeletes(MemoryStore::with_roles(&["Admin", "Viewer"]));
    let user = store.add_user(alee()).await.unwrap();

    let result = delete_user(&store, user).await;
    assert!(matches!(
        result,
        Err(UserError::Store(StoreError::Rejected(_)))
    ));

    let remaining = find_user(&store, &UserLookup::Username("alee".to_string()))
        .await
        .unwrap();
    assert!(remaining.roles.is_empty());
}

#[tokio::test]
async fn test_delete_unknown_user_fails_before_delete_phase() {
    let store = MemoryStore::with_roles(&["Admin", "Viewer"]);
    let user = store.add_user(alee()).await.unwrap();
    let ghost = User {
        id: UserId(42),
        ..user
    };

    let result = delete_user(&store, ghost).await;
    assert!(matches!(
        result,
        Err(UserError::Store(StoreError::UnknownUser(UserId(42))))
    ));
    assert_eq!(list_users(&store).await.unwrap().len(), 1);
}
