#![allow(clippy::indexing_slicing)]
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use common::{create_test_dir, open_store};
use identity_admin::store::{IdentityStore, UserLookup};
use identity_admin::user::{
    add_role, create_user, delete_user, find_user, remove_role, CreateOutcome, CreateUserRequest,
};

fn request() -> CreateUserRequest {
    CreateUserRequest {
        username: "alee".to_string(),
        first_name: "Ann".to_string(),
        last_name: "Lee".to_string(),
        email: "a@x.com".to_string(),
        role: "Viewer".to_string(),
        password: "secret".to_string(),
    }
}

#[tokio::test]
async fn test_user_lifecycle_against_file_store() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;

    let CreateOutcome::Created(user) = create_user(&store, request()).await.unwrap() else {
        panic!("expected Created");
    };
    let user = add_role(&store, user, "Admin").await.unwrap();
    let user = remove_role(&store, user, "Viewer").await.unwrap();
    assert_eq!(user.roles.names(), ["Admin"]);

    drop(store);
    let store = open_store(temp_dir.path()).await;
    let lookup = UserLookup::Email("a@x.com".to_string());
    let user = find_user(&store, &lookup).await.unwrap();
    assert_eq!(user.roles.names(), ["Admin"]);

    delete_user(&store, user).await.expect("Should delete user");
    assert!(store.find_user(&lookup).await.unwrap().is_none());
}

#[tokio::test]
async fn test_stored_document_never_contains_password() {
    let temp_dir = create_test_dir();
    let store = open_store(temp_dir.path()).await;

    create_user(&store, request()).await.unwrap();

    let content = std::fs::read_to_string(common::store_path(temp_dir.path())).unwrap();
    assert!(content.contains("\"username\": \"alee\""));
    assert!(!content.contains("secret"));
}
