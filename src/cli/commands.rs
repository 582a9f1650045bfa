//! Execution of parsed subcommands.
//!
//! Every handler returns the text to print on stdout, which keeps the handlers
//! testable against a [`MemoryStore`](crate::store::MemoryStore).

use super::output::render_users;
use super::{Command, CreateArgs, ListArgs, ResetPasswordArgs, RoleArgs, UserSelector};
use crate::export::export_file;
use crate::import::{import_file, ImportSummary};
use crate::store::{IdentityStore, User};
use crate::user::{
    add_role, create_user, delete_user, find_user, list_users, lookup_from_args, remove_role,
    reset_password, resolve_role, CreateOutcome, CreateUserRequest, UserError,
};
use color_eyre::eyre::{Result, WrapErr};
use std::path::Path;

async fn select_user(
    store: &dyn IdentityStore,
    selector: &UserSelector,
) -> Result<User, UserError> {
    let lookup = lookup_from_args(selector.username.as_deref(), selector.email.as_deref())?;
    find_user(store, &lookup).await
}

async fn handle_list(store: &dyn IdentityStore, args: &ListArgs) -> Result<String> {
    let users = list_users(store).await?;
    Ok(render_users(&users, args.output)?)
}

async fn handle_create(store: &dyn IdentityStore, args: CreateArgs) -> Result<String> {
    // An unknown role must fail before the terminal prompt
    resolve_role(store, &args.role).await?;
    let password = args.password.resolve()?;
    let request = CreateUserRequest {
        username: args.username,
        first_name: args.firstname,
        last_name: args.lastname,
        email: args.email,
        role: args.role,
        password,
    };
    let role = request.role.clone();

    Ok(match create_user(store, request).await? {
        CreateOutcome::Created(user) => {
            format!("User \"{}\" created with role \"{role}\"", user.username)
        }
        CreateOutcome::AlreadyExists(username) => format!("{username} already exist in the db"),
    })
}

async fn handle_delete(store: &dyn IdentityStore, selector: &UserSelector) -> Result<String> {
    let user = select_user(store, selector).await?;
    let username = user.username.clone();
    delete_user(store, user)
        .await
        .wrap_err("Failed to delete user")?;
    Ok(format!("User \"{username}\" deleted"))
}

async fn handle_reset_password(
    store: &dyn IdentityStore,
    args: &ResetPasswordArgs,
) -> Result<String> {
    let user = select_user(store, &args.user).await?;
    let password = args.password.resolve()?;
    reset_password(store, &user, &password)
        .await
        .wrap_err("Failed to reset user password")?;
    Ok(format!(
        "User \"{}\" password reset successfully",
        user.username
    ))
}

async fn handle_add_role(store: &dyn IdentityStore, args: &RoleArgs) -> Result<String> {
    let user = select_user(store, &args.user).await?;
    let user = add_role(store, user, &args.role).await?;
    Ok(format!(
        "User \"{}\" added to role \"{}\"",
        user.username, args.role
    ))
}

async fn handle_remove_role(store: &dyn IdentityStore, args: &RoleArgs) -> Result<String> {
    let user = select_user(store, &args.user).await?;
    let user = remove_role(store, user, &args.role).await?;
    Ok(format!(
        "User \"{}\" removed from role \"{}\"",
        user.username, args.role
    ))
}

async fn handle_export(store: &dyn IdentityStore, path: &Path) -> Result<String> {
    let count = export_file(store, path).await?;
    Ok(format!(
        "{count} users successfully exported to {}",
        path.display()
    ))
}

/// Two optional blocks listing created then updated emails, one per line
fn render_summary(summary: &ImportSummary) -> String {
    let mut blocks = Vec::new();
    if !summary.created.is_empty() {
        blocks.push(format!(
            "Created the following users:\n\t{}",
            summary.created.join("\n\t")
        ));
    }
    if !summary.updated.is_empty() {
        blocks.push(format!(
            "Updated the following users:\n\t{}",
            summary.updated.join("\n\t")
        ));
    }
    blocks.join("\n")
}

async fn handle_import(store: &dyn IdentityStore, path: &Path) -> Result<String> {
    let summary = import_file(store, path).await?;
    Ok(render_summary(&summary))
}

/// Execute one command and return its console output
pub async fn execute(command: Command, store: &dyn IdentityStore) -> Result<String> {
    match command {
        Command::List(args) => handle_list(store, &args).await,
        Command::Create(args) => handle_create(store, args).await,
        Command::Delete(selector) => handle_delete(store, &selector).await,
        Command::ResetPassword(args) => handle_reset_password(store, &args).await,
        Command::AddRole(args) => handle_add_role(store, &args).await,
        Command::RemoveRole(args) => handle_remove_role(store, &args).await,
        Command::Export(args) => handle_export(store, &args.file).await,
        Command::Import(args) => handle_import(store, &args.file).await,
    }
}

/// Execute one command and print its output on stdout
pub async fn run(command: Command, store: &dyn IdentityStore) -> Result<()> {
    let output = execute(command, store).await?;
    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use crate::store::{MemoryStore, UserLookup};
    use clap::Parser;

    async fn exec(store: &MemoryStore, args: &[&str]) -> Result<String> {
        let mut argv = vec!["identity-admin"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        execute(cli.command, store).await
    }

    async fn create_alee(store: &MemoryStore) {
        let out = exec(
            store,
            &[
                "create", "-u", "alee", "-f", "Ann", "-l", "Lee", "-e", "a@x.com", "-r", "Viewer",
                "-p", "secret",
            ],
        )
        .await
        .unwrap();
        assert_eq!(out, "User \"alee\" created with role \"Viewer\"");
    }

    #[tokio::test]
    async fn test_create_then_duplicate_username() {
        let store = MemoryStore::with_roles(&["Admin", "Viewer"]);
        create_alee(&store).await;

        let out = exec(
            &store,
            &[
                "create", "-u", "alee", "-f", "Ann", "-l", "Lee", "-e", "b@x.com", "-r", "Viewer",
                "--use-random-password",
            ],
        )
        .await
        .unwrap();
        assert_eq!(out, "alee already exist in the db");
    }

    #[tokio::test]
    async fn test_create_with_unknown_role_fails_before_password() {
        let store = MemoryStore::with_roles(&["Admin", "Viewer"]);

        let err = exec(
            &store,
            &[
                "create", "-u", "alee", "-f", "Ann", "-l", "Lee", "-e", "a@x.com", "-r", "Ghost",
            ],
        )
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "\"Ghost\" is not a valid role. Valid roles are: Admin, Viewer"
        );
        assert!(store.list_users().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_role_membership_commands() {
        let store = MemoryStore::with_roles(&["Admin", "Viewer"]);
        create_alee(&store).await;

        let out = exec(&store, &["add-role", "-e", "a@x.com", "-r", "Admin"])
            .await
            .unwrap();
        assert_eq!(out, "User \"alee\" added to role \"Admin\"");

        let out = exec(&store, &["remove-role", "-u", "alee", "-r", "Viewer"])
            .await
            .unwrap();
        assert_eq!(out, "User \"alee\" removed from role \"Viewer\"");

        let err = exec(&store, &["remove-role", "-u", "alee", "-r", "Viewer"])
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "User \"alee\" is not a member of role \"Viewer\""
        );
    }

    #[tokio::test]
    async fn test_selector_requires_exactly_one_key() {
        let store = MemoryStore::with_roles(&["Viewer"]);
        create_alee(&store).await;

        let err = exec(&store, &["delete"]).await.unwrap_err();
        assert!(err.to_string().starts_with("Missing args"));

        let err = exec(&store, &["delete", "-u", "alee", "-e", "a@x.com"])
            .await
            .unwrap_err();
        assert!(err.to_string().starts_with("Conflicting args"));
    }

    #[tokio::test]
    async fn test_delete_and_reset_password() {
        let store = MemoryStore::with_roles(&["Viewer"]);
        create_alee(&store).await;

        let out = exec(&store, &["reset-password", "-u", "alee", "-p", "new"])
            .await
            .unwrap();
        assert_eq!(out, "User \"alee\" password reset successfully");

        let out = exec(&store, &["delete", "-e", "a@x.com"]).await.unwrap();
        assert_eq!(out, "User \"alee\" deleted");
        assert!(store
            .find_user(&UserLookup::Username("alee".to_string()))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_export_then_import_reports_updates() {
        let store = MemoryStore::with_roles(&["Viewer"]);
        create_alee(&store).await;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        let path_arg = path.to_string_lossy().to_string();

        let out = exec(&store, &["export", &path_arg]).await.unwrap();
        assert_eq!(
            out,
            format!("1 users successfully exported to {}", path.display())
        );

        let out = exec(&store, &["import", &path_arg]).await.unwrap();
        assert_eq!(out, "Updated the following users:\n\ta@x.com");
    }

    #[test]
    fn test_render_summary() {
        let summary = ImportSummary {
            created: vec!["one@x.com".to_string(), "three@x.com".to_string()],
            updated: vec!["two@x.com".to_string()],
        };
        assert_eq!(
            render_summary(&summary),
            "Created the following users:\n\tone@x.com\n\tthree@x.com\nUpdated the following users:\n\ttwo@x.com"
        );
        assert_eq!(render_summary(&ImportSummary::default()), "");
    }
}
