//! Batch import orchestration.
//!
//! The batch is validated as a whole first. Records are then applied one at a
//! time in input order; the first failure stops the run, and records applied
//! before it stay applied.

use super::diff::{plan_user_action, UserAction};
use super::roles::resolve_roles;
use super::types::{ImportRecord, ImportSummary};
use super::validation::validate_batch;
use crate::store::IdentityStore;
use crate::user::UserError;
use serde_json::Value;
use std::path::Path;
use tokio::fs;
use tracing::{info, warn};

async fn apply_record(
    store: &dyn IdentityStore,
    record: &ImportRecord,
    summary: &mut ImportSummary,
) -> Result<(), UserError> {
    let roles = resolve_roles(store, &record.roles).await?;

    match plan_user_action(store, record, roles).await? {
        UserAction::Create(new_user) => {
            store.add_user(new_user).await?;
            summary.created.push(record.email.clone());
        }
        UserAction::Update(user) => {
            store.update_user(&user).await?;
            summary.updated.push(record.email.clone());
        }
    }
    Ok(())
}

/// Reconcile the store against an untrusted batch of user records.
pub async fn import_users(
    store: &dyn IdentityStore,
    batch: &Value,
) -> Result<ImportSummary, UserError> {
    let records = validate_batch(batch).map_err(UserError::Validation)?;

    let mut summary = ImportSummary::default();
    for (index, record) in records.iter().enumerate() {
        if let Err(e) = apply_record(store, record, &mut summary).await {
            warn!(
                "Import stopped at record {} ({}): {} applied, {} not attempted",
                index,
                record.email,
                summary.total(),
                records.len().saturating_sub(index)
            );
            return Err(e);
        }
    }

    info!(
        "Import finished: {} created, {} updated",
        summary.created.len(),
        summary.updated.len()
    );
    Ok(summary)
}

/// Read a JSON batch from `path` and import it.
pub async fn import_file(store: &dyn IdentityStore, path: &Path) -> Result<ImportSummary, UserError> {
    let read_error = |source: std::io::Error| UserError::ReadFile {
        path: path.to_path_buf(),
        source,
    };

    if !fs::try_exists(path).await.map_err(read_error)? {
        return Err(UserError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read(path).await.map_err(read_error)?;
    let batch: Value = serde_json::from_slice(&content).map_err(|source| UserError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;

    import_users(store, &batch).await
}
