//! Bulk import: reconcile the store against a batch of user records.
//!
//! The pipeline per batch is:
//! 1. [`validate_batch`]: all-or-nothing schema gate over the whole batch
//! 2. [`resolve_roles`]: role names to roles, per record
//! 3. [`plan_user_action`]: create or update, matched by email
//! 4. apply the action to the store
//!
//! Steps 2-4 run record by record and stop at the first failure without
//! undoing earlier records.

mod diff;
mod importer;
mod roles;
mod types;
mod validation;

pub use diff::{plan_user_action, UserAction};
pub use importer::{import_file, import_users};
pub use roles::resolve_roles;
pub use types::{ImportRecord, ImportSummary};
pub use validation::{is_valid_email, validate_batch, ValidationReport, SCHEMA_FIELD};
