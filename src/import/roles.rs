use crate::store::{IdentityStore, RoleSet};
use crate::user::{resolve_role, UserError};

/// Resolve every role name of one record, in order.
///
/// Stops at the first name the store does not know.
pub async fn resolve_roles(
    store: &dyn IdentityStore,
    names: &[String],
) -> Result<RoleSet, UserError> {
    let mut roles = Vec::with_capacity(names.len());
    for name in names {
        roles.push(resolve_role(store, name).await?);
    }
    Ok(roles.into_iter().collect())
}
