use super::IdentityStore;
use std::ops::Deref;
use std::time::Instant;
use tracing::debug;

/// Scoped access to an identity store for the duration of one operation.
///
/// Dereferences to the store. Dropping the session releases it, which happens
/// on every exit path of the operation that opened it, including early `?`
/// returns.
pub struct StoreSession<S: IdentityStore> {
    store: S,
    operation: &'static str,
    opened_at: Instant,
}

impl<S: IdentityStore> StoreSession<S> {
    #[must_use]
    pub fn open(store: S, operation: &'static str) -> Self {
        debug!(operation, "Identity store session opened");
        Self {
            store,
            operation,
            opened_at: Instant::now(),
        }
    }

    /// Borrow the store as a trait object
    #[must_use]
    pub fn store(&self) -> &dyn IdentityStore {
        &self.store
    }
}

impl<S: IdentityStore> Deref for StoreSession<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.store
    }
}

impl<S: IdentityStore> Drop for StoreSession<S> {
    fn drop(&mut self) {
        debug!(
            operation = self.operation,
            elapsed_ms = u64::try_from(self.opened_at.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Identity store session released"
        );
    }
}
