//! Core traits for Melody Player

use crate::storage::{keys, KeyValueStore};
use std::rc::Rc;
use tracing::warn;

/// Authentication state as seen by the playback core
///
/// Favorites may only be changed while a user is authenticated. The playback
/// core never validates credentials; it only asks this collaborator.
pub trait SessionProvider {
    /// Whether a user is currently logged in
    fn is_authenticated(&self) -> bool;
}

/// Session provider backed by the raw `isLoggedIn` storage flag
///
/// Authenticated exactly when the stored value is the string `"true"`.
/// Storage failures count as "not authenticated".
pub struct StoredLoginFlag {
    store: Rc<dyn KeyValueStore>,
}

impl StoredLoginFlag {
    /// Create a provider reading from `store`
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl SessionProvider for StoredLoginFlag {
    fn is_authenticated(&self) -> bool {
        match self.store.get(keys::IS_LOGGED_IN) {
            Ok(value) => value.as_deref() == Some("true"),
            Err(e) => {
                warn!(error = %e, "Failed to read login flag");
                false
            }
        }
    }
}

/// Fixed answer, handy for tests and for hosts without accounts
impl SessionProvider for bool {
    fn is_authenticated(&self) -> bool {
        *self
    }
}
