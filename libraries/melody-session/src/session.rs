//! Persisted user session

use crate::error::{Result, SessionError};
use melody_core::storage::{keys, load_json, save_json};
use melody_core::{KeyValueStore, SessionProvider, User};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Logged-in user and token
///
/// Shares its store with the playback manager and is itself shared as a
/// `SessionProvider`, so state lives behind `RefCell` and every method takes
/// `&self`.
pub struct UserSession {
    user: RefCell<Option<User>>,
    token: RefCell<Option<String>>,
    store: Rc<dyn KeyValueStore>,
}

impl UserSession {
    /// Restore the session persisted in `store`
    ///
    /// Missing or unreadable entries leave the corresponding field empty.
    pub fn load(store: Rc<dyn KeyValueStore>) -> Self {
        let user = match load_json::<User>(store.as_ref(), keys::USER) {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored user");
                None
            }
        };

        let token = match store.get(keys::TOKEN) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable stored token");
                None
            }
        };

        debug!(
            user = ?user.as_ref().map(|u| &u.name),
            has_token = token.is_some(),
            "Session loaded"
        );

        Self {
            user: RefCell::new(user),
            token: RefCell::new(token),
            store,
        }
    }

    /// Set the current user and persist it
    pub fn set_user(&self, user: User) -> Result<()> {
        if user.name.trim().is_empty() {
            return Err(SessionError::EmptyUserName);
        }

        save_json(self.store.as_ref(), keys::USER, &user)?;
        *self.user.borrow_mut() = Some(user);
        Ok(())
    }

    /// Set the current token and persist it
    pub fn set_token(&self, token: impl Into<String>) -> Result<()> {
        let token = token.into();
        self.store.set(keys::TOKEN, &token)?;
        *self.token.borrow_mut() = Some(token);
        Ok(())
    }

    /// Log in: store user and token, and raise the `isLoggedIn` flag
    pub fn login(&self, user: User, token: impl Into<String>) -> Result<()> {
        let name = user.name.clone();
        self.set_user(user)?;
        self.set_token(token)?;
        self.store.set(keys::IS_LOGGED_IN, "true")?;

        info!(user = %name, "User logged in");
        Ok(())
    }

    /// Log out: forget user and token in memory and in storage
    ///
    /// Memory is cleared even when storage fails; the first storage error is
    /// returned after all keys were attempted.
    pub fn logout(&self) -> Result<()> {
        self.user.borrow_mut().take();
        self.token.borrow_mut().take();

        let mut first_error = None;
        for key in [keys::TOKEN, keys::USER, keys::IS_LOGGED_IN] {
            if let Err(e) = self.store.remove(key) {
                warn!(error = %e, key, "Failed to clear session key");
                first_error.get_or_insert(e);
            }
        }

        info!("User logged out");
        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Whether a user is present
    pub fn is_logged_in(&self) -> bool {
        self.user.borrow().is_some()
    }

    /// Current user
    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    /// Current token
    pub fn token(&self) -> Option<String> {
        self.token.borrow().clone()
    }
}

impl SessionProvider for UserSession {
    fn is_authenticated(&self) -> bool {
        self.is_logged_in()
    }
}
