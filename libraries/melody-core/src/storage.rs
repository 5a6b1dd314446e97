//! Key-value persistence for player state
//!
//! The player persists small JSON blobs (favorites, recently played, session)
//! under fixed string keys. Backends range from an in-memory map (tests),
//! a JSON file (CLI) to the browser's `localStorage` (WASM).

use crate::error::{MelodyError, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// Storage keys and their persisted shapes
pub mod keys {
    /// JSON array of `Track`, most recent first, at most 20 entries
    pub const RECENTLY_PLAYED: &str = "recentlyPlayed";

    /// JSON array of `Track`, unique by id
    pub const FAVORITES: &str = "musicPlayerFavorites";

    /// JSON `User` object
    pub const USER: &str = "musicPlayerUser";

    /// Raw token string
    pub const TOKEN: &str = "musicPlayerToken";

    /// `"true"` while a user is logged in
    pub const IS_LOGGED_IN: &str = "isLoggedIn";
}

/// Opaque string key-value store
///
/// Methods take `&self`: implementations use interior mutability so one store
/// can be shared by the playback manager and the session store.
///
/// Any method may fail (quota exceeded, storage disabled, I/O error). Callers
/// in the playback core log these failures and carry on with in-memory state.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key` (no error if absent)
    fn remove(&self, key: &str) -> Result<()>;
}

/// Read and deserialize a JSON value stored under `key`
///
/// Returns `Ok(None)` when the key is absent.
pub fn load_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` as JSON and store it under `key`
pub fn save_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<()> {
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)
}

/// In-memory store
///
/// Used by tests and as a volatile fallback when no durable backend exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| MelodyError::storage("memory store lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| MelodyError::storage("memory store lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| MelodyError::storage("memory store lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}
