//! `localStorage`-backed key-value store

use melody_core::{KeyValueStore, MelodyError, Result};
use wasm_bindgen::JsValue;

/// Browser `localStorage`
pub struct WebStorage {
    storage: web_sys::Storage,
}

impl WebStorage {
    /// Open the window's `localStorage`
    pub fn local() -> Result<Self> {
        let window = web_sys::window().ok_or_else(|| MelodyError::storage("No window object"))?;
        let storage = window
            .local_storage()
            .map_err(|e| js_error("Failed to access localStorage", &e))?
            .ok_or_else(|| MelodyError::storage("localStorage is not available"))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage
            .get_item(key)
            .map_err(|e| js_error("localStorage read failed", &e))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| js_error("localStorage write failed", &e))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| js_error("localStorage remove failed", &e))
    }
}

fn js_error(context: &str, value: &JsValue) -> MelodyError {
    MelodyError::storage(format!("{}: {:?}", context, value))
}
