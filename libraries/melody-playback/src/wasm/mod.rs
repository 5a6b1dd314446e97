//! WASM bindings for melody-playback
//!
//! Exposes the playback queue manager to the browser UI, persisting through
//! `localStorage` and surfacing notices with `window.alert`.

#[cfg(feature = "wasm")]
pub mod storage;

#[cfg(feature = "wasm")]
pub mod manager;

#[cfg(feature = "wasm")]
pub use manager::WasmPlayer;

#[cfg(feature = "wasm")]
pub use storage::WebStorage;
