//! Melody Player Core
//!
//! Platform-agnostic core types, traits, and error handling for Melody Player.
//!
//! This crate provides the building blocks shared by the playback manager,
//! the session store, the catalog client and the applications.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Genre`, `User`
//! - **Core Traits**: `KeyValueStore` (persistence), `SessionProvider` (authentication flag)
//! - **Error Handling**: Unified `MelodyError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use melody_core::{keys, KeyValueStore, MemoryStore, Track};
//!
//! let store = MemoryStore::new();
//! let track = Track {
//!     id: "42".to_string(),
//!     title: "Epic Journey".to_string(),
//!     ..Default::default()
//! };
//!
//! melody_core::storage::save_json(&store, keys::FAVORITES, &vec![track]).unwrap();
//! assert!(store.get(keys::FAVORITES).unwrap().is_some());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{MelodyError, Result};
pub use storage::{keys, KeyValueStore, MemoryStore};
pub use traits::{SessionProvider, StoredLoginFlag};
pub use types::{Genre, Track, User};
