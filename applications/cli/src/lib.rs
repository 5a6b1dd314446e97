//! Melody Player terminal front-end
//!
//! Wires the catalog client, the playback queue manager and the session store
//! together over a JSON file store.

pub mod config;
pub mod error;
pub mod shell;
pub mod store;

pub use config::AppConfig;
pub use error::{CliError, Result};
pub use shell::{Flow, Shell, ShellCommand};
pub use store::FileStore;
