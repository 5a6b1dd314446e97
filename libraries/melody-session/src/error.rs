//! Session error types

use melody_core::MelodyError;
use thiserror::Error;

/// Session errors
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("User name cannot be empty")]
    EmptyUserName,

    #[error("Storage error: {0}")]
    Storage(#[from] MelodyError),
}

pub type Result<T> = std::result::Result<T, SessionError>;
