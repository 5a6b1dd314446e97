/// Core error types for Melody Player
use thiserror::Error;

/// Result type alias using `MelodyError`
pub type Result<T> = std::result::Result<T, MelodyError>;

/// Core error type for Melody Player
#[derive(Error, Debug)]
pub enum MelodyError {
    /// Key-value storage errors (unavailable, quota exceeded, ...)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

impl MelodyError {
    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            MelodyError::storage("quota exceeded").to_string(),
            "Storage error: quota exceeded"
        );
        assert_eq!(
            MelodyError::not_found("Track", "abc").to_string(),
            "Track not found: abc"
        );
        assert_eq!(
            MelodyError::invalid_input("empty id").to_string(),
            "Invalid input: empty id"
        );
    }

    #[test]
    fn serde_errors_convert() {
        let err = serde_json::from_str::<Vec<u32>>("not json").unwrap_err();
        let err: MelodyError = err.into();
        assert!(matches!(err, MelodyError::Serialization(_)));
    }
}
