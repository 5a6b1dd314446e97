//! Error types for playback queue management

use thiserror::Error;

/// Playback errors
///
/// None of these are fatal: every failing operation leaves the manager
/// state exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    /// Tried to load an empty track list
    #[error("Queue is empty")]
    EmptyQueue,

    /// Index out of bounds
    #[error("Index out of bounds: {index} (queue length {len})")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Unrecognized loop mode string
    #[error("Invalid loop mode: {0:?} (expected none, all or one)")]
    InvalidLoopMode(String),

    /// Favorites require a logged-in user
    #[error("You must be logged in to change favorites")]
    Unauthorized,

    /// Track has no identifier
    #[error("Track has no id")]
    MissingTrackId,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
