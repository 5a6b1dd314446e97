//! Playback Events
//!
//! Event-based communication for UI synchronization.
//! Events are queued by the manager on every state change and drained by the
//! UI layer after it invokes a command.

use crate::types::LoopMode;
use serde::{Deserialize, Serialize};

/// Events emitted by the playback queue manager
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PlaybackEvent {
    /// Selected track changed
    #[serde(rename_all = "camelCase")]
    TrackChanged {
        /// ID of the new (current) track
        track_id: String,
        /// Position of the new track in the queue
        index: usize,
        /// ID of the previously selected track (if any)
        previous_track_id: Option<String>,
    },

    /// Queue contents or order changed
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Shuffle flag changed
    ShuffleChanged {
        /// New shuffle flag
        enabled: bool,
    },

    /// Loop mode changed
    LoopModeChanged {
        /// New loop mode
        mode: LoopMode,
    },

    /// A track was added to or removed from favorites
    #[serde(rename_all = "camelCase")]
    FavoriteToggled {
        /// ID of the toggled track
        track_id: String,
        /// New membership
        is_favorite: bool,
    },

    /// Message that must be shown to the user
    Notice {
        /// Human-readable message
        message: String,
    },
}

impl PlaybackEvent {
    /// Whether this event must be surfaced to the user
    pub fn is_notice(&self) -> bool {
        matches!(self, PlaybackEvent::Notice { .. })
    }
}
