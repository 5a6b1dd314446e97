//! Core types for playback queue management

use crate::error::PlaybackError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Default number of recently played tracks kept
pub const DEFAULT_HISTORY_SIZE: usize = 20;

/// Loop mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoopMode {
    /// Stop when the queue ends
    #[default]
    None,

    /// Wrap around the entire queue
    All,

    /// Repeat the current track
    ///
    /// Enforced by the audio surface re-issuing the track when it ends;
    /// queue navigation treats it like `None`.
    One,
}

impl LoopMode {
    /// Wire name ("none", "all", "one")
    pub fn as_str(self) -> &'static str {
        match self {
            LoopMode::None => "none",
            LoopMode::All => "all",
            LoopMode::One => "one",
        }
    }
}

impl fmt::Display for LoopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoopMode {
    type Err = PlaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(LoopMode::None),
            "all" => Ok(LoopMode::All),
            "one" => Ok(LoopMode::One),
            other => Err(PlaybackError::InvalidLoopMode(other.to_string())),
        }
    }
}

/// Configuration for the playback queue manager
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Maximum recently-played entries (default: 20)
    pub history_size: usize,

    /// Initial shuffle flag (default: false)
    pub shuffle: bool,

    /// Initial loop mode (default: None)
    pub loop_mode: LoopMode,

    /// Fixed shuffle seed for reproducible orderings (default: random)
    pub shuffle_seed: Option<u64>,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            history_size: DEFAULT_HISTORY_SIZE,
            shuffle: false,
            loop_mode: LoopMode::None,
            shuffle_seed: None,
        }
    }
}
