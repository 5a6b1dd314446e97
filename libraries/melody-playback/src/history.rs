//! Recently played tracking
//!
//! Maintains a bounded, deduplicated, most-recent-first list of played tracks

use melody_core::storage::{keys, load_json, save_json};
use melody_core::{KeyValueStore, Track};
use std::collections::VecDeque;

/// Recently played tracks with bounded size
///
/// Playing a track that is already listed moves it to the front instead of
/// adding a second entry.
#[derive(Debug, Clone)]
pub struct RecentlyPlayed {
    /// History buffer (most recent = front)
    tracks: VecDeque<Track>,

    /// Maximum history size
    max_size: usize,
}

impl RecentlyPlayed {
    /// Create new history with specified maximum size
    pub fn new(max_size: usize) -> Self {
        Self {
            tracks: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Build from a stored list (most recent first)
    ///
    /// Duplicates and entries past `max_size` are dropped.
    pub fn from_tracks(tracks: Vec<Track>, max_size: usize) -> Self {
        let mut history = Self::new(max_size);
        for track in tracks {
            if history.tracks.len() >= max_size {
                break;
            }
            if !history.contains(&track.id) {
                history.tracks.push_back(track);
            }
        }
        history
    }

    /// Load from the `recentlyPlayed` key (empty when absent)
    pub fn load(store: &dyn KeyValueStore, max_size: usize) -> melody_core::Result<Self> {
        let tracks: Vec<Track> = load_json(store, keys::RECENTLY_PLAYED)?.unwrap_or_default();
        Ok(Self::from_tracks(tracks, max_size))
    }

    /// Persist the full list under the `recentlyPlayed` key
    pub fn save(&self, store: &dyn KeyValueStore) -> melody_core::Result<()> {
        save_json(store, keys::RECENTLY_PLAYED, &self.tracks)
    }

    /// Record a played track
    ///
    /// Removes any entry with the same id, prepends the track, and discards
    /// the oldest entries beyond `max_size`.
    pub fn record(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        self.tracks.push_front(track);
        self.tracks.truncate(self.max_size);
    }

    /// Whether a track with `id` is listed
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// Most recently played track
    pub fn latest(&self) -> Option<&Track> {
        self.tracks.front()
    }

    /// All tracks, most recent first
    pub fn tracks(&self) -> Vec<&Track> {
        self.tracks.iter().collect()
    }

    /// Get number of tracks in history
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if history is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.tracks.clear();
    }

    /// Get maximum history size
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for RecentlyPlayed {
    fn default() -> Self {
        Self::new(crate::types::DEFAULT_HISTORY_SIZE)
    }
}
