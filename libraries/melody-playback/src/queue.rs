//! Play queue with index-based navigation
//!
//! ```text
//! tracks:   [A] [B] [C] [D]      playback order
//!                ^
//!             current = Some(1)  -> current track is B
//!
//! original: [A] [B] [C] [D]      order before shuffle (for restoring)
//! ```
//!
//! The current track is never stored; it is always read through `current`.

use crate::shuffle::{move_to_front, shuffle_tracks};
use crate::types::LoopMode;
use melody_core::Track;
use rand::Rng;

/// Ordered queue plus the pre-shuffle snapshot
#[derive(Debug, Clone, Default)]
pub struct Queue {
    /// Tracks in playback order
    tracks: Vec<Track>,

    /// Selected position in `tracks` (`None` = nothing selected)
    current: Option<usize>,

    /// Original order before shuffle
    original: Vec<Track>,
}

impl Queue {
    /// Create new empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue wholesale
    ///
    /// `current` must be a valid index into `tracks` (or `tracks` empty).
    pub(crate) fn load(&mut self, tracks: Vec<Track>, current: usize, original: Vec<Track>) {
        debug_assert!(tracks.is_empty() || current < tracks.len());
        self.current = if tracks.is_empty() { None } else { Some(current) };
        self.tracks = tracks;
        self.original = original;
    }

    /// Tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Order before shuffle
    pub fn original(&self) -> &[Track] {
        &self.original
    }

    /// Selected index
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Selected track
    pub fn current(&self) -> Option<&Track> {
        self.current.and_then(|i| self.tracks.get(i))
    }

    /// Number of tracks in queue
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if queue is empty
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Select the track at `index`
    ///
    /// Returns `false` (no change) when `index` is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = Some(index);
            true
        } else {
            false
        }
    }

    /// Move to the next track
    ///
    /// Wraps to the first track only under `LoopMode::All`.
    /// Returns `false` when the selection stays where it was.
    pub fn advance(&mut self, loop_mode: LoopMode) -> bool {
        let len = self.tracks.len();
        if len == 0 {
            return false;
        }

        let next = match self.current {
            Some(i) if i + 1 < len => i + 1,
            Some(_) if loop_mode == LoopMode::All => 0,
            Some(_) => return false,
            None => 0,
        };

        self.current = Some(next);
        true
    }

    /// Move to the previous track
    ///
    /// Wraps to the last track only under `LoopMode::All`.
    /// Returns `false` when the selection stays where it was.
    pub fn retreat(&mut self, loop_mode: LoopMode) -> bool {
        let len = self.tracks.len();
        if len == 0 {
            return false;
        }

        let previous = match self.current {
            Some(i) if i > 0 => i - 1,
            _ if loop_mode == LoopMode::All => len - 1,
            _ => return false,
        };

        self.current = Some(previous);
        true
    }

    /// Whether a next track is reported as available
    ///
    /// Optimistic: any loop mode other than `None` reports `true`, including
    /// `One`, even though `advance` only wraps for `All`.
    pub fn has_next(&self, loop_mode: LoopMode) -> bool {
        self.signed_index() < self.tracks.len() as i64 - 1 || loop_mode != LoopMode::None
    }

    /// Whether a previous track is reported as available (optimistic, see `has_next`)
    pub fn has_previous(&self, loop_mode: LoopMode) -> bool {
        self.signed_index() > 0 || loop_mode != LoopMode::None
    }

    fn signed_index(&self) -> i64 {
        self.current.map_or(-1, |i| i as i64)
    }

    /// Shuffle the queue around the current track
    ///
    /// Captures the original order first if none was captured yet, then
    /// shuffles and moves the current track (matched by id) to the front.
    /// The selection ends at index 0. No-op on an empty queue.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.tracks.is_empty() {
            return;
        }

        if self.original.is_empty() {
            self.original.clone_from(&self.tracks);
        }

        let current_id = self.current().map(|t| t.id.clone());
        shuffle_tracks(&mut self.tracks, rng);

        if let Some(id) = current_id {
            move_to_front(&mut self.tracks, &id);
        }

        self.current = Some(0);
    }

    /// Restore the original order, keeping the current track selected
    ///
    /// The current track is located by id in the original order; if it is
    /// not there, selection falls back to index 0. Returns `false` (queue
    /// untouched) when no original order was captured.
    pub fn restore_original_order(&mut self) -> bool {
        if self.original.is_empty() || self.tracks.is_empty() {
            return false;
        }

        let current_id = self.current().map(|t| t.id.clone());
        self.tracks.clone_from(&self.original);

        let index = current_id
            .and_then(|id| self.tracks.iter().position(|t| t.id == id))
            .unwrap_or(0);
        self.current = Some(index);

        true
    }
}
