//! Playback queue manager - core orchestration
//!
//! Coordinates queue, shuffle, loop mode, favorites and recently played

use crate::{
    error::{PlaybackError, Result},
    events::PlaybackEvent,
    favorites::Favorites,
    history::RecentlyPlayed,
    queue::Queue,
    shuffle::{move_to_front, shuffle_tracks},
    types::{LoopMode, PlaybackConfig},
};
use melody_core::{KeyValueStore, SessionProvider, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::rc::Rc;
use tracing::{debug, info, warn};

/// Message shown when an anonymous user tries to change favorites
pub const LOGIN_REQUIRED_NOTICE: &str = "You must be logged in to add favorites";

/// Central playback queue management
///
/// Owns:
/// - The queue (playback order + pre-shuffle snapshot)
/// - Current selection (the current track is derived from the index)
/// - Shuffle flag and loop mode
/// - Favorites (persisted, requires an authenticated session to change)
/// - Recently played history (persisted, bounded)
///
/// Built by the application's composition root and handed to UI handlers.
/// All operations are synchronous and single-threaded; a multi-threaded host
/// must wrap the manager in a `Mutex` so that no mutation interleaves with
/// another (the queue index is only valid for the queue it was computed on).
///
/// Persistence failures are logged and never surfaced: in-memory state stays
/// authoritative.
pub struct PlaybackQueueManager {
    // Queue state
    queue: Queue,
    is_shuffled: bool,
    loop_mode: LoopMode,

    // User data
    favorites: Favorites,
    history: RecentlyPlayed,

    // Collaborators
    store: Rc<dyn KeyValueStore>,
    session: Rc<dyn SessionProvider>,

    rng: StdRng,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl PlaybackQueueManager {
    /// Create a manager with default configuration
    pub fn new(store: Rc<dyn KeyValueStore>, session: Rc<dyn SessionProvider>) -> Self {
        Self::with_config(PlaybackConfig::default(), store, session)
    }

    /// Create a manager
    ///
    /// Favorites and recently played history are loaded from `store` once,
    /// here. Unreadable data is logged and replaced by empty lists.
    pub fn with_config(
        config: PlaybackConfig,
        store: Rc<dyn KeyValueStore>,
        session: Rc<dyn SessionProvider>,
    ) -> Self {
        let favorites = match Favorites::load(store.as_ref()) {
            Ok(favorites) => favorites.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to load favorites, starting empty");
                Favorites::new()
            }
        };

        let history = match RecentlyPlayed::load(store.as_ref(), config.history_size) {
            Ok(history) => history,
            Err(e) => {
                warn!(error = %e, "Failed to load recently played, starting empty");
                RecentlyPlayed::new(config.history_size)
            }
        };

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        debug!(
            favorites = favorites.len(),
            recently_played = history.len(),
            "Playback queue manager created"
        );

        Self {
            queue: Queue::new(),
            is_shuffled: config.shuffle,
            loop_mode: config.loop_mode,
            favorites,
            history,
            store,
            session,
            rng,
            pending_events: Vec::new(),
        }
    }

    // ===== Queue Management =====

    /// Replace the queue and select a starting track
    ///
    /// - Empty `tracks`: `Err(EmptyQueue)`, nothing changes.
    /// - `start_index` out of range: clamped to 0.
    /// - The input order is always kept as the pre-shuffle snapshot.
    /// - With shuffle on, the queue is a fresh shuffle of `tracks` with the
    ///   selected track moved to the front (index 0).
    ///
    /// The selected track is recorded in recently played.
    pub fn set_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            warn!("Refusing to set an empty queue");
            return Err(PlaybackError::EmptyQueue);
        }

        let start_index = if start_index < tracks.len() {
            start_index
        } else {
            warn!(
                start_index,
                len = tracks.len(),
                "Start index out of range, starting from the first track"
            );
            0
        };

        info!(
            tracks = tracks.len(),
            start_index,
            shuffled = self.is_shuffled,
            "Setting queue"
        );

        let previous_id = self.current_track_id();

        if self.is_shuffled {
            let selected_id = tracks[start_index].id.clone();
            let mut shuffled = tracks.clone();
            shuffle_tracks(&mut shuffled, &mut self.rng);
            move_to_front(&mut shuffled, &selected_id);
            self.queue.load(shuffled, 0, tracks);
        } else {
            self.queue.load(tracks.clone(), start_index, tracks);
        }

        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.emit_track_changed(previous_id, true);
        self.record_recently_played();

        Ok(())
    }

    /// Convenience for `set_queue(tracks, 0)`
    pub fn set_queue_from_start(&mut self, tracks: Vec<Track>) -> Result<()> {
        self.set_queue(tracks, 0)
    }

    /// Select the track at `index` and record it in recently played
    ///
    /// Out of range: `Err(IndexOutOfBounds)`, nothing changes.
    pub fn play_track(&mut self, index: usize) -> Result<()> {
        let previous_id = self.current_track_id();

        if !self.queue.select(index) {
            debug!(index, len = self.queue.len(), "Ignoring out of range track index");
            return Err(PlaybackError::IndexOutOfBounds {
                index,
                len: self.queue.len(),
            });
        }

        self.emit_track_changed(previous_id, true);
        self.record_recently_played();
        Ok(())
    }

    /// Skip to next track
    ///
    /// At the last track, wraps to the first only under `LoopMode::All`;
    /// otherwise stays put. Returns `true` when a track was selected.
    pub fn next_track(&mut self) -> bool {
        let previous_id = self.current_track_id();

        if self.queue.advance(self.loop_mode) {
            self.emit_track_changed(previous_id, true);
            true
        } else {
            debug!(loop_mode = %self.loop_mode, "No next track");
            false
        }
    }

    /// Go to previous track
    ///
    /// At the first track, wraps to the last only under `LoopMode::All`;
    /// otherwise stays put. Returns `true` when a track was selected.
    pub fn previous_track(&mut self) -> bool {
        let previous_id = self.current_track_id();

        if self.queue.retreat(self.loop_mode) {
            self.emit_track_changed(previous_id, true);
            true
        } else {
            debug!(loop_mode = %self.loop_mode, "No previous track");
            false
        }
    }

    // ===== Shuffle & Loop =====

    /// Turn shuffle on or off
    ///
    /// The flag always follows `enable`, even when the queue is empty (then
    /// nothing else changes).
    ///
    /// On: shuffles the queue and puts the current track first.
    /// Off: restores the order captured before shuffling and keeps the current
    /// track selected (index 0 if it is not in that order). Without a captured
    /// order the queue is left as is, even though the flag reads "off".
    pub fn toggle_shuffle(&mut self, enable: bool) {
        self.is_shuffled = enable;
        self.pending_events
            .push(PlaybackEvent::ShuffleChanged { enabled: enable });

        if self.queue.is_empty() {
            return;
        }

        let previous_id = self.current_track_id();

        if enable {
            self.queue.shuffle(&mut self.rng);
            info!(tracks = self.queue.len(), "Shuffle enabled");
        } else if self.queue.restore_original_order() {
            info!(tracks = self.queue.len(), "Shuffle disabled, original order restored");
        } else {
            warn!("Shuffle disabled but no original order was captured; queue left as is");
            return;
        }

        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
        self.emit_track_changed(previous_id, false);
    }

    /// Set loop mode
    pub fn set_loop_mode(&mut self, mode: LoopMode) {
        self.loop_mode = mode;
        self.pending_events
            .push(PlaybackEvent::LoopModeChanged { mode });
    }

    /// Set loop mode from its wire name ("none", "all", "one")
    ///
    /// Unknown names: `Err(InvalidLoopMode)`, loop mode unchanged.
    pub fn set_loop_mode_str(&mut self, mode: &str) -> Result<()> {
        let mode = mode.parse::<LoopMode>().map_err(|e| {
            warn!(mode, "Ignoring invalid loop mode");
            e
        })?;
        self.set_loop_mode(mode);
        Ok(())
    }

    // ===== Favorites =====

    /// Toggle favorite membership of `track`
    ///
    /// Returns the new membership (`true` = now a favorite). When no user is
    /// logged in, queues a `Notice` event and returns `false`; a track without
    /// id also returns `false`. Neither case changes favorites.
    pub fn toggle_favorite(&mut self, track: &Track) -> bool {
        match self.try_toggle_favorite(track) {
            Ok(is_favorite) => is_favorite,
            Err(PlaybackError::Unauthorized) => {
                self.pending_events.push(PlaybackEvent::Notice {
                    message: LOGIN_REQUIRED_NOTICE.to_string(),
                });
                false
            }
            Err(e) => {
                debug!(error = %e, "Favorite toggle ignored");
                false
            }
        }
    }

    /// Toggle favorite membership, reporting why a toggle was refused
    pub fn try_toggle_favorite(&mut self, track: &Track) -> Result<bool> {
        if !self.session.is_authenticated() {
            warn!(track_id = %track.id, "Favorite toggle requires login");
            return Err(PlaybackError::Unauthorized);
        }

        if !track.has_id() {
            return Err(PlaybackError::MissingTrackId);
        }

        let is_favorite = self.favorites.toggle(track);
        debug!(track_id = %track.id, is_favorite, "Favorite toggled");

        if let Err(e) = self.favorites.save(self.store.as_ref()) {
            warn!(error = %e, "Failed to save favorites");
        }

        self.pending_events.push(PlaybackEvent::FavoriteToggled {
            track_id: track.id.clone(),
            is_favorite,
        });

        Ok(is_favorite)
    }

    /// Re-read favorites from storage
    ///
    /// Keeps the in-memory set when nothing is stored or the data is unreadable.
    pub fn reload_favorites(&mut self) {
        match Favorites::load(self.store.as_ref()) {
            Ok(Some(favorites)) => self.favorites = favorites,
            Ok(None) => {}
            Err(e) => warn!(error = %e, "Failed to load favorites"),
        }
    }

    /// Whether a track id is a favorite
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.favorites.contains(track_id)
    }

    /// All favorites in insertion order
    pub fn favorites(&self) -> &[Track] {
        self.favorites.tracks()
    }

    // ===== State Queries =====

    /// Currently selected track
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Currently selected index (`None` = no track)
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Tracks in playback order
    pub fn queue(&self) -> &[Track] {
        self.queue.tracks()
    }

    /// Order captured before shuffling
    pub fn original_queue(&self) -> &[Track] {
        self.queue.original()
    }

    /// Queue length
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Shuffle flag
    pub fn is_shuffled(&self) -> bool {
        self.is_shuffled
    }

    /// Current loop mode
    pub fn loop_mode(&self) -> LoopMode {
        self.loop_mode
    }

    /// Whether a track is selected
    pub fn is_playing(&self) -> bool {
        self.current_track().is_some()
    }

    /// Check if there is a next track
    ///
    /// `true` under any loop mode other than `None`, even `One` where
    /// `next_track` does not wrap.
    pub fn has_next(&self) -> bool {
        self.queue.has_next(self.loop_mode)
    }

    /// Check if there is a previous track (same optimism as `has_next`)
    pub fn has_previous(&self) -> bool {
        self.queue.has_previous(self.loop_mode)
    }

    /// Recently played tracks, most recent first
    pub fn recently_played(&self) -> Vec<&Track> {
        self.history.tracks()
    }

    // ===== Events =====

    /// Take all pending events (oldest first)
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Whether events are waiting to be drained
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internals =====

    fn current_track_id(&self) -> Option<String> {
        self.current_track().map(|t| t.id.clone())
    }

    /// Queue a `TrackChanged` event
    ///
    /// With `always` false the event is only queued when the track id differs
    /// from `previous_id` (reordering alone is reported as `QueueChanged`).
    fn emit_track_changed(&mut self, previous_id: Option<String>, always: bool) {
        let Some(index) = self.queue.current_index() else {
            return;
        };
        let Some(track) = self.queue.current() else {
            return;
        };

        if !always && previous_id.as_deref() == Some(track.id.as_str()) {
            return;
        }

        debug!(track_id = %track.id, index, "Current track changed");
        self.pending_events.push(PlaybackEvent::TrackChanged {
            track_id: track.id.clone(),
            index,
            previous_track_id: previous_id,
        });
    }

    /// Record the current track in recently played and persist the list
    fn record_recently_played(&mut self) {
        let Some(track) = self.queue.current().cloned() else {
            return;
        };

        self.history.record(track);

        if let Err(e) = self.history.save(self.store.as_ref()) {
            warn!(error = %e, "Failed to save recently played");
        }
    }
}
