//! Melody Player - Playback Queue Management
//!
//! Platform-agnostic playback queue state for Melody Player.
//!
//! This crate provides:
//! - Play queue with index-based selection
//! - Shuffle (current track moved to the front, original order restorable)
//! - Loop modes (None, All, One)
//! - Favorites (persisted, login required to change)
//! - Recently played (persisted, most recent first, bounded to 20)
//! - Change events for UI synchronization
//!
//! # Architecture
//!
//! `melody-playback` owns no audio element and no storage backend:
//! - Persistence goes through `melody_core::KeyValueStore`
//! - The login check goes through `melody_core::SessionProvider`
//! - Browser bindings (localStorage, `alert`) live behind the `wasm` feature
//!
//! # Example: Basic Queue
//!
//! ```rust
//! use melody_core::{MemoryStore, Track};
//! use melody_playback::{LoopMode, PlaybackQueueManager};
//! use std::rc::Rc;
//!
//! let track = |id: &str| Track {
//!     id: id.to_string(),
//!     title: format!("Song {}", id),
//!     ..Default::default()
//! };
//!
//! // Anonymous session: favorites cannot be changed
//! let mut manager = PlaybackQueueManager::new(Rc::new(MemoryStore::new()), Rc::new(false));
//!
//! manager.set_queue(vec![track("a"), track("b"), track("c")], 0).unwrap();
//! manager.set_loop_mode(LoopMode::All);
//!
//! manager.previous_track();
//! assert_eq!(manager.current_track().unwrap().id, "c");
//! ```
//!
//! # Example: Shuffle
//!
//! ```rust
//! use melody_core::{MemoryStore, Track};
//! use melody_playback::PlaybackQueueManager;
//! use std::rc::Rc;
//!
//! let tracks: Vec<Track> = (0..5)
//!     .map(|i| Track { id: i.to_string(), ..Default::default() })
//!     .collect();
//!
//! let mut manager = PlaybackQueueManager::new(Rc::new(MemoryStore::new()), Rc::new(true));
//! manager.set_queue(tracks, 3).unwrap();
//!
//! manager.toggle_shuffle(true);
//! assert_eq!(manager.current_index(), Some(0));
//! assert_eq!(manager.current_track().unwrap().id, "3");
//!
//! manager.toggle_shuffle(false);
//! assert_eq!(manager.current_index(), Some(3));
//! ```

mod error;
pub mod events;
mod favorites;
mod history;
mod manager;
mod queue;
mod shuffle;
pub mod types;
pub mod wasm;

// Public exports
pub use error::{PlaybackError, Result};
pub use events::PlaybackEvent;
pub use favorites::Favorites;
pub use history::RecentlyPlayed;
pub use manager::{PlaybackQueueManager, LOGIN_REQUIRED_NOTICE};
pub use queue::Queue;
pub use types::{LoopMode, PlaybackConfig, DEFAULT_HISTORY_SIZE};
