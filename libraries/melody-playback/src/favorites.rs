//! Favorite tracks

use melody_core::storage::{keys, load_json, save_json};
use melody_core::{KeyValueStore, Track};

/// User-curated set of tracks, unique by id, in insertion order
#[derive(Debug, Clone, Default)]
pub struct Favorites {
    tracks: Vec<Track>,
}

impl Favorites {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a stored list, dropping repeated ids
    pub fn from_tracks(tracks: Vec<Track>) -> Self {
        let mut favorites = Self::new();
        for track in tracks {
            if !favorites.contains(&track.id) {
                favorites.tracks.push(track);
            }
        }
        favorites
    }

    /// Load from the `musicPlayerFavorites` key
    ///
    /// Returns `Ok(None)` when nothing is stored.
    pub fn load(store: &dyn KeyValueStore) -> melody_core::Result<Option<Self>> {
        let tracks: Option<Vec<Track>> = load_json(store, keys::FAVORITES)?;
        Ok(tracks.map(Self::from_tracks))
    }

    /// Persist under the `musicPlayerFavorites` key
    pub fn save(&self, store: &dyn KeyValueStore) -> melody_core::Result<()> {
        save_json(store, keys::FAVORITES, &self.tracks)
    }

    /// Flip membership of `track`
    ///
    /// Returns the new membership: `true` if the track is now a favorite.
    pub fn toggle(&mut self, track: &Track) -> bool {
        match self.tracks.iter().position(|t| t.id == track.id) {
            Some(pos) => {
                self.tracks.remove(pos);
                false
            }
            None => {
                self.tracks.push(track.clone());
                true
            }
        }
    }

    /// Whether a track with `id` is a favorite
    pub fn contains(&self, id: &str) -> bool {
        self.tracks.iter().any(|t| t.id == id)
    }

    /// All favorites in insertion order
    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Number of favorites
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Whether there are no favorites
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
