//! WASM-compatible PlaybackQueueManager wrapper

use super::storage::WebStorage;
use crate::{PlaybackConfig, PlaybackError, PlaybackEvent, PlaybackQueueManager};
use js_sys::Function;
use melody_core::{KeyValueStore, StoredLoginFlag, Track};
use serde::Serialize;
use std::rc::Rc;
use tracing::warn;
use wasm_bindgen::prelude::*;

/// WASM-compatible playback queue manager
///
/// Persists favorites and recently played in `localStorage` and reads the
/// login state from the `isLoggedIn` key. Every command forwards the events
/// it produced to the `onEvent` callback; notices are also shown with
/// `window.alert`.
#[wasm_bindgen]
pub struct WasmPlayer {
    inner: PlaybackQueueManager,
    on_event: Option<Function>,
}

#[wasm_bindgen]
impl WasmPlayer {
    /// Create a player bound to the window's `localStorage`
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<WasmPlayer, JsValue> {
        console_error_panic_hook::set_once();

        let store: Rc<dyn KeyValueStore> =
            Rc::new(WebStorage::local().map_err(|e| JsValue::from_str(&e.to_string()))?);
        let session = Rc::new(StoredLoginFlag::new(store.clone()));

        Ok(Self {
            inner: PlaybackQueueManager::with_config(PlaybackConfig::default(), store, session),
            on_event: None,
        })
    }

    // ===== Queue Management =====

    /// Replace the queue (array of tracks) and start at `startIndex`
    #[wasm_bindgen(js_name = setQueue)]
    pub fn set_queue(&mut self, tracks: JsValue, start_index: usize) -> Result<(), JsValue> {
        let tracks: Vec<Track> = serde_wasm_bindgen::from_value(tracks)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse tracks: {}", e)))?;

        let result = self.inner.set_queue(tracks, start_index);
        self.dispatch_events();
        result.map_err(to_js_error)
    }

    /// Select the track at `index`
    #[wasm_bindgen(js_name = playTrack)]
    pub fn play_track(&mut self, index: usize) -> Result<(), JsValue> {
        let result = self.inner.play_track(index);
        self.dispatch_events();
        result.map_err(to_js_error)
    }

    /// Skip to next track, returns whether the selection moved
    #[wasm_bindgen(js_name = nextTrack)]
    pub fn next_track(&mut self) -> bool {
        let moved = self.inner.next_track();
        self.dispatch_events();
        moved
    }

    /// Go to previous track, returns whether the selection moved
    #[wasm_bindgen(js_name = previousTrack)]
    pub fn previous_track(&mut self) -> bool {
        let moved = self.inner.previous_track();
        self.dispatch_events();
        moved
    }

    // ===== Shuffle & Loop =====

    /// Turn shuffle on or off
    #[wasm_bindgen(js_name = toggleShuffle)]
    pub fn toggle_shuffle(&mut self, enable: bool) {
        self.inner.toggle_shuffle(enable);
        self.dispatch_events();
    }

    /// Set loop mode ("none" | "all" | "one")
    #[wasm_bindgen(js_name = setLoopMode)]
    pub fn set_loop_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let result = self.inner.set_loop_mode_str(mode);
        self.dispatch_events();
        result.map_err(to_js_error)
    }

    /// Get current loop mode
    #[wasm_bindgen(js_name = getLoopMode)]
    pub fn get_loop_mode(&self) -> String {
        self.inner.loop_mode().to_string()
    }

    /// Get shuffle flag
    #[wasm_bindgen(js_name = isShuffled)]
    pub fn is_shuffled(&self) -> bool {
        self.inner.is_shuffled()
    }

    // ===== Favorites =====

    /// Toggle favorite membership, returns the new membership
    #[wasm_bindgen(js_name = toggleFavorite)]
    pub fn toggle_favorite(&mut self, track: JsValue) -> Result<bool, JsValue> {
        let track: Track = serde_wasm_bindgen::from_value(track)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse track: {}", e)))?;

        let is_favorite = self.inner.toggle_favorite(&track);
        self.dispatch_events();
        Ok(is_favorite)
    }

    /// Whether a track id is a favorite
    #[wasm_bindgen(js_name = isFavorite)]
    pub fn is_favorite(&self, track_id: &str) -> bool {
        self.inner.is_favorite(track_id)
    }

    /// Re-read favorites from `localStorage`
    #[wasm_bindgen(js_name = reloadFavorites)]
    pub fn reload_favorites(&mut self) {
        self.inner.reload_favorites();
    }

    /// Get favorites as an array of tracks
    #[wasm_bindgen(js_name = getFavorites)]
    pub fn get_favorites(&self) -> JsValue {
        to_js(self.inner.favorites())
    }

    // ===== State Queries =====

    /// Get the current track (or `null`)
    #[wasm_bindgen(js_name = getCurrentTrack)]
    pub fn get_current_track(&self) -> JsValue {
        to_js(&self.inner.current_track())
    }

    /// Get the current index (or `undefined`)
    #[wasm_bindgen(js_name = getCurrentIndex)]
    pub fn get_current_index(&self) -> Option<usize> {
        self.inner.current_index()
    }

    /// Get the queue in playback order
    #[wasm_bindgen(js_name = getQueue)]
    pub fn get_queue(&self) -> JsValue {
        to_js(self.inner.queue())
    }

    /// Get the order captured before shuffling
    #[wasm_bindgen(js_name = getOriginalQueue)]
    pub fn get_original_queue(&self) -> JsValue {
        to_js(self.inner.original_queue())
    }

    /// Get recently played tracks, most recent first
    #[wasm_bindgen(js_name = getRecentlyPlayed)]
    pub fn get_recently_played(&self) -> JsValue {
        to_js(&self.inner.recently_played())
    }

    /// Get queue length
    #[wasm_bindgen(js_name = queueLength)]
    pub fn queue_length(&self) -> usize {
        self.inner.queue_len()
    }

    /// Whether a track is selected
    #[wasm_bindgen(js_name = isPlaying)]
    pub fn is_playing(&self) -> bool {
        self.inner.is_playing()
    }

    /// Check if there is a next track
    #[wasm_bindgen(js_name = hasNext)]
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Check if there is a previous track
    #[wasm_bindgen(js_name = hasPrevious)]
    pub fn has_previous(&self) -> bool {
        self.inner.has_previous()
    }

    // ===== Event Listeners =====

    /// Register the event callback, called with one event object per change
    #[wasm_bindgen(js_name = onEvent)]
    pub fn on_event(&mut self, callback: Function) {
        self.on_event = Some(callback);
    }

    // ===== Internal Event Emitters =====

    fn dispatch_events(&mut self) {
        for event in self.inner.drain_events() {
            if let PlaybackEvent::Notice { message } = &event {
                show_alert(message);
            }

            if let Some(ref cb) = self.on_event {
                if let Ok(js_event) = serde_wasm_bindgen::to_value(&event) {
                    cb.call1(&JsValue::NULL, &js_event).ok();
                }
            }
        }
    }
}

fn show_alert(message: &str) {
    let Some(window) = web_sys::window() else {
        warn!(message, "No window to show notice");
        return;
    };

    if window.alert_with_message(message).is_err() {
        warn!(message, "Failed to show notice");
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn to_js_error(error: PlaybackError) -> JsValue {
    JsValue::from_str(&error.to_string())
}
