//! Melody Player Catalog Client
//!
//! HTTP client for the Jamendo music catalog.
//!
//! # Features
//!
//! - **Listings**: featured tracks, new releases, search, genres, tracks by genre
//! - **Fallback**: a built-in catalog is served whenever the API fails
//! - **Audio helpers**: stream URL fixes and reachability checks
//!
//! # Example
//!
//! ```ignore
//! use melody_catalog::{CatalogClient, CatalogConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new(CatalogConfig::new("my-client-id"))?;
//!
//!     for genre in client.get_genres().await {
//!         println!("{} ({} tracks)", genre.name, genre.track_count);
//!     }
//!
//!     let tracks = client.get_tracks_by_genre("jazz", None).await;
//!     println!("Found {} jazz tracks", tracks.len());
//!
//!     Ok(())
//! }
//! ```

pub mod audio;
mod client;
mod config;
mod error;
pub mod fallback;
mod types;

// Re-export main types
pub use audio::{is_supported_audio_format, working_audio_url, AudioFormat};
pub use client::{CatalogClient, CatalogQuery, TrackCatalog};
pub use config::{CatalogConfig, DEFAULT_GENRE_LIMIT, DEFAULT_LIMIT, JAMENDO_API_URL};
pub use error::{CatalogError, Result};
