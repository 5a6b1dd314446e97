//! Jamendo catalog client.

use crate::audio;
use crate::config::{CatalogConfig, DEFAULT_GENRE_LIMIT};
use crate::error::{CatalogError, Result};
use crate::fallback;
use crate::types::{ApiResponse, ApiTag, ApiTrack};
use async_trait::async_trait;
use melody_core::{Genre, Track};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, error, info};
use url::Url;

/// Number of genres requested from `/tags`
const GENRE_PAGE_SIZE: u32 = 20;

/// Extra parameters for every track listing
const TRACK_PARAMS: [(&str, &str); 2] = [("include", "musicinfo"), ("audioformat", "mp32")];

/// What to list from the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Most popular tracks
    Featured,
    /// Newest releases first
    NewReleases,
    /// Free-text search
    Search(String),
    /// Tracks tagged with a genre id
    Genre(String),
}

/// Source of track listings
///
/// Implementations never fail: when the backing service is unavailable they
/// return their fallback listing instead.
#[async_trait]
pub trait TrackCatalog: Send + Sync {
    /// List tracks for `query`, at most `limit`
    async fn fetch_tracks(&self, query: &CatalogQuery, limit: u32) -> Vec<Track>;

    /// List genres
    async fn fetch_genres(&self) -> Vec<Genre>;
}

/// Client for the Jamendo catalog API.
///
/// Every request carries the configured `client_id` and `format=json`.
/// The plain methods (`get_*`, `search_tracks`) log failures and fall back
/// to the built-in catalog; the `try_*` methods return the error.
///
/// # Example
///
/// ```ignore
/// use melody_catalog::{CatalogClient, CatalogConfig};
///
/// let client = CatalogClient::new(CatalogConfig::new("my-client-id"))?;
/// let tracks = client.get_featured_tracks(20).await;
/// println!("Found {} tracks", tracks.len());
/// ```
pub struct CatalogClient {
    http: Client,
    base_url: String,
    client_id: String,
}

impl CatalogClient {
    /// Create a new client with the given configuration.
    pub fn new(config: CatalogConfig) -> Result<Self> {
        // Validate URL
        if config.base_url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let base_url = config.base_url.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        Url::parse(&base_url).map_err(|e| CatalogError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("MelodyPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            client_id: config.client_id,
        })
    }

    /// Get the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ===== Fallible API =====

    /// Most popular tracks.
    pub async fn try_featured_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        self.fetch_track_list(
            "/tracks/",
            &[("limit", limit.as_str()), ("boost", "popularity_total")],
        )
        .await
    }

    /// Newest releases.
    pub async fn try_new_releases(&self, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        self.fetch_track_list(
            "/tracks/",
            &[("limit", limit.as_str()), ("order", "releasedate_desc")],
        )
        .await
    }

    /// Free-text track search.
    pub async fn try_search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        self.fetch_track_list(
            "/tracks/search",
            &[("search", query), ("limit", limit.as_str())],
        )
        .await
    }

    /// Genre tags, most used first.
    pub async fn try_genres(&self) -> Result<Vec<Genre>> {
        let limit = GENRE_PAGE_SIZE.to_string();
        let tags: Vec<ApiTag> = self
            .fetch_results(
                "/tags",
                &[
                    ("type", "genre"),
                    ("order", "count_desc"),
                    ("limit", limit.as_str()),
                ],
            )
            .await?;

        Ok(tags.into_iter().map(Genre::from).collect())
    }

    /// Tracks tagged with `genre_id`.
    pub async fn try_tracks_by_genre(&self, genre_id: &str, limit: u32) -> Result<Vec<Track>> {
        let limit = limit.to_string();
        self.fetch_track_list("/tracks/", &[("tags", genre_id), ("limit", limit.as_str())])
            .await
    }

    // ===== API with fallback =====

    /// Most popular tracks, or the local tracks (at most `limit`).
    pub async fn get_featured_tracks(&self, limit: u32) -> Vec<Track> {
        self.try_featured_tracks(limit).await.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching featured tracks");
            fallback::local_tracks_limited(limit)
        })
    }

    /// Newest releases, or the local tracks (at most `limit`).
    pub async fn get_new_releases(&self, limit: u32) -> Vec<Track> {
        self.try_new_releases(limit).await.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching new releases");
            fallback::local_tracks_limited(limit)
        })
    }

    /// Search results, or nothing.
    pub async fn search_tracks(&self, query: &str, limit: u32) -> Vec<Track> {
        self.try_search_tracks(query, limit)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, query, "Error searching tracks");
                Vec::new()
            })
    }

    /// Genres, or the local genres.
    pub async fn get_genres(&self) -> Vec<Genre> {
        self.try_genres().await.unwrap_or_else(|e| {
            error!(error = %e, "Error fetching genres");
            fallback::local_genres()
        })
    }

    /// Tracks of a genre, or the local tracks of that genre.
    ///
    /// `limit` defaults to 50.
    pub async fn get_tracks_by_genre(&self, genre_id: &str, limit: Option<u32>) -> Vec<Track> {
        let limit = limit.unwrap_or(DEFAULT_GENRE_LIMIT);
        self.try_tracks_by_genre(genre_id, limit)
            .await
            .unwrap_or_else(|e| {
                error!(error = %e, genre_id, "Error fetching tracks by genre");
                fallback::local_tracks_by_genre(genre_id, limit)
            })
    }

    /// Check that an audio URL is reachable.
    pub async fn verify_audio_url(&self, url: &str) -> bool {
        audio::verify_audio_url(&self.http, url).await
    }

    // ===== Internals =====

    async fn fetch_track_list(&self, path: &str, params: &[(&str, &str)]) -> Result<Vec<Track>> {
        let mut all_params = params.to_vec();
        all_params.extend_from_slice(&TRACK_PARAMS);

        let tracks: Vec<ApiTrack> = self.fetch_results(path, &all_params).await?;
        info!(path, tracks = tracks.len(), "Fetched catalog tracks");

        Ok(tracks.into_iter().map(Track::from).collect())
    }

    async fn fetch_results<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Vec<T>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, params = ?params, "Querying catalog");

        let response = self
            .http
            .get(&url)
            .query(&[("client_id", self.client_id.as_str()), ("format", "json")])
            .query(params)
            .send()
            .await?;

        let status = response.status();

        if status.is_success() {
            let body: ApiResponse<T> = response.json().await.map_err(|e| {
                CatalogError::ParseError(format!("Failed to parse catalog response: {}", e))
            })?;

            body.results.ok_or(CatalogError::MissingResults)
        } else {
            let error_text = response.text().await.unwrap_or_default();
            Err(CatalogError::ServerError {
                status: status.as_u16(),
                message: error_text,
            })
        }
    }
}

#[async_trait]
impl TrackCatalog for CatalogClient {
    async fn fetch_tracks(&self, query: &CatalogQuery, limit: u32) -> Vec<Track> {
        match query {
            CatalogQuery::Featured => self.get_featured_tracks(limit).await,
            CatalogQuery::NewReleases => self.get_new_releases(limit).await,
            CatalogQuery::Search(text) => self.search_tracks(text, limit).await,
            CatalogQuery::Genre(id) => self.get_tracks_by_genre(id, Some(limit)).await,
        }
    }

    async fn fetch_genres(&self) -> Vec<Genre> {
        self.get_genres().await
    }
}
