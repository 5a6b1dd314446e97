//! Catalog client configuration.

use std::time::Duration;

/// Public Jamendo API endpoint
pub const JAMENDO_API_URL: &str = "https://api.jamendo.com/v3.0";

/// Default page size for track listings
pub const DEFAULT_LIMIT: u32 = 20;

/// Default page size for genre listings
pub const DEFAULT_GENRE_LIMIT: u32 = 50;

/// Configuration for connecting to the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL of the API (e.g., "https://api.jamendo.com/v3.0")
    pub base_url: String,
    /// Application client id sent with every request
    pub client_id: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl CatalogConfig {
    /// Config for the public Jamendo API.
    pub fn new(client_id: impl Into<String>) -> Self {
        Self {
            base_url: JAMENDO_API_URL.to_string(),
            client_id: client_id.into(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Point the client at another server (tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Override the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::new("")
    }
}
