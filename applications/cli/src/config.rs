/// Application configuration
use crate::error::{CliError, Result};
use melody_catalog::{CatalogConfig, DEFAULT_LIMIT, JAMENDO_API_URL};
use melody_playback::{LoopMode, PlaybackConfig, DEFAULT_HISTORY_SIZE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "melody.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default = "default_catalog")]
    pub catalog: CatalogSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,

    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CatalogSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub client_id: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_limit")]
    pub default_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    #[serde(default = "default_storage_path")]
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    #[serde(default)]
    pub shuffle: bool,

    #[serde(default)]
    pub loop_mode: LoopMode,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// `path` defaults to `melody.toml` in the working directory; a missing
    /// default file is fine, a missing explicit file is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (MELODY_CATALOG__CLIENT_ID, ...)
        settings = settings.add_source(
            config::Environment::with_prefix("MELODY")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings
            .build()
            .map_err(|e| CliError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| CliError::Config(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base_url = self.catalog.base_url.trim();
        if base_url.is_empty() {
            return Err(CliError::Config("catalog.base_url is required".to_string()));
        }

        let parsed = url::Url::parse(base_url)
            .map_err(|e| CliError::Config(format!("catalog.base_url is invalid: {}", e)))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(CliError::Config(
                "catalog.base_url must use http or https".to_string(),
            ));
        }

        if self.catalog.default_limit == 0 {
            return Err(CliError::Config(
                "catalog.default_limit must be at least 1".to_string(),
            ));
        }

        if self.playback.history_size == 0 {
            return Err(CliError::Config(
                "playback.history_size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Settings for the catalog client
    pub fn catalog_config(&self) -> CatalogConfig {
        CatalogConfig::new(self.catalog.client_id.clone())
            .with_base_url(self.catalog.base_url.clone())
            .with_timeout(Duration::from_secs(self.catalog.timeout_secs))
    }

    /// Settings for the playback queue manager
    pub fn playback_config(&self) -> PlaybackConfig {
        PlaybackConfig {
            history_size: self.playback.history_size,
            shuffle: self.playback.shuffle,
            loop_mode: self.playback.loop_mode,
            shuffle_seed: None,
        }
    }
}

// Default values
fn default_catalog() -> CatalogSettings {
    CatalogSettings {
        base_url: default_base_url(),
        client_id: String::new(),
        timeout_secs: default_timeout_secs(),
        default_limit: default_limit(),
    }
}

fn default_base_url() -> String {
    JAMENDO_API_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        path: default_storage_path(),
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("./data/melody-store.json")
}

fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        history_size: default_history_size(),
        shuffle: false,
        loop_mode: LoopMode::None,
    }
}

fn default_history_size() -> usize {
    DEFAULT_HISTORY_SIZE
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            storage: default_storage(),
            playback: default_playback(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert_eq!(config.catalog.base_url, "https://api.jamendo.com/v3.0");
        assert_eq!(config.catalog.timeout_secs, 30);
        assert_eq!(config.catalog.default_limit, 20);
        assert_eq!(config.playback.history_size, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = AppConfig::default();
        config.catalog.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.catalog.base_url = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.playback.history_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn loads_explicit_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[catalog]\nclient_id = \"abc123\"\n\n[playback]\nloop_mode = \"all\"\nhistory_size = 5"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.catalog.client_id, "abc123");
        assert_eq!(config.catalog.base_url, JAMENDO_API_URL);
        assert_eq!(config.playback.loop_mode, LoopMode::All);
        assert_eq!(config.playback_config().history_size, 5);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load(Some(&dir.path().join("nope.toml")));
        assert!(matches!(result, Err(CliError::Config(_))));
    }
}
