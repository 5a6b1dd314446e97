//! Audio URL helpers

use melody_core::Track;
use reqwest::Client;
use tracing::{debug, error};
use url::Url;

/// Audio container recognized from a URL's extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    Ogg,
    Wav,
    Aac,
    Flac,
}

impl AudioFormat {
    /// Detect the format from the URL's file extension
    pub fn from_url(url: &str) -> Option<Self> {
        let path = Url::parse(url)
            .map(|u| u.path().to_string())
            .unwrap_or_else(|_| url.to_string());
        let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();

        match extension.as_str() {
            "mp3" => Some(Self::Mp3),
            "ogg" => Some(Self::Ogg),
            "wav" => Some(Self::Wav),
            "aac" => Some(Self::Aac),
            "flac" => Some(Self::Flac),
            _ => None,
        }
    }

    /// MIME type for `<audio>` capability checks
    pub fn mime_type(self) -> &'static str {
        match self {
            Self::Mp3 => "audio/mpeg",
            Self::Ogg => "audio/ogg",
            Self::Wav => "audio/wav",
            Self::Aac => "audio/aac",
            Self::Flac => "audio/flac",
        }
    }
}

/// Whether the player can be handed `url`
///
/// Empty URLs are rejected; unknown formats are assumed playable.
pub fn is_supported_audio_format(url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if let Some(format) = AudioFormat::from_url(url) {
        debug!(url, mime = format.mime_type(), "Detected audio format");
    }
    true
}

/// URL to hand to the audio element for `track`
///
/// Jamendo streams are requested as MP3 instead of OGG, and over HTTPS.
pub fn working_audio_url(track: &Track) -> String {
    let url = &track.url;

    if url.contains("jamendo") {
        if url.contains(".ogg") {
            return url.replacen(".ogg", ".mp3", 1);
        }
        if url.starts_with("http:") {
            return url.replacen("http:", "https:", 1);
        }
    }

    url.clone()
}

/// Check that `url` is well-formed and answers a `HEAD` request successfully
pub async fn verify_audio_url(http: &Client, url: &str) -> bool {
    if url.is_empty() {
        return false;
    }

    if let Err(e) = Url::parse(url) {
        error!(url, error = %e, "Invalid audio URL");
        return false;
    }

    match http.head(url).send().await {
        Ok(response) => response.status().is_success(),
        Err(e) => {
            error!(url, error = %e, "Failed to verify audio URL");
            false
        }
    }
}
