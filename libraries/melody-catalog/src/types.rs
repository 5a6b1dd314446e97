//! Types for Jamendo API responses.

use melody_core::{Genre, Track};
use serde::{Deserialize, Deserializer};

/// Envelope of every listing endpoint.
///
/// `results` is optional so a body without it can be told apart from a
/// transport failure.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub results: Option<Vec<T>>,
}

/// Track as returned by `/tracks`.
#[derive(Debug, Deserialize)]
pub struct ApiTrack {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: Option<String>,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub audio: String,
    #[serde(default)]
    pub musicinfo: Option<MusicInfo>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MusicInfo {
    #[serde(default)]
    pub tags: Option<MusicTags>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MusicTags {
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Tag as returned by `/tags`.
#[derive(Debug, Deserialize)]
pub struct ApiTag {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub count: u32,
}

impl From<ApiTrack> for Track {
    fn from(api: ApiTrack) -> Self {
        let genre = api
            .musicinfo
            .and_then(|info| info.tags)
            .and_then(|tags| tags.genres.into_iter().next())
            .filter(|g| !g.is_empty())
            .unwrap_or_else(|| "Unknown".to_string());

        let album = api
            .album_name
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Single".to_string());

        Track {
            id: api.id,
            title: api.name,
            artist: api.artist_name,
            album,
            genre,
            duration: api.duration,
            cover: api.image,
            url: api.audio,
        }
    }
}

impl From<ApiTag> for Genre {
    fn from(api: ApiTag) -> Self {
        Genre {
            cover: format!("https://picsum.photos/seed/{}/400/400", api.name),
            id: api.id,
            name: api.name,
            track_count: api.count,
        }
    }
}

/// Jamendo ids are numeric strings, but some endpoints send plain numbers.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}
