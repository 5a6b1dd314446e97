/// Genre domain type
use serde::{Deserialize, Serialize};

/// A catalog genre (tag)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Genre {
    /// Genre identifier, used as the catalog tag filter
    pub id: String,

    /// Display name
    pub name: String,

    /// Cover image URL
    pub cover: String,

    /// Number of tracks tagged with this genre
    pub track_count: u32,
}
