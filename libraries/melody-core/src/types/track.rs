/// Track domain type
use serde::{Deserialize, Serialize};

/// A playable catalog track
///
/// Built by the catalog client and never mutated afterwards. The JSON shape
/// (field names included) is what gets persisted under the favorites and
/// recently-played keys, so renaming a field breaks stored data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Track {
    /// Unique track identifier (catalog id)
    pub id: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name ("Single" when the catalog has none)
    pub album: String,

    /// Primary genre ("Unknown" when the catalog has none)
    pub genre: String,

    /// Duration in seconds
    pub duration: u32,

    /// Cover art URL
    pub cover: String,

    /// Playable audio URL
    pub url: String,
}

impl Track {
    /// Whether this track carries an identifier
    ///
    /// Tracks without an id cannot be favorited or deduplicated.
    pub fn has_id(&self) -> bool {
        !self.id.is_empty()
    }

    /// Whether two tracks refer to the same catalog entry
    pub fn same_as(&self, other: &Track) -> bool {
        self.id == other.id
    }
}
