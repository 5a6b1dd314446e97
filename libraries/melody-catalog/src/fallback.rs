//! Built-in catalog used when the API is unavailable

use melody_core::{Genre, Track};

/// Tracks served when the API cannot be reached
pub fn local_tracks() -> Vec<Track> {
    vec![Track {
        id: "local-1".to_string(),
        title: "Epic Journey".to_string(),
        artist: "Scott Buckley".to_string(),
        album: "Cinematic Atmospheres".to_string(),
        genre: "electronic".to_string(),
        duration: 245,
        cover: "https://images.unsplash.com/photo-1511379938547-c1f69419868d?w=400&auto=format&fit=crop".to_string(),
        url: "https://files.freemusicarchive.org/storage-freemusicarchive-org/music/ccCommunity/Scott_Buckley/Cinematic_Ambient_Electronic/Scott_Buckley_-_01_-_Epic_Journey.mp3".to_string(),
    }]
}

/// Genres served when the API cannot be reached
pub fn local_genres() -> Vec<Genre> {
    [
        ("electronic", "Electrónica", "photo-1470225620780-dba8ba36b745", 42),
        ("ambient", "Ambient", "photo-1528715471579-d1bcf0ba5e83", 38),
        ("jazz", "Jazz", "photo-1511192336575-5a79af67a629", 25),
        ("classical", "Clásica", "photo-1507838153414-b4b713384a76", 31),
        ("rock", "Rock", "photo-1498038432885-c6f3f1b912ee", 29),
        ("acoustic", "Acústica", "photo-1511671782779-c97d3d27a1d4", 36),
    ]
    .into_iter()
    .map(|(id, name, photo, track_count)| Genre {
        id: id.to_string(),
        name: name.to_string(),
        cover: format!("https://images.unsplash.com/{}?w=800&auto=format&fit=crop", photo),
        track_count,
    })
    .collect()
}

/// Local tracks, at most `limit`
pub fn local_tracks_limited(limit: u32) -> Vec<Track> {
    local_tracks().into_iter().take(limit as usize).collect()
}

/// Local tracks of `genre_id` (case-insensitive), at most `limit`
pub fn local_tracks_by_genre(genre_id: &str, limit: u32) -> Vec<Track> {
    let genre_id = genre_id.to_lowercase();
    local_tracks()
        .into_iter()
        .filter(|t| t.genre.to_lowercase() == genre_id)
        .take(limit as usize)
        .collect()
}
