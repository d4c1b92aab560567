/// Playlist types
use super::ids::PlaylistId;
use super::track::Track;
use serde::{Deserialize, Serialize};

/// A user playlist as last fetched from the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    pub id: PlaylistId,
    pub name: String,
    #[serde(default)]
    pub tracks: Vec<Track>,
}

impl Playlist {
    /// Create an empty playlist value
    pub fn new(id: impl Into<PlaylistId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tracks: Vec::new(),
        }
    }

    /// Number of tracks
    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    /// Check if the playlist has no tracks
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Whether the playlist already holds a track with this id
    pub fn contains(&self, track_id: &super::TrackId) -> bool {
        self.tracks.iter().any(|t| &t.id == track_id)
    }
}
