/// Core traits for Nebula Player
use crate::error::Result;
use crate::types::{Playlist, PlaylistId, Track, TrackId, TrackInfo};
use async_trait::async_trait;

/// The remote music backend
///
/// Abstracts the HTTP API so controllers can be driven by the real client,
/// by mocks in tests, or by an offline implementation.
#[async_trait]
pub trait MusicBackend: Send + Sync {
    /// Search for songs
    async fn search(&self, query: &str) -> Result<Vec<Track>>;

    /// Resolve a playable media URL
    ///
    /// `Ok(None)` means the backend answered but had no URL for the track.
    async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>>;

    /// Fetch track metadata (duration)
    async fn track_info(&self, track_id: &TrackId) -> Result<TrackInfo>;

    /// Fetch the autoplay continuation for a seed track
    async fn autoplay_upnext(&self, seed: &TrackId) -> Result<Vec<Track>>;

    /// Toggle the like flag on the server
    ///
    /// Returns the authoritative liked state after the toggle.
    async fn like(&self, track: &Track) -> Result<bool>;

    /// Remove a track from the liked list
    async fn unlike(&self, track_id: &TrackId) -> Result<()>;

    /// List liked tracks
    async fn liked(&self) -> Result<Vec<Track>>;

    /// List playlists with their tracks
    async fn playlists(&self) -> Result<Vec<Playlist>>;

    /// Create a playlist and return its id
    async fn create_playlist(&self, name: &str) -> Result<PlaylistId>;

    /// Append a track to a playlist
    async fn add_to_playlist(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()>;

    /// Delete a playlist
    async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()>;
}
