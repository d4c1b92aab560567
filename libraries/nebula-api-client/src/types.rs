//! Types for Nebula backend requests and responses.

use nebula_core::title::{clean_title, extract_artist};
use nebula_core::{Playlist, PlaylistId, Track, TrackId};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Default backend address used by the web client.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

/// Configuration for connecting to a Nebula backend.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL of the backend (e.g., "http://127.0.0.1:8000")
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
    /// TCP connect timeout
    pub connect_timeout: Duration,
}

impl ApiConfig {
    /// Create a new config with default timeouts.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }

    /// Override both timeouts.
    #[must_use]
    pub fn with_timeouts(mut self, timeout: Duration, connect_timeout: Duration) -> Self {
        self.timeout = timeout;
        self.connect_timeout = connect_timeout;
        self
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// =============================================================================
// Track Types
// =============================================================================

/// A song as returned by search, liked, autoplay and playlist endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrackItem {
    #[serde(rename = "videoId", alias = "video_id")]
    pub video_id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub artist: Option<String>,
    /// Uploader channel, present on raw search results
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default, deserialize_with = "lenient_seconds")]
    pub duration: Option<f64>,
}

impl TrackItem {
    /// Convert into a domain track.
    ///
    /// Items that already carry an artist are trusted as-is; raw search hits
    /// (title + channel only) get their display title and artist derived
    /// from the video title.
    pub fn into_track(self) -> Track {
        let (title, artist) = match self.artist.filter(|a| !a.trim().is_empty()) {
            Some(artist) => (self.title, artist),
            None => (
                clean_title(&self.title),
                extract_artist(&self.title, self.channel.as_deref()),
            ),
        };

        Track {
            id: TrackId::new(self.video_id),
            title,
            artist,
            thumbnail: self.thumbnail.filter(|t| !t.is_empty()),
            stream_url: None,
            duration: self.duration,
        }
    }
}

/// Accept a number, a numeric string, or anything else as "unknown".
fn lenient_seconds<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Convert a list of wire items, dropping entries without an id.
pub(crate) fn into_tracks(items: Vec<TrackItem>) -> Vec<Track> {
    items
        .into_iter()
        .filter(|item| !item.video_id.trim().is_empty())
        .map(TrackItem::into_track)
        .collect()
}

// =============================================================================
// Catalog Types
// =============================================================================

/// Response from `/stream`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamResponse {
    #[serde(default)]
    pub url: Option<String>,
    /// Older backends name the field `stream_url`
    #[serde(default)]
    pub stream_url: Option<String>,
}

impl StreamResponse {
    /// The playable URL, if the backend produced one.
    pub fn playable_url(self) -> Option<String> {
        self.url
            .or(self.stream_url)
            .filter(|url| !url.trim().is_empty())
    }
}

/// Response from `/autoplay/upnext`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpNextResponse {
    #[serde(default)]
    pub upnext: Vec<TrackItem>,
}

// =============================================================================
// Like Types
// =============================================================================

/// Response from `/like`.
#[derive(Debug, Clone, Deserialize)]
pub struct LikeResponse {
    #[serde(default)]
    pub liked: Option<bool>,
}

/// Response from `/liked/all`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LikedResponse {
    #[serde(default)]
    pub liked: Vec<TrackItem>,
}

// =============================================================================
// Playlist Types
// =============================================================================

/// Playlist as returned by `/playlist/all`.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaylistItem {
    /// Numeric or string id
    pub id: Value,
    #[serde(default)]
    pub name: String,
    #[serde(default, alias = "tracks")]
    pub songs: Vec<TrackItem>,
}

impl PlaylistItem {
    /// Convert into a domain playlist; `None` when the id is unusable.
    pub fn into_playlist(self) -> Option<Playlist> {
        let id = id_from_value(&self.id)?;
        Some(Playlist {
            id,
            name: self.name,
            tracks: into_tracks(self.songs),
        })
    }
}

/// Response from `/playlist/all`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistsResponse {
    #[serde(default)]
    pub playlists: Vec<PlaylistItem>,
}

/// Request body for `/playlist/create`.
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
}

/// Request body for `/playlist/add`.
#[derive(Debug, Serialize)]
pub struct AddToPlaylistRequest {
    /// Sent as a JSON number when the id is numeric
    pub playlist_id: Value,
    #[serde(rename = "videoId")]
    pub video_id: String,
    pub title: String,
    pub artist: String,
    pub thumbnail: String,
}

impl AddToPlaylistRequest {
    pub fn new(playlist_id: &PlaylistId, track: &Track) -> Self {
        let playlist_id = playlist_id
            .as_str()
            .parse::<i64>()
            .map_or_else(|_| Value::String(playlist_id.to_string()), Value::from);

        Self {
            playlist_id,
            video_id: track.id.to_string(),
            title: track.title.clone(),
            artist: track.artist.clone(),
            thumbnail: track.thumbnail_or_default(),
        }
    }
}

/// Pull the new playlist's id out of a `/playlist/create` response.
///
/// The backend contract is not fixed, so several shapes are accepted:
/// `id`, `playlist_id`, `playlistId`, `playlist.id`, `playlist.playlist_id`.
pub fn extract_playlist_id(body: &Value) -> Option<PlaylistId> {
    ["id", "playlist_id", "playlistId"]
        .iter()
        .filter_map(|key| body.get(key))
        .chain(
            ["id", "playlist_id"]
                .iter()
                .filter_map(|key| body.get("playlist").and_then(|p| p.get(key))),
        )
        .find_map(id_from_value)
}

fn id_from_value(value: &Value) -> Option<PlaylistId> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(PlaylistId::new(s.trim())),
        Value::Number(n) => Some(PlaylistId::new(n.to_string())),
        _ => None,
    }
}
