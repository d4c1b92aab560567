/// Track types
use super::ids::TrackId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A playable song reference
///
/// Immutable once built apart from the stream URL and duration, which are
/// attached lazily once the backend has resolved them. The serialized form
/// (`videoId`, `streamUrl`) is the one persisted in the recently played list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Stable external key
    #[serde(rename = "videoId")]
    pub id: TrackId,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub artist: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    /// Resolved media URL (populated lazily)
    #[serde(default, rename = "streamUrl", skip_serializing_if = "Option::is_none")]
    pub stream_url: Option<String>,

    /// Duration in seconds (populated lazily)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl Track {
    /// Create a track with no thumbnail, stream URL or duration yet
    pub fn new(id: impl Into<TrackId>, title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            artist: artist.into(),
            thumbnail: None,
            stream_url: None,
            duration: None,
        }
    }

    /// Builder-style thumbnail
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    /// Copy of this track with a resolved stream URL attached
    #[must_use]
    pub fn with_stream_url(mut self, url: impl Into<String>) -> Self {
        self.stream_url = Some(url.into());
        self
    }

    /// Attach a duration once known
    pub fn attach_duration(&mut self, duration: Duration) {
        self.duration = Some(duration.as_secs_f64());
    }

    /// Duration if known and sane
    pub fn duration(&self) -> Option<Duration> {
        self.duration.and_then(positive_seconds)
    }

    /// Thumbnail, or the backend's default artwork for this id
    pub fn thumbnail_or_default(&self) -> String {
        self.thumbnail
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| self.id.fallback_thumbnail())
    }
}

/// Track metadata returned by `/track_info`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Duration in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

impl TrackInfo {
    /// Duration if the backend reported a positive one
    pub fn duration(&self) -> Option<Duration> {
        self.duration.and_then(positive_seconds)
    }
}

/// Seconds as a `Duration`; zero, negative, NaN and out-of-range values are unknown
fn positive_seconds(secs: f64) -> Option<Duration> {
    if secs > 0.0 {
        Duration::try_from_secs_f64(secs).ok()
    } else {
        None
    }
}
