//! Liked-songs operations.

use crate::client::{ensure_success, read_json, transport_error};
use crate::error::{ApiClientError, Result};
use crate::types::{into_tracks, LikeResponse, LikedResponse};
use nebula_core::{Track, TrackId};
use reqwest::Client;
use tracing::debug;

/// Likes client for the Nebula backend.
pub struct LikesClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> LikesClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Toggle the like flag; returns the server's liked state afterwards.
    pub async fn toggle(&self, track: &Track) -> Result<bool> {
        let url = format!("{}/like", self.base_url);
        debug!(url = %url, track_id = %track.id, "Toggling like");

        let thumbnail = track.thumbnail.clone().unwrap_or_default();
        let response = self
            .http
            .post(&url)
            .query(&[
                ("videoId", track.id.as_str()),
                ("title", track.title.as_str()),
                ("artist", track.artist.as_str()),
                ("thumbnail", thumbnail.as_str()),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let like: LikeResponse = read_json(response, "like").await?;
        let liked = like.liked.ok_or(ApiClientError::MissingField("liked flag"))?;

        debug!(track_id = %track.id, liked, "Like toggled");
        Ok(liked)
    }

    /// Remove a track from the liked list.
    pub async fn unlike(&self, track_id: &TrackId) -> Result<()> {
        let url = format!("{}/unlike", self.base_url);
        debug!(url = %url, track_id = %track_id, "Unliking");

        let response = self
            .http
            .post(&url)
            .query(&[("videoId", track_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }

    /// List liked tracks.
    pub async fn liked(&self) -> Result<Vec<Track>> {
        let url = format!("{}/liked/all", self.base_url);
        debug!(url = %url, "Fetching liked songs");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;

        let liked: LikedResponse = read_json(response, "liked").await?;
        let tracks = into_tracks(liked.liked);

        debug!(tracks = tracks.len(), "Fetched liked songs");
        Ok(tracks)
    }
}
