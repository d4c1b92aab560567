//! Playlist operations.

use crate::client::{ensure_success, read_json, transport_error};
use crate::error::{ApiClientError, Result};
use crate::types::{
    extract_playlist_id, AddToPlaylistRequest, CreatePlaylistRequest, PlaylistItem,
    PlaylistsResponse,
};
use nebula_core::{Playlist, PlaylistId, Track};
use reqwest::Client;
use tracing::{debug, warn};

/// Playlist client for the Nebula backend.
pub struct PlaylistClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> PlaylistClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// List all playlists with their tracks.
    pub async fn list(&self) -> Result<Vec<Playlist>> {
        let url = format!("{}/playlist/all", self.base_url);
        debug!(url = %url, "Fetching playlists");

        let response = self.http.get(&url).send().await.map_err(transport_error)?;

        let body: PlaylistsResponse = read_json(response, "playlists").await?;
        let playlists: Vec<Playlist> = body
            .playlists
            .into_iter()
            .filter_map(PlaylistItem::into_playlist)
            .collect();

        debug!(playlists = playlists.len(), "Fetched playlists");
        Ok(playlists)
    }

    /// Create a playlist and return its id.
    pub async fn create(&self, name: &str) -> Result<PlaylistId> {
        let url = format!("{}/playlist/create", self.base_url);
        debug!(url = %url, name = %name, "Creating playlist");

        let response = self
            .http
            .post(&url)
            .json(&CreatePlaylistRequest {
                name: name.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;

        let body: serde_json::Value = read_json(response, "create playlist").await?;
        match extract_playlist_id(&body) {
            Some(id) => {
                debug!(playlist_id = %id, "Playlist created");
                Ok(id)
            }
            None => {
                warn!(response = %body, "Create playlist response carried no id");
                Err(ApiClientError::MissingField("playlist id"))
            }
        }
    }

    /// Append a track to a playlist.
    pub async fn add(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()> {
        let url = format!("{}/playlist/add", self.base_url);
        debug!(url = %url, playlist_id = %playlist_id, track_id = %track.id, "Adding to playlist");

        let response = self
            .http
            .post(&url)
            .json(&AddToPlaylistRequest::new(playlist_id, track))
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }

    /// Delete a playlist.
    pub async fn delete(&self, playlist_id: &PlaylistId) -> Result<()> {
        let url = format!("{}/playlist/delete", self.base_url);
        debug!(url = %url, playlist_id = %playlist_id, "Deleting playlist");

        let response = self
            .http
            .delete(&url)
            .query(&[("playlist_id", playlist_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        ensure_success(response).await.map(|_| ())
    }
}
