//! Catalog operations: search, streaming and recommendations.

use crate::client::{read_json, transport_error};
use crate::error::Result;
use crate::types::{into_tracks, StreamResponse, TrackItem, UpNextResponse};
use nebula_core::{Track, TrackId, TrackInfo};
use reqwest::Client;
use tracing::debug;

/// Catalog client for the Nebula backend.
pub struct CatalogClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> CatalogClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Search songs by free text.
    pub async fn search(&self, query: &str) -> Result<Vec<Track>> {
        let url = format!("{}/search", self.base_url);
        debug!(url = %url, query = %query, "Searching songs");

        let response = self
            .http
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await
            .map_err(transport_error)?;

        // The backend answers `null` when the upstream search fails
        let items: Option<Vec<TrackItem>> = read_json(response, "search").await?;
        let tracks = into_tracks(items.unwrap_or_default());

        debug!(results = tracks.len(), "Search complete");
        Ok(tracks)
    }

    /// Resolve a playable stream URL for a track.
    ///
    /// Returns `Ok(None)` when the backend answered without a URL.
    pub async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>> {
        let url = format!("{}/stream", self.base_url);
        debug!(url = %url, track_id = %track_id, "Resolving stream URL");

        let response = self
            .http
            .get(&url)
            .query(&[("url", track_id.watch_url())])
            .send()
            .await
            .map_err(transport_error)?;

        let stream: StreamResponse = read_json(response, "stream").await?;
        Ok(stream.playable_url())
    }

    /// Fetch track metadata.
    pub async fn track_info(&self, track_id: &TrackId) -> Result<TrackInfo> {
        let url = format!("{}/track_info", self.base_url);
        debug!(url = %url, track_id = %track_id, "Fetching track info");

        let response = self
            .http
            .get(&url)
            .query(&[("video_id", track_id.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        read_json(response, "track info").await
    }

    /// Fetch the autoplay continuation for a seed track.
    pub async fn autoplay_upnext(&self, seed: &TrackId) -> Result<Vec<Track>> {
        let url = format!("{}/autoplay/upnext", self.base_url);
        debug!(url = %url, seed = %seed, "Fetching autoplay continuation");

        let response = self
            .http
            .get(&url)
            .query(&[("videoId", seed.as_str())])
            .send()
            .await
            .map_err(transport_error)?;

        let upnext: UpNextResponse = read_json(response, "autoplay").await?;
        let tracks: Vec<Track> = into_tracks(upnext.upnext)
            .into_iter()
            .filter(|t| &t.id != seed)
            .collect();

        debug!(tracks = tracks.len(), "Fetched autoplay continuation");
        Ok(tracks)
    }
}
