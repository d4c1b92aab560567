//! `MusicBackend` implementation over HTTP.

use crate::client::NebulaClient;
use async_trait::async_trait;
use nebula_core::{MusicBackend, Playlist, PlaylistId, Result, Track, TrackId, TrackInfo};

#[async_trait]
impl MusicBackend for NebulaClient {
    async fn search(&self, query: &str) -> Result<Vec<Track>> {
        Ok(self.catalog().search(query).await?)
    }

    async fn resolve_stream(&self, track_id: &TrackId) -> Result<Option<String>> {
        Ok(self.catalog().resolve_stream(track_id).await?)
    }

    async fn track_info(&self, track_id: &TrackId) -> Result<TrackInfo> {
        Ok(self.catalog().track_info(track_id).await?)
    }

    async fn autoplay_upnext(&self, seed: &TrackId) -> Result<Vec<Track>> {
        Ok(self.catalog().autoplay_upnext(seed).await?)
    }

    async fn like(&self, track: &Track) -> Result<bool> {
        Ok(self.likes().toggle(track).await?)
    }

    async fn unlike(&self, track_id: &TrackId) -> Result<()> {
        Ok(self.likes().unlike(track_id).await?)
    }

    async fn liked(&self) -> Result<Vec<Track>> {
        Ok(self.likes().liked().await?)
    }

    async fn playlists(&self) -> Result<Vec<Playlist>> {
        Ok(self.playlist().list().await?)
    }

    async fn create_playlist(&self, name: &str) -> Result<PlaylistId> {
        Ok(self.playlist().create(name).await?)
    }

    async fn add_to_playlist(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()> {
        Ok(self.playlist().add(playlist_id, track).await?)
    }

    async fn delete_playlist(&self, playlist_id: &PlaylistId) -> Result<()> {
        Ok(self.playlist().delete(playlist_id).await?)
    }
}
