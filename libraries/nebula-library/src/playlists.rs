//! Playlist membership

use nebula_core::{MusicBackend, NebulaError, Playlist, PlaylistId, Result, Track};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Fetch, create and fill playlists
///
/// Independent of playback. Keeps the last fetched list so views can render
/// without a round-trip; the cache is patched after each successful write
/// and replaced by every `list_all`.
pub struct PlaylistMembershipController {
    backend: Arc<dyn MusicBackend>,
    cache: RwLock<Vec<Playlist>>,
}

impl PlaylistMembershipController {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            backend,
            cache: RwLock::new(Vec::new()),
        }
    }

    /// Fetch every playlist with its tracks
    pub async fn list_all(&self) -> Result<Vec<Playlist>> {
        let playlists = self.backend.playlists().await?;
        debug!(playlists = playlists.len(), "Fetched playlists");

        *self.cache.write().await = playlists.clone();
        Ok(playlists)
    }

    /// Create an empty playlist
    ///
    /// Blank names are rejected without contacting the backend.
    pub async fn create(&self, name: &str) -> Result<PlaylistId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(NebulaError::invalid_input("playlist name cannot be empty"));
        }

        let id = self.backend.create_playlist(name).await?;
        info!(playlist_id = %id, name = %name, "Created playlist");

        self.cache
            .write()
            .await
            .push(Playlist::new(id.clone(), name));
        Ok(id)
    }

    /// Append a track to a playlist
    ///
    /// A track without artwork is sent with the default thumbnail for its
    /// id. Failures are returned, not retried.
    pub async fn add_track(&self, playlist_id: &PlaylistId, track: &Track) -> Result<()> {
        if playlist_id.as_str().trim().is_empty() {
            return Err(NebulaError::invalid_input("playlist id cannot be empty"));
        }

        let track = track.clone().with_thumbnail(track.thumbnail_or_default());
        self.backend.add_to_playlist(playlist_id, &track).await?;
        info!(playlist_id = %playlist_id, track_id = %track.id, "Added track to playlist");

        let mut cache = self.cache.write().await;
        if let Some(playlist) = cache.iter_mut().find(|p| &p.id == playlist_id) {
            if !playlist.contains(&track.id) {
                playlist.tracks.push(track);
            }
        }
        Ok(())
    }

    /// Delete a playlist
    pub async fn delete(&self, playlist_id: &PlaylistId) -> Result<()> {
        self.backend.delete_playlist(playlist_id).await?;
        info!(playlist_id = %playlist_id, "Deleted playlist");

        self.cache.write().await.retain(|p| &p.id != playlist_id);
        Ok(())
    }

    /// Create a playlist and put `track` in it
    pub async fn create_and_add(&self, name: &str, track: &Track) -> Result<PlaylistId> {
        let id = self.create(name).await?;
        self.add_track(&id, track).await?;
        Ok(id)
    }

    /// Playlists as last fetched or modified
    pub async fn cached(&self) -> Vec<Playlist> {
        self.cache.read().await.clone()
    }
}
