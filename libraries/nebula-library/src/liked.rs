//! Liked songs

use nebula_core::{MusicBackend, Result, Track, TrackId};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info};

#[derive(Debug, Default)]
struct LikedState {
    ids: HashSet<TrackId>,
    /// Liked tracks in server order, for listing
    tracks: Vec<Track>,
}

impl LikedState {
    fn insert(&mut self, track: &Track) {
        if self.ids.insert(track.id.clone()) {
            self.tracks.push(track.clone());
        }
    }

    fn remove(&mut self, track_id: &TrackId) {
        if self.ids.remove(track_id) {
            self.tracks.retain(|t| &t.id != track_id);
        }
    }
}

/// Client-side copy of the liked set
///
/// The server is authoritative: the local set only changes after the server
/// confirmed the new state.
pub struct LikedSetController {
    backend: Arc<dyn MusicBackend>,
    state: RwLock<LikedState>,
}

impl LikedSetController {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            backend,
            state: RwLock::new(LikedState::default()),
        }
    }

    /// Replace the local set with the server's liked list
    pub async fn refresh(&self) -> Result<Vec<Track>> {
        let tracks = self.backend.liked().await?;

        let mut state = self.state.write().await;
        *state = LikedState::default();
        for track in &tracks {
            state.insert(track);
        }

        debug!(liked = state.ids.len(), "Refreshed liked songs");
        Ok(state.tracks.clone())
    }

    /// Flip the like flag on the server
    ///
    /// Returns the server's liked state for the track. On failure the local
    /// set is left untouched.
    pub async fn toggle(&self, track: &Track) -> Result<bool> {
        let liked = self.backend.like(track).await?;

        let mut state = self.state.write().await;
        if liked {
            state.insert(track);
        } else {
            state.remove(&track.id);
        }

        info!(track_id = %track.id, liked, "Like toggled");
        Ok(liked)
    }

    /// Remove a track from the liked list
    pub async fn unlike(&self, track_id: &TrackId) -> Result<()> {
        self.backend.unlike(track_id).await?;
        self.state.write().await.remove(track_id);

        info!(track_id = %track_id, "Unliked");
        Ok(())
    }

    pub async fn is_liked(&self, track_id: &TrackId) -> bool {
        self.state.read().await.ids.contains(track_id)
    }

    pub async fn ids(&self) -> HashSet<TrackId> {
        self.state.read().await.ids.clone()
    }

    /// Liked tracks as last seen
    pub async fn tracks(&self) -> Vec<Track> {
        self.state.read().await.tracks.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.ids.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.ids.is_empty()
    }
}
