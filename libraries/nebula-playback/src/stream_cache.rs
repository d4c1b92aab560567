//! Stream URL cache
//!
//! Memoizes track id → playable media URL. Only successful resolutions are
//! cached, so a failed lookup is retried the next time the track is played.
//! Concurrent misses for the same id each hit the backend.

use nebula_core::{MusicBackend, TrackId};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

pub struct StreamUrlCache {
    backend: Arc<dyn MusicBackend>,
    urls: RwLock<HashMap<TrackId, String>>,
}

impl StreamUrlCache {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self {
            backend,
            urls: RwLock::new(HashMap::new()),
        }
    }

    /// Playable URL for `track_id`, resolving it on a miss
    ///
    /// Returns `None` when the backend failed or had no URL.
    pub async fn resolve(&self, track_id: &TrackId) -> Option<String> {
        if let Some(url) = self.urls.read().await.get(track_id) {
            debug!(track_id = %track_id, "Stream URL cache hit");
            return Some(url.clone());
        }

        match self.backend.resolve_stream(track_id).await {
            Ok(Some(url)) => {
                debug!(track_id = %track_id, "Resolved stream URL");
                self.urls.write().await.insert(track_id.clone(), url.clone());
                Some(url)
            }
            Ok(None) => {
                warn!(track_id = %track_id, "Backend returned no stream URL");
                None
            }
            Err(e) => {
                warn!(track_id = %track_id, error = %e, "Stream resolution failed");
                None
            }
        }
    }

    /// Seed the cache with a known URL
    pub async fn insert(&self, track_id: TrackId, url: impl Into<String>) {
        self.urls.write().await.insert(track_id, url.into());
    }

    /// Forget one URL (e.g. after the output rejected it as expired)
    pub async fn invalidate(&self, track_id: &TrackId) -> bool {
        self.urls.write().await.remove(track_id).is_some()
    }

    pub async fn clear(&self) {
        self.urls.write().await.clear();
    }

    pub async fn len(&self) -> usize {
        self.urls.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.urls.read().await.is_empty()
    }

    pub async fn contains(&self, track_id: &TrackId) -> bool {
        self.urls.read().await.contains_key(track_id)
    }
}

impl std::fmt::Debug for StreamUrlCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamUrlCache").finish_non_exhaustive()
    }
}
