/// Composition root
use crate::config::NebulaConfig;
use crate::error::Result;
use nebula_api_client::NebulaClient;
use nebula_core::{FileStore, KeyValueStore, MusicBackend, Track, TrackId};
use nebula_library::{DiscoverFeed, LikedSetController, MixCache, PlaylistMembershipController};
use nebula_playback::{AudioOutput, PlaybackController};
use std::sync::Arc;
use tracing::info;

/// Everything a front end needs, built once and passed around explicitly
pub struct AppContext {
    pub config: NebulaConfig,
    pub backend: Arc<dyn MusicBackend>,
    pub store: Arc<dyn KeyValueStore>,
    pub player: PlaybackController,
    pub liked: LikedSetController,
    pub playlists: PlaylistMembershipController,
    pub mixes: MixCache,
    pub discover: DiscoverFeed,
}

impl AppContext {
    /// Wire the HTTP client, file storage and controllers together
    pub fn new(config: NebulaConfig, output: Box<dyn AudioOutput>) -> Result<Self> {
        let client = NebulaClient::new(config.api_config())?;
        info!(base_url = %client.base_url(), "Backend client ready");

        let store = FileStore::open(config.storage.data_dir.clone())?;
        info!(data_dir = %config.storage.data_dir.display(), "Client storage ready");

        Ok(Self::with_parts(config, Arc::new(client), Arc::new(store), output))
    }

    /// Wire pre-built parts, e.g. an offline backend or in-memory storage
    pub fn with_parts(
        config: NebulaConfig,
        backend: Arc<dyn MusicBackend>,
        store: Arc<dyn KeyValueStore>,
        output: Box<dyn AudioOutput>,
    ) -> Self {
        let player = PlaybackController::new(
            Arc::clone(&backend),
            Arc::clone(&store),
            output,
            config.playback_config(),
        );

        Self {
            player,
            liked: LikedSetController::new(Arc::clone(&backend)),
            playlists: PlaylistMembershipController::new(Arc::clone(&backend)),
            mixes: MixCache::new(Arc::clone(&backend), Arc::clone(&store)),
            discover: DiscoverFeed::new(Arc::clone(&backend)),
            config,
            backend,
            store,
        }
    }

    /// Full metadata for `track_id`
    ///
    /// With `context` the track has to be one of those results; otherwise the
    /// backend is searched for the id itself. `None` when it is not found.
    pub async fn lookup_track(
        &self,
        track_id: &TrackId,
        context: Option<&[Track]>,
    ) -> Result<Option<Track>> {
        let find = |tracks: &[Track]| tracks.iter().find(|t| &t.id == track_id).cloned();

        match context {
            Some(tracks) => Ok(find(tracks)),
            None => {
                let hits = self.backend.search(track_id.as_str()).await?;
                Ok(find(&hits))
            }
        }
    }
}
