//! Top tracks and mood-based discovery
//!
//! Both are plain searches trimmed to a fixed size. Nothing is cached; every
//! call asks the backend again.

use nebula_core::{MusicBackend, Result, Track};
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::sync::Arc;
use tracing::debug;

/// Query behind the home screen's "Top Tracks" row
pub const TOP_TRACKS_QUERY: &str = "top global hits 2025";

/// Tracks shown in the "Top Tracks" row
pub const TOP_TRACKS_SIZE: usize = 6;

/// Moods the discover page picks from
pub const DISCOVER_MOODS: [&str; 8] = [
    "chill",
    "lofi",
    "acoustic",
    "pop",
    "indie",
    "romantic",
    "trap",
    "instrumental",
];

/// Tracks kept per discovery
pub const DISCOVER_SIZE: usize = 20;

/// Result of a discover search
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery {
    pub mood: String,
    /// Meant to be played with the whole list as queue context
    pub tracks: Vec<Track>,
}

pub struct DiscoverFeed {
    backend: Arc<dyn MusicBackend>,
}

impl DiscoverFeed {
    pub fn new(backend: Arc<dyn MusicBackend>) -> Self {
        Self { backend }
    }

    /// First [`TOP_TRACKS_SIZE`] results for [`TOP_TRACKS_QUERY`]
    pub async fn top_tracks(&self) -> Result<Vec<Track>> {
        let mut tracks = self.backend.search(TOP_TRACKS_QUERY).await?;
        tracks.truncate(TOP_TRACKS_SIZE);
        debug!(tracks = tracks.len(), "Fetched top tracks");
        Ok(tracks)
    }

    /// Search a randomly picked mood
    pub async fn discover(&self) -> Result<Discovery> {
        let mood = DISCOVER_MOODS
            .choose(&mut thread_rng())
            .copied()
            .unwrap_or(DISCOVER_MOODS[0]);
        self.discover_mood(mood).await
    }

    /// Search `mood`, keeping the first [`DISCOVER_SIZE`] results
    pub async fn discover_mood(&self, mood: &str) -> Result<Discovery> {
        let mut tracks = self.backend.search(mood).await?;
        tracks.truncate(DISCOVER_SIZE);
        debug!(mood = %mood, tracks = tracks.len(), "Discovered tracks");

        Ok(Discovery {
            mood: mood.to_string(),
            tracks,
        })
    }
}
