//! Recently played list
//!
//! Most-recent-first, de-duplicated by track id and capped at
//! [`RECENT_LIMIT`] entries. Persisted as a JSON array under
//! [`RECENT_KEY`] on every write so it survives restarts.

use crate::events::{EventBus, PlayerEvent};
use nebula_core::{KeyValueStore, NebulaError, Result, Track};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// Storage key of the recently played list
pub const RECENT_KEY: &str = "recentPlayed";

/// Maximum number of remembered tracks
pub const RECENT_LIMIT: usize = 10;

pub struct RecentHistoryStore {
    store: Arc<dyn KeyValueStore>,
    events: Option<EventBus>,
    /// Serializes read-modify-write cycles
    write_lock: Mutex<()>,
}

impl RecentHistoryStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            events: None,
            write_lock: Mutex::new(()),
        }
    }

    /// Publish `RecentUpdated` on `events` after every write
    #[must_use]
    pub fn with_events(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Read the persisted list
    ///
    /// Missing, unreadable or malformed data yields an empty list.
    pub fn load(&self) -> Vec<Track> {
        let raw = match self.store.get(RECENT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read recently played list");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(error = %e, "Discarding malformed recently played list");
            Vec::new()
        })
    }

    /// Put `track` at the front and persist
    ///
    /// Returns the new list.
    pub fn record(&self, track: &Track) -> Result<Vec<Track>> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| NebulaError::storage("recently played lock poisoned"))?;

        let mut tracks = self.load();
        tracks.retain(|t| t.id != track.id);
        tracks.insert(0, track.clone());
        tracks.truncate(RECENT_LIMIT);

        self.persist(&tracks)?;
        debug!(track_id = %track.id, entries = tracks.len(), "Recorded recently played");
        Ok(tracks)
    }

    /// Forget every entry
    pub fn clear(&self) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| NebulaError::storage("recently played lock poisoned"))?;

        self.store.remove(RECENT_KEY)?;
        self.notify(Vec::new());
        Ok(())
    }

    fn persist(&self, tracks: &[Track]) -> Result<()> {
        let json = serde_json::to_string(tracks)?;
        self.store.set(RECENT_KEY, &json)?;
        self.notify(tracks.to_vec());
        Ok(())
    }

    fn notify(&self, tracks: Vec<Track>) {
        if let Some(events) = &self.events {
            events.emit(PlayerEvent::RecentUpdated { tracks });
        }
    }
}

impl std::fmt::Debug for RecentHistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecentHistoryStore").finish_non_exhaustive()
    }
}
