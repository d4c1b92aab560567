//! Player events
//!
//! Every observable change is published on a broadcast channel so front ends
//! can re-render without polling. Events are dropped when nobody listens.

use crate::types::PlaybackState;
use nebula_core::{Track, TrackId};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Buffered events per subscriber before the slowest one starts lagging
const EVENT_CAPACITY: usize = 64;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Playback state changed
    StateChanged { state: PlaybackState },

    /// A new track became current
    TrackChanged {
        track: Track,
        previous_track_id: Option<TrackId>,
    },

    /// Queue replaced or the index moved
    QueueChanged { length: usize, index: Option<usize> },

    /// Volume or mute changed
    VolumeChanged { level: f32, muted: bool },

    /// The recently played list was rewritten
    RecentUpdated { tracks: Vec<Track> },

    /// A crossfade into the new track started
    CrossfadeStarted {
        from_track_id: TrackId,
        to_track_id: TrackId,
        duration_ms: u64,
    },

    /// The output reported an error that was recovered from
    Error { message: String },
}

/// Cloneable handle to the player's event channel
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<PlayerEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(EVENT_CAPACITY);
        Self { sender }
    }

    /// Start receiving events published from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.sender.subscribe()
    }

    pub fn emit(&self, event: PlayerEvent) {
        // Err only means there are no subscribers
        let _ = self.sender.send(event);
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
