//! Core types for playback control

use crate::crossfade::FadeCurve;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded yet
    #[default]
    Idle,

    /// Resolving and loading a track
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-track (or at the end of the queue)
    Paused,
}

/// What happened to a `play_track` request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// The track is now the current track
    ///
    /// The state is `Paused` rather than `Playing` if the output refused to
    /// start.
    Started,

    /// No stream URL could be resolved; nothing changed
    Unresolved,

    /// A newer request started while this one was resolving
    Superseded,
}

/// Configuration for the playback controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Initial volume (0.0-1.0, default: 1.0)
    pub volume: f32,

    /// Crossfade length when a new track starts over a playing one
    /// (default: zero, disabled)
    pub crossfade: Duration,

    /// Crossfade curve (default: Linear)
    pub fade_curve: FadeCurve,
}

impl PlaybackConfig {
    pub fn crossfade_enabled(&self) -> bool {
        !self.crossfade.is_zero()
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            crossfade: Duration::ZERO,
            fade_curve: FadeCurve::Linear,
        }
    }
}
