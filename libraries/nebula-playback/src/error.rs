//! Error types for playback control

use nebula_core::NebulaError;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// No track is currently loaded
    #[error("No track loaded")]
    NoTrackLoaded,

    /// Seeking needs a known duration
    #[error("Track duration is unknown")]
    DurationUnknown,

    /// Seek fraction was NaN or infinite
    #[error("Invalid seek fraction: {0}")]
    InvalidSeekFraction(f64),

    /// Backend, storage or output failure
    #[error(transparent)]
    Backend(#[from] NebulaError),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
