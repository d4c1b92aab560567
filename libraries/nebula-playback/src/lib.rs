//! Nebula Player - Playback Control
//!
//! Platform-agnostic playback control for Nebula Player.
//!
//! This crate provides:
//! - Stream URL resolution with a success-only cache
//! - Up-next queue with contextual replacement and autoplay continuation
//! - Playback state machine (Idle, Loading, Playing, Paused)
//! - Volume (0.0-1.0, mute/unmute) and optional crossfade
//! - Recently played list persisted to client storage
//! - Player events on a broadcast channel
//!
//! # Architecture
//!
//! The controller talks to the backend through [`nebula_core::MusicBackend`]
//! and to the platform through [`AudioOutput`]. Neither the HTTP client nor
//! any audio stack is a dependency of this crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use nebula_core::{MemoryStore, MusicBackend, Track};
//! use nebula_playback::{AudioOutput, PlaybackConfig, PlaybackController, PlayOutcome};
//! use std::sync::Arc;
//!
//! # async fn demo(backend: Arc<dyn MusicBackend>, output: Box<dyn AudioOutput>) {
//! let player = PlaybackController::new(
//!     backend,
//!     Arc::new(MemoryStore::new()),
//!     output,
//!     PlaybackConfig::default(),
//! );
//!
//! let track = Track::new("dQw4w9WgXcQ", "Never Gonna Give You Up", "Rick Astley");
//! if player.play_track(track, None).await == PlayOutcome::Started {
//!     player.set_volume(0.8).await;
//!     player.next().await;
//! }
//! # }
//! ```

mod controller;
mod crossfade;
mod error;
mod events;
mod history;
mod output;
mod queue;
mod stream_cache;
pub mod types;
mod volume;

// Public exports
pub use controller::PlaybackController;
pub use crossfade::{CrossfadePlan, FadeCurve};
pub use error::{PlaybackError, Result};
pub use events::{EventBus, PlayerEvent};
pub use history::{RecentHistoryStore, RECENT_KEY, RECENT_LIMIT};
pub use output::AudioOutput;
pub use queue::QueueController;
pub use stream_cache::StreamUrlCache;
pub use types::{PlayOutcome, PlaybackConfig, PlaybackState};
pub use volume::Volume;
