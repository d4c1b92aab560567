//! Nebula Player Core
//!
//! Platform-agnostic types, traits, and error handling shared by every
//! Nebula crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `Track`, `Playlist`, `TrackInfo` and their ids
//! - **Core Traits**: `MusicBackend` (the remote API) and `KeyValueStore`
//!   (durable client storage)
//! - **Error Handling**: unified `NebulaError` and `Result` types
//! - **Title normalization**: deriving display titles and artists from raw
//!   video titles
//!
//! # Example
//!
//! ```rust
//! use nebula_core::types::{Track, TrackId};
//! use nebula_core::{KeyValueStore, MemoryStore};
//!
//! let track = Track::new("dQw4w9WgXcQ", "Never Gonna Give You Up", "Rick Astley");
//! assert_eq!(track.id, TrackId::new("dQw4w9WgXcQ"));
//!
//! let store = MemoryStore::new();
//! store.set("greeting", "hello").unwrap();
//! assert_eq!(store.get("greeting").unwrap().as_deref(), Some("hello"));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod storage;
pub mod title;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use error::{NebulaError, Result};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
pub use traits::MusicBackend;
pub use types::{Playlist, PlaylistId, Track, TrackId, TrackInfo};
