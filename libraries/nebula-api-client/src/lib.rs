//! Nebula API Client
//!
//! HTTP client library for the Nebula music backend.
//!
//! # Features
//!
//! - **Catalog**: search, stream URL resolution, track info, autoplay
//! - **Likes**: toggle, unlike, list liked songs
//! - **Playlists**: list, create, add a track, delete
//!
//! `NebulaClient` also implements [`nebula_core::MusicBackend`], which is how
//! the playback and library controllers consume it.
//!
//! # Example
//!
//! ```ignore
//! use nebula_api_client::{ApiConfig, NebulaClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = NebulaClient::new(ApiConfig::new("http://127.0.0.1:8000"))?;
//!
//!     let results = client.catalog().search("lofi beats").await?;
//!     println!("Found {} songs", results.len());
//!
//!     if let Some(first) = results.first() {
//!         let url = client.catalog().resolve_stream(&first.id).await?;
//!         println!("Stream: {:?}", url);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod backend;
mod catalog;
mod client;
mod error;
mod likes;
mod playlists;
mod types;

// Re-export main types
pub use client::NebulaClient;
pub use error::{ApiClientError, Result};
pub use types::{
    extract_playlist_id, AddToPlaylistRequest, ApiConfig, CreatePlaylistRequest, LikeResponse,
    LikedResponse, PlaylistItem, PlaylistsResponse, StreamResponse, TrackItem, UpNextResponse,
    DEFAULT_BASE_URL,
};

// Re-export sub-clients for direct use if needed
pub use catalog::CatalogClient;
pub use likes::LikesClient;
pub use playlists::PlaylistClient;
