//! Nebula Player - Library
//!
//! Controllers for the user's collection, independent of playback:
//! - **Liked songs**: a local set kept consistent with the backend through
//!   explicit round-trips (never optimistic)
//! - **Playlists**: list, create, add a track, delete, with a read-through
//!   cache of the last fetched list
//! - **Mixes**: themed search results cached in client storage
//! - **Discover**: the "Top Tracks" row and a random mood search
//!
//! Every controller is handed its backend (and storage, where needed)
//! explicitly; nothing here is a global.

mod discover;
mod liked;
mod mixes;
mod playlists;

pub use discover::{
    DiscoverFeed, Discovery, DISCOVER_MOODS, DISCOVER_SIZE, TOP_TRACKS_QUERY, TOP_TRACKS_SIZE,
};
pub use liked::LikedSetController;
pub use mixes::{default_themes, Mix, MixCache, MixTheme, MIXES_KEY, MIX_SIZE};
pub use playlists::PlaylistMembershipController;
