//! "Made for you" mixes
//!
//! A mix is the first few results of a themed search. The built list is
//! cached in client storage under [`MIXES_KEY`] with no expiry; it is only
//! rebuilt after [`MixCache::clear`].

use nebula_core::{KeyValueStore, MusicBackend, Result, Track};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Storage key of the cached mixes
pub const MIXES_KEY: &str = "nebula_mixes";

/// Tracks kept per mix
pub const MIX_SIZE: usize = 6;

/// A named search that seeds a mix
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MixTheme {
    pub name: String,
    pub query: String,
}

impl MixTheme {
    pub fn new(name: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            query: query.into(),
        }
    }
}

/// The four themes shown on the home screen
pub fn default_themes() -> Vec<MixTheme> {
    vec![
        MixTheme::new("Lofi Chill Mix", "lofi chill beats 2025"),
        MixTheme::new("Workout Power Mix", "workout gym songs 2025"),
        MixTheme::new("Top Bollywood Mix", "bollywood top hits 2025"),
        MixTheme::new("Evening Vibes", "relaxing acoustic songs 2025"),
    ]
}

/// A built mix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mix {
    pub name: String,
    pub query: String,
    #[serde(rename = "songs", default)]
    pub tracks: Vec<Track>,
}

pub struct MixCache {
    backend: Arc<dyn MusicBackend>,
    store: Arc<dyn KeyValueStore>,
}

impl MixCache {
    pub fn new(backend: Arc<dyn MusicBackend>, store: Arc<dyn KeyValueStore>) -> Self {
        Self { backend, store }
    }

    /// Cached mixes, or build them from `themes`
    ///
    /// A theme whose search fails becomes an empty mix. If every mix comes
    /// back empty nothing is cached, so the next call tries again.
    pub async fn load_or_build(&self, themes: &[MixTheme]) -> Vec<Mix> {
        if let Some(mixes) = self.cached() {
            debug!(mixes = mixes.len(), "Serving mixes from storage");
            return mixes;
        }

        let mut mixes = Vec::with_capacity(themes.len());
        for theme in themes {
            let tracks = match self.backend.search(&theme.query).await {
                Ok(mut tracks) => {
                    tracks.truncate(MIX_SIZE);
                    tracks
                }
                Err(e) => {
                    warn!(mix = %theme.name, error = %e, "Mix search failed");
                    Vec::new()
                }
            };
            mixes.push(Mix {
                name: theme.name.clone(),
                query: theme.query.clone(),
                tracks,
            });
        }

        if mixes.iter().all(|m| m.tracks.is_empty()) {
            warn!("Every mix came back empty, not caching");
            return mixes;
        }

        if let Err(e) = self.persist(&mixes) {
            warn!(error = %e, "Failed to cache mixes");
        }
        info!(mixes = mixes.len(), "Built mixes");
        mixes
    }

    /// Mixes in storage, if any parse
    pub fn cached(&self) -> Option<Vec<Mix>> {
        let raw = match self.store.get(MIXES_KEY) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read cached mixes");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(mixes) => Some(mixes),
            Err(e) => {
                warn!(error = %e, "Discarding malformed cached mixes");
                None
            }
        }
    }

    /// Drop the cached mixes so the next load rebuilds them
    pub fn clear(&self) -> Result<()> {
        self.store.remove(MIXES_KEY)
    }

    fn persist(&self, mixes: &[Mix]) -> Result<()> {
        let json = serde_json::to_string(mixes)?;
        self.store.set(MIXES_KEY, &json)
    }
}
