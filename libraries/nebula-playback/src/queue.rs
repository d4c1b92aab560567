//! Up-next queue
//!
//! An ordered list of tracks plus the index of the current one. The list is
//! replaced wholesale whenever the playback context changes; only the index
//! moves in between.
//!
//! ```text
//! tracks:  [A] [B] [C] [D]
//!               ^
//!             index (current = B, upcoming = C, D)
//! ```

use nebula_core::{Track, TrackId};

/// Up-next queue with index-based, non-destructive navigation
///
/// Invariant: `index` is `Some(i)` with `i < tracks.len()` whenever the
/// queue is non-empty, and `None` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct QueueController {
    tracks: Vec<Track>,
    index: Option<usize>,
}

impl QueueController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue with a visible list (search results, a playlist,
    /// the liked list)
    ///
    /// The index points at `start` if it is in the list, else at the first
    /// track.
    pub fn set_context(&mut self, tracks: Vec<Track>, start: &TrackId) {
        self.index = if tracks.is_empty() {
            None
        } else {
            Some(tracks.iter().position(|t| &t.id == start).unwrap_or(0))
        };
        self.tracks = tracks;
    }

    /// Queue a single track
    pub fn set_single(&mut self, track: Track) {
        self.tracks = vec![track];
        self.index = Some(0);
    }

    /// Queue `seed` followed by its autoplay continuation
    ///
    /// An empty continuation (the fetch failed or found nothing) leaves just
    /// the seed queued. Copies of the seed in the continuation are skipped.
    pub fn extend_with_autoplay(&mut self, seed: Track, continuation: Vec<Track>) {
        let seed_id = seed.id.clone();
        let mut tracks = Vec::with_capacity(continuation.len() + 1);
        tracks.push(seed);
        tracks.extend(continuation.into_iter().filter(|t| t.id != seed_id));

        self.tracks = tracks;
        self.index = Some(0);
    }

    /// Move to the next track
    ///
    /// Returns `None` at the last position without changing anything.
    pub fn advance(&mut self) -> Option<&Track> {
        let next = self.peek_next_index()?;
        self.index = Some(next);
        self.tracks.get(next)
    }

    /// Move to the previous track
    ///
    /// Returns `None` at the first position without changing anything.
    pub fn retreat(&mut self) -> Option<&Track> {
        let previous = self.peek_previous_index()?;
        self.index = Some(previous);
        self.tracks.get(previous)
    }

    /// Track `advance` would move to
    pub fn peek_next(&self) -> Option<&Track> {
        self.peek_next_index().and_then(|i| self.tracks.get(i))
    }

    /// Track `retreat` would move to
    pub fn peek_previous(&self) -> Option<&Track> {
        self.peek_previous_index().and_then(|i| self.tracks.get(i))
    }

    fn peek_next_index(&self) -> Option<usize> {
        let index = self.index?;
        (index + 1 < self.tracks.len()).then_some(index + 1)
    }

    fn peek_previous_index(&self) -> Option<usize> {
        self.index?.checked_sub(1)
    }

    pub fn current(&self) -> Option<&Track> {
        self.index.and_then(|i| self.tracks.get(i))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Tracks after the current one, for an "up next" view
    pub fn upcoming(&self) -> &[Track] {
        match self.index {
            Some(i) => &self.tracks[i + 1..],
            None => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.peek_next_index().is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.peek_previous_index().is_some()
    }

    pub fn clear(&mut self) {
        self.tracks.clear();
        self.index = None;
    }
}
