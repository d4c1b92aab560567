//! Playback controller - core orchestration
//!
//! Coordinates stream resolution, the audio output, the up-next queue and
//! the recently played list.
//!
//! All mutable player state sits behind one async mutex that is never held
//! across a network call, so several `play_track` requests can be in flight
//! at once. Each request takes a ticket from a monotonically increasing play
//! token; once a newer request has started, an older one's results are
//! thrown away instead of touching the output.

use crate::{
    crossfade::CrossfadePlan,
    error::{PlaybackError, Result},
    events::{EventBus, PlayerEvent},
    history::RecentHistoryStore,
    output::AudioOutput,
    queue::QueueController,
    stream_cache::StreamUrlCache,
    types::{PlayOutcome, PlaybackConfig, PlaybackState},
    volume::Volume,
};
use nebula_core::{KeyValueStore, MusicBackend, Track, TrackId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

/// State guarded by the controller's lock
struct Player {
    output: Box<dyn AudioOutput>,
    queue: QueueController,
    state: PlaybackState,
    /// Last state other than `Loading`; restored when a load fails
    settled: PlaybackState,
    current: Option<Track>,
    volume: Volume,
}

impl Player {
    fn set_state(&mut self, state: PlaybackState, events: &EventBus) {
        if state != PlaybackState::Loading {
            self.settled = state;
        }
        if self.state != state {
            self.state = state;
            events.emit(PlayerEvent::StateChanged { state });
        }
    }
}

/// How a successful load changes the queue
enum QueueUpdate {
    /// Replace with a visible list
    Context(Vec<Track>),
    /// Replace with the track plus a fetched continuation
    Autoplay,
    /// Step forward from `from`, keeping the list
    Advance { from: usize },
    /// Step back from `from`, keeping the list
    Retreat { from: usize },
}

/// Playback controller
///
/// State machine over a single audio output:
/// `Idle → Loading → Playing ⇄ Paused`.
pub struct PlaybackController {
    backend: Arc<dyn MusicBackend>,
    streams: StreamUrlCache,
    history: RecentHistoryStore,
    player: Mutex<Player>,
    play_token: AtomicU64,
    config: PlaybackConfig,
    events: EventBus,
}

impl PlaybackController {
    /// Create a controller that owns `output`
    pub fn new(
        backend: Arc<dyn MusicBackend>,
        store: Arc<dyn KeyValueStore>,
        mut output: Box<dyn AudioOutput>,
        config: PlaybackConfig,
    ) -> Self {
        let events = EventBus::new();
        let volume = Volume::new(config.volume);
        if let Err(e) = output.set_volume(volume.gain()) {
            warn!(error = %e, "Failed to apply initial volume");
        }

        Self {
            streams: StreamUrlCache::new(backend.clone()),
            history: RecentHistoryStore::new(store).with_events(events.clone()),
            backend,
            player: Mutex::new(Player {
                output,
                queue: QueueController::new(),
                state: PlaybackState::Idle,
                settled: PlaybackState::Idle,
                current: None,
                volume,
            }),
            play_token: AtomicU64::new(0),
            config,
            events,
        }
    }

    // ===== Playback Control =====

    /// Play `track`
    ///
    /// With a non-empty `context` list (search results, a playlist, the
    /// liked list) the queue becomes that list verbatim. Without one, or with
    /// an empty one, the backend is asked for an autoplay continuation.
    pub async fn play_track(&self, track: Track, context: Option<Vec<Track>>) -> PlayOutcome {
        let update = match context {
            Some(tracks) if !tracks.is_empty() => QueueUpdate::Context(tracks),
            _ => QueueUpdate::Autoplay,
        };
        self.load(track, update).await
    }

    /// Pause if playing, resume if paused; no-op otherwise
    ///
    /// Returns the resulting state.
    pub async fn toggle_play(&self) -> PlaybackState {
        let mut player = self.player.lock().await;

        match player.state {
            PlaybackState::Playing => {
                if let Err(e) = player.output.pause() {
                    warn!(error = %e, "Output failed to pause");
                }
                player.set_state(PlaybackState::Paused, &self.events);
            }
            PlaybackState::Paused => match player.output.play() {
                Ok(()) => player.set_state(PlaybackState::Playing, &self.events),
                Err(e) => {
                    warn!(error = %e, "Output refused to resume");
                    self.events.emit(PlayerEvent::Error {
                        message: e.to_string(),
                    });
                }
            },
            PlaybackState::Idle | PlaybackState::Loading => {}
        }

        player.state
    }

    /// Seek to `fraction` of the current track's duration
    ///
    /// The fraction is clamped to `[0, 1]`. Returns the target position.
    pub async fn seek(&self, fraction: f64) -> Result<Duration> {
        if !fraction.is_finite() {
            return Err(PlaybackError::InvalidSeekFraction(fraction));
        }

        let mut player = self.player.lock().await;
        if player.current.is_none() {
            return Err(PlaybackError::NoTrackLoaded);
        }

        let duration = player
            .output
            .duration()
            .or_else(|| player.current.as_ref().and_then(Track::duration))
            .filter(|d| !d.is_zero())
            .ok_or(PlaybackError::DurationUnknown)?;

        let position = duration.mul_f64(fraction.clamp(0.0, 1.0));
        player.output.seek(position)?;

        debug!(position_ms = position.as_millis() as u64, "Seeked");
        Ok(position)
    }

    /// Move to the next queued track
    ///
    /// Returns `None` at the end of the queue.
    pub async fn next(&self) -> Option<PlayOutcome> {
        let (track, from) = {
            let player = self.player.lock().await;
            let from = player.queue.current_index()?;
            (player.queue.peek_next()?.clone(), from)
        };
        Some(self.load(track, QueueUpdate::Advance { from }).await)
    }

    /// Move to the previous queued track
    ///
    /// Returns `None` at the start of the queue.
    pub async fn previous(&self) -> Option<PlayOutcome> {
        let (track, from) = {
            let player = self.player.lock().await;
            let from = player.queue.current_index()?;
            (player.queue.peek_previous()?.clone(), from)
        };
        Some(self.load(track, QueueUpdate::Retreat { from }).await)
    }

    /// The output finished the current track
    ///
    /// Advances like [`next`](Self::next). When there is nothing playable
    /// after it (end of the queue, or the next stream does not resolve) the
    /// player pauses on the finished track.
    pub async fn on_track_ended(&self) -> Option<PlayOutcome> {
        let outcome = self.next().await;

        match outcome {
            None | Some(PlayOutcome::Unresolved) => {
                let mut player = self.player.lock().await;
                if player.current.is_some() && player.state != PlaybackState::Loading {
                    info!(?outcome, "Nothing playable after finished track, pausing");
                    player.set_state(PlaybackState::Paused, &self.events);
                }
            }
            Some(PlayOutcome::Started | PlayOutcome::Superseded) => {}
        }

        outcome
    }

    // ===== Volume Control =====

    /// Set volume, clamped to `[0, 1]`; returns the applied level
    pub async fn set_volume(&self, level: f32) -> f32 {
        let mut player = self.player.lock().await;
        let applied = player.volume.set_level(level);
        self.apply_volume(&mut player);
        applied
    }

    pub async fn mute(&self) {
        let mut player = self.player.lock().await;
        player.volume.mute();
        self.apply_volume(&mut player);
    }

    pub async fn unmute(&self) {
        let mut player = self.player.lock().await;
        player.volume.unmute();
        self.apply_volume(&mut player);
    }

    /// Returns whether audio is muted afterwards
    pub async fn toggle_mute(&self) -> bool {
        let mut player = self.player.lock().await;
        player.volume.toggle_mute();
        self.apply_volume(&mut player);
        player.volume.is_muted()
    }

    pub async fn volume(&self) -> f32 {
        self.player.lock().await.volume.level()
    }

    pub async fn is_muted(&self) -> bool {
        self.player.lock().await.volume.is_muted()
    }

    // ===== State Queries =====

    pub async fn state(&self) -> PlaybackState {
        self.player.lock().await.state
    }

    pub async fn current_track(&self) -> Option<Track> {
        self.player.lock().await.current.clone()
    }

    /// Snapshot of the whole queue
    pub async fn queue(&self) -> Vec<Track> {
        self.player.lock().await.queue.tracks().to_vec()
    }

    pub async fn queue_index(&self) -> Option<usize> {
        self.player.lock().await.queue.current_index()
    }

    /// Tracks after the current one
    pub async fn upcoming(&self) -> Vec<Track> {
        self.player.lock().await.queue.upcoming().to_vec()
    }

    pub async fn has_next(&self) -> bool {
        self.player.lock().await.queue.has_next()
    }

    pub async fn has_previous(&self) -> bool {
        self.player.lock().await.queue.has_previous()
    }

    /// Output position, `None` when nothing is loaded
    pub async fn position(&self) -> Option<Duration> {
        let player = self.player.lock().await;
        player.current.as_ref().map(|_| player.output.position())
    }

    /// Duration of the current track, from the output or the backend
    pub async fn duration(&self) -> Option<Duration> {
        let player = self.player.lock().await;
        let current = player.current.as_ref()?;
        player.output.duration().or_else(|| current.duration())
    }

    /// Recently played tracks, most recent first
    pub fn recent(&self) -> Vec<Track> {
        self.history.load()
    }

    pub fn history(&self) -> &RecentHistoryStore {
        &self.history
    }

    pub fn stream_cache(&self) -> &StreamUrlCache {
        &self.streams
    }

    /// Receive player events from now on
    pub fn subscribe(&self) -> broadcast::Receiver<PlayerEvent> {
        self.events.subscribe()
    }

    pub fn config(&self) -> &PlaybackConfig {
        &self.config
    }

    // ===== Internal =====

    fn is_current(&self, token: u64) -> bool {
        self.play_token.load(Ordering::SeqCst) == token
    }

    async fn load(&self, track: Track, update: QueueUpdate) -> PlayOutcome {
        let token = self.play_token.fetch_add(1, Ordering::SeqCst) + 1;
        info!(track_id = %track.id, title = %track.title, "Loading track");

        self.player
            .lock()
            .await
            .set_state(PlaybackState::Loading, &self.events);

        let url = self.streams.resolve(&track.id).await;

        let mut player = self.player.lock().await;
        if !self.is_current(token) {
            debug!(track_id = %track.id, "Discarding superseded load");
            return PlayOutcome::Superseded;
        }

        let Some(url) = url else {
            warn!(track_id = %track.id, "No stream URL, keeping current track");
            let settled = player.settled;
            player.set_state(settled, &self.events);
            return PlayOutcome::Unresolved;
        };

        let track = track.with_stream_url(url);
        let state = self.start_output(&mut player, &track);
        let previous = player.current.replace(track.clone());
        player.set_state(state, &self.events);
        self.events.emit(PlayerEvent::TrackChanged {
            track: track.clone(),
            previous_track_id: previous.map(|t| t.id),
        });

        let wants_autoplay = match update {
            QueueUpdate::Context(tracks) => {
                player.queue.set_context(tracks, &track.id);
                false
            }
            QueueUpdate::Autoplay => {
                player.queue.set_single(track.clone());
                true
            }
            QueueUpdate::Advance { from } => {
                if player.queue.current_index() == Some(from) {
                    player.queue.advance();
                }
                false
            }
            QueueUpdate::Retreat { from } => {
                if player.queue.current_index() == Some(from) {
                    player.queue.retreat();
                }
                false
            }
        };
        self.emit_queue(&player.queue);
        let needs_duration = player.output.duration().is_none() && track.duration().is_none();
        drop(player);

        if let Err(e) = self.history.record(&track) {
            warn!(track_id = %track.id, error = %e, "Failed to record recently played");
        }

        if wants_autoplay {
            self.fetch_autoplay(token, &track).await;
        }

        if needs_duration {
            self.attach_duration(token, &track.id).await;
        }

        PlayOutcome::Started
    }

    /// Point the output at the track's URL and start it
    ///
    /// Output failures are absorbed: the player ends up `Paused` on the new
    /// track.
    fn start_output(&self, player: &mut Player, track: &Track) -> PlaybackState {
        let Some(url) = track.stream_url.as_deref() else {
            return PlaybackState::Paused;
        };

        let crossfade = (self.config.crossfade_enabled()
            && player.settled == PlaybackState::Playing)
            .then(|| CrossfadePlan {
                duration: self.config.crossfade,
                curve: self.config.fade_curve,
                gain: player.volume.gain(),
            });

        let result = match &crossfade {
            Some(plan) => {
                if let Some(from) = &player.current {
                    self.events.emit(PlayerEvent::CrossfadeStarted {
                        from_track_id: from.id.clone(),
                        to_track_id: track.id.clone(),
                        duration_ms: plan.duration.as_millis() as u64,
                    });
                }
                player.output.crossfade_to(url, plan)
            }
            None => player
                .output
                .set_source(url)
                .and_then(|()| player.output.play()),
        };

        match result {
            Ok(()) => PlaybackState::Playing,
            Err(e) => {
                warn!(track_id = %track.id, error = %e, "Output refused to start, pausing");
                self.events.emit(PlayerEvent::Error {
                    message: e.to_string(),
                });
                PlaybackState::Paused
            }
        }
    }

    async fn fetch_autoplay(&self, token: u64, seed: &Track) {
        let continuation = match self.backend.autoplay_upnext(&seed.id).await {
            Ok(tracks) => tracks,
            Err(e) => {
                warn!(track_id = %seed.id, error = %e, "Autoplay continuation failed");
                Vec::new()
            }
        };

        let mut player = self.player.lock().await;
        if !self.is_current(token) {
            return;
        }

        debug!(track_id = %seed.id, tracks = continuation.len(), "Queued autoplay continuation");
        player.queue.extend_with_autoplay(seed.clone(), continuation);
        self.emit_queue(&player.queue);
    }

    async fn attach_duration(&self, token: u64, track_id: &TrackId) {
        let duration = match self.backend.track_info(track_id).await {
            Ok(info) => info.duration(),
            Err(e) => {
                debug!(track_id = %track_id, error = %e, "Track info unavailable");
                None
            }
        };
        let Some(duration) = duration else {
            return;
        };

        let mut player = self.player.lock().await;
        if !self.is_current(token) {
            return;
        }
        if let Some(current) = player.current.as_mut().filter(|t| &t.id == track_id) {
            current.attach_duration(duration);
            debug!(track_id = %track_id, duration_secs = duration.as_secs(), "Attached duration");
        }
    }

    fn apply_volume(&self, player: &mut Player) {
        if let Err(e) = player.output.set_volume(player.volume.gain()) {
            warn!(error = %e, "Output failed to apply volume");
        }
        self.events.emit(PlayerEvent::VolumeChanged {
            level: player.volume.level(),
            muted: player.volume.is_muted(),
        });
    }

    fn emit_queue(&self, queue: &QueueController) {
        self.events.emit(PlayerEvent::QueueChanged {
            length: queue.len(),
            index: queue.current_index(),
        });
    }
}
