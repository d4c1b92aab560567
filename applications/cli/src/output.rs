/// Headless audio output
use nebula_core::Result;
use nebula_playback::{AudioOutput, CrossfadePlan};
use std::time::Duration;
use tracing::{debug, info};

/// Output for terminals without an audio stack
///
/// Accepts every command and logs it; `source()` exposes the URL the player
/// would be streaming.
#[derive(Debug, Default)]
pub struct LoggingOutput {
    source: Option<String>,
    playing: bool,
    gain: f32,
    position: Duration,
}

impl LoggingOutput {
    pub fn new() -> Self {
        Self {
            gain: 1.0,
            ..Self::default()
        }
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn gain(&self) -> f32 {
        self.gain
    }
}

impl AudioOutput for LoggingOutput {
    fn set_source(&mut self, url: &str) -> Result<()> {
        info!(url = %url, "Output source set");
        self.source = Some(url.to_string());
        self.playing = false;
        self.position = Duration::ZERO;
        Ok(())
    }

    fn play(&mut self) -> Result<()> {
        info!("Output playing");
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        info!("Output paused");
        self.playing = false;
        Ok(())
    }

    fn seek(&mut self, position: Duration) -> Result<()> {
        info!(position_ms = position.as_millis() as u64, "Output seeked");
        self.position = position;
        Ok(())
    }

    fn set_volume(&mut self, gain: f32) -> Result<()> {
        self.gain = gain;
        Ok(())
    }

    fn position(&self) -> Duration {
        self.position
    }

    fn duration(&self) -> Option<Duration> {
        None
    }

    fn crossfade_to(&mut self, url: &str, plan: &CrossfadePlan) -> Result<()> {
        let ramp = plan.ramp(4);
        info!(
            url = %url,
            duration_ms = plan.duration.as_millis() as u64,
            curve = plan.curve.display_name(),
            "Output crossfading"
        );
        debug!(?ramp, "Crossfade gains (outgoing, incoming)");

        self.set_source(url)?;
        // No second source to overlap, so land on the incoming side's final gain
        if let Some(&(_, incoming)) = ramp.last() {
            self.gain = incoming;
        }
        self.play()
    }
}
