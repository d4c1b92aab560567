//! Platform audio output trait
//!
//! Decoding and playing a URL is a platform concern (a browser element, a
//! native player, a test double). The controller drives it through this
//! trait and owns it exclusively.

use crate::crossfade::CrossfadePlan;
use nebula_core::Result;
use std::time::Duration;

/// A single audio sink that plays one media URL at a time
pub trait AudioOutput: Send {
    /// Replace the current media source (does not start playback)
    fn set_source(&mut self, url: &str) -> Result<()>;

    /// Start or resume playback
    ///
    /// May fail when the platform refuses to start audio.
    fn play(&mut self) -> Result<()>;

    fn pause(&mut self) -> Result<()>;

    /// Seek within the current source
    fn seek(&mut self, position: Duration) -> Result<()>;

    /// Set the output gain in `[0.0, 1.0]`
    fn set_volume(&mut self, gain: f32) -> Result<()>;

    /// Current playback position
    fn position(&self) -> Duration;

    /// Duration of the current source, if the platform knows it yet
    fn duration(&self) -> Option<Duration>;

    /// Start `url` while fading out whatever is playing
    ///
    /// Outputs that cannot overlap two sources cut over immediately.
    fn crossfade_to(&mut self, url: &str, _plan: &CrossfadePlan) -> Result<()> {
        self.set_source(url)?;
        self.play()
    }
}
