//! Crossfade between the outgoing and incoming track
//!
//! The controller only decides *whether* to crossfade and hands the output a
//! [`CrossfadePlan`]; the output applies the gains on its own clock.

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;
use std::time::Duration;

/// Crossfade curve type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FadeCurve {
    /// Straight-line ramp; the outgoing track falls as the incoming rises
    #[default]
    Linear,

    /// t^0.5: rises quickly then levels off
    SquareRoot,

    /// Slow start, fast middle, slow end
    SCurve,

    /// Constant perceived loudness (sin/cos pair)
    EqualPower,
}

impl FadeCurve {
    /// Gain at a normalized `position` in the fade
    ///
    /// `fade_out` selects the outgoing side. Positions outside `[0, 1]` are
    /// clamped.
    #[inline]
    pub fn calculate_gain(&self, position: f32, fade_out: bool) -> f32 {
        let position = if position.is_nan() {
            0.0
        } else {
            position.clamp(0.0, 1.0)
        };
        let t = if fade_out { 1.0 - position } else { position };

        match self {
            FadeCurve::Linear => t,
            FadeCurve::SquareRoot => t.sqrt(),
            FadeCurve::SCurve => (1.0 - (PI * t).cos()) * 0.5,
            FadeCurve::EqualPower => (t * PI * 0.5).sin(),
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FadeCurve::Linear => "Linear",
            FadeCurve::SquareRoot => "Square Root",
            FadeCurve::SCurve => "S-Curve",
            FadeCurve::EqualPower => "Equal Power",
        }
    }
}

/// A single track-to-track fade
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossfadePlan {
    pub duration: Duration,
    pub curve: FadeCurve,
    /// Volume gain both sides are scaled by
    pub gain: f32,
}

impl CrossfadePlan {
    /// Normalized progress after `elapsed`
    pub fn progress(&self, elapsed: Duration) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).min(1.0)
    }

    /// `(outgoing, incoming)` gains after `elapsed`
    pub fn gains_at(&self, elapsed: Duration) -> (f32, f32) {
        let progress = self.progress(elapsed);
        (
            self.curve.calculate_gain(progress, true) * self.gain,
            self.curve.calculate_gain(progress, false) * self.gain,
        )
    }

    /// Gains sampled at `steps + 1` evenly spaced points across the fade
    pub fn ramp(&self, steps: u32) -> Vec<(f32, f32)> {
        let steps = steps.max(1);
        (0..=steps)
            .map(|step| self.gains_at(self.duration.mul_f64(f64::from(step) / f64::from(steps))))
            .collect()
    }
}
