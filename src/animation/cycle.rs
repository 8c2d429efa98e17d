use crate::animation::ease::Ease;
use crate::animation::interp::{Curve, InterpOpts, interpolate};
use crate::foundation::core::Fps;

/// Phase breakpoints of one swing period.
pub const SWING_INPUTS: [f64; 9] = [0.0, 0.125, 0.25, 0.375, 0.5, 0.625, 0.75, 0.875, 1.0];

/// Normalized swing: two full left/right oscillations per period.
pub const SWING_TABLE: [f64; 9] = [0.0, 0.3, 0.0, -0.3, 0.0, 0.3, 0.0, -0.3, 0.0];

/// Repeating phase in `[0, 1)`; `0.0` for a non-positive period or non-finite input.
pub fn cycle_phase(elapsed: f64, period: f64) -> f64 {
    if !(period > 0.0) || !period.is_finite() || !elapsed.is_finite() {
        return 0.0;
    }
    let p = elapsed.rem_euclid(period) / period;
    // rem_euclid may round up to `period` for tiny negative inputs.
    if p >= 1.0 { 0.0 } else { p }
}

/// Breakpoint table replayed every `period` frames and scaled by `amplitude`.
#[derive(Clone, Debug, PartialEq)]
pub struct Oscillator {
    period: f64,
    amplitude: f64,
    curve: Curve,
}

impl Oscillator {
    /// Replay `curve` (defined over phase `[0, 1]`) every `period` frames.
    pub fn new(period: f64, curve: Curve, amplitude: f64) -> Self {
        Self {
            period,
            amplitude,
            curve,
        }
    }

    /// The hand swing: [`SWING_TABLE`] over [`SWING_INPUTS`].
    pub fn swing(period: f64, amplitude: f64) -> Self {
        Self::new(
            period,
            Curve::from_static(&SWING_INPUTS, &SWING_TABLE, InterpOpts::CLAMP),
            amplitude,
        )
    }

    /// Value after `elapsed` frames.
    pub fn sample(&self, elapsed: f64) -> f64 {
        self.amplitude * self.curve.sample(cycle_phase(elapsed, self.period))
    }
}

/// Vertical hop synced to a tempo: rise by `distance` over the first 30% of each beat, hold
/// until half way, fall back by the end. Negative values point up.
pub fn beat_offset(frame_since_start: f64, fps: Fps, bpm: f64, distance: f64) -> f64 {
    if !(frame_since_start >= 0.0) || !(bpm > 0.0) {
        return 0.0;
    }
    let frames_per_beat = fps.as_f64() * 60.0 / bpm;
    let p = cycle_phase(frame_since_start, frames_per_beat);
    if p <= 0.3 {
        interpolate(
            p,
            &[0.0, 0.3],
            &[0.0, -distance],
            InterpOpts::CLAMP.with_ease(Ease::OutQuad),
        )
    } else if p <= 0.5 {
        -distance
    } else {
        interpolate(
            p,
            &[0.5, 1.0],
            &[-distance, 0.0],
            InterpOpts::CLAMP.with_ease(Ease::InQuad),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/cycle.rs"]
mod tests;
