//! Damped harmonic oscillator driven from rest at 0 to a unit target.
//!
//! Time is measured in seconds (`frame / fps`), so the same config settles in the same wall-clock
//! time at any frame rate.

use crate::animation::interp::lerp;
use crate::foundation::core::Fps;
use crate::foundation::error::{FamilyError, FamilyResult};

/// Physical parameters of a spring.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpringConfig {
    /// Mass; larger is slower.
    pub mass: f64,
    /// Spring constant; larger is snappier.
    pub stiffness: f64,
    /// Damping coefficient; large values never overshoot.
    pub damping: f64,
    /// Clamp progress to `1.0` instead of overshooting.
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            stiffness: 100.0,
            damping: 10.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    /// Default mass and stiffness with the given damping.
    pub fn damped(damping: f64) -> Self {
        Self {
            damping,
            ..Self::default()
        }
    }

    /// Reject non-finite or non-positive parameters.
    pub fn validate(&self) -> FamilyResult<()> {
        for (name, v) in [
            ("mass", self.mass),
            ("stiffness", self.stiffness),
            ("damping", self.damping),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(FamilyError::animation(format!(
                    "spring {name} must be finite and > 0, got {v}"
                )));
            }
        }
        Ok(())
    }
}

/// Step response `x(t)` with `x(0) = 0`, `x'(0) = 0`, target `1`.
fn spring_step(t: f64, config: &SpringConfig) -> f64 {
    let k = config.stiffness.max(0.0);
    let c = config.damping.max(0.0);
    let m = config.mass.max(1e-9);

    let w0 = (k / m).sqrt();
    if w0 == 0.0 {
        return t.min(1.0);
    }
    let zeta = c / (2.0 * (k * m).sqrt()).max(1e-9);

    if (zeta - 1.0).abs() < 1e-6 {
        // Critically damped.
        let e = (-w0 * t).exp();
        1.0 - e * (1.0 + w0 * t)
    } else if zeta < 1.0 {
        let wd = w0 * (1.0 - zeta * zeta).sqrt();
        let e = (-zeta * w0 * t).exp();
        let k = zeta / (1.0 - zeta * zeta).sqrt();
        1.0 - e * ((wd * t).cos() + k * (wd * t).sin())
    } else {
        let z2 = (zeta * zeta - 1.0).sqrt();
        let r1 = -w0 * (zeta - z2);
        let r2 = -w0 * (zeta + z2);
        let c2 = (zeta + z2) / (2.0 * z2);
        let c1 = (zeta - z2) / (2.0 * z2);
        1.0 - (c2 * (r1 * t).exp() - c1 * (r2 * t).exp())
    }
}

/// Spring animation between two values, optionally delayed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Spring {
    /// Physical parameters.
    pub config: SpringConfig,
    /// Value at rest before the spring starts.
    pub from: f64,
    /// Target value.
    pub to: f64,
    /// Frames to wait before the spring is released.
    pub delay: f64,
}

impl Default for Spring {
    fn default() -> Self {
        Self {
            config: SpringConfig::default(),
            from: 0.0,
            to: 1.0,
            delay: 0.0,
        }
    }
}

impl Spring {
    /// Unit spring (0 to 1) with `config`.
    pub fn new(config: SpringConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Map progress onto `[from, to]`.
    pub fn between(mut self, from: f64, to: f64) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    /// Hold at `from` for `frames` frames first.
    pub fn delayed(mut self, frames: f64) -> Self {
        self.delay = frames;
        self
    }

    /// Normalized progress at `frame`: exactly `0.0` up to the release frame, tending to `1.0`.
    pub fn progress(&self, frame: f64, fps: Fps) -> f64 {
        let local = frame - self.delay;
        if !(local > 0.0) {
            return 0.0;
        }
        if !local.is_finite() {
            return 1.0;
        }
        let x = spring_step(fps.frames_to_secs(local), &self.config);
        if !x.is_finite() {
            return 1.0;
        }
        if self.config.overshoot_clamping {
            x.clamp(0.0, 1.0)
        } else {
            x
        }
    }

    /// Progress mapped onto `[from, to]`.
    pub fn value(&self, frame: f64, fps: Fps) -> f64 {
        lerp(self.from, self.to, self.progress(frame, fps))
    }

    /// Frames after the release until progress stays within `threshold` of `1.0`.
    ///
    /// Searches at most one minute of frames and returns that bound if never settled.
    pub fn settle_frames(&self, fps: Fps, threshold: f64) -> u64 {
        let horizon = fps.secs_to_frames(60.0).ceil() as u64;
        let threshold = threshold.abs();
        let mut last_outside = None;
        for f in 0..=horizon {
            let p = self.progress(self.delay + f as f64, fps);
            if (1.0 - p).abs() > threshold {
                last_outside = Some(f);
            }
        }
        match last_outside {
            None => 0,
            Some(f) => (f + 1).min(horizon),
        }
    }
}

/// Unit spring progress at `frame` with `config`.
pub fn spring(frame: f64, fps: Fps, config: SpringConfig) -> f64 {
    Spring::new(config).progress(frame, fps)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/spring.rs"]
mod tests;
