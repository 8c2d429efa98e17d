use crate::animation::ease::Ease;
use crate::foundation::error::{FamilyError, FamilyResult};

/// Behaviour outside the breakpoint range.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Extrapolate {
    /// Hold the first/last output value.
    #[default]
    Clamp,
    /// Continue the first/last segment linearly.
    Extend,
    /// Return the input unchanged.
    Identity,
}

/// Options for [`interpolate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InterpOpts {
    /// Policy below the first breakpoint.
    #[serde(default)]
    pub left: Extrapolate,
    /// Policy above the last breakpoint.
    #[serde(default)]
    pub right: Extrapolate,
    /// Easing applied inside each segment.
    #[serde(default)]
    pub ease: Ease,
}

impl InterpOpts {
    /// Clamp on both sides, linear inside.
    pub const CLAMP: Self = Self {
        left: Extrapolate::Clamp,
        right: Extrapolate::Clamp,
        ease: Ease::Linear,
    };

    /// Extend on both sides, linear inside.
    pub const EXTEND: Self = Self {
        left: Extrapolate::Extend,
        right: Extrapolate::Extend,
        ease: Ease::Linear,
    };

    /// Same extrapolation, different in-segment easing.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }
}

/// Linear blend between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Piecewise interpolation of `input` across ascending `breakpoints` onto `values`.
///
/// Total for every input: an empty table yields `0.0`, a single pair yields its value and NaN
/// input yields the first value. Exactly at a breakpoint the output is that breakpoint's value.
/// Mismatched slice lengths use the shorter prefix.
pub fn interpolate(input: f64, breakpoints: &[f64], values: &[f64], opts: InterpOpts) -> f64 {
    let n = breakpoints.len().min(values.len());
    match n {
        0 => return 0.0,
        1 => return values[0],
        _ => {}
    }
    let bp = &breakpoints[..n];
    let vs = &values[..n];

    if input < bp[0] {
        return match opts.left {
            Extrapolate::Clamp => vs[0],
            Extrapolate::Identity => input,
            Extrapolate::Extend => extend(input, bp[0], bp[1], vs[0], vs[1]),
        };
    }
    if input > bp[n - 1] {
        return match opts.right {
            Extrapolate::Clamp => vs[n - 1],
            Extrapolate::Identity => input,
            Extrapolate::Extend => extend(input, bp[n - 2], bp[n - 1], vs[n - 2], vs[n - 1]),
        };
    }

    let idx = bp.partition_point(|b| *b <= input);
    if idx == 0 {
        return vs[0];
    }
    if idx >= n {
        return vs[n - 1];
    }

    let (b0, b1) = (bp[idx - 1], bp[idx]);
    let denom = b1 - b0;
    if denom <= 0.0 {
        return vs[idx];
    }
    let t = (input - b0) / denom;
    lerp(vs[idx - 1], vs[idx], opts.ease.apply(t))
}

fn extend(input: f64, b0: f64, b1: f64, v0: f64, v1: f64) -> f64 {
    let denom = b1 - b0;
    if denom <= 0.0 {
        return if input < b0 { v0 } else { v1 };
    }
    lerp(v0, v1, (input - b0) / denom)
}

/// Validated breakpoint table; [`Curve::sample`] never fails.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Curve {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
    #[serde(default)]
    opts: InterpOpts,
}

impl Curve {
    /// Build a curve; breakpoints must be finite and non-decreasing, with one value each.
    pub fn new(breakpoints: Vec<f64>, values: Vec<f64>, opts: InterpOpts) -> FamilyResult<Self> {
        if breakpoints.len() < 2 {
            return Err(FamilyError::animation(
                "curve needs at least two breakpoints",
            ));
        }
        if breakpoints.len() != values.len() {
            return Err(FamilyError::animation(format!(
                "curve has {} breakpoints but {} values",
                breakpoints.len(),
                values.len()
            )));
        }
        if breakpoints.iter().chain(values.iter()).any(|v| !v.is_finite()) {
            return Err(FamilyError::animation("curve entries must be finite"));
        }
        if !breakpoints.windows(2).all(|w| w[0] <= w[1]) {
            return Err(FamilyError::animation(
                "curve breakpoints must be non-decreasing",
            ));
        }
        Ok(Self {
            breakpoints,
            values,
            opts,
        })
    }

    /// Build from tables known to be valid at compile time.
    pub(crate) fn from_static(breakpoints: &[f64], values: &[f64], opts: InterpOpts) -> Self {
        debug_assert!(breakpoints.len() >= 2 && breakpoints.len() == values.len());
        Self {
            breakpoints: breakpoints.to_vec(),
            values: values.to_vec(),
            opts,
        }
    }

    /// Output at `input`.
    pub fn sample(&self, input: f64) -> f64 {
        interpolate(input, &self.breakpoints, &self.values, self.opts)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/interp.rs"]
mod tests;
