//! Time specifications and their conversion to seconds and frames.
//!
//! Two textual conventions and one numeric convention coexist:
//!
//! - `"MM:SS.CC"`: minutes, seconds, hundredths.
//! - `"SS.CC"`: seconds and hundredths.
//! - a bare number whose fractional digits are **milliseconds**: `4.04` is 4 s + 40 ms and
//!   `4.004` is 4 s + 4 ms. Fractional digits are right-padded to three and truncated to three.
//!
//! Nothing here fails. Malformed, negative or non-finite input degrades to zero seconds.

use crate::foundation::core::Fps;

/// One duration or timestamp as it appears in props.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Numeric value read with the milliseconds-in-decimal convention.
    Number(f64),
    /// Textual timestamp (`"MM:SS.CC"`, `"SS.CC"` or a float literal).
    Text(String),
}

impl TimeValue {
    /// Seconds represented by this value, `>= 0`.
    pub fn secs(&self) -> f64 {
        match self {
            Self::Number(v) => parse_millis_duration_secs(*v),
            Self::Text(s) => parse_timestamp_secs(s),
        }
    }

    /// Exact frame count at `fps`; not rounded.
    pub fn frames(&self, fps: Fps) -> f64 {
        fps.secs_to_frames(self.secs())
    }
}

impl Default for TimeValue {
    fn default() -> Self {
        Self::Number(0.0)
    }
}

impl From<f64> for TimeValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for TimeValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

/// Parse a textual timestamp into seconds.
pub fn parse_timestamp_secs(raw: &str) -> f64 {
    if raw.is_empty() {
        return 0.0;
    }
    if let Some(secs) = parse_minutes_seconds(raw) {
        return secs;
    }
    if let Some(secs) = parse_seconds_hundredths(raw) {
        return secs;
    }
    match parse_float_prefix(raw) {
        Some(v) => non_negative(v, raw),
        None => {
            tracing::warn!(raw, "unparseable timing string, using 0s");
            0.0
        }
    }
}

/// Seconds for a number whose fractional digits encode milliseconds.
pub fn parse_millis_duration_secs(value: f64) -> f64 {
    match parse_millis(value) {
        Some(ms) => ms as f64 / 1000.0,
        None => {
            tracing::warn!(value, "invalid duration, using 0s");
            0.0
        }
    }
}

/// Whole milliseconds encoded by `value`, or `None` when negative or not finite.
pub(crate) fn parse_millis(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    // Display for f64 prints the shortest round-trip form without an exponent.
    let repr = value.to_string();
    let (whole, frac) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let whole: u64 = whole.parse().ok()?;
    let mut digits: String = frac.chars().take(3).collect();
    while digits.len() < 3 {
        digits.push('0');
    }
    let ms: u64 = digits.parse().ok()?;
    whole.checked_mul(1000)?.checked_add(ms)
}

// `^(\d{2}):(\d{2})\.(\d{2})$`
fn parse_minutes_seconds(raw: &str) -> Option<f64> {
    let (mm, rest) = raw.split_once(':')?;
    let (ss, cc) = rest.split_once('.')?;
    if !(is_digits(mm, 2) && is_digits(ss, 2) && is_digits(cc, 2)) {
        return None;
    }
    let minutes: u32 = mm.parse().ok()?;
    let seconds: u32 = ss.parse().ok()?;
    let hundredths: u32 = cc.parse().ok()?;
    Some(f64::from(minutes) * 60.0 + f64::from(seconds) + f64::from(hundredths) / 100.0)
}

// `^(\d+)\.(\d{2})$`
fn parse_seconds_hundredths(raw: &str) -> Option<f64> {
    let (ss, cc) = raw.split_once('.')?;
    if ss.is_empty() || !ss.bytes().all(|b| b.is_ascii_digit()) || !is_digits(cc, 2) {
        return None;
    }
    let seconds: f64 = ss.parse().ok()?;
    let hundredths: u32 = cc.parse().ok()?;
    Some(seconds + f64::from(hundredths) / 100.0)
}

fn is_digits(s: &str, len: usize) -> bool {
    s.len() == len && s.bytes().all(|b| b.is_ascii_digit())
}

/// Longest leading float literal, after leading whitespace (`"7.5s"` reads as `7.5`).
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

fn non_negative(v: f64, raw: &str) -> f64 {
    if v.is_finite() && v >= 0.0 {
        v
    } else {
        tracing::warn!(raw, "negative or non-finite timing, using 0s");
        0.0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timing/parse.rs"]
mod tests;
