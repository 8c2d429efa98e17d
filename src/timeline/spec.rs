use crate::foundation::core::{Fps, Point};
use crate::timing::parse::TimeValue;

/// The three sub-phases every content segment plays in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Silhouette with a question mark, bouncing to a beat.
    Mysterious,
    /// Flip from silhouette to the real object.
    Reveal,
    /// Hand waving with the object on one finger.
    Finger,
}

impl Phase {
    /// Sub-phases in play order.
    pub const ALL: [Self; 3] = [Self::Mysterious, Self::Reveal, Self::Finger];

    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Mysterious => "mysterious",
            Self::Reveal => "reveal",
            Self::Finger => "finger",
        }
    }
}

/// How a segment's sub-phase lengths are written in props.
///
/// Deserialised from a flat object: any `*Duration` key selects [`SegmentTiming::Durations`],
/// otherwise the `*EndsAt` keys are read. Missing values count as zero.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(from = "RawTiming", into = "RawTiming")]
pub enum SegmentTiming {
    /// Cumulative end offsets inside the segment.
    EndsAt {
        /// End of the mysterious phase.
        mysterious: TimeValue,
        /// End of the reveal phase.
        reveal: TimeValue,
        /// End of the finger phase (the whole segment).
        finger: TimeValue,
    },
    /// Independent per-phase lengths.
    Durations {
        /// Length of the mysterious phase.
        mysterious: TimeValue,
        /// Length of the reveal phase.
        reveal: TimeValue,
        /// Length of the finger phase.
        finger: TimeValue,
    },
}

impl Default for SegmentTiming {
    fn default() -> Self {
        Self::Durations {
            mysterious: TimeValue::default(),
            reveal: TimeValue::default(),
            finger: TimeValue::default(),
        }
    }
}

#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTiming {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mysterious_ends_at: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reveal_ends_at: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finger_ends_at: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    mysterious_duration: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reveal_duration: Option<TimeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    finger_duration: Option<TimeValue>,
}

impl From<RawTiming> for SegmentTiming {
    fn from(raw: RawTiming) -> Self {
        let uses_durations = raw.mysterious_duration.is_some()
            || raw.reveal_duration.is_some()
            || raw.finger_duration.is_some();
        if uses_durations {
            Self::Durations {
                mysterious: raw.mysterious_duration.unwrap_or_default(),
                reveal: raw.reveal_duration.unwrap_or_default(),
                finger: raw.finger_duration.unwrap_or_default(),
            }
        } else {
            Self::EndsAt {
                mysterious: raw.mysterious_ends_at.unwrap_or_default(),
                reveal: raw.reveal_ends_at.unwrap_or_default(),
                finger: raw.finger_ends_at.unwrap_or_default(),
            }
        }
    }
}

impl From<SegmentTiming> for RawTiming {
    fn from(t: SegmentTiming) -> Self {
        match t {
            SegmentTiming::EndsAt {
                mysterious,
                reveal,
                finger,
            } => Self {
                mysterious_ends_at: Some(mysterious),
                reveal_ends_at: Some(reveal),
                finger_ends_at: Some(finger),
                ..Self::default()
            },
            SegmentTiming::Durations {
                mysterious,
                reveal,
                finger,
            } => Self {
                mysterious_duration: Some(mysterious),
                reveal_duration: Some(reveal),
                finger_duration: Some(finger),
                ..Self::default()
            },
        }
    }
}

impl SegmentTiming {
    /// Phase lengths in seconds, each `>= 0`.
    ///
    /// End offsets that go backwards are clamped so a later phase never has negative length.
    pub fn phase_secs(&self) -> [f64; 3] {
        match self {
            Self::EndsAt {
                mysterious,
                reveal,
                finger,
            } => {
                let m = mysterious.secs().max(0.0);
                let r = reveal.secs().max(m);
                let f = finger.secs().max(r);
                [m, r - m, f - r]
            }
            Self::Durations {
                mysterious,
                reveal,
                finger,
            } => [mysterious.secs(), reveal.secs(), finger.secs()].map(|s| s.max(0.0)),
        }
    }
}

/// One content segment: an object, its backdrop and its timing.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SegmentSpec {
    /// Object image path, or a literal glyph when it is not an image.
    pub object_image: String,
    /// Background image path, or a CSS colour.
    pub background_image: String,
    /// Sub-phase timing.
    #[serde(flatten)]
    pub timing: SegmentTiming,
}

impl SegmentSpec {
    /// Exact (unrounded) frame counts for the three phases at `fps`.
    pub fn phase_frames(&self, fps: Fps) -> [f64; 3] {
        self.timing.phase_secs().map(|s| fps.secs_to_frames(s))
    }
}

/// Finger identity a segment's object lands on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Finger {
    /// Thumb.
    Thumb,
    /// Index finger.
    Index,
    /// Middle finger.
    Middle,
    /// Ring finger.
    Ring,
    /// Little finger.
    Pinky,
}

/// Anchor used when a finger name is unknown.
pub const DEFAULT_ANCHOR: Point = Point::new(820.0, 400.0);

impl Finger {
    /// Fingers in segment order.
    pub const ALL: [Self; 5] = [
        Self::Thumb,
        Self::Index,
        Self::Middle,
        Self::Ring,
        Self::Pinky,
    ];

    /// Parse a lowercase finger name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "thumb" => Some(Self::Thumb),
            "index" => Some(Self::Index),
            "middle" => Some(Self::Middle),
            "ring" => Some(Self::Ring),
            "pinky" => Some(Self::Pinky),
            _ => None,
        }
    }

    /// Lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Thumb => "thumb",
            Self::Index => "index",
            Self::Middle => "middle",
            Self::Ring => "ring",
            Self::Pinky => "pinky",
        }
    }

    /// Fingertip position in hand-image pixels.
    pub fn anchor(self) -> Point {
        match self {
            Self::Thumb => Point::new(1234.0, 591.0),
            Self::Index => Point::new(1028.0, 215.0),
            Self::Middle => Point::new(805.0, 169.0),
            Self::Ring => Point::new(593.0, 243.0),
            Self::Pinky => Point::new(453.0, 413.0),
        }
    }
}

/// Anchor for an optional finger name, falling back to [`DEFAULT_ANCHOR`].
pub fn anchor_for(name: Option<&str>) -> Point {
    match name {
        None => DEFAULT_ANCHOR,
        Some(n) => match Finger::from_name(n) {
            Some(f) => f.anchor(),
            None => {
                tracing::warn!(finger = n, "unknown finger, using default anchor");
                DEFAULT_ANCHOR
            }
        },
    }
}

/// Finger for the `index`-th segment: thumb to pinky, repeating.
pub fn finger_for_segment(index: usize) -> Finger {
    Finger::ALL[index % Finger::ALL.len()]
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/spec.rs"]
mod tests;
