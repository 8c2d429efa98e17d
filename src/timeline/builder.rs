//! Flat frame windows for an ordered list of segments.
//!
//! Boundaries are kept as exact `f64` frame positions. Integer ranges are derived by ceiling each
//! boundary, which makes `start <= f < end` on the exact values equivalent to
//! `ceil(start) <= f < ceil(end)` on integers, so lookup and the static range list always agree.

use crate::foundation::core::{Fps, FrameIndex, FrameRange, ceil_frame};
use crate::timeline::spec::{Finger, Phase, SegmentSpec, finger_for_segment};

/// Length of the trailing outro, in seconds.
pub const TRAILING_SECS: f64 = 5.0;

/// What a window plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WindowKind {
    /// One sub-phase of a content segment.
    Segment {
        /// Position in the segment list.
        index: usize,
        /// Sub-phase.
        phase: Phase,
        /// Finger the segment is paired with.
        finger: Finger,
    },
    /// Trailing outro.
    Outro,
}

/// One sub-phase placed on the global clock.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameWindow {
    /// What plays here.
    #[serde(flatten)]
    pub kind: WindowKind,
    /// Exact start frame.
    pub start: f64,
    /// Exact end frame (exclusive).
    pub end: f64,
}

impl FrameWindow {
    /// Exact length in frames.
    pub fn exact_len(&self) -> f64 {
        self.end - self.start
    }

    /// Integer frames this window owns.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(ceil_frame(self.start)),
            end: FrameIndex(ceil_frame(self.end)),
        }
    }

    /// Owning segment, `None` for the outro.
    pub fn segment(&self) -> Option<usize> {
        match self.kind {
            WindowKind::Segment { index, .. } => Some(index),
            WindowKind::Outro => None,
        }
    }

    /// Sub-phase, `None` for the outro.
    pub fn phase(&self) -> Option<Phase> {
        match self.kind {
            WindowKind::Segment { phase, .. } => Some(phase),
            WindowKind::Outro => None,
        }
    }
}

/// Result of mapping a global frame onto the timeline.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct WindowHit {
    /// Window containing the frame.
    pub window: FrameWindow,
    /// Frame offset from the window's first integer frame.
    pub local_frame: u64,
    /// Integer length of the window.
    pub duration: u64,
}

/// Immutable schedule of every sub-phase window plus the outro.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Timeline {
    fps: Fps,
    /// Content windows followed by the outro window.
    windows: Vec<FrameWindow>,
    total_frames: u64,
}

impl Timeline {
    /// Lay segments out back to back from frame 0, then append the outro.
    ///
    /// Zero-length sub-phases get no window.
    #[tracing::instrument(skip(segments), fields(segments = segments.len()))]
    pub fn build(segments: &[SegmentSpec], fps: Fps) -> Self {
        let mut windows = Vec::with_capacity(segments.len() * 3 + 1);
        let mut cursor = 0.0_f64;
        for (index, seg) in segments.iter().enumerate() {
            let finger = finger_for_segment(index);
            for (phase, len) in Phase::ALL.into_iter().zip(seg.phase_frames(fps)) {
                if !(len > 0.0) {
                    tracing::debug!(index, phase = phase.name(), "empty sub-phase skipped");
                    continue;
                }
                windows.push(FrameWindow {
                    kind: WindowKind::Segment {
                        index,
                        phase,
                        finger,
                    },
                    start: cursor,
                    end: cursor + len,
                });
                cursor += len;
            }
        }

        let trailing = fps.secs_to_frames(TRAILING_SECS);
        windows.push(FrameWindow {
            kind: WindowKind::Outro,
            start: cursor,
            end: cursor + trailing,
        });
        let total_frames = ceil_frame(cursor + trailing);
        tracing::debug!(windows = windows.len(), total_frames, "timeline built");

        Self {
            fps,
            windows,
            total_frames,
        }
    }

    /// Frame rate the timeline was built at.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Every window in order, outro last.
    pub fn windows(&self) -> &[FrameWindow] {
        &self.windows
    }

    /// Content windows only.
    pub fn content_windows(&self) -> &[FrameWindow] {
        &self.windows[..self.windows.len() - 1]
    }

    /// The trailing outro window.
    pub fn outro(&self) -> &FrameWindow {
        &self.windows[self.windows.len() - 1]
    }

    /// Integer frames covered by content windows.
    pub fn content_frames(&self) -> u64 {
        self.outro().range().start.0
    }

    /// Total length including the outro.
    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    /// Map a global frame onto its window, `None` past the end.
    pub fn lookup(&self, frame: FrameIndex) -> Option<WindowHit> {
        if frame.0 >= self.total_frames {
            return None;
        }
        let idx = self
            .windows
            .partition_point(|w| w.range().end.0 <= frame.0);
        let window = *self.windows.get(idx)?;
        let range = window.range();
        Some(WindowHit {
            window,
            local_frame: frame.0 - range.start.0,
            duration: range.len_frames(),
        })
    }

    /// Every window with its integer range, for hosts that mount each one on its own clock.
    ///
    /// Windows too short to own an integer frame are left out.
    pub fn sequences(&self) -> Vec<(FrameWindow, FrameRange)> {
        self.windows
            .iter()
            .map(|w| (*w, w.range()))
            .filter(|(_, r)| !r.is_empty())
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
