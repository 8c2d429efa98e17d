use crate::foundation::core::Fps;
use crate::timeline::builder::Timeline;
use crate::timeline::spec::SegmentSpec;

/// What the host needs before rendering the first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositionMetadata {
    /// Exportable length.
    pub duration_in_frames: u64,
    /// Frame rate the length was computed at.
    pub fps: Fps,
}

/// Total frames for `segments` plus the trailing outro.
///
/// Uses the same rounding as [`Timeline::build`], so the reported length always equals the
/// length the timeline tiles.
pub fn total_duration_frames(segments: &[SegmentSpec], fps: Fps) -> u64 {
    Timeline::build(segments, fps).total_frames()
}

/// Pre-render hook: length and frame rate for a set of segments.
#[tracing::instrument(skip(segments), fields(segments = segments.len()))]
pub fn calculate_metadata(segments: &[SegmentSpec], fps: Fps) -> CompositionMetadata {
    let duration_in_frames = total_duration_frames(segments, fps);
    tracing::debug!(duration_in_frames, "metadata resolved");
    CompositionMetadata {
        duration_in_frames,
        fps,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/duration.rs"]
mod tests;
