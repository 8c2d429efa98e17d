//! finger-family turns a short list of per-segment props into a deterministic frame-by-frame
//! description of the "finger family" children's song video.
//!
//! The crate never touches pixels. Every frame is described as a list of [`DrawOp`]s plus the
//! audio cues playing under it, and a host compositor paints them.
//!
//! # Pipeline overview
//!
//! 1. **Parse timing**: timestamp strings and millisecond-style numbers become seconds
//!    ([`TimeValue`]).
//! 2. **Build the timeline**: ten segments of three sub-phases each, plus a trailing outro, are
//!    laid end to end on one frame clock ([`Timeline`]).
//! 3. **Render a frame**: the window covering a frame picks a [`SegmentRenderer`], which evaluates
//!    its curves and springs at the window-local frame ([`FingerFamily::render_frame`]).
//!
//! The key properties:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure frames**: a frame depends only on props and its index, so frames can be rendered in
//!   any order or in parallel.
//! - **Two query modes, one answer**: looking a frame up on the global clock and rendering a
//!   mounted sequence at its local frame produce identical scenes.
#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod animation;
mod composition;
mod foundation;
mod segments;
mod timeline;
mod timing;

pub use animation::cycle::{Oscillator, SWING_INPUTS, SWING_TABLE, beat_offset, cycle_phase};
pub use animation::ease::Ease;
pub use animation::interp::{Curve, Extrapolate, InterpOpts, interpolate, lerp};
pub use animation::spring::{Spring, SpringConfig, spring};
pub use composition::finger_family::{
    AudioCue, BGM_VOLUME, FingerFamily, FingerFamilyProps, FrameScene,
};
pub use composition::fingerprint::{SceneFingerprint, fingerprint_scene};
pub use composition::registry::{
    CompositionId, CompositionInfo, DurationRule, LoadedComposition, composition_info, registry,
    render_composition_frame, resolve_metadata,
};
pub use composition::schema::{FieldSchema, FieldType, validate_props};
pub use foundation::core::{Affine, Canvas, Fps, FrameIndex, FrameRange, Point, Rect, Vec2};
pub use foundation::error::{FamilyError, FamilyResult};
pub use segments::backdrop::{Backdrop, SlideIn, caption, is_image_source, object_visual};
pub use segments::burst::{BURST_FRAMES, BurstStar};
pub use segments::draw::{
    Anchor, DrawOp, FrameCtx, ImageFilter, ImageFit, Pivot, Placement, SegmentRenderer,
};
pub use segments::finger::{CameraZoom, FingerConfig, FingerPage, HandPose};
pub use segments::jigsaw::{
    JIGSAW_TAIL_FRAMES, JigsawConfig, JigsawLayout, JigsawPage, PieceLoad, PieceLoader, PiecePose,
    PieceTable, PuzzlePiece, piece_pose, puzzle_rect,
};
pub use segments::mystery::MysteryPage;
pub use segments::object::ObjectPage;
pub use segments::outro::Outro;
pub use segments::reveal::{RevealLook, RevealPage};
pub use timeline::builder::{FrameWindow, TRAILING_SECS, Timeline, WindowHit, WindowKind};
pub use timeline::duration::{CompositionMetadata, calculate_metadata, total_duration_frames};
pub use timeline::spec::{
    DEFAULT_ANCHOR, Finger, Phase, SegmentSpec, SegmentTiming, anchor_for, finger_for_segment,
};
pub use timing::parse::{TimeValue, parse_millis_duration_secs, parse_timestamp_secs};
