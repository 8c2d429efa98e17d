use crate::foundation::core::{Canvas, Fps, FrameIndex, FrameRange};
use crate::foundation::error::{FamilyError, FamilyResult};
use crate::segments::draw::{DrawOp, FrameCtx, SegmentRenderer};
use crate::segments::finger::{FingerConfig, FingerPage};
use crate::segments::mystery::MysteryPage;
use crate::segments::outro::Outro;
use crate::segments::reveal::RevealPage;
use crate::timeline::builder::{FrameWindow, Timeline, WindowKind};
use crate::timeline::duration::{CompositionMetadata, calculate_metadata};
use crate::timeline::spec::{Phase, SegmentSpec, SegmentTiming};

/// Volume of the background music track.
pub const BGM_VOLUME: f64 = 0.7;

/// Props of the full finger-family video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FingerFamilyProps {
    /// One entry per segment, thumb to pinky twice.
    pub objects: Vec<SegmentSpec>,
    /// Optional background music.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bgm: Option<String>,
}

impl FingerFamilyProps {
    /// Segments a finger-family video must have.
    pub const SEGMENTS: usize = 10;

    /// Reject props with the wrong segment count.
    pub fn validate(&self) -> FamilyResult<()> {
        if self.objects.len() != Self::SEGMENTS {
            return Err(FamilyError::validation(format!(
                "objects must contain exactly {} entries, got {}",
                Self::SEGMENTS,
                self.objects.len()
            )));
        }
        Ok(())
    }
}

impl Default for FingerFamilyProps {
    fn default() -> Self {
        let seg = |m: f64, r: f64, f: f64| SegmentSpec {
            object_image: "cat.png".to_owned(),
            background_image: "demoBg.png".to_owned(),
            timing: SegmentTiming::Durations {
                mysterious: m.into(),
                reveal: r.into(),
                finger: f.into(),
            },
        };
        let mut objects = vec![seg(2.04, 2.50, 1.46)];
        objects.extend((1..Self::SEGMENTS).map(|_| seg(2.0, 2.0, 2.0)));
        Self {
            objects,
            bgm: Some("https://cdn1.suno.ai/31d5ebf2-2686-4ecc-9cd6-458067461c9e.mp3".to_owned()),
        }
    }
}

/// Audio playing under a frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioCue {
    /// Opaque audio reference.
    pub source: String,
    /// Linear gain.
    pub volume: f64,
    /// Offset into the source, in frames.
    pub start_from: u64,
}

/// Everything the host needs to paint one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameScene {
    /// Global frame.
    pub frame: FrameIndex,
    /// Window the frame belongs to; `None` past the end.
    pub window: Option<WindowKind>,
    /// Draw ops in paint order.
    pub ops: Vec<DrawOp>,
    /// Audio under this frame.
    pub audio: Vec<AudioCue>,
}

impl FrameScene {
    /// Scene with nothing to draw.
    pub fn empty(frame: FrameIndex) -> Self {
        Self {
            frame,
            window: None,
            ops: Vec::new(),
            audio: Vec::new(),
        }
    }
}

/// The finger-family composition: ten segments and an outro on one timeline.
#[derive(Clone, Debug)]
pub struct FingerFamily {
    props: FingerFamilyProps,
    timeline: Timeline,
    canvas: Canvas,
    finger: FingerConfig,
    outro: Outro,
}

impl FingerFamily {
    /// Validate props and lay out the timeline.
    pub fn new(props: FingerFamilyProps, fps: Fps) -> FamilyResult<Self> {
        props.validate()?;
        let timeline = Timeline::build(&props.objects, fps);
        Ok(Self {
            props,
            timeline,
            canvas: Canvas::FULL_HD,
            finger: FingerConfig::default(),
            outro: Outro::default(),
        })
    }

    /// Same composition with different finger-page features.
    pub fn with_finger_config(mut self, config: FingerConfig) -> Self {
        self.finger = config;
        self
    }

    /// Props in use.
    pub fn props(&self) -> &FingerFamilyProps {
        &self.props
    }

    /// The schedule.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Length and frame rate.
    pub fn metadata(&self) -> CompositionMetadata {
        calculate_metadata(&self.props.objects, self.timeline.fps())
    }

    fn renderer_for(&self, kind: &WindowKind) -> Box<dyn SegmentRenderer> {
        match *kind {
            WindowKind::Segment {
                index,
                phase,
                finger,
            } => {
                let seg = &self.props.objects[index];
                let object = [seg.object_image.clone()];
                let background = seg.background_image.clone();
                match phase {
                    Phase::Mysterious => Box::new(MysteryPage::new(object, background)),
                    Phase::Reveal => Box::new(RevealPage::new(object, background)),
                    Phase::Finger => Box::new(
                        FingerPage::new(Some(finger.name()), object, background)
                            .with_config(self.finger.clone()),
                    ),
                }
            }
            WindowKind::Outro => Box::new(self.outro.clone()),
        }
    }

    fn scene(
        &self,
        frame: FrameIndex,
        window: &FrameWindow,
        local: u64,
        duration: u64,
    ) -> FrameScene {
        let ctx = FrameCtx {
            frame: local,
            duration,
            fps: self.timeline.fps(),
            canvas: self.canvas,
        };
        let mut ops = self.renderer_for(&window.kind).render(&ctx);
        ops.sort_by_key(DrawOp::z);
        let audio = self
            .props
            .bgm
            .iter()
            .map(|src| AudioCue {
                source: src.clone(),
                volume: BGM_VOLUME,
                start_from: 0,
            })
            .collect();
        FrameScene {
            frame,
            window: Some(window.kind),
            ops,
            audio,
        }
    }

    /// Render a global frame by looking up its window.
    pub fn render_frame(&self, frame: FrameIndex) -> FrameScene {
        match self.timeline.lookup(frame) {
            Some(hit) => self.scene(frame, &hit.window, hit.local_frame, hit.duration),
            None => FrameScene::empty(frame),
        }
    }

    /// Windows with their integer ranges, for hosts that clock each one separately.
    pub fn sequences(&self) -> Vec<(FrameWindow, FrameRange)> {
        self.timeline.sequences()
    }

    /// Render `local_frame` of a mounted sequence; empty past the sequence end.
    pub fn render_sequence(&self, window: &FrameWindow, local_frame: u64) -> FrameScene {
        let range = window.range();
        let frame = FrameIndex(range.start.0 + local_frame);
        if local_frame >= range.len_frames() {
            return FrameScene::empty(frame);
        }
        self.scene(frame, window, local_frame, range.len_frames())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/composition/finger_family.rs"]
mod tests;
