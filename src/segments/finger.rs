//! Hand waving with the object riding on one fingertip.
//!
//! Hand-image coordinates: the hand is drawn 1640px wide with its top-left corner at
//! `(HAND_LEFT, top)` and swings around local `HAND_PIVOT`. Finger anchors are in the same
//! coordinates.

use crate::animation::cycle::Oscillator;
use crate::animation::interp::{InterpOpts, interpolate, lerp};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Affine, Point, Vec2};
use crate::segments::backdrop::{Backdrop, SlideIn, caption, object_visual};
use crate::segments::burst::BurstStar;
use crate::segments::draw::{DrawOp, FrameCtx, ImageFit, Placement, SegmentRenderer};
use crate::timeline::spec::anchor_for;

const HAND_LEFT: f64 = 55.0;
const HAND_TOP: f64 = 108.0;
const HAND_WIDTH: f64 = 1640.0;
const HAND_PIVOT: Vec2 = Vec2::new(960.0, 1648.0);
const WAVE_SECS: f64 = 2.0;
const SWING_DEG: f64 = 15.0;
const OBJECT_WIDTH: f64 = 500.0;
const OBJECT_GLYPH: f64 = 120.0;

/// Zoom towards the fingertip once the object has landed.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CameraZoom {
    /// Final magnification.
    pub zoom: f64,
    /// Spring damping of the move.
    pub damping: f64,
}

impl Default for CameraZoom {
    fn default() -> Self {
        Self {
            zoom: 1.5,
            damping: 200.0,
        }
    }
}

/// Feature switches for [`FingerPage`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct FingerConfig {
    /// Length of the hand slide-up and object flight, in seconds.
    pub intro_secs: f64,
    /// Optional zoom-and-pan onto the fingertip after the intro.
    pub camera: Option<CameraZoom>,
    /// Star burst where the object lands.
    pub burst: bool,
    /// Hand image.
    pub hand: String,
}

impl Default for FingerConfig {
    fn default() -> Self {
        Self {
            intro_secs: 0.5,
            camera: None,
            burst: false,
            hand: "VectorHand.png".to_owned(),
        }
    }
}

/// Screen-space pose of the hand and object at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct HandPose {
    /// Top edge of the hand image.
    pub hand_top: f64,
    /// Hand rotation, degrees.
    pub rotation_deg: f64,
    /// Object centre.
    pub object: Point,
}

/// Maps screen points for a zoom of `zoom` centred on `focus`.
#[derive(Clone, Copy, Debug, PartialEq)]
struct Camera {
    center: Point,
    focus: Point,
    zoom: f64,
}

impl Camera {
    fn apply(&self, p: &mut Placement) {
        p.position = self.center + (p.position - self.focus) * self.zoom;
        p.scale = p.scale * self.zoom;
    }
}

/// Hand slides up, the object flies onto the fingertip, then the hand waves.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FingerPage {
    /// Finger name; unknown or missing names use a default anchor.
    pub finger: Option<String>,
    /// Object images or glyphs riding the fingertip; may be empty.
    pub objects: Vec<String>,
    /// Background image or colour.
    pub background: String,
    /// Optional caption.
    #[serde(default)]
    pub text: String,
    /// Feature switches.
    #[serde(default)]
    pub config: FingerConfig,
}

impl FingerPage {
    /// Page for `objects` on `finger` over `background`, default features.
    pub fn new(
        finger: Option<&str>,
        objects: impl IntoIterator<Item = impl Into<String>>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            finger: finger.map(str::to_owned),
            objects: objects.into_iter().map(Into::into).collect(),
            background: background.into(),
            text: String::new(),
            config: FingerConfig::default(),
        }
    }

    /// Same page with `config`.
    pub fn with_config(mut self, config: FingerConfig) -> Self {
        self.config = config;
        self
    }

    /// Screen position of the fingertip with the hand at rest.
    pub fn rest_point(&self) -> Point {
        let anchor = anchor_for(self.finger.as_deref());
        Point::new(HAND_LEFT + anchor.x, HAND_TOP + anchor.y)
    }

    fn intro_frames(&self, ctx: &FrameCtx) -> f64 {
        ctx.secs(self.config.intro_secs.max(0.0))
    }

    /// Hand and object pose at `ctx.frame`.
    pub fn pose_at(&self, ctx: &FrameCtx) -> HandPose {
        let intro = self.intro_frames(ctx);
        let anchor = anchor_for(self.finger.as_deref());
        let t = ctx.t();

        if t < intro {
            let p = interpolate(t, &[0.0, intro], &[0.0, 1.0], InterpOpts::CLAMP);
            let hand_top = lerp(ctx.canvas.h(), HAND_TOP, p);
            let target = Point::new(HAND_LEFT + anchor.x, hand_top + anchor.y);
            return HandPose {
                hand_top,
                rotation_deg: 0.0,
                object: ctx.canvas.center().lerp(target, p),
            };
        }

        let rotation_deg = Oscillator::swing(ctx.secs(WAVE_SECS), SWING_DEG).sample(t - intro);
        let pivot = Point::new(HAND_LEFT, HAND_TOP) + HAND_PIVOT;
        let rel = anchor.to_vec2() - HAND_PIVOT;
        let swung = Affine::rotate(rotation_deg.to_radians()) * rel.to_point();
        HandPose {
            hand_top: HAND_TOP,
            rotation_deg,
            object: pivot + swung.to_vec2(),
        }
    }

    fn camera_at(&self, ctx: &FrameCtx) -> Option<Camera> {
        let zoom = self.config.camera?;
        let intro = self.intro_frames(ctx);
        let p = Spring::new(SpringConfig::damped(zoom.damping))
            .delayed(intro)
            .progress(ctx.t(), ctx.fps);
        if p <= 0.0 {
            return None;
        }
        let rest = self.rest_point();
        let center = ctx.canvas.center();
        Some(Camera {
            center,
            focus: center.lerp(rest, p),
            zoom: lerp(1.0, zoom.zoom, p),
        })
    }
}

impl SegmentRenderer for FingerPage {
    fn kind(&self) -> &'static str {
        "finger"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let mut ops = Backdrop::new(self.background.clone(), SlideIn::FromLeft).render(ctx);
        let pose = self.pose_at(ctx);

        let mut scene = vec![DrawOp::image(
            self.config.hand.clone(),
            ImageFit::Width { width: HAND_WIDTH },
            Placement::top_left(Point::new(HAND_LEFT, pose.hand_top))
                .with_origin(HAND_PIVOT)
                .rotated(pose.rotation_deg),
            5,
        )];
        scene.extend(self.objects.iter().map(|object| {
            object_visual(
                object,
                ImageFit::Width {
                    width: OBJECT_WIDTH,
                },
                OBJECT_GLYPH,
                Placement::centered(pose.object),
                10,
            )
        }));

        if self.config.burst {
            let intro = self.intro_frames(ctx);
            scene.extend(BurstStar::new(self.rest_point()).ops_at(ctx.t() - intro));
        }

        if let Some(camera) = self.camera_at(ctx) {
            for op in &mut scene {
                match op {
                    DrawOp::Fill { placement, .. }
                    | DrawOp::Image { placement, .. }
                    | DrawOp::Text { placement, .. } => camera.apply(placement),
                }
            }
        }

        ops.extend(scene);
        ops.extend(caption(&self.text, ctx));
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/finger.rs"]
mod tests;
