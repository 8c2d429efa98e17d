use crate::animation::interp::{InterpOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::segments::backdrop::{Backdrop, SlideIn, caption, is_image_source};
use crate::segments::draw::{DrawOp, FrameCtx, ImageFilter, ImageFit, Placement, SegmentRenderer};

/// Time left at the end of the segment for the final scale-up.
const SCALE_SECS: f64 = 0.5;

/// How the object looks at a given rotation angle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealLook {
    /// Black silhouette with a question mark, below 90°.
    Silhouette,
    /// White silhouette, from 90° up to 270°.
    White,
    /// True colour, from 270°.
    TrueColour,
}

impl RevealLook {
    /// Look for `deg` degrees of rotation.
    pub fn at(deg: f64) -> Self {
        if deg >= 270.0 {
            Self::TrueColour
        } else if deg >= 90.0 {
            Self::White
        } else {
            Self::Silhouette
        }
    }
}

/// Full turn around the vertical axis revealing the objects, then a spring scale-up.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RevealPage {
    /// Object images or glyphs, stacked at the centre.
    pub objects: Vec<String>,
    /// Background image or colour.
    pub background: String,
    /// Optional caption.
    #[serde(default)]
    pub text: String,
}

impl RevealPage {
    /// Page for `objects` over `background`, no caption.
    pub fn new(
        objects: impl IntoIterator<Item = impl Into<String>>,
        background: impl Into<String>,
    ) -> Self {
        Self {
            objects: objects.into_iter().map(Into::into).collect(),
            background: background.into(),
            text: String::new(),
        }
    }

    /// Frames spent turning; `<= 0` when the segment is too short to turn at all.
    fn rotation_frames(ctx: &FrameCtx) -> f64 {
        ctx.len() - ctx.secs(SCALE_SECS)
    }

    /// Rotation in `[0, 360]` degrees.
    pub fn rotation_deg_at(&self, ctx: &FrameCtx) -> f64 {
        let rot = Self::rotation_frames(ctx);
        if rot <= 0.0 {
            return 360.0;
        }
        interpolate(ctx.t(), &[0.0, rot], &[0.0, 360.0], InterpOpts::CLAMP)
    }

    /// Container scale: 1.2 while turning, then springs to 2.0.
    pub fn scale_at(&self, ctx: &FrameCtx) -> f64 {
        let rot = Self::rotation_frames(ctx).max(0.0);
        Spring::new(SpringConfig::damped(200.0))
            .between(1.2, 2.0)
            .delayed(rot)
            .value(ctx.t(), ctx.fps)
    }
}

impl SegmentRenderer for RevealPage {
    fn kind(&self) -> &'static str {
        "reveal"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let mut ops = Backdrop::new(self.background.clone(), SlideIn::FromLeft).render(ctx);
        let deg = self.rotation_deg_at(ctx);
        let scale = self.scale_at(ctx);
        let at = ctx.canvas.center();
        let outer = Placement::centered(at).flipped(deg).scaled(scale);

        let look = RevealLook::at(deg);

        for object in &self.objects {
            if !is_image_source(object) {
                ops.push(DrawOp::text(object.clone(), 200.0, "black", outer, 10));
                continue;
            }
            let image =
                DrawOp::image(object.clone(), ImageFit::Intrinsic, outer.scaled(scale * 0.7), 10);
            match look {
                RevealLook::TrueColour => ops.push(image),
                RevealLook::White => ops.push(image.with_filter(ImageFilter::WhiteSilhouette)),
                RevealLook::Silhouette => {
                    ops.push(image.with_filter(ImageFilter::Silhouette));
                    ops.push(DrawOp::text("?", 120.0, "white", outer, 11).bold());
                }
            }
        }
        ops.extend(caption(&self.text, ctx));
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/reveal.rs"]
mod tests;
