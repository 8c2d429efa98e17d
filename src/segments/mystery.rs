use crate::animation::cycle::beat_offset;
use crate::animation::ease::Ease;
use crate::animation::interp::{InterpOpts, interpolate, lerp};
use crate::foundation::core::Vec2;
use crate::segments::backdrop::{Backdrop, SlideIn, caption, is_image_source};
use crate::segments::draw::{DrawOp, FrameCtx, ImageFilter, ImageFit, Placement, SegmentRenderer};

const SLIDE_SECS: f64 = 0.5;
const SLIDE_DISTANCE: f64 = 200.0;
const BEAT_BPM: f64 = 120.0;
const BEAT_DISTANCE: f64 = 20.0;

/// Objects shown as black silhouettes with a question mark, hopping to the beat.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MysteryPage {
    /// Object images or glyphs, stacked at the centre.
    pub objects: Vec<String>,
    /// Background image or colour.
    pub background: String,
    /// Optional caption.
    #[serde(default)]
    pub text: String,
}

impl MysteryPage {
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

    /// Container scale: eases out from 0.7 to 1.2 across the whole segment.
    pub fn scale_at(&self, ctx: &FrameCtx) -> f64 {
        let p = interpolate(
            ctx.t(),
            &[0.0, ctx.len()],
            &[0.0, 1.0],
            InterpOpts::CLAMP.with_ease(Ease::OutQuad),
        );
        lerp(0.7, 1.2, p)
    }

    /// Vertical offset from the screen centre: slide up from 200px, then hop.
    pub fn offset_y_at(&self, ctx: &FrameCtx) -> f64 {
        let slide_frames = ctx.secs(SLIDE_SECS);
        let slide = interpolate(
            ctx.t(),
            &[0.0, slide_frames],
            &[0.0, 1.0],
            InterpOpts::CLAMP.with_ease(Ease::OutQuad),
        );
        let beat = if ctx.t() >= slide_frames {
            beat_offset(ctx.t() - slide_frames, ctx.fps, BEAT_BPM, BEAT_DISTANCE)
        } else {
            0.0
        };
        lerp(SLIDE_DISTANCE, 0.0, slide) + beat
    }
}

impl SegmentRenderer for MysteryPage {
    fn kind(&self) -> &'static str {
        "mysterious"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let mut ops = Backdrop::new(self.background.clone(), SlideIn::FromBottom).render(ctx);
        let scale = self.scale_at(ctx);
        let at = Placement::centered(ctx.canvas.center() + Vec2::new(0.0, self.offset_y_at(ctx)));

        for object in &self.objects {
            if is_image_source(object) {
                ops.push(
                    DrawOp::image(object.clone(), ImageFit::Intrinsic, at.scaled(scale * 0.7), 10)
                        .with_filter(ImageFilter::Silhouette),
                );
                ops.push(DrawOp::text("?", 120.0, "white", at.scaled(scale), 11).bold());
            } else {
                ops.push(DrawOp::text(object.clone(), 200.0, "black", at.scaled(scale), 10));
            }
        }
        ops.extend(caption(&self.text, ctx));
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/mystery.rs"]
mod tests;
