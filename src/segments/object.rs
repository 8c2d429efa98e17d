use crate::animation::interp::{InterpOpts, interpolate, lerp};
use crate::segments::backdrop::{Backdrop, SlideIn, caption, is_image_source, object_visual};
use crate::segments::draw::{DrawOp, FrameCtx, ImageFit, Placement, SegmentRenderer};

/// Plain objects that swell to 1.2 at mid-segment and shrink back to 0.8.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ObjectPage {
    /// Object images or glyphs, stacked at the centre.
    pub objects: Vec<String>,
    /// Background image or colour.
    pub background: String,
    /// Optional caption.
    #[serde(default)]
    pub text: String,
}

impl ObjectPage {
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

    /// Container scale at `ctx.frame`.
    pub fn scale_at(&self, ctx: &FrameCtx) -> f64 {
        let d = ctx.len();
        let bounce = interpolate(ctx.t(), &[0.0, d * 0.5, d], &[0.0, 1.0, 0.0], InterpOpts::CLAMP);
        lerp(0.8, 1.2, bounce)
    }
}

impl SegmentRenderer for ObjectPage {
    fn kind(&self) -> &'static str {
        "object"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let mut ops = Backdrop::new(self.background.clone(), SlideIn::FromLeft).render(ctx);
        let scale = self.scale_at(ctx);
        let at = Placement::centered(ctx.canvas.center());
        for object in &self.objects {
            // Images carry an extra 0.7 inside the container scale.
            let inner = if is_image_source(object) { 0.7 } else { 1.0 };
            ops.push(object_visual(
                object,
                ImageFit::Intrinsic,
                200.0,
                at.scaled(scale * inner),
                10,
            ));
        }
        ops.extend(caption(&self.text, ctx));
        ops
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/object.rs"]
mod tests;
