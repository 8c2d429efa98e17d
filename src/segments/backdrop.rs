//! Page furniture shared by every segment: background, slide-in overlay, caption, object visual.

use crate::animation::ease::Ease;
use crate::animation::interp::{InterpOpts, interpolate};
use crate::animation::spring::{Spring, SpringConfig};
use crate::foundation::core::{Point, Rect, Vec2};
use crate::segments::draw::{Anchor, DrawOp, FrameCtx, ImageFit, Placement};

/// `true` when `source` names an image rather than a colour or glyph.
pub fn is_image_source(source: &str) -> bool {
    source.ends_with(".png") || source.ends_with(".jpg") || source.ends_with(".jpeg")
}

/// How the background colour layer enters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideIn {
    /// Spring in from the left edge.
    FromLeft,
    /// Ease out from below over half a second.
    FromBottom,
    /// Already in place.
    None,
}

impl SlideIn {
    /// Overlay offset in pixels at `ctx.frame`.
    pub fn offset(self, ctx: &FrameCtx) -> Vec2 {
        match self {
            Self::FromLeft => {
                let p = Spring::new(SpringConfig::damped(200.0)).progress(ctx.t(), ctx.fps);
                Vec2::new((1.0 - p) * -ctx.canvas.w(), 0.0)
            }
            Self::FromBottom => {
                let p = interpolate(
                    ctx.t(),
                    &[0.0, ctx.secs(0.5)],
                    &[0.0, 1.0],
                    InterpOpts::CLAMP.with_ease(Ease::OutQuad),
                );
                Vec2::new(0.0, (1.0 - p) * ctx.canvas.h())
            }
            Self::None => Vec2::ZERO,
        }
    }
}

/// Background image or colour, with its entrance.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Backdrop {
    /// Image path or CSS colour.
    pub source: String,
    /// Entrance of the colour layer.
    pub slide: SlideIn,
}

impl Backdrop {
    /// Backdrop for `source` entering with `slide`.
    pub fn new(source: impl Into<String>, slide: SlideIn) -> Self {
        Self {
            source: source.into(),
            slide,
        }
    }

    /// Ops painted below everything else (`z < 0`).
    pub fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        let canvas = ctx.canvas;
        let full = Rect::new(0.0, 0.0, canvas.w(), canvas.h());
        if is_image_source(&self.source) {
            // The overlay is transparent over an image, so only the image is drawn.
            return vec![DrawOp::image(
                self.source.clone(),
                ImageFit::Cover {
                    width: canvas.w(),
                    height: canvas.h(),
                },
                Placement::top_left(Point::ORIGIN),
                -2,
            )];
        }
        let offset = self.slide.offset(ctx);
        vec![
            DrawOp::Fill {
                rect: full,
                color: self.source.clone(),
                placement: Placement::top_left(Point::ORIGIN),
                opacity: 1.0,
                z: -2,
            },
            DrawOp::Fill {
                rect: full,
                color: self.source.clone(),
                placement: Placement::top_left(Point::ORIGIN + offset),
                opacity: 1.0,
                z: -1,
            },
        ]
    }
}

/// Bold caption centred 20% above the bottom edge; nothing for empty text.
pub fn caption(text: &str, ctx: &FrameCtx) -> Option<DrawOp> {
    if text.is_empty() {
        return None;
    }
    let c = ctx.canvas;
    let at = Point::new(c.w() * 0.5, c.h() * 0.8);
    Some(
        DrawOp::text(
            text,
            48.0,
            "black",
            Placement::centered(at).with_anchor(Anchor::BottomCenter),
            20,
        )
        .bold(),
    )
}

/// Object as an image of `fit`, or as a literal glyph of `glyph_size` pixels.
pub fn object_visual(
    object: &str,
    fit: ImageFit,
    glyph_size: f64,
    placement: Placement,
    z: i32,
) -> DrawOp {
    if is_image_source(object) {
        DrawOp::image(object, fit, placement, z)
    } else {
        DrawOp::text(object, glyph_size, "black", placement, z)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/backdrop.rs"]
mod tests;
