use crate::animation::interp::{InterpOpts, interpolate};
use crate::foundation::core::{Point, Rect};
use crate::segments::draw::{DrawOp, FrameCtx, ImageFit, Placement, SegmentRenderer};

/// Channel logo and a pulsing subscribe button on white.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Outro {
    /// Logo image.
    pub logo: String,
    /// Subscribe button image.
    pub subscribe: String,
}

impl Default for Outro {
    fn default() -> Self {
        Self {
            logo: "coofykidsLogo.gif".to_owned(),
            subscribe: "subscribe.png".to_owned(),
        }
    }
}

const LOGO: Rect = Rect::new(607.4, 187.4, 607.4 + 705.2, 187.4 + 705.2);
const SUBSCRIBE: Rect = Rect::new(673.2, 863.4, 673.2 + 573.7, 863.4 + 258.9);

impl Outro {
    /// Subscribe button scale: 0.95 to 1.05 and back, once per second.
    pub fn pulse_at(&self, ctx: &FrameCtx) -> f64 {
        let fps = ctx.fps.as_f64();
        let f = ctx.t() % fps;
        interpolate(f, &[0.0, fps * 0.5, fps], &[0.95, 1.05, 0.95], InterpOpts::CLAMP)
    }
}

impl SegmentRenderer for Outro {
    fn kind(&self) -> &'static str {
        "outro"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        vec![
            DrawOp::Fill {
                rect: ctx.canvas.rect(),
                color: "#ffffff".to_owned(),
                placement: Placement::top_left(Point::ORIGIN),
                opacity: 1.0,
                z: -2,
            },
            DrawOp::image(
                self.logo.clone(),
                ImageFit::Exact {
                    width: LOGO.width(),
                    height: LOGO.height(),
                },
                Placement::top_left(LOGO.origin()),
                0,
            ),
            DrawOp::image(
                self.subscribe.clone(),
                ImageFit::Exact {
                    width: SUBSCRIBE.width(),
                    height: SUBSCRIBE.height(),
                },
                Placement::centered(SUBSCRIBE.center()).scaled(self.pulse_at(ctx)),
                1,
            ),
        ]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/outro.rs"]
mod tests;
