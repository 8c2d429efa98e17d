use std::f64::consts::TAU;

use crate::animation::interp::{InterpOpts, interpolate};
use crate::foundation::core::{Point, Vec2};
use crate::segments::draw::{DrawOp, FrameCtx, ImageFit, Placement, SegmentRenderer};

/// Frames one burst lasts.
pub const BURST_FRAMES: f64 = 30.0;

const PARTICLES: usize = 8;
const STAR_SIZE: f64 = 60.0;

/// Ring of star particles flying out from a point.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BurstStar {
    /// Burst centre in screen pixels.
    pub origin: Point,
    /// Star image.
    #[serde(default = "default_star")]
    pub star: String,
}

fn default_star() -> String {
    "star.svg".to_owned()
}

impl BurstStar {
    /// Burst centred on `origin`.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            star: default_star(),
        }
    }

    /// Particle ops `frame` frames after the burst starts; empty before and after it.
    pub fn ops_at(&self, frame: f64) -> Vec<DrawOp> {
        if !(0.0..BURST_FRAMES).contains(&frame) {
            return Vec::new();
        }
        let p = frame / BURST_FRAMES;
        let distance = interpolate(p, &[0.0, 0.7, 1.0], &[0.0, 100.0, 120.0], InterpOpts::CLAMP);
        let opacity = interpolate(
            p,
            &[0.0, 0.3, 0.7, 1.0],
            &[0.0, 1.0, 1.0, 0.0],
            InterpOpts::CLAMP,
        );
        let scale = interpolate(p, &[0.0, 0.2, 0.8, 1.0], &[0.0, 1.2, 1.0, 0.8], InterpOpts::CLAMP);
        let rotation = p * 360.0;

        (0..PARTICLES)
            .map(|i| {
                let angle = i as f64 / PARTICLES as f64 * TAU;
                let at = self.origin + Vec2::from_angle(angle) * distance;
                DrawOp::image(
                    self.star.clone(),
                    ImageFit::Exact {
                        width: STAR_SIZE,
                        height: STAR_SIZE,
                    },
                    Placement::centered(at).scaled(scale).rotated(rotation),
                    100,
                )
                .with_opacity(opacity)
            })
            .collect()
    }
}

impl SegmentRenderer for BurstStar {
    fn kind(&self) -> &'static str {
        "burst"
    }

    fn render(&self, ctx: &FrameCtx) -> Vec<DrawOp> {
        self.ops_at(ctx.t())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/segments/burst.rs"]
mod tests;
