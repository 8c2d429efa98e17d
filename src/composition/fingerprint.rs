use crate::composition::finger_family::FrameScene;
use crate::foundation::math::Fnv1a64;
use crate::segments::draw::{Anchor, DrawOp, ImageFilter, ImageFit, Pivot, Placement};

/// 128-bit digest of a rendered scene; equal scenes hash equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct SceneFingerprint {
    /// First lane.
    pub hi: u64,
    /// Second lane.
    pub lo: u64,
}

impl std::fmt::Display for SceneFingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}{:016x}", self.hi, self.lo)
    }
}

struct Pair(Fnv1a64, Fnv1a64);

impl Pair {
    fn u8(&mut self, v: u8) {
        self.0.write_u8(v);
        self.1.write_u8(v);
    }

    fn u64(&mut self, v: u64) {
        self.0.write_u64(v);
        self.1.write_u64(v);
    }

    fn i64(&mut self, v: i64) {
        self.u64(v as u64);
    }

    fn f64(&mut self, v: f64) {
        // -0.0 and 0.0 paint the same
        let v = if v == 0.0 { 0.0 } else { v };
        self.0.write_f64(v);
        self.1.write_f64(v);
    }

    fn str(&mut self, s: &str) {
        self.0.write_str(s);
        self.1.write_str(s);
    }
}

/// Hash the draw list and audio of `scene`. The frame number and window label are left out so
/// identical pictures from different frames compare equal.
pub fn fingerprint_scene(scene: &FrameScene) -> SceneFingerprint {
    let mut h = Pair(
        Fnv1a64::new(0xcbf29ce484222325),
        Fnv1a64::new(0x9ae16a3b2f90404f),
    );

    h.u64(scene.ops.len() as u64);
    for op in &scene.ops {
        write_op(&mut h, op);
    }

    h.u64(scene.audio.len() as u64);
    for cue in &scene.audio {
        h.str(&cue.source);
        h.f64(cue.volume);
        h.u64(cue.start_from);
    }

    SceneFingerprint {
        hi: h.0.finish(),
        lo: h.1.finish(),
    }
}

fn write_op(h: &mut Pair, op: &DrawOp) {
    match op {
        DrawOp::Fill {
            rect,
            color,
            placement,
            opacity,
            z,
        } => {
            h.u8(0);
            for v in [rect.x0, rect.y0, rect.x1, rect.y1] {
                h.f64(v);
            }
            h.str(color);
            write_placement(h, placement);
            h.f64(*opacity);
            h.i64(i64::from(*z));
        }
        DrawOp::Image {
            source,
            fit,
            filter,
            placement,
            opacity,
            z,
        } => {
            h.u8(1);
            h.str(source);
            match *fit {
                ImageFit::Intrinsic => h.u8(0),
                ImageFit::Width { width } => {
                    h.u8(1);
                    h.f64(width);
                }
                ImageFit::Exact { width, height } => {
                    h.u8(2);
                    h.f64(width);
                    h.f64(height);
                }
                ImageFit::Cover { width, height } => {
                    h.u8(3);
                    h.f64(width);
                    h.f64(height);
                }
            }
            h.u8(match filter {
                ImageFilter::None => 0,
                ImageFilter::Silhouette => 1,
                ImageFilter::WhiteSilhouette => 2,
            });
            write_placement(h, placement);
            h.f64(*opacity);
            h.i64(i64::from(*z));
        }
        DrawOp::Text {
            text,
            font_size,
            color,
            bold,
            placement,
            opacity,
            z,
        } => {
            h.u8(2);
            h.str(text);
            h.f64(*font_size);
            h.str(color);
            h.u8(u8::from(*bold));
            write_placement(h, placement);
            h.f64(*opacity);
            h.i64(i64::from(*z));
        }
    }
}

fn write_placement(h: &mut Pair, p: &Placement) {
    h.f64(p.position.x);
    h.f64(p.position.y);
    h.u8(match p.anchor {
        Anchor::TopLeft => 0,
        Anchor::TopCenter => 1,
        Anchor::Center => 2,
        Anchor::BottomCenter => 3,
    });
    match p.pivot {
        Pivot::Anchor => h.u8(0),
        Pivot::Center => h.u8(1),
        Pivot::Local { at } => {
            h.u8(2);
            h.f64(at.x);
            h.f64(at.y);
        }
    }
    h.f64(p.scale.x);
    h.f64(p.scale.y);
    h.f64(p.rotation_deg);
    h.f64(p.flip_y_deg);
}

#[cfg(test)]
#[path = "../../tests/unit/composition/fingerprint.rs"]
mod tests;
