use super::*;
use crate::foundation::core::{FrameIndex, Point};

fn scene(ops: Vec<DrawOp>) -> FrameScene {
    FrameScene {
        ops,
        ..FrameScene::empty(FrameIndex(0))
    }
}

fn star(x: f64) -> DrawOp {
    DrawOp::image(
        "star.svg",
        ImageFit::Exact {
            width: 60.0,
            height: 60.0,
        },
        Placement::centered(Point::new(x, 10.0)),
        100,
    )
}

#[test]
fn equal_scenes_hash_equal() {
    let a = scene(vec![star(1.0), star(2.0)]);
    let mut b = scene(vec![star(1.0), star(2.0)]);
    b.frame = FrameIndex(99);
    assert_eq!(fingerprint_scene(&a), fingerprint_scene(&b));
}

#[test]
fn op_order_and_values_matter() {
    let a = fingerprint_scene(&scene(vec![star(1.0), star(2.0)]));
    let b = fingerprint_scene(&scene(vec![star(2.0), star(1.0)]));
    let c = fingerprint_scene(&scene(vec![star(1.0), star(2.5)]));
    assert_ne!(a, b);
    assert_ne!(a, c);
}

#[test]
fn filter_and_opacity_change_the_hash() {
    let base = fingerprint_scene(&scene(vec![star(1.0)]));
    let dark = fingerprint_scene(&scene(vec![star(1.0).with_filter(ImageFilter::Silhouette)]));
    let faded = fingerprint_scene(&scene(vec![star(1.0).with_opacity(0.5)]));
    assert_ne!(base, dark);
    assert_ne!(base, faded);
}

#[test]
fn signed_zero_is_normalised() {
    let a = fingerprint_scene(&scene(vec![star(0.0)]));
    let b = fingerprint_scene(&scene(vec![star(-0.0)]));
    assert_eq!(a, b);
}

#[test]
fn display_is_32_hex_digits() {
    let fp = fingerprint_scene(&scene(Vec::new()));
    let s = fp.to_string();
    assert_eq!(s.len(), 32);
    assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
}
