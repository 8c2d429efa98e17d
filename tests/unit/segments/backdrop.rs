use super::*;
use crate::foundation::core::Fps;

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx::new(frame, 90, Fps::whole(30).unwrap())
}

#[test]
fn image_suffixes() {
    assert!(is_image_source("demoBg.png"));
    assert!(is_image_source("a/b.jpg"));
    assert!(is_image_source("x.jpeg"));
    assert!(!is_image_source("white"));
    assert!(!is_image_source("🐱"));
    assert!(!is_image_source("photo.PNG"));
}

#[test]
fn image_backdrop_is_a_single_cover_image() {
    let ops = Backdrop::new("demoBg.png", SlideIn::FromLeft).render(&ctx(0));
    assert_eq!(ops.len(), 1);
    assert!(matches!(ops[0], DrawOp::Image { fit: ImageFit::Cover { .. }, .. }));
    assert!(ops[0].z() < 0);
}

#[test]
fn colour_overlay_slides_from_left() {
    let bd = Backdrop::new("white", SlideIn::FromLeft);
    let start = bd.render(&ctx(0));
    assert_eq!(start.len(), 2);
    assert_eq!(start[1].placement().position, Point::new(-1920.0, 0.0));
    let later = bd.render(&ctx(600));
    assert!(later[1].placement().position.x.abs() < 1.0);
}

#[test]
fn colour_overlay_rises_from_bottom_in_half_a_second() {
    let bd = Backdrop::new("#ffeeaa", SlideIn::FromBottom);
    assert_eq!(bd.render(&ctx(0))[1].placement().position.y, 1080.0);
    assert_eq!(bd.render(&ctx(15))[1].placement().position.y, 0.0);
    let mid = bd.render(&ctx(7))[1].placement().position.y;
    assert!(mid > 0.0 && mid < 1080.0 * 0.5);
}

#[test]
fn caption_only_when_text_present() {
    assert!(caption("", &ctx(0)).is_none());
    let op = caption("Daddy finger", &ctx(0)).unwrap();
    assert!(matches!(op, DrawOp::Text { bold: true, font_size, .. } if font_size == 48.0));
    assert_eq!(op.placement().position, Point::new(960.0, 864.0));
}

#[test]
fn object_visual_switches_on_suffix() {
    let p = Placement::centered(Point::ORIGIN);
    let img = object_visual("cat.png", ImageFit::Width { width: 500.0 }, 120.0, p, 10);
    assert_eq!(img.source(), Some("cat.png"));
    let glyph = object_visual("🍎", ImageFit::Width { width: 500.0 }, 120.0, p, 10);
    assert!(matches!(glyph, DrawOp::Text { font_size, .. } if font_size == 120.0));
}
