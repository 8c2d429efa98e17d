use super::*;
use crate::foundation::core::Fps;

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx::new(frame, 90, Fps::whole(30).unwrap())
}

#[test]
fn scale_eases_from_point_seven_to_one_point_two() {
    let page = MysteryPage::new(["cat.png"], "white");
    assert_eq!(page.scale_at(&ctx(0)), 0.7);
    assert_eq!(page.scale_at(&ctx(90)), 1.2);
    let mid = page.scale_at(&ctx(45));
    assert!(mid > 0.95 && mid < 1.2);
}

#[test]
fn slides_up_then_hops() {
    let page = MysteryPage::new(["cat.png"], "white");
    assert_eq!(page.offset_y_at(&ctx(0)), 200.0);
    // Slide done at frame 15, beat starts from rest.
    assert_eq!(page.offset_y_at(&ctx(15)), 0.0);
    // 120 bpm at 30 fps: peak hold between 30% and 50% of a 15-frame beat.
    assert_eq!(page.offset_y_at(&ctx(21)), -20.0);
    assert_eq!(page.offset_y_at(&ctx(30)), 0.0);
}

#[test]
fn image_object_is_a_silhouette_with_question_mark() {
    let ops = MysteryPage::new(["cat.png"], "demoBg.png").render(&ctx(40));
    let img = ops.iter().find(|o| o.source() == Some("cat.png")).unwrap();
    assert!(matches!(img, DrawOp::Image { filter: ImageFilter::Silhouette, .. }));
    assert!(ops.iter().any(|o| matches!(
        o,
        DrawOp::Text { text, color, .. } if text == "?" && color == "white"
    )));
}

#[test]
fn glyph_object_is_large_text() {
    let mut page = MysteryPage::new(["🐶"], "white");
    page.text = "Who is it?".to_owned();
    let ops = page.render(&ctx(3));
    assert!(ops.iter().any(|o| matches!(
        o,
        DrawOp::Text { text, font_size, .. } if text == "🐶" && *font_size == 200.0
    )));
    assert!(ops.iter().any(|o| matches!(o, DrawOp::Text { text, .. } if text == "Who is it?")));
}

#[test]
fn rendering_is_repeatable() {
    let page = MysteryPage::new(["cat.png"], "white");
    assert_eq!(page.render(&ctx(33)), page.render(&ctx(33)));
}

#[test]
fn each_image_gets_its_own_question_mark() {
    let ops = MysteryPage::new(["cat.png", "dog.png"], "white").render(&ctx(40));
    let marks = ops
        .iter()
        .filter(|o| matches!(o, DrawOp::Text { text, .. } if text == "?"))
        .count();
    assert_eq!(marks, 2);
    assert!(ops.iter().any(|o| o.source() == Some("dog.png")));
}
