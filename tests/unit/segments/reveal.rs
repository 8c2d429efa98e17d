use super::*;
use crate::foundation::core::Fps;

fn ctx(frame: u64, duration: u64) -> FrameCtx {
    FrameCtx::new(frame, duration, Fps::whole(30).unwrap())
}

fn filter_of(ops: &[DrawOp]) -> ImageFilter {
    ops.iter()
        .find_map(|o| match o {
            DrawOp::Image { source, filter, .. } if source == "cat.png" => Some(*filter),
            _ => None,
        })
        .unwrap()
}

#[test]
fn look_thresholds() {
    assert_eq!(RevealLook::at(0.0), RevealLook::Silhouette);
    assert_eq!(RevealLook::at(89.9), RevealLook::Silhouette);
    assert_eq!(RevealLook::at(90.0), RevealLook::White);
    assert_eq!(RevealLook::at(269.9), RevealLook::White);
    assert_eq!(RevealLook::at(270.0), RevealLook::TrueColour);
    assert_eq!(RevealLook::at(360.0), RevealLook::TrueColour);
}

#[test]
fn turns_over_all_but_the_last_half_second() {
    let page = RevealPage::new(["cat.png"], "white");
    // 120 frames: 105 turning, 15 scaling.
    assert_eq!(page.rotation_deg_at(&ctx(0, 120)), 0.0);
    assert!((page.rotation_deg_at(&ctx(35, 120)) - 120.0).abs() < 1e-9);
    assert_eq!(page.rotation_deg_at(&ctx(105, 120)), 360.0);
    assert_eq!(page.rotation_deg_at(&ctx(119, 120)), 360.0);
}

#[test]
fn filters_follow_rotation() {
    let page = RevealPage::new(["cat.png"], "white");
    let early = page.render(&ctx(10, 120));
    assert_eq!(filter_of(&early), ImageFilter::Silhouette);
    assert!(early.iter().any(|o| matches!(o, DrawOp::Text { text, .. } if text == "?")));
    assert_eq!(filter_of(&page.render(&ctx(50, 120))), ImageFilter::WhiteSilhouette);
    let late = page.render(&ctx(100, 120));
    assert_eq!(filter_of(&late), ImageFilter::None);
    assert!(!late.iter().any(|o| matches!(o, DrawOp::Text { text, .. } if text == "?")));
}

#[test]
fn scale_holds_then_springs() {
    let page = RevealPage::new(["cat.png"], "white");
    assert_eq!(page.scale_at(&ctx(0, 120)), 1.2);
    assert_eq!(page.scale_at(&ctx(105, 120)), 1.2);
    let s = page.scale_at(&ctx(119, 120));
    assert!(s > 1.2 && s < 2.0);
}

#[test]
fn too_short_to_turn_shows_true_colour() {
    let page = RevealPage::new(["cat.png"], "white");
    assert_eq!(page.rotation_deg_at(&ctx(0, 10)), 360.0);
    assert_eq!(filter_of(&page.render(&ctx(0, 10))), ImageFilter::None);
    assert_eq!(page.scale_at(&ctx(0, 10)), 1.2);
    assert!(page.scale_at(&ctx(5, 10)) > 1.2);
}

#[test]
fn every_object_turns_together() {
    let page = RevealPage::new(["cat.png", "dog.png"], "white");
    let ops = page.render(&ctx(5, 120));
    let silhouettes = ops
        .iter()
        .filter(|o| matches!(o, DrawOp::Image { filter: ImageFilter::Silhouette, .. }))
        .count();
    assert_eq!(silhouettes, 2);

    let empty = RevealPage::new(Vec::<String>::new(), "white").render(&ctx(5, 120));
    assert!(empty.iter().all(|o| o.z() < 0));
}
