use super::*;
use crate::foundation::core::Fps;

fn ctx(frame: u64) -> FrameCtx {
    FrameCtx::new(frame, 90, Fps::whole(30).unwrap())
}

fn near(a: Point, b: Point) -> bool {
    (a - b).hypot() < 1e-9
}

#[test]
fn intro_flies_from_center_to_fingertip() {
    let page = FingerPage::new(Some("index"), ["cat.png"], "white");
    let start = page.pose_at(&ctx(0));
    assert_eq!(start.hand_top, 1080.0);
    assert!(near(start.object, Point::new(960.0, 540.0)));
    assert_eq!(start.rotation_deg, 0.0);

    let landed = page.pose_at(&ctx(15));
    assert_eq!(landed.hand_top, 108.0);
    assert!(near(landed.object, Point::new(55.0 + 1028.0, 108.0 + 215.0)));
    assert!(near(page.rest_point(), landed.object));
}

#[test]
fn hand_waves_after_the_intro() {
    let page = FingerPage::new(Some("thumb"), ["cat.png"], "white");
    // Swing peaks an eighth of a 60-frame wave after the intro.
    let peak = page.pose_at(&ctx(15 + 7));
    assert!(peak.rotation_deg > 0.0);
    // A slower frame rate stretches the intro, so frame 15 is still mid-flight.
    let slow = page.pose_at(&FrameCtx::new(15, 90, Fps::whole(60).unwrap()));
    assert_eq!(slow.rotation_deg, 0.0);
    assert!(slow.hand_top > 108.0);

    let swung = page.pose_at(&ctx(15 + 15));
    assert!(swung.rotation_deg.abs() < 1e-9);
    let left = page.pose_at(&ctx(15 + 22));
    assert!(left.rotation_deg < 0.0);
}

#[test]
fn object_stays_on_the_swinging_fingertip() {
    let page = FingerPage::new(Some("middle"), ["cat.png"], "white");
    let c = ctx(22);
    let pose = page.pose_at(&c);
    let ops = page.render(&c);
    let hand = ops.iter().find(|o| o.source() == Some("VectorHand.png")).unwrap();
    let m = hand.placement().to_affine(Vec2::new(1640.0, 2000.0));
    assert!(near(m * Point::new(805.0, 169.0), pose.object));
}

#[test]
fn unknown_finger_uses_default_anchor() {
    let page = FingerPage::new(Some("elbow"), ["🍌"], "white");
    assert!(near(page.rest_point(), Point::new(55.0 + 820.0, 108.0 + 400.0)));
    let ops = page.render(&ctx(40));
    assert!(ops.iter().any(|o| matches!(
        o,
        DrawOp::Text { text, font_size, .. } if text == "🍌" && *font_size == 120.0
    )));
}

#[test]
fn burst_fires_at_contact() {
    let page = FingerPage::new(Some("ring"), ["cat.png"], "white").with_config(FingerConfig {
        burst: true,
        ..FingerConfig::default()
    });
    let stars = |f| page.render(&ctx(f)).iter().filter(|o| o.source() == Some("star.svg")).count();
    assert_eq!(stars(14), 0);
    assert_eq!(stars(15), 8);
    assert_eq!(stars(44), 8);
    assert_eq!(stars(45), 0);
}

#[test]
fn camera_zooms_onto_fingertip() {
    let page = FingerPage::new(Some("pinky"), ["cat.png"], "white").with_config(FingerConfig {
        camera: Some(CameraZoom {
            zoom: 2.0,
            damping: 200.0,
        }),
        ..FingerConfig::default()
    });
    let plain = FingerPage::new(Some("pinky"), ["cat.png"], "white");
    // Before the intro ends the camera is idle.
    assert_eq!(page.render(&ctx(10)), plain.render(&ctx(10)));

    let late = FrameCtx::new(3000, 3600, Fps::whole(30).unwrap());
    let ops = page.render(&late);
    let obj = ops.iter().find(|o| o.source() == Some("cat.png")).unwrap();
    let rest = page.rest_point();
    let pose = page.pose_at(&late);
    let expected = Point::new(960.0, 540.0) + (pose.object - rest) * 2.0;
    assert!((obj.placement().position - expected).hypot() < 1e-3);
    assert!((obj.placement().scale.x - 2.0).abs() < 1e-6);
}

#[test]
fn repeatable_in_any_order() {
    let page = FingerPage::new(Some("index"), ["cat.png"], "demoBg.png");
    let forward: Vec<_> = (0..90).map(|f| page.render(&ctx(f))).collect();
    let backward: Vec<_> = (0..90).rev().map(|f| page.render(&ctx(f))).collect();
    for (f, ops) in forward.iter().enumerate() {
        assert_eq!(ops, &backward[89 - f]);
    }
}

#[test]
fn hand_alone_when_no_objects() {
    let page = FingerPage::new(Some("index"), Vec::<String>::new(), "white");
    let ops = page.render(&ctx(40));
    let above_backdrop: Vec<_> = ops.iter().filter(|o| o.z() >= 0).collect();
    assert_eq!(above_backdrop.len(), 1);
    assert_eq!(above_backdrop[0].source(), Some("VectorHand.png"));
}

#[test]
fn all_objects_share_the_fingertip() {
    let page = FingerPage::new(Some("thumb"), ["cat.png", "🍌"], "white");
    let late = ctx(40);
    let pose = page.pose_at(&late);
    let ops = page.render(&late);
    let objects: Vec<_> = ops.iter().filter(|o| o.z() == 10).collect();
    assert_eq!(objects.len(), 2);
    assert!(objects.iter().all(|o| near(o.placement().position, pose.object)));
}
