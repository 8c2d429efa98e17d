use super::*;

#[test]
fn frame_range_contains_boundaries() {
    let r = FrameRange::new(FrameIndex(2), FrameIndex(5)).unwrap();
    assert!(!r.contains(FrameIndex(1)));
    assert!(r.contains(FrameIndex(2)));
    assert!(r.contains(FrameIndex(4)));
    assert!(!r.contains(FrameIndex(5)));
    assert_eq!(r.len_frames(), 3);
}

#[test]
fn frame_range_rejects_inverted_bounds() {
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(2)).is_err());
    assert!(FrameRange::new(FrameIndex(5), FrameIndex(5)).unwrap().is_empty());
}

#[test]
fn fps_conversions_are_unrounded() {
    let fps = Fps::whole(30).unwrap();
    assert!((fps.secs_to_frames(2.04) - 61.2).abs() < 1e-9);
    assert_eq!(fps.frames_to_secs(45.0), 1.5);

    let ntsc = Fps::new(30000, 1001).unwrap();
    assert!((ntsc.as_f64() - 29.97002997).abs() < 1e-6);
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
}

#[test]
fn ceil_frame_handles_degenerate_values() {
    assert_eq!(ceil_frame(61.2), 62);
    assert_eq!(ceil_frame(60.0), 60);
    assert_eq!(ceil_frame(180.00000000000003), 180);
    assert_eq!(ceil_frame(-3.0), 0);
    assert_eq!(ceil_frame(f64::NAN), 0);
}

#[test]
fn canvas_center_is_half_size() {
    assert_eq!(Canvas::FULL_HD.center(), Point::new(960.0, 540.0));
}
