use super::*;

fn fps30() -> Fps {
    Fps::whole(30).unwrap()
}

#[test]
fn durations_use_millis_convention() {
    let seg: SegmentSpec = serde_json::from_value(serde_json::json!({
        "objectImage": "cat.png",
        "backgroundImage": "demoBg.png",
        "mysteriousDuration": 2.04,
        "revealDuration": 2.50,
        "fingerDuration": 1.46
    }))
    .unwrap();
    assert!(matches!(seg.timing, SegmentTiming::Durations { .. }));
    let [m, r, f] = seg.phase_frames(fps30());
    assert!((m - 61.2).abs() < 1e-9);
    assert!((r - 75.0).abs() < 1e-9);
    assert!((f - 43.8).abs() < 1e-9);
    assert!((m + r + f - 180.0).abs() < 1e-9);
}

#[test]
fn ends_at_are_cumulative() {
    let seg: SegmentSpec = serde_json::from_value(serde_json::json!({
        "objectImage": "cat.png",
        "backgroundImage": "white",
        "mysteriousEndsAt": "00:02.00",
        "revealEndsAt": "00:04.50",
        "fingerEndsAt": "00:07.11"
    }))
    .unwrap();
    let [m, r, f] = seg.timing.phase_secs();
    assert!((m - 2.0).abs() < 1e-9);
    assert!((r - 2.5).abs() < 1e-9);
    assert!((f - 2.61).abs() < 1e-9);
}

#[test]
fn backwards_ends_at_clamp_to_zero_length() {
    let timing = SegmentTiming::EndsAt {
        mysterious: "05.00".into(),
        reveal: "03.00".into(),
        finger: "garbage".into(),
    };
    assert_eq!(timing.phase_secs(), [5.0, 0.0, 0.0]);
}

#[test]
fn missing_timing_degrades_to_zero() {
    let seg: SegmentSpec = serde_json::from_value(serde_json::json!({
        "objectImage": "🍎",
        "backgroundImage": "white",
        "mysteriousDuration": 2
    }))
    .unwrap();
    assert_eq!(seg.timing.phase_secs(), [2.0, 0.0, 0.0]);

    let bare: SegmentSpec = serde_json::from_value(serde_json::json!({
        "objectImage": "x",
        "backgroundImage": "y"
    }))
    .unwrap();
    assert_eq!(bare.timing.phase_secs(), [0.0, 0.0, 0.0]);
}

#[test]
fn timing_serializes_back_to_flat_keys() {
    let seg = SegmentSpec {
        object_image: "cat.png".to_owned(),
        background_image: "white".to_owned(),
        timing: SegmentTiming::Durations {
            mysterious: 2.0.into(),
            reveal: 2.0.into(),
            finger: 2.0.into(),
        },
    };
    let v = serde_json::to_value(&seg).unwrap();
    assert_eq!(v["mysteriousDuration"], serde_json::json!(2.0));
    assert!(v.get("mysteriousEndsAt").is_none());
    let back: SegmentSpec = serde_json::from_value(v).unwrap();
    assert_eq!(back, seg);
}

#[test]
fn fingers_cycle_and_fall_back() {
    let order: Vec<_> = (0..10).map(finger_for_segment).collect();
    assert_eq!(order[0], Finger::Thumb);
    assert_eq!(order[4], Finger::Pinky);
    assert_eq!(order[5], Finger::Thumb);
    assert_eq!(order[9], Finger::Pinky);

    assert_eq!(anchor_for(Some("index")), Point::new(1028.0, 215.0));
    assert_eq!(anchor_for(Some("toe")), DEFAULT_ANCHOR);
    assert_eq!(anchor_for(None), DEFAULT_ANCHOR);
    for f in Finger::ALL {
        assert_eq!(Finger::from_name(f.name()), Some(f));
    }
}
