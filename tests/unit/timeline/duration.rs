use super::*;
use crate::timeline::spec::SegmentTiming;

fn seg(timing: SegmentTiming) -> SegmentSpec {
    SegmentSpec {
        object_image: "cat.png".to_owned(),
        background_image: "demoBg.png".to_owned(),
        timing,
    }
}

fn durations(m: f64, r: f64, f: f64) -> SegmentTiming {
    SegmentTiming::Durations {
        mysterious: m.into(),
        reveal: r.into(),
        finger: f.into(),
    }
}

#[test]
fn ten_even_segments_total_1950() {
    let fps = Fps::whole(30).unwrap();
    let segs = vec![seg(durations(2.0, 2.0, 2.0)); 10];
    let meta = calculate_metadata(&segs, fps);
    assert_eq!(meta.duration_in_frames, 1950);
    assert_eq!(meta.fps, fps);
}

#[test]
fn millis_example_is_exactly_six_seconds() {
    let fps = Fps::whole(30).unwrap();
    let segs = [seg(durations(2.04, 2.50, 1.46))];
    assert_eq!(total_duration_frames(&segs, fps), 180 + 150);
}

#[test]
fn ends_at_total_uses_last_timestamp() {
    let fps = Fps::whole(30).unwrap();
    let segs = [seg(SegmentTiming::EndsAt {
        mysterious: "00:02.00".into(),
        reveal: "00:04.50".into(),
        finger: "00:07.11".into(),
    })];
    // 7.11 s = 213.3 frames, rounded up once at the total.
    assert_eq!(total_duration_frames(&segs, fps), 214 + 150);
}

#[test]
fn empty_and_unparseable_leave_only_the_outro() {
    let fps = Fps::whole(30).unwrap();
    assert_eq!(total_duration_frames(&[], fps), 150);
    let segs = [seg(SegmentTiming::EndsAt {
        mysterious: "".into(),
        reveal: "??".into(),
        finger: "-3".into(),
    })];
    assert_eq!(total_duration_frames(&segs, fps), 150);
}

#[test]
fn metadata_serializes_camel_case() {
    let meta = CompositionMetadata {
        duration_in_frames: 90,
        fps: Fps::default(),
    };
    let v = serde_json::to_value(meta).unwrap();
    assert_eq!(v["durationInFrames"], 90);
}
