use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn minutes_seconds_hundredths() {
    assert!(close(parse_timestamp_secs("00:07.11"), 7.11));
    assert!(close(parse_timestamp_secs("01:02.50"), 62.5));
    assert!(close(parse_timestamp_secs("10:00.00"), 600.0));
}

#[test]
fn seconds_hundredths() {
    assert!(close(parse_timestamp_secs("07.11"), 7.11));
    assert!(close(parse_timestamp_secs("125.05"), 125.05));
}

#[test]
fn float_fallback_reads_leading_literal() {
    assert!(close(parse_timestamp_secs("7.5"), 7.5));
    assert!(close(parse_timestamp_secs("3"), 3.0));
    assert!(close(parse_timestamp_secs("  2.125s"), 2.125));
    assert!(close(parse_timestamp_secs("1e1"), 10.0));
    // Single-digit minutes are not the MM:SS.CC form; only the leading "1" is read.
    assert!(close(parse_timestamp_secs("1:07.11"), 1.0));
}

#[test]
fn malformed_text_degrades_to_zero() {
    for raw in ["", "abc", ":", ".", "-", "--1", "NaN"] {
        assert_eq!(parse_timestamp_secs(raw), 0.0, "{raw:?}");
    }
    assert_eq!(parse_timestamp_secs("-4.00"), 0.0);
}

#[test]
fn millis_convention_pads_and_truncates() {
    assert_eq!(parse_millis(4.04), Some(4040));
    assert_eq!(parse_millis(4.5), Some(4500));
    assert_eq!(parse_millis(4.004), Some(4004));
    assert_eq!(parse_millis(1.2345), Some(1234));
    assert_eq!(parse_millis(2.0), Some(2000));
    assert_eq!(parse_millis(0.0), Some(0));
    assert_eq!(parse_millis(-1.0), None);
    assert_eq!(parse_millis(f64::NAN), None);
    assert_eq!(parse_millis(f64::INFINITY), None);
}

#[test]
fn millis_convention_seconds() {
    assert_eq!(parse_millis_duration_secs(4.04), 4.04);
    assert_eq!(parse_millis_duration_secs(4.5), 4.5);
    assert_eq!(parse_millis_duration_secs(4.004), 4.004);
    assert_eq!(parse_millis_duration_secs(-2.0), 0.0);
}

#[test]
fn time_value_dispatches_on_representation() {
    let fps = Fps::whole(30).unwrap();
    assert!(close(TimeValue::from(2.04).frames(fps), 61.2));
    assert!(close(TimeValue::from("00:02.50").frames(fps), 75.0));
    assert_eq!(TimeValue::from("garbage").frames(fps), 0.0);

    let v: TimeValue = serde_json::from_str("1.46").unwrap();
    assert_eq!(v, TimeValue::Number(1.46));
    let v: TimeValue = serde_json::from_str("\"00:07.11\"").unwrap();
    assert_eq!(v, TimeValue::Text("00:07.11".to_owned()));
}
