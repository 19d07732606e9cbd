use super::*;

fn curve(points: &[(u64, f64)]) -> KeyframeCurve {
    KeyframeCurve::from_points(points.iter().map(|&(f, v)| (FrameIndex(f), v))).unwrap()
}

#[test]
fn empty_curve_reads_zero() {
    let c = KeyframeCurve::new();
    assert!(c.is_empty());
    assert_eq!(c.value_at(FrameIndex(0)), 0.0);
    assert_eq!(c.value_at(FrameIndex(10_000)), 0.0);
}

#[test]
fn linear_midpoint_and_clamp() {
    let c = curve(&[(0, 0.0), (100, 0.5)]);
    assert_eq!(c.value_at(FrameIndex(50)), 0.25);
    assert_eq!(c.value_at(FrameIndex(200)), 0.5);
}

#[test]
fn control_points_read_back_exactly() {
    let pts = [(3, 0.1), (17, -0.37), (18, 0.9), (400, 1e-9)];
    let c = curve(&pts);
    for (f, v) in pts {
        assert_eq!(c.value_at(FrameIndex(f)), v);
    }
}

#[test]
fn far_out_frames_clamp_to_boundary_values() {
    let c = curve(&[(10, 2.0), (20, 4.0)]);
    assert_eq!(c.value_at(FrameIndex(0)), 2.0);
    assert_eq!(c.value_at(FrameIndex(9)), 2.0);
    assert_eq!(c.value_at(FrameIndex(21)), 4.0);
    assert_eq!(c.value_at(FrameIndex(u64::MAX)), 4.0);
}

#[test]
fn set_point_keeps_order_and_overwrites() {
    let mut c = KeyframeCurve::new();
    c.set_point(FrameIndex(30), 3.0).unwrap();
    c.set_point(FrameIndex(10), 1.0).unwrap();
    c.set_point(FrameIndex(20), 2.0).unwrap();
    c.set_point(FrameIndex(10), 1.5).unwrap();

    let frames: Vec<u64> = c.points().iter().map(|p| p.frame.0).collect();
    assert_eq!(frames, vec![10, 20, 30]);
    assert_eq!(c.value_at(FrameIndex(10)), 1.5);
}

#[test]
fn non_finite_values_are_rejected() {
    let mut c = KeyframeCurve::new();
    assert!(matches!(
        c.set_point(FrameIndex(0), f64::NAN),
        Err(TrackerError::Validation(_))
    ));
    assert!(c.set_point(FrameIndex(0), f64::INFINITY).is_err());
    assert!(c.is_empty());
}

#[test]
fn remove_and_clear() {
    let mut c = curve(&[(0, 1.0), (5, 2.0)]);
    assert!(c.remove_point(FrameIndex(5)));
    assert!(!c.remove_point(FrameIndex(5)));
    assert_eq!(c.len(), 1);
    c.clear();
    assert!(c.is_empty());
    assert_eq!(c.value_at(FrameIndex(5)), 0.0);
}

#[test]
fn hold_mode_steps() {
    let mut c = curve(&[(0, 1.0), (10, 3.0)]);
    c.set_mode(InterpMode::Hold);
    assert_eq!(c.value_at(FrameIndex(9)), 1.0);
    assert_eq!(c.value_at(FrameIndex(10)), 3.0);
}

#[test]
fn eased_segment_keeps_endpoints() {
    let mut c = KeyframeCurve::new();
    c.set_point_with_ease(FrameIndex(0), 0.0, Ease::InQuad)
        .unwrap();
    c.set_point(FrameIndex(10), 1.0).unwrap();
    assert_eq!(c.value_at(FrameIndex(0)), 0.0);
    assert!((c.value_at(FrameIndex(5)) - 0.25).abs() < 1e-12);
    assert_eq!(c.value_at(FrameIndex(10)), 1.0);
}

#[test]
fn constant_is_flat() {
    let c = KeyframeCurve::constant(0.75).unwrap();
    assert_eq!(c.value_at(FrameIndex(0)), 0.75);
    assert_eq!(c.value_at(FrameIndex(999)), 0.75);
}

#[test]
fn deserializes_full_document() {
    let c: KeyframeCurve = serde_json::from_str(
        r#"{"mode": "hold", "points": [{"frame": 10, "value": 1.0}, {"frame": 0, "value": 0.5, "ease": "smooth"}]}"#,
    )
    .unwrap();
    assert_eq!(c.mode(), InterpMode::Hold);
    assert_eq!(c.points()[0].frame, FrameIndex(0));
    assert_eq!(c.points()[0].ease, Ease::Smooth);
    assert_eq!(c.value_at(FrameIndex(5)), 0.5);
}

#[test]
fn deserializes_pair_list() {
    let c: KeyframeCurve = serde_json::from_str("[[0, 0.0], [100, 0.5], [100, 0.25]]").unwrap();
    assert_eq!(c.len(), 2);
    assert_eq!(c.value_at(FrameIndex(100)), 0.25);
}

#[test]
fn rejects_malformed_document() {
    assert!(serde_json::from_str::<KeyframeCurve>(r#"{"points": "nope"}"#).is_err());
    assert!(serde_json::from_str::<KeyframeCurve>(r#"[[-1, 0.0]]"#).is_err());
}

#[test]
fn serialized_form_reloads() {
    let mut c = curve(&[(0, 0.0), (4, 1.0)]);
    c.set_mode(InterpMode::Hold);
    let json = serde_json::to_value(&c).unwrap();
    let back: KeyframeCurve = serde_json::from_value(json).unwrap();
    assert_eq!(back, c);
}
