use super::*;

#[test]
fn frame_range_len_is_half_open() {
    let r = FrameRange {
        start: FrameIndex(2),
        end: FrameIndex(5),
    };
    assert_eq!(r.len_frames(), 3);
    let empty = FrameRange {
        start: FrameIndex(5),
        end: FrameIndex(5),
    };
    assert_eq!(empty.len_frames(), 0);
}

#[test]
fn scaled_rounds_to_nearest_frame() {
    assert_eq!(FrameIndex(3).scaled(2.0), FrameIndex(6));
    assert_eq!(FrameIndex(7).scaled(0.5), FrameIndex(4));
    assert_eq!(FrameIndex(5).scaled(0.5), FrameIndex(3));
    assert_eq!(FrameIndex(9).scaled(1.0), FrameIndex(9));
}

#[test]
fn scaled_saturates_out_of_range_products() {
    assert_eq!(FrameIndex(4).scaled(-1.0), FrameIndex(0));
    assert_eq!(FrameIndex(4).scaled(f64::NAN), FrameIndex(0));
    assert_eq!(FrameIndex(4).scaled(f64::INFINITY), FrameIndex(u64::MAX));
}

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(30, 0).is_err());
    let fps = Fps::new(30000, 1001).unwrap();
    assert_eq!((fps.num, fps.den), (30000, 1001));
}

#[test]
fn frame_index_serializes_as_plain_number() {
    assert_eq!(serde_json::to_string(&FrameIndex(12)).unwrap(), "12");
    let f: FrameIndex = serde_json::from_str("7").unwrap();
    assert_eq!(f, FrameIndex(7));
}
