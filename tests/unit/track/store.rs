use super::*;

fn keys(store: &TrackedBoxStore) -> Vec<u64> {
    store.frames().map(|f| f.0).collect()
}

fn store_with(frames: &[u64]) -> TrackedBoxStore {
    let mut store = TrackedBoxStore::new();
    for &f in frames {
        assert!(store.add_sample(FrameIndex(f), 0.1, 0.1, 0.2, 0.2));
    }
    store
}

#[test]
fn contains_only_added_frames() {
    let mut store = TrackedBoxStore::new();
    assert!(store.add_sample(FrameIndex(10), 0.2, 0.3, 0.1, 0.1));
    assert!(store.add_sample(FrameIndex(20), 0.25, 0.35, 0.12, 0.12));

    assert!(store.contains(FrameIndex(10)));
    assert!(!store.contains(FrameIndex(15)));
    assert!(store.contains(FrameIndex(20)));
    assert_eq!(store.len(), 2);
}

#[test]
fn clear_is_idempotent() {
    let mut store = store_with(&[1, 2, 3]);
    store.clear();
    assert!(store.is_empty());
    for f in [1, 2, 3] {
        assert!(!store.contains(FrameIndex(f)));
    }
    store.clear();
    assert!(store.is_empty());
}

#[test]
fn negative_inputs_are_dropped() {
    let mut store = TrackedBoxStore::new();
    assert!(!store.add_sample(FrameIndex(5), -0.1, 0.2, 0.1, 0.1));
    assert!(!store.add_sample(FrameIndex(6), 0.1, 0.2, -0.1, 0.1));
    assert!(!store.add_sample(FrameIndex(7), 0.1, 0.2, 0.1, f64::NAN));
    assert!(store.is_empty());
}

#[test]
fn get_returns_sample_or_not_found() {
    let mut store = TrackedBoxStore::new();
    store.add_sample(FrameIndex(3), 0.1, 0.2, 0.3, 0.4);
    assert_eq!(
        store.get(FrameIndex(3)).unwrap(),
        BoundingBoxSample::new(0.1, 0.2, 0.3, 0.4)
    );
    assert!(matches!(
        store.get(FrameIndex(4)),
        Err(TrackerError::FrameNotFound(FrameIndex(4)))
    ));
    assert_eq!(store.try_get(FrameIndex(4)), None);
}

#[test]
fn add_sample_overwrites_same_frame() {
    let mut store = TrackedBoxStore::new();
    store.add_sample(FrameIndex(3), 0.1, 0.1, 0.1, 0.1);
    store.add_sample(FrameIndex(3), 0.5, 0.5, 0.1, 0.1);
    assert_eq!(store.len(), 1);
    assert_eq!(store.get(FrameIndex(3)).unwrap().left, 0.5);
}

#[test]
fn rescale_doubles_then_halves() {
    let mut store = store_with(&[3, 7]);
    store.rescale(2.0).unwrap();
    assert_eq!(keys(&store), vec![6, 14]);
    assert_eq!(store.time_scale(), 2.0);
    store.rescale(0.5).unwrap();
    assert_eq!(keys(&store), vec![3, 7]);
}

#[test]
fn rescale_identity_keeps_keys() {
    let mut store = store_with(&[0, 1, 99, 1000]);
    let before = store.clone();
    store.rescale(1.0).unwrap();
    assert_eq!(store, before);
}

#[test]
fn rescale_round_trip_stays_within_one_frame() {
    let frames: Vec<u64> = (0..200).map(|i| i * 7 + 1).collect();
    for k in [0.5, 0.75, 1.5, 2.4, 3.0] {
        for &f in &frames {
            let mut store = store_with(&[f]);
            store.rescale(k).unwrap();
            store.rescale(1.0 / k).unwrap();
            let back = store.frames().next().unwrap().0;
            assert!(back.abs_diff(f) <= 1, "k={k} f={f} back={back}");
        }
    }
}

#[test]
fn rescale_collision_keeps_later_source_frame() {
    let mut store = TrackedBoxStore::new();
    store.add_sample(FrameIndex(4), 0.1, 0.0, 0.0, 0.0);
    store.add_sample(FrameIndex(5), 0.2, 0.0, 0.0, 0.0);
    // 4 * 0.5 = 2, 5 * 0.5 = 2.5 -> 3; 6 * 0.5 = 3 collides with 5
    store.add_sample(FrameIndex(6), 0.3, 0.0, 0.0, 0.0);
    store.rescale(0.5).unwrap();
    assert_eq!(keys(&store), vec![2, 3]);
    assert_eq!(store.get(FrameIndex(3)).unwrap().left, 0.3);
}

#[test]
fn rescale_rejects_bad_factor() {
    let mut store = store_with(&[1, 2]);
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            store.rescale(bad),
            Err(TrackerError::Validation(_))
        ));
    }
    assert_eq!(keys(&store), vec![1, 2]);
    assert_eq!(store.time_scale(), 1.0);
}

#[test]
fn rescaled_leaves_source_untouched() {
    let store = store_with(&[3, 7]);
    let scaled = store.rescaled(2.0).unwrap();
    assert_eq!(keys(&store), vec![3, 7]);
    assert_eq!(keys(&scaled), vec![6, 14]);
    assert_eq!(scaled.time_scale(), 2.0);
}

#[test]
fn base_rate_is_metadata_only() {
    let mut store = store_with(&[3]);
    store.set_base_rate(Fps::new(24, 1).unwrap());
    assert_eq!(store.base_rate(), Some(Fps::new(24, 1).unwrap()));
    assert_eq!(keys(&store), vec![3]);
    store.clear();
    assert_eq!(store.base_rate(), Some(Fps::new(24, 1).unwrap()));
}

#[test]
fn span_covers_first_to_last() {
    assert_eq!(TrackedBoxStore::new().span(), None);
    let store = store_with(&[4, 9, 12]);
    let span = store.span().unwrap();
    assert_eq!(span.start, FrameIndex(4));
    assert_eq!(span.end, FrameIndex(13));
}

#[test]
fn from_track_keeps_reversed_corners_and_skips_negative_ones() {
    use crate::track::reader::{CornerBox, TrackFile, TrackRecord};

    let rec = |id: u64, x1: f64, y1: f64, x2: f64, y2: f64| TrackRecord {
        id: FrameIndex(id),
        rotation: 0.0,
        bounding_box: CornerBox { x1, y1, x2, y2 },
    };
    let track = TrackFile {
        records: vec![
            rec(7, 0.5, 0.5, 0.3, 0.3),
            rec(8, -0.1, 0.5, 0.3, 0.3),
            rec(3, 0.1, 0.1, 0.2, 0.2),
        ],
        last_updated: None,
    };

    let (store, accepted, dropped) = TrackedBoxStore::from_track(&track);
    assert_eq!((accepted, dropped), (2, 1));
    assert_eq!(keys(&store), vec![3, 7]);
    let s = store.get(FrameIndex(7)).unwrap();
    assert_eq!((s.left, s.top), (0.5, 0.5));
    assert!((s.width + 0.2).abs() < 1e-12);
}
