//! Tracked bounding-box effect for Wavyte.
//!
//! The tracker effect turns object-tracking output into a per-frame region:
//! for a requested frame it returns either nothing or a rectangle, in
//! fractional frame coordinates, showing where the tracked object sits after
//! user-animated offsets are applied.
//!
//! # Pieces
//!
//! 1. [`KeyframeCurve`]: a scalar parameter keyed by frame (offsets, size, rotation).
//! 2. [`TrackedBoxStore`]: sparse frame -> [`BoundingBoxSample`] map with rescaling
//!    between sampling rates.
//! 3. [`TrackingEffect`]: owns one store and five curves and answers
//!    [`TrackingEffect::compute`] once per rendered frame.
//!
//! Track files are decoded through [`TrackFileReader`] ([`JsonTrackReader`] by
//! default); drawing goes through [`Renderer`] ([`OutlineRenderer`] by default).
//!
//! The effect is meant to be shared by render workers: `compute` runs on an
//! immutable snapshot while reconfiguration builds and publishes a new one.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod effect;
mod foundation;
mod render;
mod track;

pub use animation::curve::{ControlPoint, InterpMode, KeyframeCurve};
pub use animation::ease::Ease;
pub use effect::config::{RateDoc, TrackerConfig};
pub use effect::properties::{
    CurveKey, EffectInfo, PropertyInfo, TRACKER_INFO, TrackerCurves,
};
pub use effect::region::{RegionSource, TrackedRegion};
pub use effect::tracker::{LoadReport, TrackingEffect};
pub use foundation::core::{Fps, FrameIndex, FrameRange, Rect};
pub use foundation::error::{TrackerError, TrackerResult};
pub use render::batch::{AnnotateStats, AnnotatedFrame, annotate_frame, annotate_frames};
pub use render::outline::{OutlineRenderer, Renderer};
pub use track::reader::{
    CornerBox, JsonTrackReader, Timestamp, TrackFile, TrackFileReader, TrackRecord,
    write_track_file,
};
pub use track::sample::BoundingBoxSample;
pub use track::store::TrackedBoxStore;
