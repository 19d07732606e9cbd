use std::{
    path::Path,
    sync::{Arc, Mutex, PoisonError, RwLock},
};

use crate::{
    animation::curve::KeyframeCurve,
    effect::config::TrackerConfig,
    effect::properties::{CurveKey, EffectInfo, PropertyInfo, TRACKER_INFO, TrackerCurves},
    effect::region::{RegionSource, TrackedRegion},
    foundation::core::{Fps, FrameIndex},
    foundation::error::TrackerResult,
    track::reader::{JsonTrackReader, Timestamp, TrackFileReader},
    track::sample::BoundingBoxSample,
    track::store::TrackedBoxStore,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
/// Outcome of a successful track load.
pub struct LoadReport {
    /// Records stored.
    pub accepted: usize,
    /// Records dropped for negative coordinates.
    pub dropped: usize,
    /// Timestamp written by the tracker, if any.
    pub last_updated: Option<Timestamp>,
}

/// Immutable snapshot read by render workers.
#[derive(Clone, Debug)]
struct TrackerState {
    raw: TrackedBoxStore,      // as loaded, tracker frame numbering
    timeline: TrackedBoxStore, // raw rescaled by time_scale
    curves: TrackerCurves,
    base_rate: Fps,
    time_scale: f64,
    track_path: Option<String>,
}

impl Default for TrackerState {
    fn default() -> Self {
        Self {
            raw: TrackedBoxStore::new(),
            timeline: TrackedBoxStore::new(),
            curves: TrackerCurves::default(),
            base_rate: Fps::default(),
            time_scale: 1.0,
            track_path: None,
        }
    }
}

impl TrackerState {
    fn compute(&self, frame: FrameIndex) -> Option<TrackedRegion> {
        let s = self.timeline.try_get(frame)?;
        let c = &self.curves;
        Some(TrackedRegion {
            left: s.left + c.delta_x.value_at(frame),
            top: s.top + c.delta_y.value_at(frame),
            width: s.width + c.scale_x.value_at(frame),
            height: s.height + c.scale_y.value_at(frame),
            rotation: c.rotation.value_at(frame),
        })
    }

    /// Replace `raw` with the contents of `path`. Leaves `self` untouched on error.
    fn load_track(
        &mut self,
        reader: &dyn TrackFileReader,
        path: &Path,
    ) -> TrackerResult<LoadReport> {
        let file = reader.read(path)?;
        let (raw, accepted, dropped) = TrackedBoxStore::from_track(&file);
        let report = LoadReport {
            accepted,
            dropped,
            last_updated: file.last_updated,
        };

        if let Some(ts) = file.last_updated {
            tracing::info!(
                seconds = ts.seconds,
                nanos = ts.nanos,
                "loaded track data, saved time stamp"
            );
        }

        self.raw = raw;
        self.track_path = Some(path.to_string_lossy().into_owned());
        Ok(report)
    }

    /// Rebuild the timeline store from the raw samples.
    fn retime(&mut self) -> TrackerResult<()> {
        self.raw.set_base_rate(self.base_rate);
        self.timeline = self.raw.rescaled(self.time_scale)?;
        Ok(())
    }

    fn apply(&mut self, cfg: TrackerConfig, reader: &dyn TrackFileReader) -> TrackerResult<()> {
        if let Some(rate) = cfg.base_rate {
            self.base_rate = rate.merge(self.base_rate)?;
        }
        if let Some(ts) = cfg.time_scale {
            self.time_scale = ts;
        }

        if let Some(path) = cfg.track_path {
            if path.is_empty() {
                self.track_path = None;
            } else {
                match self.load_track(reader, Path::new(&path)) {
                    Ok(report) => tracing::debug!(
                        accepted = report.accepted,
                        dropped = report.dropped,
                        "track reloaded"
                    ),
                    Err(err) => {
                        tracing::warn!(path = %path, error = %err, "invalid track data path");
                        self.track_path = None;
                    }
                }
            }
        }

        // Rescale after loading so fresh samples land on timeline frames.
        self.retime()?;

        let curves = [
            (CurveKey::DeltaX, cfg.delta_x),
            (CurveKey::DeltaY, cfg.delta_y),
            (CurveKey::ScaleX, cfg.scale_x),
            (CurveKey::ScaleY, cfg.scale_y),
            (CurveKey::Rotation, cfg.rotation),
        ];
        for (key, curve) in curves {
            if let Some(curve) = curve {
                *self.curves.get_mut(key) = curve;
            }
        }
        Ok(())
    }
}

/// Tracked bounding-box effect.
///
/// Produces, per frame, the tracked box for that frame shifted and resized by
/// the keyframed offsets. Safe to share between render threads: readers work
/// on an immutable snapshot, writers build a new snapshot and swap it in.
pub struct TrackingEffect {
    state: RwLock<Arc<TrackerState>>,
    edit: Mutex<()>,
    reader: Box<dyn TrackFileReader>,
}

impl Default for TrackingEffect {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for TrackingEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.snapshot();
        f.debug_struct("TrackingEffect")
            .field("track_path", &state.track_path)
            .field("samples", &state.timeline.len())
            .field("base_rate", &state.base_rate)
            .field("time_scale", &state.time_scale)
            .finish()
    }
}

impl TrackingEffect {
    /// Effect with no track data that reads JSON track files.
    pub fn new() -> Self {
        Self::with_reader(JsonTrackReader)
    }

    /// Effect with no track data using a custom track reader.
    pub fn with_reader(reader: impl TrackFileReader + 'static) -> Self {
        Self {
            state: RwLock::new(Arc::new(TrackerState::default())),
            edit: Mutex::new(()),
            reader: Box::new(reader),
        }
    }

    /// Effect preloaded from the JSON track at `path`.
    pub fn from_track(path: &Path) -> TrackerResult<Self> {
        let effect = Self::new();
        effect.load(path)?;
        Ok(effect)
    }

    /// Static effect description.
    pub fn info(&self) -> EffectInfo {
        TRACKER_INFO
    }

    fn snapshot(&self) -> Arc<TrackerState> {
        let guard = self.state.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Build a new state from the current one and publish it if `f` succeeds.
    fn update<T>(
        &self,
        f: impl FnOnce(&mut TrackerState) -> TrackerResult<T>,
    ) -> TrackerResult<T> {
        let _edit = self.edit.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = TrackerState::clone(&self.snapshot());
        let out = f(&mut next)?;
        self.swap_in(next);
        Ok(out)
    }

    /// Infallible form of [`update`](Self::update).
    fn publish(&self, f: impl FnOnce(&mut TrackerState)) {
        let _edit = self.edit.lock().unwrap_or_else(PoisonError::into_inner);
        let mut next = TrackerState::clone(&self.snapshot());
        f(&mut next);
        self.swap_in(next);
    }

    fn swap_in(&self, next: TrackerState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(next);
    }

    /// Region for `frame`, or `None` when no tracked sample maps to it.
    pub fn compute(&self, frame: FrameIndex) -> Option<TrackedRegion> {
        self.snapshot().compute(frame)
    }

    /// Load tracker data from `path`, replacing the current samples.
    ///
    /// On failure the previous samples stay in place, the stored path is
    /// cleared and the error is returned.
    #[tracing::instrument(skip(self))]
    pub fn load(&self, path: &Path) -> TrackerResult<LoadReport> {
        self.update(|state| {
            let loaded = state.load_track(self.reader.as_ref(), path);
            match loaded {
                Ok(_) => state.retime()?,
                Err(_) => state.track_path = None,
            }
            Ok(loaded)
        })?
        .inspect_err(|err| tracing::warn!(error = %err, "failed to load track data"))
    }

    /// Apply a configuration document.
    ///
    /// A malformed document is rejected without touching the effect. A
    /// `track_path` that fails to load is logged and cleared; it does not fail
    /// the call.
    #[tracing::instrument(skip(self, doc))]
    pub fn configure(&self, doc: &serde_json::Value) -> TrackerResult<()> {
        let cfg = TrackerConfig::from_value(doc)?;
        self.update(|state| state.apply(cfg, self.reader.as_ref()))
    }

    /// Apply a configuration document given as JSON text.
    #[tracing::instrument(skip(self, s))]
    pub fn configure_json(&self, s: &str) -> TrackerResult<()> {
        let cfg = TrackerConfig::from_json_str(s)?;
        self.update(|state| state.apply(cfg, self.reader.as_ref()))
    }

    /// Current configuration as a document accepted by [`configure`](Self::configure).
    pub fn to_json(&self) -> serde_json::Value {
        let state = self.snapshot();
        let c = &state.curves;
        serde_json::json!({
            "type": TRACKER_INFO.class_name,
            "track_path": state.track_path.clone().unwrap_or_default(),
            "base_rate": state.base_rate,
            "time_scale": state.time_scale,
            "delta_x": c.delta_x,
            "delta_y": c.delta_y,
            "scale_x": c.scale_x,
            "scale_y": c.scale_y,
            "rotation": c.rotation,
        })
    }

    /// Editor view of every animated parameter at `frame`.
    pub fn properties_at(&self, frame: FrameIndex) -> Vec<PropertyInfo> {
        self.snapshot().curves.properties_at(frame)
    }

    /// Replace one animated parameter.
    pub fn set_curve(&self, key: CurveKey, curve: KeyframeCurve) {
        self.publish(|state| *state.curves.get_mut(key) = curve);
    }

    /// Copy of one animated parameter.
    pub fn curve(&self, key: CurveKey) -> KeyframeCurve {
        self.snapshot().curves.get(key).clone()
    }

    /// Tracked sample at timeline `frame` without offsets applied.
    pub fn tracked_sample(&self, frame: FrameIndex) -> TrackerResult<BoundingBoxSample> {
        self.snapshot().timeline.get(frame)
    }

    /// Copy of the timeline store (samples after rescaling).
    pub fn timeline_store(&self) -> TrackedBoxStore {
        self.snapshot().timeline.clone()
    }

    /// Path of the loaded track, if the last load succeeded.
    pub fn track_path(&self) -> Option<String> {
        self.snapshot().track_path.clone()
    }

    /// Nominal rate of the track data.
    pub fn base_rate(&self) -> Fps {
        self.snapshot().base_rate
    }

    /// Factor mapping track frames onto the timeline.
    pub fn time_scale(&self) -> f64 {
        self.snapshot().time_scale
    }
}

impl RegionSource for TrackingEffect {
    fn region_at(&self, frame: FrameIndex) -> Option<TrackedRegion> {
        self.compute(frame)
    }

    fn configure(&self, doc: &serde_json::Value) -> TrackerResult<()> {
        TrackingEffect::configure(self, doc)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/tracker.rs"]
mod tests;
