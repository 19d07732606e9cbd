use std::collections::BTreeMap;

use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{TrackerError, TrackerResult},
    track::reader::TrackFile,
    track::sample::BoundingBoxSample,
};

/// Sparse frame-indexed store of tracked boxes.
///
/// Keys are kept ordered so rescaling resolves collisions deterministically:
/// when two source frames land on the same target frame, the one with the
/// larger source frame wins.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackedBoxStore {
    samples: BTreeMap<FrameIndex, BoundingBoxSample>,
    base_rate: Option<Fps>,
    time_scale: f64,
}

impl Default for TrackedBoxStore {
    fn default() -> Self {
        Self {
            samples: BTreeMap::new(),
            base_rate: None,
            time_scale: 1.0,
        }
    }
}

impl TrackedBoxStore {
    /// Empty store with no base rate and a time scale of `1.0`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store filled from `track` in file order; a later record wins on a repeated frame.
    ///
    /// Records with a negative corner are skipped. Corners given in reverse
    /// order are kept as-is. Returns the store with the accepted and dropped
    /// record counts.
    pub fn from_track(track: &TrackFile) -> (Self, usize, usize) {
        let mut store = Self::new();
        let mut dropped = 0usize;
        for record in &track.records {
            match record.sample() {
                Some(sample) => store.insert(record.id, sample),
                None => {
                    tracing::trace!(frame = record.id.0, "dropping record with negative corner");
                    dropped += 1;
                }
            }
        }
        (store, track.records.len() - dropped, dropped)
    }

    /// Remove every sample. Metadata is kept.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Store a box at `frame` from its top-left corner and size.
    ///
    /// Returns `false` and stores nothing when any input is negative.
    pub fn add_sample(
        &mut self,
        frame: FrameIndex,
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    ) -> bool {
        let sample = BoundingBoxSample::new(left, top, width, height);
        if !sample.is_non_negative() {
            tracing::trace!(frame = frame.0, ?sample, "dropping negative sample");
            return false;
        }
        self.samples.insert(frame, sample);
        true
    }

    /// Store `sample` at `frame`, replacing whatever was there.
    pub fn insert(&mut self, frame: FrameIndex, sample: BoundingBoxSample) {
        self.samples.insert(frame, sample);
    }

    /// Exact-key membership.
    pub fn contains(&self, frame: FrameIndex) -> bool {
        self.samples.contains_key(&frame)
    }

    /// Sample stored at `frame`.
    ///
    /// Asking for a frame without a sample is a caller bug and reported as
    /// [`TrackerError::FrameNotFound`]; check [`contains`](Self::contains) first.
    pub fn get(&self, frame: FrameIndex) -> TrackerResult<BoundingBoxSample> {
        self.samples
            .get(&frame)
            .copied()
            .ok_or(TrackerError::FrameNotFound(frame))
    }

    /// Sample stored at `frame`, if any.
    pub fn try_get(&self, frame: FrameIndex) -> Option<BoundingBoxSample> {
        self.samples.get(&frame).copied()
    }

    /// Record the nominal sampling rate of the loaded track. Does not rescale.
    pub fn set_base_rate(&mut self, rate: Fps) {
        self.base_rate = Some(rate);
    }

    /// Nominal sampling rate, if one was recorded.
    pub fn base_rate(&self) -> Option<Fps> {
        self.base_rate
    }

    /// Factor passed to the most recent [`rescale`](Self::rescale).
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    /// Multiply every key by `factor`, rounding to the nearest frame.
    pub fn rescale(&mut self, factor: f64) -> TrackerResult<()> {
        validate_factor(factor)?;
        self.time_scale = factor;
        if factor == 1.0 {
            return Ok(());
        }

        let old = std::mem::take(&mut self.samples);
        for (frame, sample) in old {
            self.samples.insert(frame.scaled(factor), sample);
        }
        Ok(())
    }

    /// Copy of this store rescaled by `factor`.
    pub fn rescaled(&self, factor: f64) -> TrackerResult<Self> {
        validate_factor(factor)?;
        let samples = if factor == 1.0 {
            self.samples.clone()
        } else {
            let mut out = BTreeMap::new();
            for (frame, sample) in &self.samples {
                out.insert(frame.scaled(factor), *sample);
            }
            out
        };
        Ok(Self {
            samples,
            base_rate: self.base_rate,
            time_scale: factor,
        })
    }

    /// Number of stored samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// `true` when the store holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Stored frames in ascending order.
    pub fn frames(&self) -> impl Iterator<Item = FrameIndex> + '_ {
        self.samples.keys().copied()
    }

    /// `(frame, sample)` pairs in ascending frame order.
    pub fn iter(&self) -> impl Iterator<Item = (FrameIndex, BoundingBoxSample)> + '_ {
        self.samples.iter().map(|(f, s)| (*f, *s))
    }

    /// Half-open range from the first stored frame to one past the last.
    pub fn span(&self) -> Option<FrameRange> {
        let (first, _) = self.samples.first_key_value()?;
        let (last, _) = self.samples.last_key_value()?;
        Some(FrameRange {
            start: *first,
            end: FrameIndex(last.0.saturating_add(1)),
        })
    }
}

fn validate_factor(factor: f64) -> TrackerResult<()> {
    if !factor.is_finite() || factor <= 0.0 {
        return Err(TrackerError::validation(format!(
            "time scale must be finite and > 0, got {factor}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/track/store.rs"]
mod tests;
