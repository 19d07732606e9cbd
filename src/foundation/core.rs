use std::fmt;

use crate::foundation::error::{TrackerError, TrackerResult};

pub use kurbo::Rect;

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(transparent)]
/// Zero-based frame number on a timeline or in a track file.
pub struct FrameIndex(pub u64);

impl FrameIndex {
    /// Multiply by `factor` and round to the nearest frame (halves away from zero).
    ///
    /// Negative or non-finite products saturate to frame 0 / `u64::MAX`.
    pub fn scaled(self, factor: f64) -> Self {
        let v = (self.0 as f64 * factor).round();
        if v.is_nan() || v <= 0.0 {
            return Self(0);
        }
        if v >= u64::MAX as f64 {
            return Self(u64::MAX);
        }
        Self(v as u64)
    }
}

impl fmt::Display for FrameIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Half-open frame range `[start, end)`.
pub struct FrameRange {
    /// First frame in the range.
    pub start: FrameIndex,
    /// One past the last frame.
    pub end: FrameIndex, // exclusive
}

impl FrameRange {
    /// Number of frames covered.
    pub fn len_frames(self) -> u64 {
        self.end.0.saturating_sub(self.start.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Rational frame rate `num / den`.
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a rate, rejecting zero numerator or denominator.
    pub fn new(num: u32, den: u32) -> TrackerResult<Self> {
        if den == 0 {
            return Err(TrackerError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(TrackerError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 30, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
