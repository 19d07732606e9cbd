use crate::{
    animation::ease::Ease,
    foundation::core::FrameIndex,
    foundation::error::{TrackerError, TrackerResult},
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A fixed `(frame, value)` pair on a [`KeyframeCurve`].
pub struct ControlPoint {
    /// Frame the value is pinned to.
    pub frame: FrameIndex,
    /// Value at `frame`.
    pub value: f64,
    /// Easing applied toward the next point.
    #[serde(default)]
    pub ease: Ease,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How values between two control points are produced.
pub enum InterpMode {
    /// Keep the left point's value until the next point.
    Hold,
    /// Blend from the left point to the right one, shaped by the left point's [`Ease`].
    #[default]
    Linear,
}

/// Time-varying scalar defined by control points sorted by frame.
///
/// Queries never fail: an empty curve reads as `0.0`, and frames outside the
/// keyed span clamp to the first or last value.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "CurveDoc")]
pub struct KeyframeCurve {
    mode: InterpMode,
    points: Vec<ControlPoint>, // strictly increasing by frame
}

impl KeyframeCurve {
    /// Empty curve with linear interpolation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Curve holding a single value everywhere.
    pub fn constant(value: f64) -> TrackerResult<Self> {
        let mut curve = Self::new();
        curve.set_point(FrameIndex(0), value)?;
        Ok(curve)
    }

    /// Build a curve from `(frame, value)` pairs in any order; a later pair wins on a repeated frame.
    pub fn from_points<I>(points: I) -> TrackerResult<Self>
    where
        I: IntoIterator<Item = (FrameIndex, f64)>,
    {
        let mut curve = Self::new();
        for (frame, value) in points {
            curve.set_point(frame, value)?;
        }
        Ok(curve)
    }

    /// Interpolation mode between points.
    pub fn mode(&self) -> InterpMode {
        self.mode
    }

    /// Change the interpolation mode.
    pub fn set_mode(&mut self, mode: InterpMode) {
        self.mode = mode;
    }

    /// Control points in ascending frame order.
    pub fn points(&self) -> &[ControlPoint] {
        &self.points
    }

    /// Number of control points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// `true` when the curve has no control points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Insert a linear point at `frame`, replacing any point already there.
    pub fn set_point(&mut self, frame: FrameIndex, value: f64) -> TrackerResult<()> {
        self.set_point_with_ease(frame, value, Ease::Linear)
    }

    /// Insert a point with an explicit segment ease, replacing any point already at `frame`.
    pub fn set_point_with_ease(
        &mut self,
        frame: FrameIndex,
        value: f64,
        ease: Ease,
    ) -> TrackerResult<()> {
        if !value.is_finite() {
            return Err(TrackerError::validation(format!(
                "keyframe value at frame {frame} must be finite"
            )));
        }
        let point = ControlPoint { frame, value, ease };
        match self.points.binary_search_by_key(&frame, |p| p.frame) {
            Ok(i) => self.points[i] = point,
            Err(i) => self.points.insert(i, point),
        }
        Ok(())
    }

    /// Remove the point at exactly `frame`; returns whether one existed.
    pub fn remove_point(&mut self, frame: FrameIndex) -> bool {
        match self.points.binary_search_by_key(&frame, |p| p.frame) {
            Ok(i) => {
                self.points.remove(i);
                true
            }
            Err(_) => false,
        }
    }

    /// Drop every control point.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Value of the curve at `frame`.
    pub fn value_at(&self, frame: FrameIndex) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };

        let idx = self.points.partition_point(|p| p.frame <= frame);
        if idx == 0 {
            return first.value;
        }
        if idx >= self.points.len() {
            return self.points[self.points.len() - 1].value;
        }

        let a = &self.points[idx - 1];
        let b = &self.points[idx];
        if a.frame == frame {
            return a.value;
        }

        match self.mode {
            InterpMode::Hold => a.value,
            InterpMode::Linear => {
                let span = (b.frame.0 - a.frame.0) as f64;
                let t = (frame.0 - a.frame.0) as f64 / span;
                let te = a.ease.apply(t);
                a.value + (b.value - a.value) * te
            }
        }
    }
}

/// Accepted document shapes for a curve: the full object form, or a bare
/// list of `[frame, value]` pairs.
#[derive(serde::Deserialize)]
#[serde(untagged)]
enum CurveDoc {
    Full {
        #[serde(default)]
        mode: InterpMode,
        #[serde(default)]
        points: Vec<ControlPoint>,
    },
    Pairs(Vec<(FrameIndex, f64)>),
}

impl TryFrom<CurveDoc> for KeyframeCurve {
    type Error = TrackerError;

    fn try_from(doc: CurveDoc) -> Result<Self, Self::Error> {
        let mut curve = KeyframeCurve::new();
        match doc {
            CurveDoc::Full { mode, points } => {
                curve.mode = mode;
                for p in points {
                    curve
                        .set_point_with_ease(p.frame, p.value, p.ease)
                        .map_err(|e| TrackerError::animation(e.to_string()))?;
                }
            }
            CurveDoc::Pairs(pairs) => {
                for (frame, value) in pairs {
                    curve
                        .set_point(frame, value)
                        .map_err(|e| TrackerError::animation(e.to_string()))?;
                }
            }
        }
        Ok(curve)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/curve.rs"]
mod tests;
