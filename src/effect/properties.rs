use crate::{animation::curve::KeyframeCurve, foundation::core::FrameIndex};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Names of the animated parameters of the tracker effect.
pub enum CurveKey {
    /// Horizontal offset added to the tracked left edge.
    DeltaX,
    /// Vertical offset added to the tracked top edge.
    DeltaY,
    /// Offset added to the tracked width.
    ScaleX,
    /// Offset added to the tracked height.
    ScaleY,
    /// Rotation in degrees.
    Rotation,
}

impl CurveKey {
    /// All keys in document order.
    pub const ALL: [CurveKey; 5] = [
        CurveKey::DeltaX,
        CurveKey::DeltaY,
        CurveKey::ScaleX,
        CurveKey::ScaleY,
        CurveKey::Rotation,
    ];

    /// Document key.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::DeltaX => "delta_x",
            Self::DeltaY => "delta_y",
            Self::ScaleX => "scale_x",
            Self::ScaleY => "scale_y",
            Self::Rotation => "rotation",
        }
    }

    /// Label shown by editors.
    pub fn label(self) -> &'static str {
        match self {
            Self::DeltaX => "Displacement X-axis",
            Self::DeltaY => "Displacement Y-axis",
            Self::ScaleX => "Scale (Width)",
            Self::ScaleY => "Scale (Height)",
            Self::Rotation => "Rotation",
        }
    }

    /// Editable range `(min, max)`.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::Rotation => (0.0, 360.0),
            _ => (-1.0, 1.0),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// The five animated parameters.
pub struct TrackerCurves {
    /// See [`CurveKey::DeltaX`].
    pub delta_x: KeyframeCurve,
    /// See [`CurveKey::DeltaY`].
    pub delta_y: KeyframeCurve,
    /// See [`CurveKey::ScaleX`].
    pub scale_x: KeyframeCurve,
    /// See [`CurveKey::ScaleY`].
    pub scale_y: KeyframeCurve,
    /// See [`CurveKey::Rotation`].
    pub rotation: KeyframeCurve,
}

impl TrackerCurves {
    /// Curve for `key`.
    pub fn get(&self, key: CurveKey) -> &KeyframeCurve {
        match key {
            CurveKey::DeltaX => &self.delta_x,
            CurveKey::DeltaY => &self.delta_y,
            CurveKey::ScaleX => &self.scale_x,
            CurveKey::ScaleY => &self.scale_y,
            CurveKey::Rotation => &self.rotation,
        }
    }

    /// Mutable curve for `key`.
    pub fn get_mut(&mut self, key: CurveKey) -> &mut KeyframeCurve {
        match key {
            CurveKey::DeltaX => &mut self.delta_x,
            CurveKey::DeltaY => &mut self.delta_y,
            CurveKey::ScaleX => &mut self.scale_x,
            CurveKey::ScaleY => &mut self.scale_y,
            CurveKey::Rotation => &mut self.rotation,
        }
    }

    /// Editor view of every parameter at `frame`.
    pub fn properties_at(&self, frame: FrameIndex) -> Vec<PropertyInfo> {
        CurveKey::ALL
            .iter()
            .map(|&key| {
                let curve = self.get(key);
                let (min, max) = key.range();
                PropertyInfo {
                    key,
                    label: key.label(),
                    value: curve.value_at(frame),
                    min,
                    max,
                    kind: "float",
                    keyframe: curve
                        .points()
                        .binary_search_by_key(&frame, |p| p.frame)
                        .is_ok(),
                    points: curve.len(),
                }
            })
            .collect()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
/// Read-only description of one editable parameter at a given frame.
pub struct PropertyInfo {
    /// Parameter.
    pub key: CurveKey,
    /// Human-readable label.
    pub label: &'static str,
    /// Value at the requested frame.
    pub value: f64,
    /// Lower bound of the editable range.
    pub min: f64,
    /// Upper bound of the editable range.
    pub max: f64,
    /// Type tag.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// `true` if a control point sits exactly on the requested frame.
    pub keyframe: bool,
    /// Number of control points on the curve.
    pub points: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
/// Static description of an effect type.
pub struct EffectInfo {
    /// Type name used in documents.
    pub class_name: &'static str,
    /// Display name.
    pub name: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Whether the effect touches audio.
    pub has_audio: bool,
    /// Whether the effect touches video.
    pub has_video: bool,
}

/// Description of the tracker effect.
pub const TRACKER_INFO: EffectInfo = EffectInfo {
    class_name: "Tracker",
    name: "Tracker",
    description: "Track the selected bounding box through the video.",
    has_audio: false,
    has_video: true,
};

#[cfg(test)]
#[path = "../../tests/unit/effect/properties.rs"]
mod tests;
