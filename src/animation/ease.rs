#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Shape of a keyframe segment, applied to the normalized segment progress.
pub enum Ease {
    /// Straight line between the two control points.
    #[default]
    Linear,
    /// Slow start.
    InQuad,
    /// Slow finish.
    OutQuad,
    /// Slow start and finish.
    InOutQuad,
    /// Slow start and finish, steeper middle.
    InOutCubic,
    /// Hermite smoothstep.
    Smooth,
}

impl Ease {
    /// Map progress `t` in `[0, 1]` through the easing function.
    ///
    /// Inputs outside the unit interval are clamped; every variant maps 0 to 0 and 1 to 1.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::InQuad => t * t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::InOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(3) / 2.0)
                }
            }
            Self::Smooth => t * t * (3.0 - 2.0 * t),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;
