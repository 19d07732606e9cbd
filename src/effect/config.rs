use crate::{
    animation::curve::KeyframeCurve,
    foundation::core::Fps,
    foundation::error::{TrackerError, TrackerResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
/// Partial rate update; a missing part keeps its current value.
pub struct RateDoc {
    /// New numerator.
    pub num: Option<u32>,
    /// New denominator.
    pub den: Option<u32>,
}

impl RateDoc {
    /// Overlay onto `current`, validating the result.
    pub fn merge(self, current: Fps) -> TrackerResult<Fps> {
        Fps::new(
            self.num.unwrap_or(current.num),
            self.den.unwrap_or(current.den),
        )
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Deserialize)]
/// Parsed configuration document.
///
/// Every key is optional: absent or `null` keys leave the effect unchanged,
/// unknown keys are ignored.
pub struct TrackerConfig {
    /// Track file to load.
    pub track_path: Option<String>,
    /// Nominal rate of the track data.
    pub base_rate: Option<RateDoc>,
    /// Factor mapping track frames onto the timeline.
    pub time_scale: Option<f64>,
    /// Horizontal offset curve.
    pub delta_x: Option<KeyframeCurve>,
    /// Vertical offset curve.
    pub delta_y: Option<KeyframeCurve>,
    /// Width offset curve.
    pub scale_x: Option<KeyframeCurve>,
    /// Height offset curve.
    pub scale_y: Option<KeyframeCurve>,
    /// Rotation curve.
    pub rotation: Option<KeyframeCurve>,
}

impl TrackerConfig {
    /// Parse and validate a configuration document.
    pub fn from_value(doc: &serde_json::Value) -> TrackerResult<Self> {
        if !doc.is_object() {
            return Err(TrackerError::validation(
                "tracker configuration must be a JSON object",
            ));
        }
        let cfg: Self = serde_json::from_value(doc.clone()).map_err(|e| {
            TrackerError::validation(format!("malformed tracker configuration: {e}"))
        })?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Parse a configuration document from JSON text.
    pub fn from_json_str(s: &str) -> TrackerResult<Self> {
        let doc: serde_json::Value = serde_json::from_str(s)
            .map_err(|e| TrackerError::validation(format!("invalid JSON: {e}")))?;
        Self::from_value(&doc)
    }

    fn validate(&self) -> TrackerResult<()> {
        if let Some(ts) = self.time_scale
            && (!ts.is_finite() || ts <= 0.0)
        {
            return Err(TrackerError::validation(format!(
                "time_scale must be finite and > 0, got {ts}"
            )));
        }
        if let Some(rate) = self.base_rate
            && (rate.num == Some(0) || rate.den == Some(0))
        {
            return Err(TrackerError::validation(
                "base_rate num and den must be > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/config.rs"]
mod tests;
