use crate::foundation::core::FrameIndex;

/// Result alias used across the crate.
pub type TrackerResult<T> = Result<T, TrackerError>;

#[derive(thiserror::Error, Debug)]
/// Error type shared by the store, curves, track reader and effect.
pub enum TrackerError {
    /// Input failed validation (configuration, rates, factors, values).
    #[error("validation error: {0}")]
    Validation(String),

    /// Keyframe curve could not be built from its document.
    #[error("animation error: {0}")]
    Animation(String),

    /// Track file could not be read or decoded.
    #[error("track file error: {0}")]
    TrackFile(String),

    /// Store lookup on a frame that holds no sample.
    #[error("no tracked sample at frame {0}")]
    FrameNotFound(FrameIndex),

    /// JSON (de)serialization failure.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Anything else, usually an I/O error with context attached.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrackerError {
    /// Build a [`TrackerError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrackerError::Animation`].
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`TrackerError::TrackFile`].
    pub fn track_file(msg: impl Into<String>) -> Self {
        Self::TrackFile(msg.into())
    }

    /// Build a [`TrackerError::Serde`].
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serde(err.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
