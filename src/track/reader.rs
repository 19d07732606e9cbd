use std::{fs::File, io::BufReader, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::core::FrameIndex,
    foundation::error::{TrackerError, TrackerResult},
    track::sample::BoundingBoxSample,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Box given by two opposite corners, as written by the tracker.
pub struct CornerBox {
    /// First corner, x.
    pub x1: f64,
    /// First corner, y.
    pub y1: f64,
    /// Opposite corner, x.
    pub x2: f64,
    /// Opposite corner, y.
    pub y2: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One tracked frame.
pub struct TrackRecord {
    /// Frame number in the tracker's own numbering.
    pub id: FrameIndex,
    /// Box rotation in degrees. Carried, not used for placement.
    #[serde(default)]
    pub rotation: f64,
    /// Tracked box.
    pub bounding_box: CornerBox,
}

impl TrackRecord {
    /// Canonical sample for this record, or `None` if any corner is negative.
    pub fn sample(&self) -> Option<BoundingBoxSample> {
        let b = self.bounding_box;
        if [b.x1, b.y1, b.x2, b.y2]
            .iter()
            .any(|v| v.is_nan() || *v < 0.0)
        {
            return None;
        }
        Some(BoundingBoxSample::from_corners(b.x1, b.y1, b.x2, b.y2))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Wall-clock time the track file was last written.
pub struct Timestamp {
    /// Seconds since the Unix epoch.
    pub seconds: i64,
    /// Sub-second part.
    #[serde(default)]
    pub nanos: i32,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Decoded track file: records in file order plus optional timestamp.
pub struct TrackFile {
    /// Per-frame records in file order.
    #[serde(rename = "frames", default)]
    pub records: Vec<TrackRecord>,
    /// Last update time, if the tracker recorded one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Timestamp>,
}

/// Source of decoded track files.
pub trait TrackFileReader: Send + Sync {
    /// Decode the track stored at `path`.
    fn read(&self, path: &Path) -> TrackerResult<TrackFile>;
}

impl<F> TrackFileReader for F
where
    F: Fn(&Path) -> TrackerResult<TrackFile> + Send + Sync,
{
    fn read(&self, path: &Path) -> TrackerResult<TrackFile> {
        self(path)
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Reads track files stored as JSON.
pub struct JsonTrackReader;

impl TrackFileReader for JsonTrackReader {
    fn read(&self, path: &Path) -> TrackerResult<TrackFile> {
        let f = File::open(path)
            .with_context(|| format!("open track file '{}'", path.display()))
            .map_err(|e| TrackerError::track_file(format!("{e:#}")))?;
        serde_json::from_reader(BufReader::new(f)).map_err(|e| {
            TrackerError::track_file(format!("parse track file '{}': {e}", path.display()))
        })
    }
}

/// Write `track` as pretty JSON to `path`.
pub fn write_track_file(path: &Path, track: &TrackFile) -> TrackerResult<()> {
    let f = File::create(path)
        .with_context(|| format!("create track file '{}'", path.display()))?;
    serde_json::to_writer_pretty(f, track)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/track/reader.rs"]
mod tests;
