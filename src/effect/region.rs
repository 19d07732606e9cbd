use crate::foundation::core::{FrameIndex, Rect};
use crate::foundation::error::TrackerResult;

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Final per-frame region in fractional frame coordinates.
///
/// `left`/`top` locate the top-left corner, matching [`BoundingBoxSample`](crate::BoundingBoxSample).
pub struct TrackedRegion {
    /// Left edge.
    pub left: f64,
    /// Top edge.
    pub top: f64,
    /// Width as a fraction of frame width.
    pub width: f64,
    /// Height as a fraction of frame height.
    pub height: f64,
    /// Rotation in degrees from the rotation curve. Not applied to placement.
    pub rotation: f64,
}

impl TrackedRegion {
    /// Pixel-space rectangle for a `width` x `height` image.
    ///
    /// Each of position and size is truncated toward zero independently.
    pub fn to_pixel_rect(&self, width: u32, height: u32) -> Rect {
        let fw = f64::from(width);
        let fh = f64::from(height);
        let x = (self.left * fw).trunc();
        let y = (self.top * fh).trunc();
        let w = (self.width * fw).trunc();
        let h = (self.height * fh).trunc();
        Rect::new(x, y, x + w, y + h)
    }
}

/// Something that yields at most one region per frame and can be reconfigured
/// from a JSON document.
///
/// Implementations are shared across render workers, so `region_at` must be
/// callable concurrently with itself and with `configure`.
pub trait RegionSource: Send + Sync {
    /// Region for `frame`, or `None` when there is nothing to show.
    fn region_at(&self, frame: FrameIndex) -> Option<TrackedRegion>;

    /// Apply a configuration document.
    fn configure(&self, doc: &serde_json::Value) -> TrackerResult<()>;
}
