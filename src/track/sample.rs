#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tracked rectangle in fractional frame coordinates.
///
/// `left`/`top` locate the top-left corner. Values are nominally in `[0, 1]`
/// but nothing enforces that range.
pub struct BoundingBoxSample {
    /// Horizontal position of the left edge.
    pub left: f64,
    /// Vertical position of the top edge.
    pub top: f64,
    /// Width as a fraction of frame width.
    pub width: f64,
    /// Height as a fraction of frame height.
    pub height: f64,
}

impl BoundingBoxSample {
    /// Sample from top-left position and size.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Sample spanning two opposite corners `(x1, y1)` and `(x2, y2)`.
    pub fn from_corners(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    /// `true` when no component is negative (NaN counts as negative).
    pub fn is_non_negative(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| *v >= 0.0)
    }
}
