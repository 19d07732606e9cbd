use image::{Pixel as _, Rgba, RgbaImage};

use crate::{effect::region::TrackedRegion, foundation::error::TrackerResult};

/// Draws a [`TrackedRegion`] onto an image.
pub trait Renderer {
    /// Draw `region` (fractional coordinates) onto `image`.
    fn draw_region(&mut self, region: &TrackedRegion, image: &mut RgbaImage) -> TrackerResult<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Axis-aligned box outline, alpha-blended over the image.
pub struct OutlineRenderer {
    /// Stroke color (straight alpha).
    pub color: [u8; 4],
    /// Stroke width in pixels, drawn inside the box.
    pub thickness: u32,
}

impl Default for OutlineRenderer {
    fn default() -> Self {
        Self {
            color: [0, 0, 255, 255],
            thickness: 2,
        }
    }
}

impl Renderer for OutlineRenderer {
    fn draw_region(&mut self, region: &TrackedRegion, image: &mut RgbaImage) -> TrackerResult<()> {
        let (w, h) = image.dimensions();
        let rect = region.to_pixel_rect(w, h).abs();
        if rect.area() <= 0.0 || self.thickness == 0 {
            return Ok(());
        }

        // Integer box [x0, x1) x [y0, y1), may extend past the image.
        let x0 = rect.x0 as i64;
        let y0 = rect.y0 as i64;
        let x1 = rect.x1 as i64;
        let y1 = rect.y1 as i64;
        let t = i64::from(self.thickness);

        let cx0 = x0.max(0);
        let cy0 = y0.max(0);
        let cx1 = x1.min(i64::from(w));
        let cy1 = y1.min(i64::from(h));
        if cx0 >= cx1 || cy0 >= cy1 {
            return Ok(());
        }

        let stroke = Rgba(self.color);
        for y in cy0..cy1 {
            let edge_row = y < y0 + t || y >= y1 - t;
            for x in cx0..cx1 {
                if edge_row || x < x0 + t || x >= x1 - t {
                    let px = image.get_pixel_mut(x as u32, y as u32);
                    let alpha = px.0[3];
                    px.blend(&stroke);
                    // Never less opaque than the frame underneath.
                    px.0[3] = px.0[3].max(alpha);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/outline.rs"]
mod tests;
