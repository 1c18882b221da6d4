use image::RgbaImage;

/// A symbol drawn at the center of the overlay.
///
/// Like a font glyph, the rendered box may contain bearing space around the
/// ink, so placement must go by [`ink_bounds`] rather than the box itself.
pub trait Glyph: Send {
    /// Renders the glyph for a nominal em height in pixels.
    fn render(&self, em_px: u32) -> RgbaImage;
}

/// Tight bounding box of non-transparent pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InkBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

pub fn ink_bounds(layer: &RgbaImage) -> Option<InkBounds> {
    let mut min_x = u32::MAX;
    let mut min_y = u32::MAX;
    let mut max_x = 0u32;
    let mut max_y = 0u32;
    let mut found = false;

    for (x, y, pixel) in layer.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        found = true;
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }

    found.then(|| InkBounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}
