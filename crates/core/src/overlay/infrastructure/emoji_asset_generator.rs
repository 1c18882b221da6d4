use image::RgbaImage;

use crate::overlay::domain::glyph::{ink_bounds, Glyph};
use crate::overlay::domain::overlay_asset::{AssetError, OverlayAsset, OverlayAssetGenerator};
use crate::shared::constants::{BACKDROP_RGBA, DEFAULT_GLYPH_SCALE};
use crate::shared::overlay_config::OverlayConfig;

use super::raster::{blend_over, fill_disc};
use super::smiley_glyph::SmileyGlyph;

/// Draws a filled backdrop disc inscribed in the square, then a glyph
/// centered on its ink bounds.
///
/// Output depends only on the size and the glyph, so repeated calls are
/// pixel-identical.
pub struct EmojiAssetGenerator {
    glyph: Box<dyn Glyph>,
    glyph_scale: f32,
    backdrop: [u8; 4],
}

impl EmojiAssetGenerator {
    pub fn new(glyph: Box<dyn Glyph>, glyph_scale: f32, backdrop: [u8; 4]) -> Self {
        Self {
            glyph,
            glyph_scale,
            backdrop,
        }
    }

    pub fn from_config(config: &OverlayConfig) -> Self {
        Self::new(
            Box::new(SmileyGlyph::new()),
            config.glyph_scale,
            config.backdrop,
        )
    }
}

impl Default for EmojiAssetGenerator {
    fn default() -> Self {
        Self::new(Box::new(SmileyGlyph::new()), DEFAULT_GLYPH_SCALE, BACKDROP_RGBA)
    }
}

impl OverlayAssetGenerator for EmojiAssetGenerator {
    fn generate(&self, size_px: u32) -> Result<OverlayAsset, AssetError> {
        if size_px == 0 {
            return Err(AssetError::InvalidSize(size_px));
        }

        let mut canvas = RgbaImage::new(size_px, size_px);
        let half = size_px as f32 / 2.0;
        fill_disc(&mut canvas, half, half, half, self.backdrop);

        let em_px = ((size_px as f32 * self.glyph_scale).round() as u32).max(1);
        let layer = self.glyph.render(em_px);
        if let Some(ink) = ink_bounds(&layer) {
            let offset_x = (size_px as i64 - ink.width as i64) / 2 - ink.x as i64;
            let offset_y = (size_px as i64 - ink.height as i64) / 2 - ink.y as i64;
            draw_layer(&mut canvas, &layer, offset_x, offset_y);
        }

        Ok(OverlayAsset::new(canvas))
    }
}

fn draw_layer(canvas: &mut RgbaImage, layer: &RgbaImage, offset_x: i64, offset_y: i64) {
    for (x, y, pixel) in layer.enumerate_pixels() {
        if pixel[3] == 0 {
            continue;
        }
        let cx = x as i64 + offset_x;
        let cy = y as i64 + offset_y;
        if cx < 0 || cy < 0 || cx >= canvas.width() as i64 || cy >= canvas.height() as i64 {
            continue;
        }
        blend_over(canvas.get_pixel_mut(cx as u32, cy as u32), pixel.0, 1.0);
    }
}
