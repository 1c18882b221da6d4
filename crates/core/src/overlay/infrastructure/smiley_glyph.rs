use image::RgbaImage;

use crate::overlay::domain::glyph::Glyph;

use super::raster::{fill, fill_disc};

const FACE_RGBA: [u8; 4] = [255, 204, 77, 255];
const FEATURE_RGBA: [u8; 4] = [92, 58, 18, 255];

/// Left side bearing, as a fraction of the em.
const BEARING: f32 = 0.1;
/// Space below the ink, as a fraction of the em (like a font descender).
const DESCENT: f32 = 0.25;

/// A smiling face drawn from primitives, laid out in a font-like box:
/// bearing on the left and descender space below the ink.
pub struct SmileyGlyph;

impl SmileyGlyph {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SmileyGlyph {
    fn default() -> Self {
        Self::new()
    }
}

impl Glyph for SmileyGlyph {
    fn render(&self, em_px: u32) -> RgbaImage {
        let em = em_px.max(1) as f32;
        let box_w = (em * (1.0 + BEARING)).ceil() as u32;
        let box_h = (em * (1.0 + DESCENT)).ceil() as u32;
        let mut layer = RgbaImage::new(box_w, box_h);

        let cx = em * BEARING + em / 2.0;
        let cy = em / 2.0;
        let r = em / 2.0;

        fill_disc(&mut layer, cx, cy, r, FACE_RGBA);
        draw_outline(&mut layer, cx, cy, r, em * 0.04);
        draw_eye(&mut layer, cx - em * 0.17, cy - em * 0.1, em);
        draw_eye(&mut layer, cx + em * 0.17, cy - em * 0.1, em);
        draw_smile(&mut layer, cx, cy, em);

        layer
    }
}

fn draw_outline(layer: &mut RgbaImage, cx: f32, cy: f32, r: f32, thickness: f32) {
    let outer_sq = r * r;
    let inner = r - thickness;
    let inner_sq = inner * inner;
    fill(layer, (cx - r, cy - r, cx + r, cy + r), FEATURE_RGBA, |x, y| {
        let d_sq = (x - cx).powi(2) + (y - cy).powi(2);
        d_sq <= outer_sq && d_sq >= inner_sq
    });
}

fn draw_eye(layer: &mut RgbaImage, ex: f32, ey: f32, em: f32) {
    let (rx, ry) = (em * 0.06, em * 0.1);
    fill(layer, (ex - rx, ey - ry, ex + rx, ey + ry), FEATURE_RGBA, |x, y| {
        let (dx, dy) = ((x - ex) / rx, (y - ey) / ry);
        dx * dx + dy * dy <= 1.0
    });
}

/// Lower arc of a ring centered slightly above the face center.
fn draw_smile(layer: &mut RgbaImage, cx: f32, cy: f32, em: f32) {
    let sy = cy - em * 0.02;
    let radius = em * 0.28;
    let half = em * 0.035;
    let (outer_sq, inner_sq) = ((radius + half).powi(2), (radius - half).powi(2));
    let min_dy = em * 0.08;
    let reach = radius + half;
    fill(
        layer,
        (cx - reach, sy, cx + reach, sy + reach),
        FEATURE_RGBA,
        |x, y| {
            let dy = y - sy;
            let d_sq = (x - cx).powi(2) + dy * dy;
            dy >= min_dy && d_sq <= outer_sq && d_sq >= inner_sq
        },
    );
}
