use image::{Rgba, RgbaImage};

use crate::shared::constants::SUPERSAMPLE;

/// Fraction of pixel `(px, py)` inside a shape, on a fixed sample grid.
pub(crate) fn coverage(px: u32, py: u32, inside: &impl Fn(f32, f32) -> bool) -> f32 {
    let n = SUPERSAMPLE;
    let step = 1.0 / n as f32;
    let mut hits = 0u32;
    for sy in 0..n {
        for sx in 0..n {
            let x = px as f32 + (sx as f32 + 0.5) * step;
            let y = py as f32 + (sy as f32 + 0.5) * step;
            if inside(x, y) {
                hits += 1;
            }
        }
    }
    hits as f32 / (n * n) as f32
}

/// Fills a shape, limited to the pixel rows/columns that can touch
/// `bounds = (x0, y0, x1, y1)`.
pub(crate) fn fill(
    image: &mut RgbaImage,
    bounds: (f32, f32, f32, f32),
    color: [u8; 4],
    inside: impl Fn(f32, f32) -> bool,
) {
    let (x0, y0, x1, y1) = bounds;
    let col_start = x0.floor().max(0.0) as u32;
    let row_start = y0.floor().max(0.0) as u32;
    let col_end = (x1.ceil().max(0.0) as u32).min(image.width());
    let row_end = (y1.ceil().max(0.0) as u32).min(image.height());

    for py in row_start..row_end {
        for px in col_start..col_end {
            let c = coverage(px, py, &inside);
            if c > 0.0 {
                blend_over(image.get_pixel_mut(px, py), color, c);
            }
        }
    }
}

pub(crate) fn fill_disc(image: &mut RgbaImage, cx: f32, cy: f32, r: f32, color: [u8; 4]) {
    let r_sq = r * r;
    fill(image, (cx - r, cy - r, cx + r, cy + r), color, |x, y| {
        let (dx, dy) = (x - cx, y - cy);
        dx * dx + dy * dy <= r_sq
    });
}

/// Source-over compositing in straight alpha. `weight` scales the source
/// alpha (coverage or opacity).
pub(crate) fn blend_over(dst: &mut Rgba<u8>, src: [u8; 4], weight: f32) {
    let sa = src[3] as f32 / 255.0 * weight.clamp(0.0, 1.0);
    if sa <= 0.0 {
        return;
    }
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

    let mut out = [0u8; 4];
    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        out[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    *dst = Rgba(out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_coverage_full_and_empty() {
        assert_relative_eq!(coverage(0, 0, &|_, _| true), 1.0);
        assert_relative_eq!(coverage(0, 0, &|_, _| false), 0.0);
    }

    #[test]
    fn test_coverage_half_pixel() {
        assert_relative_eq!(coverage(3, 0, &|x, _| x < 3.5), 0.5);
    }

    #[test]
    fn test_blend_opaque_source_replaces() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend_over(&mut dst, [200, 100, 50, 255], 1.0);
        assert_eq!(dst, Rgba([200, 100, 50, 255]));
    }

    #[test]
    fn test_blend_zero_weight_is_noop() {
        let mut dst = Rgba([10, 20, 30, 255]);
        blend_over(&mut dst, [200, 100, 50, 255], 0.0);
        assert_eq!(dst, Rgba([10, 20, 30, 255]));
    }

    #[test]
    fn test_blend_half_over_opaque() {
        let mut dst = Rgba([0, 0, 0, 255]);
        blend_over(&mut dst, [255, 255, 255, 255], 0.5);
        assert_eq!(dst[3], 255);
        assert!((127..=128).contains(&dst[0]));
    }

    #[test]
    fn test_blend_onto_transparent_keeps_source_color() {
        let mut dst = Rgba([0, 0, 0, 0]);
        blend_over(&mut dst, [255, 0, 0, 255], 0.25);
        assert_eq!(dst[0], 255);
        assert!((63..=64).contains(&dst[3]));
    }

    #[test]
    fn test_fill_disc_clips_to_image() {
        let mut image = RgbaImage::new(10, 10);
        fill_disc(&mut image, 0.0, 0.0, 5.0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 0)[3], 255);
        assert_eq!(image.get_pixel(9, 9)[3], 0);
    }
}
