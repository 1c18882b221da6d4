use std::borrow::Cow;

use image::imageops::{self, FilterType};
use image::RgbaImage;

use crate::overlay::domain::overlay_asset::OverlayAsset;
use crate::overlay::domain::overlay_compositor::OverlayCompositor;
use crate::shared::placement::Placement;

use super::raster::blend_over;

/// Reference compositor that alpha-blends overlays on the CPU.
///
/// A placement's anchor maps to the pixel `((ax + 1) / 2 * W, (1 - ay) / 2 * H)`
/// and its diameter is `scale * max(W, H)`. Overlays hanging past an edge
/// are clipped by the frame, never moved inward.
///
/// Overlays up to the frame's longer side are resized with a triangle
/// filter. Larger ones are sampled nearest-neighbour over their visible
/// pixels only, so an oversized placement never allocates more than the
/// frame.
pub struct CpuOverlayCompositor {
    filter: FilterType,
}

/// Frame pixels covered by an overlay, half-open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Visible {
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
}

impl CpuOverlayCompositor {
    pub fn new() -> Self {
        Self {
            filter: FilterType::Triangle,
        }
    }
}

impl Default for CpuOverlayCompositor {
    fn default() -> Self {
        Self::new()
    }
}

impl OverlayCompositor for CpuOverlayCompositor {
    fn composite(
        &self,
        frame: &mut RgbaImage,
        asset: &OverlayAsset,
        placements: &[Placement],
    ) -> Result<(), Box<dyn std::error::Error>> {
        let fw = frame.width() as f64;
        let fh = frame.height() as f64;
        let long_side = fw.max(fh);

        for p in placements.iter().filter(|p| p.is_visible()) {
            let diameter = (p.scale as f64 * long_side).round();
            if !diameter.is_finite() || diameter < 1.0 {
                continue;
            }

            let center_x = (p.anchor_x as f64 + 1.0) / 2.0 * fw;
            let center_y = (1.0 - p.anchor_y as f64) / 2.0 * fh;
            let left = (center_x - diameter / 2.0).round();
            let top = (center_y - diameter / 2.0).round();

            let Some(visible) = visible_rect(left, top, diameter, fw, fh) else {
                continue;
            };

            if diameter <= long_side {
                let size = diameter as u32;
                let scaled = if size == asset.width() && size == asset.height() {
                    Cow::Borrowed(asset.image())
                } else {
                    Cow::Owned(imageops::resize(asset.image(), size, size, self.filter))
                };
                blit(frame, &scaled, left as i64, top as i64, p.opacity);
            } else {
                blit_sampled(frame, asset.image(), left, top, diameter, visible, p.opacity);
            }
        }

        Ok(())
    }
}

fn visible_rect(left: f64, top: f64, diameter: f64, fw: f64, fh: f64) -> Option<Visible> {
    let x0 = left.max(0.0);
    let y0 = top.max(0.0);
    let x1 = (left + diameter).min(fw);
    let y1 = (top + diameter).min(fh);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(Visible {
        x0: x0 as u32,
        y0: y0 as u32,
        x1: x1 as u32,
        y1: y1 as u32,
    })
}

fn blit(frame: &mut RgbaImage, overlay: &RgbaImage, left: i64, top: i64, opacity: f32) {
    let fw = frame.width() as i64;
    let fh = frame.height() as i64;
    let ow = overlay.width() as i64;
    let oh = overlay.height() as i64;

    let x_start = left.max(0);
    let y_start = top.max(0);
    let x_end = (left + ow).min(fw);
    let y_end = (top + oh).min(fh);

    for y in y_start..y_end {
        for x in x_start..x_end {
            let src = overlay.get_pixel((x - left) as u32, (y - top) as u32).0;
            if src[3] == 0 {
                continue;
            }
            blend_over(frame.get_pixel_mut(x as u32, y as u32), src, opacity);
        }
    }
}

fn blit_sampled(
    frame: &mut RgbaImage,
    asset: &RgbaImage,
    left: f64,
    top: f64,
    diameter: f64,
    visible: Visible,
    opacity: f32,
) {
    let (aw, ah) = asset.dimensions();
    if aw == 0 || ah == 0 {
        return;
    }
    let texel = |offset: f64, len: u32| ((offset / diameter * len as f64) as u32).min(len - 1);

    for y in visible.y0..visible.y1 {
        let ay = texel(y as f64 + 0.5 - top, ah);
        for x in visible.x0..visible.x1 {
            let ax = texel(x as f64 + 0.5 - left, aw);
            let src = asset.get_pixel(ax, ay).0;
            if src[3] == 0 {
                continue;
            }
            blend_over(frame.get_pixel_mut(x, y), src, opacity);
        }
    }
}
