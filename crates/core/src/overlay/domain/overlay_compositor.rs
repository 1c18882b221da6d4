use image::RgbaImage;

use crate::overlay::domain::overlay_asset::OverlayAsset;
use crate::shared::placement::Placement;

/// Draws overlay instances onto a frame in place.
pub trait OverlayCompositor: Send {
    fn composite(
        &self,
        frame: &mut RgbaImage,
        asset: &OverlayAsset,
        placements: &[Placement],
    ) -> Result<(), Box<dyn std::error::Error>>;
}
