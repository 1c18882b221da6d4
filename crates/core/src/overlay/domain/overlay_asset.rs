use std::sync::Arc;

use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    #[error("overlay asset size must be positive, got {0}")]
    InvalidSize(u32),
}

/// Square RGBA raster drawn for every overlay instance.
///
/// Shared read-only across all tracks; cloning only bumps a refcount.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayAsset {
    image: Arc<RgbaImage>,
}

impl OverlayAsset {
    pub fn new(image: RgbaImage) -> Self {
        Self {
            image: Arc::new(image),
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Produces the overlay raster for a requested edge length.
pub trait OverlayAssetGenerator: Send {
    fn generate(&self, size_px: u32) -> Result<OverlayAsset, AssetError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clone_shares_pixels() {
        let asset = OverlayAsset::new(RgbaImage::new(4, 4));
        let cloned = asset.clone();
        assert!(std::ptr::eq(asset.image(), cloned.image()));
        assert_eq!(cloned.width(), 4);
        assert_eq!(cloned.height(), 4);
    }
}
