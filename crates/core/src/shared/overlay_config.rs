use thiserror::Error;

use crate::shared::constants::{
    BACKDROP_RGBA, DEFAULT_ASSET_SIZE_PX, DEFAULT_COVERAGE_FACTOR, DEFAULT_GLYPH_SCALE,
};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("asset size must be positive, got {0}")]
    AssetSize(u32),
    #[error("glyph scale must be in (0, 1], got {0}")]
    GlyphScale(f32),
    #[error("coverage factor must be finite and positive, got {0}")]
    CoverageFactor(f32),
}

/// Tunable overlay policy for one processing request.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayConfig {
    pub asset_size_px: u32,
    pub glyph_scale: f32,
    pub coverage_factor: f32,
    pub backdrop: [u8; 4],
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            asset_size_px: DEFAULT_ASSET_SIZE_PX,
            glyph_scale: DEFAULT_GLYPH_SCALE,
            coverage_factor: DEFAULT_COVERAGE_FACTOR,
            backdrop: BACKDROP_RGBA,
        }
    }
}

impl OverlayConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.asset_size_px == 0 {
            return Err(ConfigError::AssetSize(self.asset_size_px));
        }
        if !(self.glyph_scale > 0.0 && self.glyph_scale <= 1.0) {
            return Err(ConfigError::GlyphScale(self.glyph_scale));
        }
        if !self.coverage_factor.is_finite() || self.coverage_factor <= 0.0 {
            return Err(ConfigError::CoverageFactor(self.coverage_factor));
        }
        Ok(())
    }
}
