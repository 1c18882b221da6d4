/// Overlay raster edge length in pixels.
pub const DEFAULT_ASSET_SIZE_PX: u32 = 200;

/// Glyph height as a fraction of the asset edge length.
pub const DEFAULT_GLYPH_SCALE: f32 = 0.7;

/// Overlay scale relative to the larger face-box dimension.
pub const DEFAULT_COVERAGE_FACTOR: f32 = 2.0;

/// Supersampling grid (per axis) used for anti-aliased shape edges.
pub const SUPERSAMPLE: u32 = 4;

pub const BACKDROP_RGBA: [u8; 4] = [255, 255, 255, 255];

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];
