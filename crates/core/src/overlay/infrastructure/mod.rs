pub mod cpu_overlay_compositor;
pub mod emoji_asset_generator;
mod raster;
pub mod smiley_glyph;
