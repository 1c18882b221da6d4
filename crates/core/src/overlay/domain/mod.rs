pub mod composition_request;
pub mod glyph;
pub mod overlay_asset;
pub mod overlay_compositor;
pub mod placement_resolver;
