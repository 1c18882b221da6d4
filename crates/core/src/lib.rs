//! Emoji overlays for faces in video.
//!
//! Groups per-timestamp face detections into overlay tracks, resolves where
//! each track's overlay sits at any presentation time, and generates the
//! overlay raster. Decoding, compositing and encoding belong to an external
//! [`pipeline::render_engine::RenderEngine`].

pub mod detection;
pub mod overlay;
pub mod pipeline;
pub mod shared;
pub mod video;
