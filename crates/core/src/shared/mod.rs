pub mod constants;
pub mod detection;
pub mod overlay_config;
pub mod placement;
pub mod track;
