pub mod compose_overlay_use_case;
pub mod infrastructure;
pub mod pipeline_observer;
pub mod process_video_use_case;
pub mod render_engine;
