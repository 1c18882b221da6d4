pub mod still_frame_renderer;
