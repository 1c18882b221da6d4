pub mod threaded_render_submitter;
