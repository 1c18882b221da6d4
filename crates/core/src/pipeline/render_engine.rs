use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::overlay::domain::composition_request::OverlayComposition;
use crate::pipeline::compose_overlay_use_case::ComposeError;

/// External video engine that decodes, composites and encodes.
///
/// This is a port: the engine owns pixel work and file I/O, the core only
/// tells it what to draw where.
pub trait RenderEngine: Send {
    fn render(
        &mut self,
        composition: &OverlayComposition,
        input: &Path,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Where the finished media lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Nothing to cover; the input path is handed back untouched.
    Unmodified(PathBuf),
    Rendered(PathBuf),
}

impl RenderOutcome {
    pub fn path(&self) -> &Path {
        match self {
            RenderOutcome::Unmodified(p) | RenderOutcome::Rendered(p) => p,
        }
    }
}

/// Failure of a whole processing request, tagged with the stage that failed.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("composition failed: {0}")]
    Compose(#[from] ComposeError),
    #[error("render failed: {0}")]
    Render(String),
    #[error("render task ended without reporting a result")]
    Disconnected,
    #[error("pipeline already executed")]
    AlreadyExecuted,
}
