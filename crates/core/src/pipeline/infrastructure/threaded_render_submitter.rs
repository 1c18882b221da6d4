use std::path::PathBuf;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, TryRecvError};

use crate::overlay::domain::composition_request::CompositionRequest;
use crate::pipeline::render_engine::{ProcessError, RenderEngine, RenderOutcome};

type RenderResult = Result<RenderOutcome, ProcessError>;

/// Runs the render engine off the caller's thread and reports completion
/// through a channel.
///
/// A pass-through request resolves immediately without touching the engine.
pub struct ThreadedRenderSubmitter;

impl ThreadedRenderSubmitter {
    pub fn new() -> Self {
        Self
    }

    pub fn submit(
        &self,
        mut engine: Box<dyn RenderEngine>,
        request: CompositionRequest,
        input: PathBuf,
        output: PathBuf,
    ) -> RenderHandle {
        let (tx, rx) = crossbeam_channel::bounded::<RenderResult>(1);

        let composition = match request {
            CompositionRequest::PassThrough => {
                // Capacity 1 and a live receiver: this cannot fail.
                let _ = tx.send(Ok(RenderOutcome::Unmodified(input)));
                return RenderHandle { rx, worker: None };
            }
            CompositionRequest::Overlay(composition) => composition,
        };

        let worker = std::thread::spawn(move || {
            log::info!(
                "Rendering {} overlay track(s): {} -> {}",
                composition.track_count(),
                input.display(),
                output.display()
            );
            let result = engine
                .render(&composition, &input, &output)
                .map(|()| RenderOutcome::Rendered(output))
                .map_err(|e| {
                    log::error!("Render failed: {e}");
                    ProcessError::Render(e.to_string())
                });
            let _ = tx.send(result);
        });

        RenderHandle {
            rx,
            worker: Some(worker),
        }
    }
}

impl Default for ThreadedRenderSubmitter {
    fn default() -> Self {
        Self::new()
    }
}

/// Completion handle for one submitted request. The result is delivered
/// once: after `try_outcome` returns it, `wait` reports `Disconnected`.
pub struct RenderHandle {
    rx: Receiver<RenderResult>,
    worker: Option<JoinHandle<()>>,
}

impl RenderHandle {
    /// Blocks until the engine reports.
    pub fn wait(mut self) -> RenderResult {
        let result = self.rx.recv().unwrap_or(Err(ProcessError::Disconnected));
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                return Err(ProcessError::Disconnected);
            }
        }
        result
    }

    /// Non-blocking poll; `None` while the render is still running.
    pub fn try_outcome(&self) -> Option<RenderResult> {
        match self.rx.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ProcessError::Disconnected)),
        }
    }

    /// Channel-level access for callers that select over several handles.
    pub fn receiver(&self) -> &Receiver<RenderResult> {
        &self.rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::composition_request::{
        CompositionRequestBuilder, OverlayComposition,
    };
    use crate::overlay::domain::overlay_asset::OverlayAsset;
    use crate::shared::detection::Detection;
    use crate::shared::track::Track;
    use image::RgbaImage;
    use std::path::Path;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    // --- Stubs ---

    struct RecordingEngine {
        calls: Arc<Mutex<Vec<(usize, PathBuf, PathBuf)>>>,
    }

    impl RenderEngine for RecordingEngine {
        fn render(
            &mut self,
            composition: &OverlayComposition,
            input: &Path,
            output: &Path,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.calls.lock().unwrap().push((
                composition.track_count(),
                input.to_path_buf(),
                output.to_path_buf(),
            ));
            Ok(())
        }
    }

    struct FailingEngine;

    impl RenderEngine for FailingEngine {
        fn render(
            &mut self,
            _composition: &OverlayComposition,
            _input: &Path,
            _output: &Path,
        ) -> Result<(), Box<dyn std::error::Error>> {
            Err("encoder rejected format".into())
        }
    }

    struct PanickingEngine;

    impl RenderEngine for PanickingEngine {
        fn render(
            &mut self,
            _composition: &OverlayComposition,
            _input: &Path,
            _output: &Path,
        ) -> Result<(), Box<dyn std::error::Error>> {
            panic!("engine crashed");
        }
    }

    struct BlockingEngine {
        release: crossbeam_channel::Receiver<()>,
    }

    impl RenderEngine for BlockingEngine {
        fn render(
            &mut self,
            _composition: &OverlayComposition,
            _input: &Path,
            _output: &Path,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.release.recv()?;
            Ok(())
        }
    }

    // --- Helpers ---

    fn overlay_request(tracks: usize) -> CompositionRequest {
        let tracks = (0..tracks)
            .map(|_| {
                Track::from(vec![Detection::new(0.1, 0.1, 0.1, 0.1, 0, 100).unwrap()])
            })
            .collect();
        CompositionRequestBuilder::default().build(tracks, OverlayAsset::new(RgbaImage::new(4, 4)))
    }

    fn paths() -> (PathBuf, PathBuf) {
        (PathBuf::from("in.mp4"), PathBuf::from("out.mp4"))
    }

    // --- Tests ---

    #[test]
    fn test_pass_through_returns_input_without_engine() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: calls.clone(),
        };
        let (input, output) = paths();
        let handle = ThreadedRenderSubmitter::new().submit(
            Box::new(engine),
            CompositionRequest::PassThrough,
            input.clone(),
            output,
        );
        assert_eq!(handle.wait().unwrap(), RenderOutcome::Unmodified(input));
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_successful_render_reports_output() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let engine = RecordingEngine {
            calls: calls.clone(),
        };
        let (input, output) = paths();
        let handle = ThreadedRenderSubmitter::new().submit(
            Box::new(engine),
            overlay_request(3),
            input.clone(),
            output.clone(),
        );
        assert_eq!(
            handle.wait().unwrap(),
            RenderOutcome::Rendered(output.clone())
        );
        assert_eq!(*calls.lock().unwrap(), vec![(3, input, output)]);
    }

    #[test]
    fn test_engine_error_attributed_to_render_stage() {
        let (input, output) = paths();
        let handle = ThreadedRenderSubmitter::new().submit(
            Box::new(FailingEngine),
            overlay_request(1),
            input,
            output,
        );
        match handle.wait() {
            Err(ProcessError::Render(msg)) => assert!(msg.contains("encoder rejected")),
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[test]
    fn test_engine_panic_reports_disconnected() {
        let (input, output) = paths();
        let handle = ThreadedRenderSubmitter::new().submit(
            Box::new(PanickingEngine),
            overlay_request(1),
            input,
            output,
        );
        assert!(matches!(handle.wait(), Err(ProcessError::Disconnected)));
    }

    #[test]
    fn test_try_outcome_pending_then_ready() {
        let (release_tx, release_rx) = crossbeam_channel::bounded(1);
        let (input, output) = paths();
        let handle = ThreadedRenderSubmitter::new().submit(
            Box::new(BlockingEngine {
                release: release_rx,
            }),
            overlay_request(1),
            input,
            output.clone(),
        );
        assert!(handle.try_outcome().is_none());

        release_tx.send(()).unwrap();
        let result = handle
            .receiver()
            .recv_timeout(Duration::from_secs(5))
            .unwrap();
        assert_eq!(result.unwrap(), RenderOutcome::Rendered(output));
    }
}
