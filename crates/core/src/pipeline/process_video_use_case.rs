use std::path::Path;

use serde_json::Value;

use crate::pipeline::compose_overlay_use_case::ComposeOverlayUseCase;
use crate::pipeline::infrastructure::threaded_render_submitter::{
    RenderHandle, ThreadedRenderSubmitter,
};
use crate::pipeline::render_engine::{ProcessError, RenderEngine};

/// Full request: raw detections and an input path in, output path out.
///
/// Composition runs synchronously on the caller's thread; rendering is
/// handed to the submitter and reported through the returned handle.
/// Single-use: the engine is consumed by the first `execute` that gets
/// past composition.
pub struct ProcessVideoUseCase {
    compose: ComposeOverlayUseCase,
    engine: Option<Box<dyn RenderEngine>>,
    submitter: ThreadedRenderSubmitter,
}

impl ProcessVideoUseCase {
    pub fn new(compose: ComposeOverlayUseCase, engine: Box<dyn RenderEngine>) -> Self {
        Self {
            compose,
            engine: Some(engine),
            submitter: ThreadedRenderSubmitter::new(),
        }
    }

    pub fn execute(
        &mut self,
        entries: &[Value],
        input: &Path,
        output: &Path,
    ) -> Result<RenderHandle, ProcessError> {
        if self.engine.is_none() {
            return Err(ProcessError::AlreadyExecuted);
        }
        let request = self.compose.execute(entries)?;
        let engine = self.engine.take().ok_or(ProcessError::AlreadyExecuted)?;
        Ok(self
            .submitter
            .submit(engine, request, input.to_path_buf(), output.to_path_buf()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::composition_request::OverlayComposition;
    use crate::overlay::infrastructure::emoji_asset_generator::EmojiAssetGenerator;
    use crate::pipeline::compose_overlay_use_case::ComposeError;
    use crate::pipeline::render_engine::RenderOutcome;
    use crate::shared::overlay_config::OverlayConfig;
    use serde_json::json;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct CountingEngine {
        tracks: Arc<Mutex<Vec<usize>>>,
        fail: bool,
    }

    impl RenderEngine for CountingEngine {
        fn render(
            &mut self,
            composition: &OverlayComposition,
            _input: &Path,
            _output: &Path,
        ) -> Result<(), Box<dyn std::error::Error>> {
            self.tracks.lock().unwrap().push(composition.track_count());
            if self.fail {
                return Err("out of memory".into());
            }
            Ok(())
        }
    }

    fn use_case(config: OverlayConfig, fail: bool) -> (ProcessVideoUseCase, Arc<Mutex<Vec<usize>>>) {
        let tracks = Arc::new(Mutex::new(Vec::new()));
        let compose = ComposeOverlayUseCase::new(
            config,
            Box::new(EmojiAssetGenerator::default()),
            None,
        );
        let engine = CountingEngine {
            tracks: tracks.clone(),
            fail,
        };
        (ProcessVideoUseCase::new(compose, Box::new(engine)), tracks)
    }

    fn face(x: f64, start: i64) -> Value {
        json!({
            "x": x, "y": 0.2, "width": 0.2, "height": 0.2,
            "startTimeMs": start, "endTimeMs": start + 500
        })
    }

    #[test]
    fn test_faces_rendered_to_output() {
        let (mut uc, tracks) = use_case(OverlayConfig::default(), false);
        let handle = uc
            .execute(
                &[face(0.1, 0), face(0.6, 0)],
                Path::new("in.mp4"),
                Path::new("out.mp4"),
            )
            .unwrap();
        assert_eq!(
            handle.wait().unwrap(),
            RenderOutcome::Rendered(PathBuf::from("out.mp4"))
        );
        assert_eq!(*tracks.lock().unwrap(), vec![2]);
    }

    #[test]
    fn test_no_faces_returns_original() {
        let (mut uc, tracks) = use_case(OverlayConfig::default(), false);
        let handle = uc
            .execute(&[], Path::new("in.mp4"), Path::new("out.mp4"))
            .unwrap();
        assert_eq!(
            handle.wait().unwrap(),
            RenderOutcome::Unmodified(PathBuf::from("in.mp4"))
        );
        assert!(tracks.lock().unwrap().is_empty());
    }

    #[test]
    fn test_compose_failure_is_synchronous() {
        let config = OverlayConfig {
            asset_size_px: 0,
            ..OverlayConfig::default()
        };
        let (mut uc, tracks) = use_case(config, false);
        let result = uc.execute(&[face(0.1, 0)], Path::new("in.mp4"), Path::new("out.mp4"));
        assert!(matches!(
            result,
            Err(ProcessError::Compose(ComposeError::Config(_)))
        ));
        assert!(tracks.lock().unwrap().is_empty());
    }

    #[test]
    fn test_render_failure_is_asynchronous() {
        let (mut uc, _) = use_case(OverlayConfig::default(), true);
        let handle = uc
            .execute(&[face(0.1, 0)], Path::new("in.mp4"), Path::new("out.mp4"))
            .unwrap();
        assert!(matches!(handle.wait(), Err(ProcessError::Render(_))));
    }

    #[test]
    fn test_second_execute_fails() {
        let (mut uc, _) = use_case(OverlayConfig::default(), false);
        uc.execute(&[], Path::new("a"), Path::new("b"))
            .unwrap()
            .wait()
            .unwrap();
        assert!(matches!(
            uc.execute(&[], Path::new("a"), Path::new("b")),
            Err(ProcessError::AlreadyExecuted)
        ));
    }

    #[test]
    fn test_compose_failure_does_not_consume_engine() {
        let config = OverlayConfig {
            asset_size_px: 0,
            ..OverlayConfig::default()
        };
        let (mut uc, _) = use_case(config, false);
        for _ in 0..2 {
            let result = uc.execute(&[face(0.1, 0)], Path::new("in.mp4"), Path::new("out.mp4"));
            assert!(matches!(
                result,
                Err(ProcessError::Compose(ComposeError::Config(_)))
            ));
        }
    }
}
