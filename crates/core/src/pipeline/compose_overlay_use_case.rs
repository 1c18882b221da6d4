use serde_json::Value;
use thiserror::Error;

use crate::detection::domain::track_assigner::TrackAssigner;
use crate::detection::infrastructure::raw_detection_parser::{
    parse_document, parse_entries, DocumentError,
};
use crate::overlay::domain::composition_request::{CompositionRequest, CompositionRequestBuilder};
use crate::overlay::domain::overlay_asset::{AssetError, OverlayAssetGenerator};
use crate::pipeline::pipeline_observer::{NullPipelineObserver, PipelineObserver};
use crate::shared::detection::Detection;
use crate::shared::overlay_config::{ConfigError, OverlayConfig};
use crate::shared::track::Track;

/// Request-level failures of the composition stage.
#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("invalid overlay configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Document(#[from] DocumentError),
}

/// Blocking, side-effect-free core: raw detections in, composition out.
///
/// Parse → assign tracks → generate the shared asset → bind placements.
/// Malformed entries are dropped individually; an empty result yields
/// [`CompositionRequest::PassThrough`].
pub struct ComposeOverlayUseCase {
    config: OverlayConfig,
    assigner: TrackAssigner,
    generator: Box<dyn OverlayAssetGenerator>,
    builder: CompositionRequestBuilder,
    observer: Box<dyn PipelineObserver>,
}

impl ComposeOverlayUseCase {
    pub fn new(
        config: OverlayConfig,
        generator: Box<dyn OverlayAssetGenerator>,
        observer: Option<Box<dyn PipelineObserver>>,
    ) -> Self {
        let builder = CompositionRequestBuilder::new(config.coverage_factor);
        Self {
            config,
            assigner: TrackAssigner::new(),
            generator,
            builder,
            observer: observer.unwrap_or_else(|| Box::new(NullPipelineObserver)),
        }
    }

    pub fn execute_document(&mut self, text: &str) -> Result<CompositionRequest, ComposeError> {
        self.config.validate()?;
        let entries = parse_document(text)?;
        self.execute(&entries)
    }

    pub fn execute(&mut self, entries: &[Value]) -> Result<CompositionRequest, ComposeError> {
        self.config.validate()?;
        let detections = parse_entries(entries);
        self.observer
            .detections_parsed(detections.len(), entries.len());
        self.compose(&detections)
    }

    pub fn execute_detections(
        &mut self,
        detections: &[Detection],
    ) -> Result<CompositionRequest, ComposeError> {
        self.config.validate()?;
        self.observer
            .detections_parsed(detections.len(), detections.len());
        self.compose(detections)
    }

    fn compose(&mut self, detections: &[Detection]) -> Result<CompositionRequest, ComposeError> {
        let tracks = self.assigner.assign(detections);
        let sizes: Vec<usize> = tracks.iter().map(Track::len).collect();
        self.observer.tracks_assigned(&sizes);

        let asset = self.generator.generate(self.config.asset_size_px)?;
        self.observer.asset_generated(asset.width(), asset.height());

        let request = self.builder.build(tracks, asset);
        if request.is_pass_through() {
            self.observer
                .info("No valid faces, original media will be used unmodified");
        }
        self.observer.summary();
        Ok(request)
    }
}
