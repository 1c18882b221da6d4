use crate::overlay::domain::overlay_asset::OverlayAsset;
use crate::overlay::domain::placement_resolver::TrackPlacement;
use crate::shared::constants::DEFAULT_COVERAGE_FACTOR;
use crate::shared::placement::Placement;
use crate::shared::track::Track;

/// One overlay slot bound to the shared asset.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackOverlay {
    asset: OverlayAsset,
    placement: TrackPlacement,
}

impl TrackOverlay {
    pub fn asset(&self) -> &OverlayAsset {
        &self.asset
    }

    pub fn placement(&self) -> &TrackPlacement {
        &self.placement
    }

    pub fn placement_at(&self, time_ms: i64) -> Placement {
        self.placement.placement_at(time_ms)
    }
}

/// The shared asset plus one overlay per track, in track order.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayComposition {
    asset: OverlayAsset,
    overlays: Vec<TrackOverlay>,
}

impl OverlayComposition {
    pub fn asset(&self) -> &OverlayAsset {
        &self.asset
    }

    pub fn overlays(&self) -> &[TrackOverlay] {
        &self.overlays
    }

    pub fn track_count(&self) -> usize {
        self.overlays.len()
    }

    /// Exactly one placement per track, hidden ones included.
    pub fn placements_at(&self, time_ms: i64) -> Vec<Placement> {
        self.overlays.iter().map(|o| o.placement_at(time_ms)).collect()
    }

    pub fn placements_at_us(&self, time_us: i64) -> Vec<Placement> {
        self.overlays
            .iter()
            .map(|o| o.placement.placement_at_us(time_us))
            .collect()
    }
}

/// What the rendering engine should do with the input media.
#[derive(Clone, Debug, PartialEq)]
pub enum CompositionRequest {
    /// No faces to cover: use the original media unmodified.
    PassThrough,
    Overlay(OverlayComposition),
}

impl CompositionRequest {
    pub fn is_pass_through(&self) -> bool {
        matches!(self, CompositionRequest::PassThrough)
    }

    pub fn track_count(&self) -> usize {
        match self {
            CompositionRequest::PassThrough => 0,
            CompositionRequest::Overlay(c) => c.track_count(),
        }
    }
}

/// Binds every track to a placement resolver sharing one asset.
pub struct CompositionRequestBuilder {
    coverage_factor: f32,
}

impl CompositionRequestBuilder {
    pub fn new(coverage_factor: f32) -> Self {
        Self { coverage_factor }
    }

    pub fn build(&self, tracks: Vec<Track>, asset: OverlayAsset) -> CompositionRequest {
        if tracks.is_empty() {
            return CompositionRequest::PassThrough;
        }

        let overlays = tracks
            .into_iter()
            .map(|track| TrackOverlay {
                asset: asset.clone(),
                placement: TrackPlacement::with_coverage_factor(track, self.coverage_factor),
            })
            .collect();

        CompositionRequest::Overlay(OverlayComposition { asset, overlays })
    }
}

impl Default for CompositionRequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_COVERAGE_FACTOR)
    }
}
