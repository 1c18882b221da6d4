use std::path::Path;

use image::DynamicImage;

use crate::overlay::domain::composition_request::OverlayComposition;
use crate::overlay::domain::overlay_compositor::OverlayCompositor;
use crate::overlay::infrastructure::cpu_overlay_compositor::CpuOverlayCompositor;
use crate::pipeline::render_engine::RenderEngine;

/// Render engine for a single still frame.
///
/// Treats the input as an image captured at `at_ms`, composites the
/// overlays visible at that instant and writes the result with the `image`
/// crate. Useful for previewing a placement plan without a video engine.
pub struct StillFrameRenderEngine {
    at_ms: i64,
    compositor: Box<dyn OverlayCompositor>,
}

impl StillFrameRenderEngine {
    pub fn new(at_ms: i64, compositor: Box<dyn OverlayCompositor>) -> Self {
        Self { at_ms, compositor }
    }

    pub fn at(at_ms: i64) -> Self {
        Self::new(at_ms, Box::new(CpuOverlayCompositor::new()))
    }
}

impl RenderEngine for StillFrameRenderEngine {
    fn render(
        &mut self,
        composition: &OverlayComposition,
        input: &Path,
        output: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let mut frame = image::open(input)?.to_rgba8();
        let placements = composition.placements_at(self.at_ms);
        self.compositor
            .composite(&mut frame, composition.asset(), &placements)?;

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        DynamicImage::ImageRgba8(frame).to_rgb8().save(output)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::domain::composition_request::{
        CompositionRequest, CompositionRequestBuilder,
    };
    use crate::overlay::domain::overlay_asset::OverlayAsset;
    use crate::shared::detection::Detection;
    use crate::shared::track::Track;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};

    const GREEN: [u8; 4] = [0, 255, 0, 255];

    fn composition() -> OverlayComposition {
        // Face box centered in frame, 0.1 wide: overlay diameter 0.2 * 100 = 20 px.
        let track = Track::from(vec![
            Detection::new(0.45, 0.45, 0.1, 0.1, 1000, 2000).unwrap()
        ]);
        let asset = OverlayAsset::new(RgbaImage::from_pixel(20, 20, Rgba(GREEN)));
        match CompositionRequestBuilder::default().build(vec![track], asset) {
            CompositionRequest::Overlay(c) => c,
            CompositionRequest::PassThrough => unreachable!(),
        }
    }

    fn write_input(dir: &Path) -> std::path::PathBuf {
        let path = dir.join("frame.png");
        RgbImage::from_pixel(100, 100, Rgb([10, 10, 10]))
            .save(&path)
            .unwrap();
        path
    }

    #[test]
    fn test_renders_visible_overlay() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("nested").join("out.png");

        StillFrameRenderEngine::at(1500)
            .render(&composition(), &input, &output)
            .unwrap();

        let img = image::open(&output).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (100, 100));
        assert_eq!(img.get_pixel(50, 50).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(5, 5).0, [10, 10, 10]);
    }

    #[test]
    fn test_hidden_at_other_times() {
        let dir = tempfile::tempdir().unwrap();
        let input = write_input(dir.path());
        let output = dir.path().join("out.png");

        StillFrameRenderEngine::at(2500)
            .render(&composition(), &input, &output)
            .unwrap();

        let img = image::open(&output).unwrap().to_rgb8();
        assert_eq!(img.get_pixel(50, 50).0, [10, 10, 10]);
    }

    #[test]
    fn test_missing_input_returns_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = StillFrameRenderEngine::at(0).render(
            &composition(),
            &dir.path().join("missing.png"),
            &dir.path().join("out.png"),
        );
        assert!(result.is_err());
    }
}
