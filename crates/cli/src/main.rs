use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use serde::Serialize;

use emojiveil_core::overlay::domain::composition_request::{
    CompositionRequest, OverlayComposition,
};
use emojiveil_core::overlay::domain::overlay_asset::OverlayAssetGenerator;
use emojiveil_core::overlay::infrastructure::emoji_asset_generator::EmojiAssetGenerator;
use emojiveil_core::pipeline::compose_overlay_use_case::ComposeOverlayUseCase;
use emojiveil_core::pipeline::infrastructure::threaded_render_submitter::ThreadedRenderSubmitter;
use emojiveil_core::pipeline::pipeline_observer::LogPipelineObserver;
use emojiveil_core::pipeline::render_engine::RenderOutcome;
use emojiveil_core::shared::constants::IMAGE_EXTENSIONS;
use emojiveil_core::shared::overlay_config::OverlayConfig;
use emojiveil_core::shared::placement::Placement;
use emojiveil_core::video::infrastructure::still_frame_renderer::StillFrameRenderEngine;

/// Emoji overlays over detected faces.
#[derive(Parser)]
#[command(name = "emojiveil")]
struct Cli {
    /// Face detections: a JSON array, or an object with a `faces` array.
    detections: PathBuf,

    /// Overlay asset edge length in pixels.
    #[arg(long, default_value = "200")]
    asset_size: u32,

    /// Overlay scale relative to the larger face-box side.
    #[arg(long, default_value = "2.0")]
    coverage: f32,

    /// Write the overlay asset to this PNG file.
    #[arg(long)]
    asset_out: Option<PathBuf>,

    /// Write a per-frame placement plan (JSON) to this file.
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Frame rate used for the placement plan.
    #[arg(long, default_value = "30")]
    fps: f64,

    /// Plan length in ms (default: end of the last detection).
    #[arg(long)]
    duration_ms: Option<i64>,

    /// Still frame to draw the overlays onto.
    #[arg(long)]
    frame: Option<PathBuf>,

    /// Presentation time of the still frame in ms.
    #[arg(long, default_value = "0")]
    at_ms: i64,

    /// Output image for --frame.
    #[arg(long)]
    output: Option<PathBuf>,
}

/// Upper bound on frames written to a placement plan.
const MAX_PLAN_FRAMES: usize = 10_000_000;

/// Upper bound on --fps.
const MAX_PLAN_FPS: f64 = 1000.0;

#[derive(Serialize)]
struct PlacementPlan {
    fps: f64,
    duration_ms: i64,
    track_count: usize,
    frames: Vec<PlanFrame>,
}

#[derive(Serialize)]
struct PlanFrame {
    index: usize,
    time_us: i64,
    placements: Vec<Placement>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = OverlayConfig {
        asset_size_px: cli.asset_size,
        coverage_factor: cli.coverage,
        ..OverlayConfig::default()
    };
    config.validate()?;

    let text = fs::read_to_string(&cli.detections)?;
    let mut use_case = ComposeOverlayUseCase::new(
        config.clone(),
        Box::new(EmojiAssetGenerator::from_config(&config)),
        Some(Box::new(LogPipelineObserver::new())),
    );
    let request = use_case.execute_document(&text)?;

    if let Some(path) = &cli.asset_out {
        write_asset(&config, path)?;
    }
    if let Some(path) = &cli.plan {
        write_plan(&request, cli.fps, cli.duration_ms, path)?;
    }
    if let (Some(frame), Some(output)) = (cli.frame, cli.output) {
        render_frame(request, frame, output, cli.at_ms)?;
    }

    Ok(())
}

fn write_asset(config: &OverlayConfig, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let asset = EmojiAssetGenerator::from_config(config).generate(config.asset_size_px)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    asset.image().save(path)?;
    log::info!("Overlay asset written to {}", path.display());
    Ok(())
}

fn write_plan(
    request: &CompositionRequest,
    fps: f64,
    duration_ms: Option<i64>,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let plan = match request {
        CompositionRequest::PassThrough => PlacementPlan {
            fps,
            duration_ms: duration_ms.unwrap_or(0),
            track_count: 0,
            frames: Vec::new(),
        },
        CompositionRequest::Overlay(composition) => {
            let duration_ms = duration_ms.unwrap_or_else(|| last_end_ms(composition));
            build_plan(composition, fps, duration_ms)?
        }
    };

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(file, &plan)?;
    log::info!(
        "Placement plan ({} frames) written to {}",
        plan.frames.len(),
        path.display()
    );
    Ok(())
}

fn build_plan(
    composition: &OverlayComposition,
    fps: f64,
    duration_ms: i64,
) -> Result<PlacementPlan, Box<dyn std::error::Error>> {
    let frame_count = plan_frame_count(fps, duration_ms)?;
    let frames = (0..frame_count)
        .map(|index| {
            let time_us = (index as f64 * 1_000_000.0 / fps) as i64;
            PlanFrame {
                index,
                time_us,
                placements: composition.placements_at_us(time_us),
            }
        })
        .collect();

    Ok(PlacementPlan {
        fps,
        duration_ms,
        track_count: composition.track_count(),
        frames,
    })
}

fn plan_frame_count(fps: f64, duration_ms: i64) -> Result<usize, Box<dyn std::error::Error>> {
    let frames = (duration_ms.max(0) as f64 * fps / 1000.0).floor() + 1.0;
    if !frames.is_finite() || frames > MAX_PLAN_FRAMES as f64 {
        return Err(format!(
            "Placement plan would need {frames} frames, limit is {MAX_PLAN_FRAMES}"
        )
        .into());
    }
    Ok(frames as usize)
}

fn last_end_ms(composition: &OverlayComposition) -> i64 {
    composition
        .overlays()
        .iter()
        .flat_map(|o| o.placement().track().detections())
        .map(|d| d.end_ms())
        .max()
        .unwrap_or(0)
}

fn render_frame(
    request: CompositionRequest,
    frame: PathBuf,
    output: PathBuf,
    at_ms: i64,
) -> Result<(), Box<dyn std::error::Error>> {
    let engine = Box::new(StillFrameRenderEngine::at(at_ms));
    let handle = ThreadedRenderSubmitter::new().submit(engine, request, frame, output);

    match handle.wait()? {
        RenderOutcome::Rendered(path) => log::info!("Output written to {}", path.display()),
        RenderOutcome::Unmodified(path) => {
            log::info!("No faces to cover; {} left unmodified", path.display())
        }
    }
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.detections.exists() {
        return Err(format!("Detections file not found: {}", cli.detections.display()).into());
    }
    if cli.asset_size == 0 {
        return Err("Asset size must be a positive number of pixels".into());
    }
    if !cli.coverage.is_finite() || cli.coverage <= 0.0 {
        return Err(format!("Coverage must be a positive number, got {}", cli.coverage).into());
    }
    if !cli.fps.is_finite() || cli.fps <= 0.0 || cli.fps > MAX_PLAN_FPS {
        return Err(format!(
            "FPS must be a positive number up to {MAX_PLAN_FPS}, got {}",
            cli.fps
        )
        .into());
    }
    if let Some(d) = cli.duration_ms {
        if d < 0 {
            return Err(format!("Duration must not be negative, got {d}").into());
        }
    }
    if cli.frame.is_some() != cli.output.is_some() {
        return Err("--frame and --output must be given together".into());
    }
    if let Some(frame) = &cli.frame {
        if !frame.exists() {
            return Err(format!("Frame file not found: {}", frame.display()).into());
        }
        if !is_image(frame) {
            return Err(format!("Frame must be an image file, got {}", frame.display()).into());
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
