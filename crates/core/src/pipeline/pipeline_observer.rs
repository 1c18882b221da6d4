use std::time::Instant;

/// Cross-cutting observer for composition events.
///
/// Keeps the engine free of ambient I/O: callers inject whichever sink they
/// want (log crate, GUI signals, nothing).
pub trait PipelineObserver: Send {
    /// Raw entries received versus entries that parsed into detections.
    fn detections_parsed(&mut self, valid: usize, total: usize);

    /// Number of detections per track, in track order.
    fn tracks_assigned(&mut self, track_sizes: &[usize]);

    fn asset_generated(&mut self, width: u32, height: u32);

    fn info(&mut self, message: &str);

    /// Emit an end-of-request summary. Default: no-op.
    fn summary(&self) {}
}

/// Silent observer that discards all events.
pub struct NullPipelineObserver;

impl PipelineObserver for NullPipelineObserver {
    fn detections_parsed(&mut self, _valid: usize, _total: usize) {}
    fn tracks_assigned(&mut self, _track_sizes: &[usize]) {}
    fn asset_generated(&mut self, _width: u32, _height: u32) {}
    fn info(&mut self, _message: &str) {}
}

/// Forwards events to the `log` crate and keeps counts for a summary.
pub struct LogPipelineObserver {
    start_time: Instant,
    valid: usize,
    total: usize,
    track_sizes: Vec<usize>,
    asset: Option<(u32, u32)>,
    messages: Vec<String>,
}

impl LogPipelineObserver {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            valid: 0,
            total: 0,
            track_sizes: Vec::new(),
            asset: None,
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary, or `None` if nothing was parsed yet.
    pub fn summary_string(&self) -> Option<String> {
        if self.total == 0 && self.track_sizes.is_empty() {
            return None;
        }

        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!("Overlay summary ({elapsed_ms:.1}ms):")];
        lines.push(format!(
            "  detections: {} valid of {} ({} dropped)",
            self.valid,
            self.total,
            self.total - self.valid.min(self.total)
        ));
        lines.push(format!("  tracks: {}", self.track_sizes.len()));
        for (i, size) in self.track_sizes.iter().enumerate() {
            lines.push(format!("    track {i}: {size} detections"));
        }
        if let Some((w, h)) = self.asset {
            lines.push(format!("  asset: {w}x{h}"));
        }
        Some(lines.join("\n"))
    }
}

impl Default for LogPipelineObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl PipelineObserver for LogPipelineObserver {
    fn detections_parsed(&mut self, valid: usize, total: usize) {
        self.valid = valid;
        self.total = total;
        log::info!("Parsed {valid} valid faces from {total} entries");
    }

    fn tracks_assigned(&mut self, track_sizes: &[usize]) {
        self.track_sizes = track_sizes.to_vec();
        log::info!("Max concurrent faces: {}", track_sizes.len());
        for (i, size) in track_sizes.iter().enumerate() {
            log::debug!("  Track[{i}]: {size} detections");
        }
    }

    fn asset_generated(&mut self, width: u32, height: u32) {
        self.asset = Some((width, height));
        log::debug!("Generated overlay asset: {width}x{height}");
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
