use crate::shared::constants::DEFAULT_COVERAGE_FACTOR;
use crate::shared::detection::Detection;
use crate::shared::placement::{to_target_space, Placement};
use crate::shared::track::Track;

/// Answers "where is this track's overlay at time t".
///
/// Pure function of the query time and the fixed track contents, so one
/// instance per track can be queried from any thread.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPlacement {
    track: Track,
    coverage_factor: f32,
}

impl TrackPlacement {
    pub fn new(track: Track) -> Self {
        Self::with_coverage_factor(track, DEFAULT_COVERAGE_FACTOR)
    }

    pub fn with_coverage_factor(track: Track, coverage_factor: f32) -> Self {
        Self {
            track,
            coverage_factor,
        }
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    /// The detection covering `time_ms`. When windows overlap, the earliest
    /// start wins.
    pub fn visible_detection(&self, time_ms: i64) -> Option<&Detection> {
        self.track
            .detections()
            .iter()
            .filter(|d| d.covers(time_ms))
            .min_by_key(|d| d.start_ms())
    }

    pub fn is_visible(&self, time_ms: i64) -> bool {
        self.visible_detection(time_ms).is_some()
    }

    /// Always returns a placement; hidden slots come back fully transparent
    /// so the renderer sees a fixed number of overlays per frame.
    pub fn placement_at(&self, time_ms: i64) -> Placement {
        let Some(d) = self.visible_detection(time_ms) else {
            return Placement::HIDDEN;
        };

        let (cx, cy) = d.center();
        let (anchor_x, anchor_y) = to_target_space(cx, cy);
        Placement {
            anchor_x,
            anchor_y,
            scale: d.max_extent() * self.coverage_factor,
            opacity: 1.0,
        }
    }

    /// Engine clocks run in microseconds; truncates to whole milliseconds.
    pub fn placement_at_us(&self, time_us: i64) -> Placement {
        self.placement_at(time_us / 1000)
    }
}
