use std::collections::BTreeMap;

use crate::shared::detection::Detection;
use crate::shared::track::Track;

/// Splits detections into overlay tracks.
///
/// Detections sharing a `start_ms` form one timestamp group. The number of
/// tracks equals the largest group. Groups are visited in ascending time and
/// each group is ordered left to right (`x` ascending) before its i-th member
/// goes to track i, so a face that stays on the same side of the frame tends
/// to keep its slot. This is positional, not identity tracking.
pub struct TrackAssigner;

impl TrackAssigner {
    pub fn new() -> Self {
        Self
    }

    pub fn assign(&self, detections: &[Detection]) -> Vec<Track> {
        let groups = group_by_start(detections);
        let track_count = groups.values().map(Vec::len).max().unwrap_or(0);
        let mut tracks: Vec<Track> = (0..track_count).map(|_| Track::new()).collect();

        for mut group in groups.into_values() {
            // Stable sort keeps input order for equal x.
            group.sort_by(|a, b| a.x().total_cmp(&b.x()));
            for (track, detection) in tracks.iter_mut().zip(group) {
                track.push(detection);
            }
        }

        tracks
    }
}

impl Default for TrackAssigner {
    fn default() -> Self {
        Self::new()
    }
}

fn group_by_start(detections: &[Detection]) -> BTreeMap<i64, Vec<Detection>> {
    let mut groups: BTreeMap<i64, Vec<Detection>> = BTreeMap::new();
    for d in detections {
        groups.entry(d.start_ms()).or_default().push(*d);
    }
    groups
}
