use crate::shared::detection::Detection;

/// One overlay slot: detections in ascending time order, at most one per
/// timestamp group.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    detections: Vec<Detection>,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a detection. Callers feed timestamp groups in ascending order.
    pub(crate) fn push(&mut self, detection: Detection) {
        debug_assert!(
            self.detections
                .last()
                .map_or(true, |last| last.start_ms() < detection.start_ms()),
            "track detections must have strictly ascending start times"
        );
        self.detections.push(detection);
    }

    pub fn detections(&self) -> &[Detection] {
        &self.detections
    }

    pub fn len(&self) -> usize {
        self.detections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

impl From<Vec<Detection>> for Track {
    fn from(mut detections: Vec<Detection>) -> Self {
        detections.sort_by_key(|d| d.start_ms());
        Self { detections }
    }
}
