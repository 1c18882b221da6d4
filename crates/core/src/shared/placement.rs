use serde::Serialize;

/// Render transform for one overlay instance at one instant.
///
/// Anchors are in the engine's target space: center origin, both axes in
/// `[-1, +1]`, `y` pointing up. `scale` and `opacity` are unitless.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Placement {
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub scale: f32,
    pub opacity: f32,
}

impl Placement {
    /// Fully transparent placement for a slot with nothing to cover.
    pub const HIDDEN: Placement = Placement {
        anchor_x: 0.0,
        anchor_y: 0.0,
        scale: 0.0,
        opacity: 0.0,
    };

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// Maps a normalized top-left/down point into target space.
pub fn to_target_space(x: f32, y: f32) -> (f32, f32) {
    (x * 2.0 - 1.0, -(y * 2.0 - 1.0))
}
