use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),
    #[error("field `{0}` is not a number")]
    NotANumber(&'static str),
    #[error("field `{field}` must be finite and non-negative, got {value}")]
    InvalidGeometry { field: &'static str, value: f32 },
    #[error("time window is inverted: start {start_ms}ms > end {end_ms}ms")]
    InvertedWindow { start_ms: i64, end_ms: i64 },
    #[error("entry is not an object")]
    NotAnObject,
}

/// One face observation: a normalized box plus an inclusive time window.
///
/// Coordinates are relative to the frame (top-left origin, `y` down).
/// Boxes may extend past the right or bottom edge; nothing is clamped here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detection {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    start_ms: i64,
    end_ms: i64,
}

impl Detection {
    pub fn new(
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        start_ms: i64,
        end_ms: i64,
    ) -> Result<Self, DetectionError> {
        for (field, value) in [("x", x), ("y", y), ("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(DetectionError::InvalidGeometry { field, value });
            }
        }
        if start_ms > end_ms {
            return Err(DetectionError::InvertedWindow { start_ms, end_ms });
        }
        Ok(Self {
            x,
            y,
            width,
            height,
            start_ms,
            end_ms,
        })
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn start_ms(&self) -> i64 {
        self.start_ms
    }

    pub fn end_ms(&self) -> i64 {
        self.end_ms
    }

    /// Inclusive on both ends.
    pub fn covers(&self, time_ms: i64) -> bool {
        (self.start_ms..=self.end_ms).contains(&time_ms)
    }

    /// Box center in normalized frame coordinates.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn max_extent(&self) -> f32 {
        self.width.max(self.height)
    }
}
