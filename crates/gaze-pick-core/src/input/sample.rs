//! Raw per-frame sensor samples

use std::time::Instant;

/// Estimated gaze direction in sensor units
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GazeSample {
    pub x: f32,
    pub y: f32,
}

impl GazeSample {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Combine per-eye forward vectors `[x, y, z]` into one gaze sample by
    /// averaging their horizontal and vertical components.
    pub fn from_eye_directions(left: [f32; 3], right: [f32; 3]) -> Self {
        Self {
            x: (left[0] + right[0]) / 2.0,
            y: (left[1] + right[1]) / 2.0,
        }
    }

    /// Whether the sample carries usable numbers
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Per-eye closure confidence in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BlinkSample {
    pub left: f32,
    pub right: f32,
}

impl BlinkSample {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    /// Both eyes open
    pub const OPEN: Self = Self {
        left: 0.0,
        right: 0.0,
    };

    /// Both eyes fully closed
    pub const CLOSED: Self = Self {
        left: 1.0,
        right: 1.0,
    };

    /// Whether both strengths are finite and within [0, 1]
    pub fn is_valid(&self) -> bool {
        (0.0..=1.0).contains(&self.left) && (0.0..=1.0).contains(&self.right)
    }

    /// Both eyes closed beyond `threshold`
    pub fn exceeds(&self, threshold: f32) -> bool {
        self.left > threshold && self.right > threshold
    }
}

/// One frame from the acquisition pipeline.
///
/// Either sample may be missing when the tracker lost the face or a
/// blend-shape value for that frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorFrame {
    pub gaze: Option<GazeSample>,
    pub blink: Option<BlinkSample>,
    pub timestamp: Instant,
}

impl SensorFrame {
    pub fn new(gaze: GazeSample, blink: BlinkSample, timestamp: Instant) -> Self {
        Self {
            gaze: Some(gaze),
            blink: Some(blink),
            timestamp,
        }
    }

    /// A frame with no usable signal
    pub fn empty(timestamp: Instant) -> Self {
        Self {
            gaze: None,
            blink: None,
            timestamp,
        }
    }
}
