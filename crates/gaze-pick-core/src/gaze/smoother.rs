//! Exponential smoothing of the gaze cursor

use gaze_pick_config::GazeConfig;

use crate::input::GazeSample;
use crate::spatial::{Point2D, Viewport};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmootherSettings {
    /// Viewport units per unit of raw gaze
    pub sensitivity: f32,
    /// Blend weight of the new target (0 < α ≤ 1)
    pub alpha: f32,
}

impl Default for SmootherSettings {
    fn default() -> Self {
        Self {
            sensitivity: 1000.0,
            alpha: 0.7,
        }
    }
}

impl From<&GazeConfig> for SmootherSettings {
    fn from(config: &GazeConfig) -> Self {
        Self {
            sensitivity: config.cursor.sensitivity,
            alpha: config.cursor.smoothing,
        }
    }
}

/// Turns raw gaze samples into a stable cursor position
#[derive(Debug, Clone)]
pub struct SignalSmoother {
    settings: SmootherSettings,
    viewport: Viewport,
    position: Point2D,
}

impl SignalSmoother {
    /// The cursor starts at the viewport center
    pub fn new(settings: SmootherSettings, viewport: Viewport) -> Self {
        Self {
            settings,
            viewport,
            position: viewport.center(),
        }
    }

    /// Unsmoothed cursor target for a raw sample
    pub fn target(&self, raw: GazeSample) -> Point2D {
        let center = self.viewport.center();
        let s = self.settings.sensitivity;
        Point2D::new(center.x - raw.x * s, center.y - raw.y * s)
    }

    /// Blend the sample's target into the cursor and return the new position
    pub fn update(&mut self, raw: GazeSample) -> Point2D {
        let target = self.target(raw);
        // newPos = α·target + (1−α)·oldPos
        self.position = self.position.lerp(&target, self.settings.alpha);
        self.position
    }

    pub fn position(&self) -> Point2D {
        self.position
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Recenter the cursor
    pub fn reset(&mut self) {
        self.position = self.viewport.center();
    }
}
