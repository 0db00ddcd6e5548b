//! Sensor seam for the acquisition pipeline

use tokio::sync::mpsc;

use super::SensorFrame;
use crate::error::{GazeError, Result};

/// A source of sensor frames (face tracker, replay file, simulator)
pub trait GazeSensor: Send {
    /// Short human-readable name for logs
    fn name(&self) -> &str {
        "gaze sensor"
    }

    /// Whether the device can track faces at all
    fn is_supported(&self) -> bool;

    /// Begin delivering frames. Frames are pushed in timestamp order.
    fn subscribe(&mut self) -> Result<mpsc::Receiver<SensorFrame>>;
}

/// Sensor backed by a channel the caller pushes frames into
pub struct ChannelSensor {
    rx: Option<mpsc::Receiver<SensorFrame>>,
    supported: bool,
}

impl ChannelSensor {
    /// Create a sensor and the sender that feeds it
    pub fn channel(capacity: usize) -> (Self, mpsc::Sender<SensorFrame>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let sensor = Self {
            rx: Some(rx),
            supported: true,
        };
        (sensor, tx)
    }

    /// A sensor that reports no face-tracking capability
    pub fn unsupported() -> Self {
        Self {
            rx: None,
            supported: false,
        }
    }
}

impl GazeSensor for ChannelSensor {
    fn name(&self) -> &str {
        "channel sensor"
    }

    fn is_supported(&self) -> bool {
        self.supported
    }

    fn subscribe(&mut self) -> Result<mpsc::Receiver<SensorFrame>> {
        if !self.supported {
            return Err(GazeError::Unavailable("face tracking not supported".to_string()));
        }
        self.rx
            .take()
            .ok_or_else(|| GazeError::Unavailable("frame stream already consumed".to_string()))
    }
}
