//! Engine error types
//!
//! Per-frame input problems are never errors; they are skipped where they
//! occur. Only session lifecycle and configuration can fail.

use gaze_pick_config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum GazeError {
    /// The sensor cannot provide face tracking on this device
    #[error("Gaze sensor unavailable: {0}")]
    Unavailable(String),

    #[error("Gaze session is already running")]
    AlreadyRunning,

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, GazeError>;
