//! gaze-pick: gaze-driven dwell selection with blink confirmation
//!
//! Umbrella crate re-exporting the engine and its configuration.

pub use gaze_pick_config as config;
pub use gaze_pick_config::{ConfigError, GazeConfig};
pub use gaze_pick_core::*;
