//! Input abstraction for the gaze engine
//!
//! Provides:
//! - Per-frame sensor samples (gaze direction, eye closure)
//! - The sensor seam the acquisition pipeline plugs into
//! - Outward interaction events for rendering and haptics

mod event;
mod sample;
mod sensor;

pub use event::{InteractionEvent, SelectionResult};
pub use sample::{BlinkSample, GazeSample, SensorFrame};
pub use sensor::{ChannelSensor, GazeSensor};
