//! gaze-pick-core: dwell-and-blink selection driven by gaze
//!
//! This crate provides the interaction engine:
//! - Exponential smoothing of raw gaze into a viewport cursor
//! - Blink debouncing with cooldown and post-blink cursor freeze
//! - Item hit mapping through caller-supplied geometry
//! - Dwell timing that arms an item after sustained gaze
//! - Blink confirmation of the armed item with a feedback pulse
//! - An async session that drains sensor frames and feeds a sink
//!
//! Timing is driven entirely by frame timestamps, so the controller can be
//! exercised deterministically without a runtime:
//!
//! ```
//! use std::time::{Duration, Instant};
//! use gaze_pick_config::GazeConfig;
//! use gaze_pick_core::{
//!     BlinkSample, GazeSample, HitMapper, InteractionController, InteractionEvent,
//!     ListLayout, Point2D, SensorFrame, Viewport,
//! };
//!
//! let layout = ListLayout::new(Point2D::new(0.0, 350.0), 400.0, 100.0, 3);
//! let mut controller = InteractionController::new(
//!     &GazeConfig::default(),
//!     Viewport::new(400.0, 800.0),
//!     HitMapper::new(layout, 3),
//! );
//!
//! let t0 = Instant::now();
//! for i in 0..=15 {
//!     let at = t0 + Duration::from_millis(100 * i);
//!     controller.process_frame(&SensorFrame::new(GazeSample::default(), BlinkSample::OPEN, at));
//! }
//! let events = controller.process_frame(&SensorFrame::new(
//!     GazeSample::default(),
//!     BlinkSample::CLOSED,
//!     t0 + Duration::from_millis(1600),
//! ));
//! assert!(events.iter().any(|e| matches!(e, InteractionEvent::ItemSelected(r) if r.selected_index == 0)));
//! ```

pub mod clock;
pub mod controller;
pub mod error;
pub mod gaze;
pub mod input;
pub mod session;
pub mod spatial;

// Re-export commonly used types
pub use clock::{Clock, ManualClock, SystemClock};
pub use controller::{InteractionController, SessionStats};
pub use error::{GazeError, Result};
pub use gaze::{
    ArmPolicy, BlinkDebouncer, BlinkEvent, BlinkState, DwellState, DwellTimer, HitMapper, HitTest,
    ListLayout, SelectionConfirmer, SignalSmoother,
};
pub use input::{
    BlinkSample, ChannelSensor, GazeSample, GazeSensor, InteractionEvent, SelectionResult,
    SensorFrame,
};
pub use session::{FeedbackSink, GazeSession};
pub use spatial::{Point2D, Rect, Viewport};
