//! Async session runner
//!
//! The sensor pushes frames into a channel; the session drains it on its own
//! task and hands events to a [`FeedbackSink`]. The controller sits behind a
//! mutex that the task holds for the whole of each frame, so once
//! [`GazeSession::stop`] returns no further frame can touch it.
//!
//! Idle ticks are stamped in the sensor's time base: the timestamp of the
//! latest frame plus the time the session clock says has passed since it
//! arrived. Replayed or offset sensor timestamps therefore work with the
//! wall clock.

mod sink;

pub use sink::FeedbackSink;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

use gaze_pick_config::GazeConfig;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::controller::{InteractionController, SessionStats};
use crate::error::{GazeError, Result};
use crate::input::{GazeSensor, InteractionEvent, SensorFrame};

struct Shared {
    controller: InteractionController,
    running: bool,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(|e| e.into_inner())
}

/// Runs an [`InteractionController`] against a live frame stream
pub struct GazeSession {
    shared: Arc<Mutex<Shared>>,
    clock: Arc<dyn Clock>,
    tick_rate: Duration,
    task: Option<JoinHandle<()>>,
}

impl GazeSession {
    /// Create a session using the wall clock and the configured tick rate
    pub fn new(controller: InteractionController, config: &GazeConfig) -> Self {
        Self {
            shared: Arc::new(Mutex::new(Shared {
                controller,
                running: false,
            })),
            clock: Arc::new(SystemClock),
            tick_rate: Duration::from_millis(config.session.tick_ms.max(1)),
            task: None,
        }
    }

    /// Measure time between frames with a different clock
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Set tick rate
    pub fn with_tick_rate(mut self, rate: Duration) -> Self {
        self.tick_rate = rate.max(Duration::from_millis(1));
        self
    }

    /// Subscribe to the sensor and start processing frames.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start<S, K>(&mut self, sensor: &mut S, sink: K) -> Result<()>
    where
        S: GazeSensor + ?Sized,
        K: FeedbackSink + 'static,
    {
        if self.is_running() {
            return Err(GazeError::AlreadyRunning);
        }
        if !sensor.is_supported() {
            warn!("{} does not support face tracking", sensor.name());
            return Err(GazeError::Unavailable(format!(
                "{} does not support face tracking",
                sensor.name()
            )));
        }

        let frames = sensor.subscribe()?;
        lock(&self.shared).running = true;

        info!(
            "Starting gaze session on {} with {} ms ticks",
            sensor.name(),
            self.tick_rate.as_millis()
        );

        self.task = Some(tokio::spawn(drain_frames(
            Arc::clone(&self.shared),
            frames,
            sink,
            Arc::clone(&self.clock),
            self.tick_rate,
        )));
        Ok(())
    }

    /// Stop processing and reset every stage. Safe to call at any time.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        {
            let mut shared = lock(&self.shared);
            shared.running = false;
            shared.controller.reset();
        }
        task.abort();
        info!("Gaze session stopped");
    }

    /// False once stopped or once the sensor's frame stream has ended
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Inspect the controller between frames
    pub fn with_controller<R>(&self, f: impl FnOnce(&InteractionController) -> R) -> R {
        f(&lock(&self.shared).controller)
    }

    pub fn stats(&self) -> SessionStats {
        self.with_controller(|c| c.stats())
    }
}

impl Drop for GazeSession {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn drain_frames<K: FeedbackSink>(
    shared: Arc<Mutex<Shared>>,
    mut frames: mpsc::Receiver<SensorFrame>,
    mut sink: K,
    clock: Arc<dyn Clock>,
    tick_rate: Duration,
) {
    let mut ticker = time::interval(tick_rate);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // Sensor timestamp of the latest frame and the clock reading on arrival
    let mut last_frame: Option<(Instant, Instant)> = None;

    loop {
        tokio::select! {
            frame = frames.recv() => {
                let Some(frame) = frame else {
                    debug!("Sensor frame stream closed");
                    break;
                };
                let mut shared = lock(&shared);
                if !shared.running {
                    break;
                }
                last_frame = Some((frame.timestamp, clock.now()));
                let events = shared.controller.process_frame(&frame);
                deliver(&mut sink, &events);
            }
            _ = ticker.tick() => {
                let mut shared = lock(&shared);
                if !shared.running {
                    break;
                }
                if let Some((stamp, arrived)) = last_frame {
                    let elapsed = clock.now().saturating_duration_since(arrived);
                    let now = stamp.checked_add(elapsed).unwrap_or(stamp);
                    let events = shared.controller.tick(now);
                    deliver(&mut sink, &events);
                }
            }
        }
    }
}

fn deliver<K: FeedbackSink>(sink: &mut K, events: &[InteractionEvent]) {
    for event in events {
        sink.emit(event);
    }
}
