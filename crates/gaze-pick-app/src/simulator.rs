//! Input simulator for terminal development
//!
//! Maps keyboard input to simulated face-tracker output so the engine can be
//! driven without a camera.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use gaze_pick_core::{BlinkSample, GazeSample, GazeSensor, SensorFrame};
use tokio::sync::mpsc;
use tracing::debug;

/// Frames of closed eyes produced by one simulated blink
const BLINK_FRAMES: u32 = 2;

/// Simulates gaze direction and blinks from the keyboard
#[derive(Debug, Clone)]
pub struct InputSimulator {
    /// Current simulated gaze direction (sensor units)
    gaze_x: f32,
    gaze_y: f32,
    /// Raw gaze change per key press
    gaze_step: f32,
    /// Largest raw value either axis may reach
    gaze_limit: f32,
    /// Remaining frames with both eyes closed
    blink_frames: u32,
}

impl Default for InputSimulator {
    fn default() -> Self {
        Self {
            gaze_x: 0.0,
            gaze_y: 0.0,
            gaze_step: 0.02,
            gaze_limit: 0.4,
            blink_frames: 0,
        }
    }
}

impl InputSimulator {
    /// Create a new input simulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a keyboard event. Returns true if the key was consumed.
    ///
    /// The cursor moves opposite to raw gaze, so each arrow nudges the raw
    /// value the other way to make the cursor follow the arrow.
    pub fn process_key(&mut self, key: KeyEvent) -> bool {
        // Only process key press events
        if key.kind != KeyEventKind::Press {
            return false;
        }

        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.nudge(0.0, self.gaze_step),
            KeyCode::Down | KeyCode::Char('j') => self.nudge(0.0, -self.gaze_step),
            KeyCode::Left | KeyCode::Char('h') => self.nudge(self.gaze_step, 0.0),
            KeyCode::Right | KeyCode::Char('l') => self.nudge(-self.gaze_step, 0.0),
            KeyCode::Char('b') | KeyCode::Char(' ') => {
                debug!("Simulated blink");
                self.blink_frames = BLINK_FRAMES;
            }
            KeyCode::Char('c') => {
                self.gaze_x = 0.0;
                self.gaze_y = 0.0;
            }
            _ => return false,
        }
        true
    }

    fn nudge(&mut self, dx: f32, dy: f32) {
        self.gaze_x = (self.gaze_x + dx).clamp(-self.gaze_limit, self.gaze_limit);
        self.gaze_y = (self.gaze_y + dy).clamp(-self.gaze_limit, self.gaze_limit);
    }

    /// Produce the frame for `now`, consuming one frame of any pending blink
    pub fn next_frame(&mut self, now: Instant) -> SensorFrame {
        let blink = if self.blink_frames > 0 {
            self.blink_frames -= 1;
            BlinkSample::CLOSED
        } else {
            BlinkSample::OPEN
        };
        SensorFrame::new(GazeSample::new(self.gaze_x, self.gaze_y), blink, now)
    }

    /// Get current raw gaze
    pub fn gaze(&self) -> GazeSample {
        GazeSample::new(self.gaze_x, self.gaze_y)
    }

    /// Reset simulator to default state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Sensor that samples a shared [`InputSimulator`] at a fixed cadence
pub struct SimulatedSensor {
    simulator: Arc<Mutex<InputSimulator>>,
    frame_interval: Duration,
    queue: usize,
}

impl SimulatedSensor {
    pub fn new(simulator: Arc<Mutex<InputSimulator>>, frame_interval: Duration, queue: usize) -> Self {
        Self {
            simulator,
            frame_interval,
            queue: queue.max(1),
        }
    }
}

impl GazeSensor for SimulatedSensor {
    fn name(&self) -> &str {
        "keyboard simulator"
    }

    fn is_supported(&self) -> bool {
        true
    }

    /// Spawns the frame pump; must be called within a tokio runtime
    fn subscribe(&mut self) -> gaze_pick_core::Result<mpsc::Receiver<SensorFrame>> {
        let (tx, rx) = mpsc::channel(self.queue);
        let simulator = Arc::clone(&self.simulator);
        let frame_interval = self.frame_interval;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(frame_interval);
            loop {
                interval.tick().await;
                let frame = simulator
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .next_frame(Instant::now());
                if tx.send(frame).await.is_err() {
                    debug!("Frame consumer gone; simulator stopping");
                    break;
                }
            }
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::empty())
    }

    #[test]
    fn test_arrow_moves_raw_gaze_against_cursor() {
        let mut sim = InputSimulator::new();
        assert!(sim.process_key(press(KeyCode::Up)));
        // Positive raw y moves the cursor up
        assert!(sim.gaze().y > 0.0);

        sim.process_key(press(KeyCode::Right));
        assert!(sim.gaze().x < 0.0);
    }

    #[test]
    fn test_gaze_is_clamped() {
        let mut sim = InputSimulator::new();
        for _ in 0..100 {
            sim.process_key(press(KeyCode::Left));
        }
        assert_eq!(sim.gaze().x, 0.4);
    }

    #[test]
    fn test_blink_closes_eyes_for_a_few_frames() {
        let mut sim = InputSimulator::new();
        let now = Instant::now();
        assert!(sim.process_key(press(KeyCode::Char('b'))));

        assert_eq!(sim.next_frame(now).blink, Some(BlinkSample::CLOSED));
        assert_eq!(sim.next_frame(now).blink, Some(BlinkSample::CLOSED));
        assert_eq!(sim.next_frame(now).blink, Some(BlinkSample::OPEN));
    }

    #[test]
    fn test_unmapped_key_is_not_consumed() {
        let mut sim = InputSimulator::new();
        assert!(!sim.process_key(press(KeyCode::Char('x'))));
    }

    #[test]
    fn test_reset() {
        let mut sim = InputSimulator::new();
        sim.process_key(press(KeyCode::Up));
        sim.reset();
        assert_eq!(sim.gaze(), GazeSample::default());
    }
}
