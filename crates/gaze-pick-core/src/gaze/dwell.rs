//! Dwell timer and progress tracking
//!
//! ```text
//! Idle ──Some(i)──▶ Dwelling(i, t0) ──elapsed ≥ duration──▶ Armed(i)
//!   ▲                  │   ▲                                 │
//!   └──────None────────┘   └──────── Some(j), j ≠ i ─────────┘
//! ```
//!
//! Changing target restarts the timer from zero; no partial credit carries
//! over. The same goes for gaps in the sample stream: once no gaze sample has
//! arrived for longer than `max_gap`, the dwell is dropped and starts over
//! when gaze resumes. Elapsed time is computed from frame timestamps, so
//! re-evaluating the same instant is idempotent.

use std::time::{Duration, Instant};

use gaze_pick_config::GazeConfig;
use tracing::debug;

/// What happens to an armed item once a blink selects it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArmPolicy {
    /// Restart the dwell on the same item, so holding gaze cannot repeat-fire
    #[default]
    ClearOnConfirm,
    /// Stay armed until gaze leaves the item
    PersistUntilGazeMoves,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DwellSettings {
    /// Continuous gaze needed to arm an item
    pub duration: Duration,
    /// Longest pause between gaze samples that still counts as continuous
    pub max_gap: Duration,
    pub policy: ArmPolicy,
}

impl Default for DwellSettings {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(1500),
            max_gap: Duration::from_millis(300),
            policy: ArmPolicy::ClearOnConfirm,
        }
    }
}

impl From<&GazeConfig> for DwellSettings {
    fn from(config: &GazeConfig) -> Self {
        Self {
            duration: super::secs(config.dwell.duration_secs),
            max_gap: super::secs(config.dwell.max_gap_secs),
            policy: if config.dwell.clear_on_confirm {
                ArmPolicy::ClearOnConfirm
            } else {
                ArmPolicy::PersistUntilGazeMoves
            },
        }
    }
}

/// Dwell state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DwellState {
    /// No gazed item
    #[default]
    Idle,
    /// Gaze has rested on `index` since `started_at`
    Dwelling { index: usize, started_at: Instant },
    /// Dwell completed; the item accepts a confirming blink
    Armed { index: usize },
}

impl DwellState {
    /// Item currently under gaze
    pub fn gazed_index(&self) -> Option<usize> {
        match *self {
            DwellState::Idle => None,
            DwellState::Dwelling { index, .. } | DwellState::Armed { index } => Some(index),
        }
    }

    /// Item eligible for confirmation
    pub fn armed_index(&self) -> Option<usize> {
        match *self {
            DwellState::Armed { index } => Some(index),
            _ => None,
        }
    }
}

/// Result of feeding one gazed index to the timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DwellUpdate {
    pub gazed: Option<usize>,
    /// Dwell progress on `gazed` (0-1)
    pub progress: f32,
    /// Set only on the update that armed the item
    pub armed_now: Option<usize>,
}

/// Arms items after sustained gaze and reports progress for feedback
#[derive(Debug, Clone)]
pub struct DwellTimer {
    settings: DwellSettings,
    state: DwellState,
    progress: f32,
    /// Timestamp of the latest gaze sample
    last_seen: Option<Instant>,
}

impl DwellTimer {
    pub fn new(settings: DwellSettings) -> Self {
        Self {
            settings,
            state: DwellState::Idle,
            progress: 0.0,
            last_seen: None,
        }
    }

    /// Feed the item under the cursor for a fresh gaze sample
    pub fn update(&mut self, gazed: Option<usize>, now: Instant) -> DwellUpdate {
        if self.gaze_lost(now) {
            self.drop_stale_dwell();
        }
        self.last_seen = Some(self.last_seen.map_or(now, |seen| seen.max(now)));
        self.apply(gazed, now)
    }

    /// Re-evaluate elapsed time for the current target without a new sample.
    ///
    /// Never arms past the last sample plus `max_gap`; beyond that the dwell
    /// is dropped.
    pub fn tick(&mut self, now: Instant) -> DwellUpdate {
        if self.gaze_lost(now) {
            self.drop_stale_dwell();
        }
        self.apply(self.state.gazed_index(), now)
    }

    fn gaze_lost(&self, now: Instant) -> bool {
        self.state != DwellState::Idle
            && self
                .last_seen
                .is_some_and(|seen| now.saturating_duration_since(seen) > self.settings.max_gap)
    }

    fn drop_stale_dwell(&mut self) {
        debug!("Gaze samples stopped; dwell reset");
        self.state = DwellState::Idle;
        self.progress = 0.0;
    }

    fn apply(&mut self, gazed: Option<usize>, now: Instant) -> DwellUpdate {
        let mut armed_now = None;

        match (self.state, gazed) {
            (DwellState::Idle, None) => {}
            (_, None) => {
                debug!("Gaze left item; dwell reset");
                self.state = DwellState::Idle;
                self.progress = 0.0;
            }
            (DwellState::Armed { index }, Some(i)) if index == i => {}
            (DwellState::Dwelling { index, started_at }, Some(i)) if index == i => {
                armed_now = self.advance(index, started_at, now);
            }
            (_, Some(i)) => {
                debug!(index = i, "Dwell started");
                self.state = DwellState::Dwelling {
                    index: i,
                    started_at: now,
                };
                self.progress = 0.0;
                armed_now = self.advance(i, now, now);
            }
        }

        DwellUpdate {
            gazed: self.state.gazed_index(),
            progress: self.progress,
            armed_now,
        }
    }

    fn advance(&mut self, index: usize, started_at: Instant, now: Instant) -> Option<usize> {
        let elapsed = now.saturating_duration_since(started_at);

        if elapsed >= self.settings.duration {
            debug!(index, "Dwell complete; item armed");
            self.state = DwellState::Armed { index };
            self.progress = 1.0;
            return Some(index);
        }

        let fraction = (elapsed.as_secs_f32() / self.settings.duration.as_secs_f32()).clamp(0.0, 1.0);
        // Out-of-order timestamps must not move the bar backwards
        self.progress = self.progress.max(fraction);
        None
    }

    /// A selection consumed the armed item
    pub fn consume(&mut self, now: Instant) {
        if self.settings.policy != ArmPolicy::ClearOnConfirm {
            return;
        }
        if let DwellState::Armed { index } = self.state {
            debug!(index, "Armed item consumed; dwell restarted");
            self.state = DwellState::Dwelling {
                index,
                started_at: now,
            };
            self.progress = 0.0;
        }
    }

    pub fn state(&self) -> &DwellState {
        &self.state
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn armed_index(&self) -> Option<usize> {
        self.state.armed_index()
    }

    pub fn gazed_index(&self) -> Option<usize> {
        self.state.gazed_index()
    }

    pub fn reset(&mut self) {
        self.state = DwellState::Idle;
        self.progress = 0.0;
        self.last_seen = None;
    }
}
