//! Blink confirmation of the armed item

use std::time::{Duration, Instant};

use gaze_pick_config::GazeConfig;
use tracing::{debug, info};

use super::DwellState;
use crate::input::SelectionResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfirmSettings {
    /// Length of the feedback pulse after a selection
    pub pulse: Duration,
}

impl Default for ConfirmSettings {
    fn default() -> Self {
        Self {
            pulse: Duration::from_millis(300),
        }
    }
}

impl From<&GazeConfig> for ConfirmSettings {
    fn from(config: &GazeConfig) -> Self {
        Self {
            pulse: super::secs(config.feedback.pulse_secs),
        }
    }
}

/// Turns a confirmed blink into a selection when an item is armed.
///
/// The pulse is observational only; nothing in the selection logic reads it.
#[derive(Debug, Clone)]
pub struct SelectionConfirmer {
    settings: ConfirmSettings,
    pulse: Option<(usize, Instant)>,
    selections: u64,
}

impl SelectionConfirmer {
    pub fn new(settings: ConfirmSettings) -> Self {
        Self {
            settings,
            pulse: None,
            selections: 0,
        }
    }

    /// Handle a confirmed blink at `now`
    pub fn on_blink_confirmed(&mut self, dwell: &DwellState, now: Instant) -> Option<SelectionResult> {
        let Some(index) = dwell.armed_index() else {
            debug!("Blink with nothing armed");
            return None;
        };

        info!(index, "Item selected");
        self.pulse = now.checked_add(self.settings.pulse).map(|until| (index, until));
        self.selections += 1;

        Some(SelectionResult {
            selected_index: index,
            confirmed_at: now,
        })
    }

    pub fn pulse_duration(&self) -> Duration {
        self.settings.pulse
    }

    /// Whether the feedback pulse is still running at `now`
    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.pulsing_index(now).is_some()
    }

    /// Item being pulsed at `now`
    pub fn pulsing_index(&self, now: Instant) -> Option<usize> {
        self.pulse
            .filter(|&(_, until)| now < until)
            .map(|(index, _)| index)
    }

    /// Selections since the last reset
    pub fn selection_count(&self) -> u64 {
        self.selections
    }

    pub fn reset(&mut self) {
        self.pulse = None;
        self.selections = 0;
    }
}
