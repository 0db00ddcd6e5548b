//! Blink debouncing
//!
//! A frame counts as blinking when both eyes close past the threshold. Only
//! the rising edge into a blink can confirm, and only once the cooldown since
//! the last confirmed blink has passed. The cursor stays frozen while the eyes
//! are closed and for a stabilization window after each confirmed blink, so
//! eyelid motion does not drag it off target.

use std::time::{Duration, Instant};

use gaze_pick_config::GazeConfig;
use tracing::debug;

use crate::input::BlinkSample;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlinkSettings {
    /// Per-eye closure strength both eyes must exceed
    pub threshold: f32,
    /// Minimum spacing between confirmed blinks
    pub cooldown: Duration,
    /// Cursor freeze after a confirmed blink
    pub stabilization: Duration,
}

impl Default for BlinkSettings {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            cooldown: Duration::from_millis(500),
            stabilization: Duration::from_millis(300),
        }
    }
}

impl From<&GazeConfig> for BlinkSettings {
    fn from(config: &GazeConfig) -> Self {
        Self {
            threshold: config.blink.threshold,
            cooldown: super::secs(config.blink.cooldown_secs),
            stabilization: super::secs(config.blink.stabilization_secs),
        }
    }
}

/// Debouncer state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BlinkState {
    /// Eyes closed on the most recent evaluated frame
    pub is_blinking: bool,
    /// When the last blink was confirmed (`None` before the first one)
    pub last_confirmed: Option<Instant>,
    /// Cursor stays frozen until this instant
    pub stabilization_until: Option<Instant>,
}

/// Discrete blink outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkEvent {
    /// A blink passed the cooldown gate
    Confirmed { at: Instant },
}

/// Converts per-frame eye closure into cooldown-gated blink events
#[derive(Debug, Clone)]
pub struct BlinkDebouncer {
    settings: BlinkSettings,
    state: BlinkState,
    confirmed: u64,
    suppressed: u64,
}

impl BlinkDebouncer {
    pub fn new(settings: BlinkSettings) -> Self {
        Self {
            settings,
            state: BlinkState::default(),
            confirmed: 0,
            suppressed: 0,
        }
    }

    /// Evaluate one frame. Returns an event only on a confirmed rising edge.
    pub fn evaluate(&mut self, sample: BlinkSample, now: Instant) -> Option<BlinkEvent> {
        let blinking = sample.exceeds(self.settings.threshold);
        let rising = blinking && !self.state.is_blinking;
        self.state.is_blinking = blinking;

        if !rising {
            return None;
        }

        let cooled_down = self
            .state
            .last_confirmed
            .map(|last| now.saturating_duration_since(last) >= self.settings.cooldown)
            .unwrap_or(true);

        if !cooled_down {
            self.suppressed += 1;
            debug!("Blink suppressed during cooldown");
            return None;
        }

        self.state.last_confirmed = Some(now);
        self.state.stabilization_until = now.checked_add(self.settings.stabilization);
        self.confirmed += 1;
        debug!("Blink confirmed");
        Some(BlinkEvent::Confirmed { at: now })
    }

    /// Whether cursor updates must be held at `now`
    pub fn is_frozen(&self, now: Instant) -> bool {
        self.state.is_blinking
            || self
                .state
                .stabilization_until
                .map(|until| now < until)
                .unwrap_or(false)
    }

    pub fn state(&self) -> &BlinkState {
        &self.state
    }

    /// Number of confirmed blinks since the last reset
    pub fn confirmed_count(&self) -> u64 {
        self.confirmed
    }

    /// Number of blinks swallowed by the cooldown since the last reset
    pub fn suppressed_count(&self) -> u64 {
        self.suppressed
    }

    pub fn reset(&mut self) {
        self.state = BlinkState::default();
        self.confirmed = 0;
        self.suppressed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_first_blink_confirms() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert_eq!(d.evaluate(BlinkSample::OPEN, t0), None);
        assert_eq!(
            d.evaluate(BlinkSample::CLOSED, t0 + ms(100)),
            Some(BlinkEvent::Confirmed { at: t0 + ms(100) })
        );
        assert!(d.state().is_blinking);
        assert_eq!(d.state().last_confirmed, Some(t0 + ms(100)));
        assert_eq!(d.state().stabilization_until, Some(t0 + ms(400)));
    }

    #[test]
    fn test_held_blink_fires_once() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert!(d.evaluate(BlinkSample::CLOSED, t0).is_some());
        // Eyes kept closed well past the cooldown: no rising edge, no event
        for i in 1..20 {
            assert_eq!(d.evaluate(BlinkSample::CLOSED, t0 + ms(100 * i)), None);
        }
        assert_eq!(d.confirmed_count(), 1);
    }

    #[test]
    fn test_blinks_inside_cooldown_are_suppressed() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert!(d.evaluate(BlinkSample::CLOSED, t0).is_some());
        assert!(d.evaluate(BlinkSample::OPEN, t0 + ms(100)).is_none());
        assert!(d.evaluate(BlinkSample::CLOSED, t0 + ms(200)).is_none());

        assert!(d.state().is_blinking);
        assert_eq!(d.state().last_confirmed, Some(t0));
        assert_eq!(d.confirmed_count(), 1);
        assert_eq!(d.suppressed_count(), 1);
    }

    #[test]
    fn test_blink_after_cooldown_confirms_again() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert!(d.evaluate(BlinkSample::CLOSED, t0).is_some());
        d.evaluate(BlinkSample::OPEN, t0 + ms(100));
        // Exactly at the cooldown boundary counts
        assert!(d.evaluate(BlinkSample::CLOSED, t0 + ms(500)).is_some());
        assert_eq!(d.confirmed_count(), 2);
    }

    #[test]
    fn test_single_eye_closure_is_not_a_blink() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert!(d.evaluate(BlinkSample::new(0.95, 0.1), t0).is_none());
        assert!(!d.state().is_blinking);
    }

    #[test]
    fn test_freeze_covers_stabilization_window() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        assert!(!d.is_frozen(t0));
        d.evaluate(BlinkSample::CLOSED, t0);
        assert!(d.is_frozen(t0));

        // Eyes reopen but the window has not elapsed
        d.evaluate(BlinkSample::OPEN, t0 + ms(100));
        assert!(!d.state().is_blinking);
        assert!(d.is_frozen(t0 + ms(100)));
        assert!(d.is_frozen(t0 + ms(299)));
        assert!(!d.is_frozen(t0 + ms(300)));
    }

    #[test]
    fn test_suppressed_blink_still_freezes_while_closed() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());

        d.evaluate(BlinkSample::CLOSED, t0);
        d.evaluate(BlinkSample::OPEN, t0 + ms(400));
        assert!(!d.is_frozen(t0 + ms(400)));

        d.evaluate(BlinkSample::CLOSED, t0 + ms(450));
        assert!(d.is_frozen(t0 + ms(450)));
        d.evaluate(BlinkSample::OPEN, t0 + ms(550));
        assert!(!d.is_frozen(t0 + ms(550)));
    }

    #[test]
    fn test_reset_clears_state() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings::default());
        d.evaluate(BlinkSample::CLOSED, t0);

        d.reset();
        assert_eq!(*d.state(), BlinkState::default());
        assert_eq!(d.confirmed_count(), 0);
        // A new blink right away is not held back by the old cooldown
        assert!(d.evaluate(BlinkSample::CLOSED, t0 + ms(10)).is_some());
    }

    #[test]
    fn test_huge_stabilization_does_not_overflow() {
        let t0 = Instant::now();
        let mut d = BlinkDebouncer::new(BlinkSettings {
            stabilization: Duration::MAX,
            ..Default::default()
        });

        assert!(d.evaluate(BlinkSample::CLOSED, t0).is_some());
        assert_eq!(d.state().stabilization_until, None);
        assert!(d.is_frozen(t0));
    }

    #[test]
    fn test_settings_from_unvalidated_config() {
        let mut config = GazeConfig::default();
        config.blink.stabilization_secs = 1e19;

        let settings = BlinkSettings::from(&config);
        assert_eq!(settings.stabilization, Duration::from_secs(3600));
    }
}
