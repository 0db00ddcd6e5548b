//! Gaze interaction pipeline
//!
//! Per frame: smoother and blink debouncer see the raw samples, the hit
//! mapper turns the cursor into an item index, the dwell timer arms items,
//! and a confirmed blink lets the confirmer fire a selection.

mod blink;
mod confirm;
mod dwell;
mod hit;
mod smoother;

pub use blink::{BlinkDebouncer, BlinkEvent, BlinkSettings, BlinkState};
pub use confirm::{ConfirmSettings, SelectionConfirmer};
pub use dwell::{ArmPolicy, DwellSettings, DwellState, DwellTimer, DwellUpdate};
pub use hit::{HitMapper, HitTest, ListLayout};
pub use smoother::{SignalSmoother, SmootherSettings};

use std::time::Duration;

use gaze_pick_config::MAX_DURATION_SECS;

/// Config seconds to a `Duration`, clamped to the range validation allows.
/// NaN maps to zero.
pub(crate) fn secs(value: f64) -> Duration {
    Duration::try_from_secs_f64(value.clamp(0.0, MAX_DURATION_SECS)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secs_clamps_unvalidated_values() {
        assert_eq!(secs(1.5), Duration::from_millis(1500));
        assert_eq!(secs(1e30), Duration::from_secs(3600));
        assert_eq!(secs(-2.0), Duration::ZERO);
        assert_eq!(secs(f64::NAN), Duration::ZERO);
    }
}
