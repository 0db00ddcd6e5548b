//! Per-frame wiring of the gaze pipeline

use std::time::Instant;

use gaze_pick_config::GazeConfig;
use tracing::trace;

use crate::gaze::{
    BlinkDebouncer, BlinkEvent, BlinkSettings, BlinkState, ConfirmSettings, DwellSettings,
    DwellState, DwellTimer, DwellUpdate, HitMapper, SelectionConfirmer, SignalSmoother,
    SmootherSettings,
};
use crate::input::{InteractionEvent, SensorFrame};
use crate::spatial::{Point2D, Viewport};

/// Counters shown alongside the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionStats {
    /// Blinks that passed the cooldown
    pub blinks: u64,
    /// Blinks swallowed by the cooldown
    pub suppressed_blinks: u64,
    pub selections: u64,
}

/// Owns every pipeline stage and turns frames into interaction events.
///
/// All state is mutated only through `&mut self`; callers that share the
/// controller across tasks wrap it in a lock.
#[derive(Debug)]
pub struct InteractionController {
    smoother: SignalSmoother,
    debouncer: BlinkDebouncer,
    hit_mapper: HitMapper,
    dwell: DwellTimer,
    confirmer: SelectionConfirmer,
}

impl InteractionController {
    /// Build a controller from configuration
    pub fn new(config: &GazeConfig, viewport: Viewport, hit_mapper: HitMapper) -> Self {
        Self::from_parts(
            SignalSmoother::new(SmootherSettings::from(config), viewport),
            BlinkDebouncer::new(BlinkSettings::from(config)),
            hit_mapper,
            DwellTimer::new(DwellSettings::from(config)),
            SelectionConfirmer::new(ConfirmSettings::from(config)),
        )
    }

    /// Build a controller from individually configured stages
    pub fn from_parts(
        smoother: SignalSmoother,
        debouncer: BlinkDebouncer,
        hit_mapper: HitMapper,
        dwell: DwellTimer,
        confirmer: SelectionConfirmer,
    ) -> Self {
        Self {
            smoother,
            debouncer,
            hit_mapper,
            dwell,
            confirmer,
        }
    }

    /// Process one sensor frame
    pub fn process_frame(&mut self, frame: &SensorFrame) -> Vec<InteractionEvent> {
        let now = frame.timestamp;
        let mut events = Vec::new();

        let blink = match frame.blink {
            Some(sample) if sample.is_valid() => self.debouncer.evaluate(sample, now),
            Some(sample) => {
                trace!(?sample, "Skipping out-of-range blink sample");
                None
            }
            None => None,
        };

        match frame.gaze {
            Some(sample) if sample.is_valid() => {
                if !self.debouncer.is_frozen(now) {
                    self.smoother.update(sample);
                }
                let gazed = self.hit_mapper.locate(self.smoother.position());
                let update = self.dwell.update(gazed, now);
                push_armed(&mut events, &update);
            }
            Some(sample) => trace!(?sample, "Skipping non-finite gaze sample"),
            None => trace!("Frame without gaze sample"),
        }

        if let Some(BlinkEvent::Confirmed { at }) = blink {
            events.push(InteractionEvent::BlinkConfirmed { at });

            if let Some(result) = self.confirmer.on_blink_confirmed(self.dwell.state(), at) {
                events.push(InteractionEvent::ItemSelected(result));
                events.push(InteractionEvent::FeedbackPulse {
                    index: result.selected_index,
                    duration: self.confirmer.pulse_duration(),
                });
                self.dwell.consume(at);
            }
        }

        events.push(self.cursor_event());
        events
    }

    /// Re-evaluate dwell progress between frames.
    ///
    /// Emits nothing when nothing changed, so ticking at any rate is safe.
    pub fn tick(&mut self, now: Instant) -> Vec<InteractionEvent> {
        let before = (self.dwell.progress(), self.dwell.gazed_index());
        let update = self.dwell.tick(now);

        let mut events = Vec::new();
        push_armed(&mut events, &update);
        if (update.progress, update.gazed) != before || update.armed_now.is_some() {
            events.push(self.cursor_event());
        }
        events
    }

    fn cursor_event(&self) -> InteractionEvent {
        InteractionEvent::CursorMoved {
            position: self.smoother.position(),
            progress: self.dwell.progress(),
            gazed: self.dwell.gazed_index(),
        }
    }

    /// Return every stage to its initial state
    pub fn reset(&mut self) {
        self.smoother.reset();
        self.debouncer.reset();
        self.dwell.reset();
        self.confirmer.reset();
    }

    pub fn cursor(&self) -> Point2D {
        self.smoother.position()
    }

    pub fn dwell_state(&self) -> &DwellState {
        self.dwell.state()
    }

    pub fn progress(&self) -> f32 {
        self.dwell.progress()
    }

    pub fn blink_state(&self) -> &BlinkState {
        self.debouncer.state()
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.confirmer.is_pulsing(now)
    }

    pub fn hit_mapper_mut(&mut self) -> &mut HitMapper {
        &mut self.hit_mapper
    }

    pub fn stats(&self) -> SessionStats {
        SessionStats {
            blinks: self.debouncer.confirmed_count(),
            suppressed_blinks: self.debouncer.suppressed_count(),
            selections: self.confirmer.selection_count(),
        }
    }
}

fn push_armed(events: &mut Vec<InteractionEvent>, update: &DwellUpdate) {
    if let Some(index) = update.armed_now {
        events.push(InteractionEvent::ItemArmed { index });
    }
}
