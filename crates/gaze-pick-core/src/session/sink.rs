//! Delivery of interaction events to the rendering/haptics layer

use std::time::{Duration, Instant};

use tokio::sync::mpsc;

use crate::input::{InteractionEvent, SelectionResult};
use crate::spatial::Point2D;

/// Receiver of interaction feedback.
///
/// Implement the hooks you care about, or override [`FeedbackSink::emit`] to
/// forward whole events. Hooks run on the frame-processing task and must not
/// block.
pub trait FeedbackSink: Send {
    fn on_cursor_moved(&mut self, _position: Point2D) {}

    fn on_progress(&mut self, _index: Option<usize>, _fraction: f32) {}

    fn on_armed(&mut self, _index: usize) {}

    fn on_selected(&mut self, _result: SelectionResult) {}

    fn on_feedback_pulse(&mut self, _index: usize, _duration: Duration) {}

    fn on_blink(&mut self, _at: Instant) {}

    /// Dispatch an event to the matching hook
    fn emit(&mut self, event: &InteractionEvent) {
        match *event {
            InteractionEvent::CursorMoved {
                position,
                progress,
                gazed,
            } => {
                self.on_cursor_moved(position);
                self.on_progress(gazed, progress);
            }
            InteractionEvent::ItemArmed { index } => self.on_armed(index),
            InteractionEvent::ItemSelected(result) => self.on_selected(result),
            InteractionEvent::FeedbackPulse { index, duration } => {
                self.on_feedback_pulse(index, duration)
            }
            InteractionEvent::BlinkConfirmed { at } => self.on_blink(at),
        }
    }
}

/// Forward events to a render loop without ever blocking frame ingestion
impl FeedbackSink for mpsc::UnboundedSender<InteractionEvent> {
    fn emit(&mut self, event: &InteractionEvent) {
        if self.send(event.clone()).is_err() {
            tracing::trace!("Feedback receiver dropped; event discarded");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(Option<usize>, f32)>,
        armed: Vec<usize>,
        blinks: usize,
    }

    impl FeedbackSink for Recorder {
        fn on_progress(&mut self, index: Option<usize>, fraction: f32) {
            self.progress.push((index, fraction));
        }

        fn on_armed(&mut self, index: usize) {
            self.armed.push(index);
        }

        fn on_blink(&mut self, _at: Instant) {
            self.blinks += 1;
        }
    }

    #[test]
    fn test_emit_dispatches_to_hooks() {
        let mut sink = Recorder::default();
        sink.emit(&InteractionEvent::CursorMoved {
            position: Point2D::ORIGIN,
            progress: 0.25,
            gazed: Some(1),
        });
        sink.emit(&InteractionEvent::ItemArmed { index: 1 });
        sink.emit(&InteractionEvent::BlinkConfirmed { at: Instant::now() });

        assert_eq!(sink.progress, vec![(Some(1), 0.25)]);
        assert_eq!(sink.armed, vec![1]);
        assert_eq!(sink.blinks, 1);
    }

    #[test]
    fn test_channel_sink_survives_dropped_receiver() {
        let (mut tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        tx.emit(&InteractionEvent::ItemArmed { index: 0 });
    }
}
