//! Application state for the gaze demo

use std::time::{Duration, Instant};

use gaze_pick_core::{InteractionEvent, ListLayout, Point2D, SessionStats, Viewport};

/// How long the eye indicator stays lit after a confirmed blink
const BLINK_FLASH: Duration = Duration::from_millis(200);

/// Everything the renderer needs, derived from interaction events
#[derive(Debug, Clone)]
pub struct DemoState {
    pub items: Vec<String>,
    pub layout: ListLayout,
    pub viewport: Viewport,
    pub cursor: Point2D,
    pub gazed: Option<usize>,
    pub progress: f32,
    pub armed: Option<usize>,
    pub pulse: Option<(usize, Instant)>,
    pub last_blink: Option<Instant>,
    /// Selections made during this run, newest last
    pub chosen: Vec<usize>,
    pub stats: SessionStats,
}

impl DemoState {
    pub fn new(items: Vec<String>, layout: ListLayout, viewport: Viewport) -> Self {
        Self {
            items,
            layout,
            viewport,
            cursor: viewport.center(),
            gazed: None,
            progress: 0.0,
            armed: None,
            pulse: None,
            last_blink: None,
            chosen: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Fold an interaction event into the view state
    pub fn apply(&mut self, event: InteractionEvent, now: Instant) {
        match event {
            InteractionEvent::CursorMoved {
                position,
                progress,
                gazed,
            } => {
                self.cursor = position;
                self.gazed = gazed;
                self.progress = progress;
                if progress < 1.0 || self.armed != gazed {
                    self.armed = None;
                }
            }
            InteractionEvent::ItemArmed { index } => self.armed = Some(index),
            InteractionEvent::ItemSelected(result) => self.chosen.push(result.selected_index),
            InteractionEvent::FeedbackPulse { index, duration } => {
                self.pulse = now.checked_add(duration).map(|until| (index, until));
            }
            InteractionEvent::BlinkConfirmed { .. } => self.last_blink = Some(now),
        }
    }

    /// Row currently flashing from a selection
    pub fn pulsing(&self, now: Instant) -> Option<usize> {
        self.pulse
            .filter(|&(_, until)| now < until)
            .map(|(index, _)| index)
    }

    pub fn blink_lit(&self, now: Instant) -> bool {
        self.last_blink
            .map(|at| now.saturating_duration_since(at) < BLINK_FLASH)
            .unwrap_or(false)
    }

    /// Most recently chosen item
    pub fn last_choice(&self) -> Option<&str> {
        self.chosen
            .last()
            .and_then(|&i| self.items.get(i))
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaze_pick_core::SelectionResult;

    fn state() -> DemoState {
        let viewport = Viewport::default();
        let items = vec!["Apples".to_string(), "Pears".to_string()];
        let layout = ListLayout::new(Point2D::ORIGIN, viewport.width, 80.0, items.len());
        DemoState::new(items, layout, viewport)
    }

    #[test]
    fn test_armed_follows_progress() {
        let mut s = state();
        let now = Instant::now();
        s.apply(InteractionEvent::ItemArmed { index: 1 }, now);
        s.apply(
            InteractionEvent::CursorMoved {
                position: Point2D::ORIGIN,
                progress: 1.0,
                gazed: Some(1),
            },
            now,
        );
        assert_eq!(s.armed, Some(1));

        s.apply(
            InteractionEvent::CursorMoved {
                position: Point2D::ORIGIN,
                progress: 0.0,
                gazed: Some(0),
            },
            now,
        );
        assert_eq!(s.armed, None);
    }

    #[test]
    fn test_selection_and_pulse() {
        let mut s = state();
        let now = Instant::now();
        s.apply(
            InteractionEvent::ItemSelected(SelectionResult {
                selected_index: 1,
                confirmed_at: now,
            }),
            now,
        );
        s.apply(
            InteractionEvent::FeedbackPulse {
                index: 1,
                duration: Duration::from_millis(300),
            },
            now,
        );

        assert_eq!(s.last_choice(), Some("Pears"));
        assert_eq!(s.pulsing(now), Some(1));
        assert_eq!(s.pulsing(now + Duration::from_millis(300)), None);
    }

    #[test]
    fn test_blink_indicator_fades() {
        let mut s = state();
        let now = Instant::now();
        s.apply(InteractionEvent::BlinkConfirmed { at: now }, now);
        assert!(s.blink_lit(now));
        assert!(!s.blink_lit(now + BLINK_FLASH));
    }
}
