//! Outward interaction events

use std::time::{Duration, Instant};

use crate::spatial::Point2D;

/// A confirmed selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionResult {
    /// Index into the externally owned item list
    pub selected_index: usize,
    pub confirmed_at: Instant,
}

/// Event emitted by the interaction controller
#[derive(Debug, Clone, PartialEq)]
pub enum InteractionEvent {
    /// Cursor state after a frame or tick
    CursorMoved {
        /// Smoothed cursor position in viewport units
        position: Point2D,
        /// Dwell progress on the gazed item (0-1)
        progress: f32,
        /// Item under the cursor, if any
        gazed: Option<usize>,
    },

    /// Dwell completed; the item now accepts a blink
    ItemArmed { index: usize },

    /// A blink confirmed the armed item
    ItemSelected(SelectionResult),

    /// Start of the confirmation pulse (visual/haptic)
    FeedbackPulse { index: usize, duration: Duration },

    /// A blink passed the cooldown, whether or not it selected anything
    BlinkConfirmed { at: Instant },
}

impl InteractionEvent {
    /// Check if this is a cursor update
    pub fn is_cursor(&self) -> bool {
        matches!(self, InteractionEvent::CursorMoved { .. })
    }

    /// The selection carried by this event, if any
    pub fn selection(&self) -> Option<&SelectionResult> {
        match self {
            InteractionEvent::ItemSelected(result) => Some(result),
            _ => None,
        }
    }
}
