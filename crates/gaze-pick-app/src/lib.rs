//! gaze-pick-app: terminal demo of dwell-and-blink list selection
//!
//! The keyboard stands in for the face tracker (simulating gaze direction and
//! blinks) and the terminal stands in for the list view:
//! - Arrow keys or h/j/k/l: move gaze
//! - b or Space: blink
//! - c: recenter gaze
//! - q, Esc or Ctrl-C: quit

mod simulator;
mod state;
pub mod ui;

pub use simulator::{InputSimulator, SimulatedSensor};
pub use state::DemoState;

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyModifiers};
use futures::StreamExt;
use gaze_pick_config::GazeConfig;
use gaze_pick_core::{GazeSession, HitMapper, InteractionController, ListLayout, Point2D, Viewport};
use tokio::sync::mpsc;
use tracing::info;

use ui::TerminalGuard;

/// Sensor cadence of the face tracker being simulated
const FRAME_INTERVAL: Duration = Duration::from_millis(100);
const REDRAW_INTERVAL: Duration = Duration::from_millis(33);
const ROW_HEIGHT: f32 = 64.0;

const PRODUCE: &[&str] = &[
    "Apples", "Bananas", "Cherries", "Dates", "Elderberries", "Figs", "Grapes", "Honeydew",
    "Kiwis", "Lemons", "Mangoes", "Nectarines",
];

/// Item names for the demo list
pub fn demo_items(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match PRODUCE.get(i) {
            Some(name) => (*name).to_string(),
            None => format!("Item {}", i + 1),
        })
        .collect()
}

/// Rows stacked from the top of the viewport, centred vertically
pub fn list_layout(viewport: Viewport, rows: usize, padding: f32) -> ListLayout {
    let height = rows as f32 * ROW_HEIGHT;
    let top = ((viewport.height - height) / 2.0).max(0.0);
    ListLayout::new(Point2D::new(0.0, top), viewport.width, ROW_HEIGHT, rows).with_padding(padding)
}

fn is_quit(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

/// Run the demo until the user quits
pub async fn run_demo(config: GazeConfig, items: usize) -> Result<()> {
    let catalog = demo_items(items);
    let viewport = Viewport::default();
    let layout = list_layout(viewport, catalog.len(), config.dwell.hit_padding)
        .with_cursor_radius(config.cursor.size / 2.0);

    let controller = InteractionController::new(
        &config,
        viewport,
        HitMapper::new(layout, catalog.len()),
    );
    let simulator = Arc::new(Mutex::new(InputSimulator::new()));
    let mut sensor = SimulatedSensor::new(
        Arc::clone(&simulator),
        FRAME_INTERVAL,
        config.session.frame_queue,
    );

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let mut session = GazeSession::new(controller, &config);
    session.start(&mut sensor, events_tx)?;

    let mut state = DemoState::new(catalog, layout, viewport);
    let mut terminal = TerminalGuard::enter()?;
    let mut keys = EventStream::new();
    let mut redraw = tokio::time::interval(REDRAW_INTERVAL);

    loop {
        tokio::select! {
            key = keys.next() => match key {
                Some(Ok(Event::Key(key))) => {
                    if is_quit(&key) {
                        break;
                    }
                    simulator
                        .lock()
                        .unwrap_or_else(|e| e.into_inner())
                        .process_key(key);
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    session.stop();
                    return Err(e.into());
                }
                None => break,
            },
            Some(event) = events_rx.recv() => state.apply(event, Instant::now()),
            _ = redraw.tick() => {
                state.stats = session.stats();
                ui::render(terminal.out(), &state)?;
            }
        }
    }

    session.stop();
    info!("Demo finished with {} selections", state.chosen.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaze_pick_core::HitTest;

    #[test]
    fn test_demo_items_fall_back_to_numbers() {
        let items = demo_items(14);
        assert_eq!(items[0], "Apples");
        assert_eq!(items[13], "Item 14");
    }

    #[test]
    fn test_layout_is_centred() {
        let viewport = Viewport::new(400.0, 800.0);
        let layout = list_layout(viewport, 4, 0.0);
        assert_eq!(layout.origin.y, 272.0);
        // The middle of the screen sits on the boundary of rows 1 and 2
        assert_eq!(layout.hit_test(viewport.center()), Some(2));
    }

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty())));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::empty())));
    }
}
