//! Terminal rendering of the gaze list

use std::io::{self, Stdout, Write};
use std::time::Instant;

use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use gaze_pick_core::Point2D;

use crate::state::DemoState;

const BAR_WIDTH: usize = 10;

/// Raw-mode alternate screen, restored on drop
pub struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide)?;
        Ok(Self { out })
    }

    pub fn out(&mut self) -> &mut Stdout {
        &mut self.out
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Map a viewport point to a terminal cell
fn to_cell(state: &DemoState, point: Point2D, cols: u16, rows: u16) -> (u16, u16) {
    let fx = (point.x / state.viewport.width).clamp(0.0, 1.0);
    let fy = (point.y / state.viewport.height).clamp(0.0, 1.0);
    let x = (fx * cols.saturating_sub(1) as f32).round() as u16;
    let y = (fy * rows.saturating_sub(1) as f32).round() as u16;
    (x, y)
}

/// Dwell bar, e.g. `▓▓▓▓░░░░░░`
pub fn progress_bar(progress: f32) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * BAR_WIDTH as f32) as usize).min(BAR_WIDTH);
    "▓".repeat(filled) + &"░".repeat(BAR_WIDTH - filled)
}

pub fn render(out: &mut impl Write, state: &DemoState) -> io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let now = Instant::now();
    let pulsing = state.pulsing(now);

    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    queue!(
        out,
        SetForegroundColor(Color::Cyan),
        Print("GAZE PICK"),
        ResetColor,
        Print("  arrows/hjkl: look   b/space: blink   c: recenter   q: quit")
    )?;

    for (index, name) in state.items.iter().enumerate() {
        let rect = state.layout.row_rect(index);
        let (_, y) = to_cell(state, rect.center(), cols, rows);
        let y = y.max(2);

        let gazed = state.gazed == Some(index);
        let (color, marker) = if pulsing == Some(index) {
            (Color::Green, "✔")
        } else if state.armed == Some(index) {
            (Color::Yellow, "◉")
        } else if gazed {
            (Color::Cyan, "▸")
        } else {
            (Color::Grey, " ")
        };

        queue!(out, MoveTo(2, y), SetForegroundColor(color))?;
        if pulsing == Some(index) {
            queue!(out, SetAttribute(Attribute::Reverse))?;
        }
        queue!(out, Print(format!("{marker} {name:<24}")), SetAttribute(Attribute::Reset))?;

        if gazed {
            let label = if state.armed == Some(index) {
                "READY - blink to select".to_string()
            } else {
                progress_bar(state.progress)
            };
            queue!(out, SetForegroundColor(color), Print(format!("  {label}")))?;
        }
        queue!(out, ResetColor)?;
    }

    let (cx, cy) = to_cell(state, state.cursor, cols, rows);
    queue!(
        out,
        MoveTo(cx, cy),
        SetForegroundColor(Color::Green),
        Print("●"),
        ResetColor
    )?;

    let eye = if state.blink_lit(now) { "◡" } else { "◉" };
    let footer = format!(
        "{eye}  blinks: {}  (suppressed {})   selections: {}   last: {}",
        state.stats.blinks,
        state.stats.suppressed_blinks,
        state.stats.selections,
        state.last_choice().unwrap_or("-"),
    );
    queue!(out, MoveTo(0, rows.saturating_sub(1)), Print(footer))?;

    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0.0), "░".repeat(10));
        assert_eq!(progress_bar(0.5), "▓".repeat(5) + &"░".repeat(5));
        assert_eq!(progress_bar(1.0), "▓".repeat(10));
        assert_eq!(progress_bar(1.7), "▓".repeat(10));
    }
}
