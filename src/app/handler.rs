//! Input handling — maps key/mouse events to layout-context mutations.
//!
//! Handlers never open links themselves; they report an [`Outcome`] and the
//! run loop acts on it.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::{Action, AppConfig};
use crate::core::layout::Ui;
use crate::core::render::Point;

/// Rows scrolled per wheel notch.
const WHEEL_LINES: f32 = 3.0;
/// Rows scrolled per arrow-key press.
const KEY_LINES: f32 = 2.0;
/// Columns scrolled per horizontal step.
const COLUMN_STEP: f32 = 6.0;

/// What the run loop should do after an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed.
    Continue,
    Redraw,
    OpenLink(String),
    Quit,
}

impl Outcome {
    fn redraw_if(changed: bool) -> Self {
        if changed {
            Outcome::Redraw
        } else {
            Outcome::Continue
        }
    }
}

/// Process a key event.
pub fn handle_key(ui: &mut Ui, config: &AppConfig, key: KeyEvent) -> Outcome {
    if key.kind != KeyEventKind::Press {
        return Outcome::Continue;
    }
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Outcome::Quit;
    }

    let Some(action) = config.match_key(key) else {
        return Outcome::Continue;
    };
    let metrics = ui.metrics();
    let page = (ui.viewport().height - 2.0 * metrics.height).max(metrics.height);

    match action {
        Action::ScrollUp => scroll(ui, None, 0.0, -KEY_LINES * metrics.height),
        Action::ScrollDown => scroll(ui, None, 0.0, KEY_LINES * metrics.height),
        Action::ScrollLeft => scroll(ui, None, -COLUMN_STEP * metrics.width, 0.0),
        Action::ScrollRight => scroll(ui, None, COLUMN_STEP * metrics.width, 0.0),
        Action::PageUp => scroll(ui, None, 0.0, -page),
        Action::PageDown => scroll(ui, None, 0.0, page),
        Action::FocusNext => {
            ui.focus_next();
            Outcome::Redraw
        }
        Action::FocusPrev => {
            ui.focus_prev();
            Outcome::Redraw
        }
        Action::Activate => match ui.activate().and_then(|data| data.link) {
            Some(link) => Outcome::OpenLink(link),
            None => Outcome::Continue,
        },
        Action::Quit => Outcome::Quit,
    }
}

/// Process a mouse event.  `page_area` is the part of the terminal the page
/// is drawn into; events outside it clear the pointer.
pub fn handle_mouse(ui: &mut Ui, mouse: MouseEvent, page_area: Rect) -> Outcome {
    let Some(p) = cell_to_point(ui, page_area, mouse.column, mouse.row) else {
        let had_pointer = ui.pointer().is_some();
        ui.set_pointer(None);
        return Outcome::redraw_if(had_pointer);
    };
    let metrics = ui.metrics();
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    let wheel = WHEEL_LINES * metrics.height;
    let wheel_x = WHEEL_LINES * metrics.width * 2.0;

    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            let moved = ui.pointer() != Some(p);
            if moved {
                ui.clear_focus();
            }
            ui.set_pointer(Some(p));
            Outcome::redraw_if(moved)
        }
        MouseEventKind::Down(MouseButton::Left) => {
            ui.clear_focus();
            ui.press(p);
            Outcome::Redraw
        }
        MouseEventKind::Up(MouseButton::Left) => match ui.release(p).and_then(|data| data.link) {
            Some(link) => Outcome::OpenLink(link),
            None => Outcome::Redraw,
        },
        MouseEventKind::ScrollDown if shift => scroll(ui, Some(p), wheel_x, 0.0),
        MouseEventKind::ScrollUp if shift => scroll(ui, Some(p), -wheel_x, 0.0),
        MouseEventKind::ScrollDown => scroll(ui, Some(p), 0.0, wheel),
        MouseEventKind::ScrollUp => scroll(ui, Some(p), 0.0, -wheel),
        MouseEventKind::ScrollRight => scroll(ui, Some(p), wheel_x, 0.0),
        MouseEventKind::ScrollLeft => scroll(ui, Some(p), -wheel_x, 0.0),
        _ => Outcome::Continue,
    }
}

fn scroll(ui: &mut Ui, at: Option<Point>, dx: f32, dy: f32) -> Outcome {
    Outcome::redraw_if(ui.scroll_by(at, Point::new(dx, dy)))
}

/// Centre of terminal cell `(column, row)` in page pixels.
pub fn cell_to_point(ui: &Ui, page_area: Rect, column: u16, row: u16) -> Option<Point> {
    let inside = column >= page_area.x
        && column < page_area.x + page_area.width
        && row >= page_area.y
        && row < page_area.y + page_area.height;
    if !inside {
        return None;
    }
    let metrics = ui.metrics();
    Some(Point::new(
        (f32::from(column - page_area.x) + 0.5) * metrics.width,
        (f32::from(row - page_area.y) + 0.5) * metrics.height,
    ))
}
