//! Terminal event abstraction.
//!
//! A blocking reader task polls crossterm and forwards events over a channel
//! so the run loop can `select!` on input and frame ticks together.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the run loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// No input within one tick; used to advance frame time.
    Tick,
}

impl AppEvent {
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            CtEvent::Key(k) => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            _ => None,
        }
    }
}

/// Spawn the reader.  It stops when the receiver is dropped or the terminal
/// can no longer be read.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        let next = match event::poll(tick_rate) {
            Ok(true) => match event::read() {
                Ok(ev) => match AppEvent::from_crossterm(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    break;
                }
            },
            Ok(false) => AppEvent::Tick,
            Err(e) => {
                tracing::warn!("terminal poll failed: {e}");
                break;
            }
        };
        if tx.send(next).is_err() {
            break; // receiver dropped
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    #[test]
    fn only_input_and_resize_events_are_forwarded() {
        let key = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(AppEvent::from_crossterm(CtEvent::Key(key)), Some(AppEvent::Key(key)));
        assert_eq!(AppEvent::from_crossterm(CtEvent::Resize(80, 24)), Some(AppEvent::Resize(80, 24)));
        assert_eq!(AppEvent::from_crossterm(CtEvent::FocusLost), None);
    }
}
