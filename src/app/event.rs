//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background reader
//! that forwards them over a channel so the main loop stays non-blocking.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, KeyEventKind, MouseEvent};
use tokio::sync::mpsc;

/// High-level events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    /// The terminal window lost focus (needs focus-change reporting).
    FocusLost,
    FocusGained,
    Tick,
}

impl AppEvent {
    /// Map a raw crossterm event; `None` for events the app ignores.
    fn from_crossterm(ev: CtEvent) -> Option<Self> {
        match ev {
            // Windows reports both press and release; only act on press.
            CtEvent::Key(k) if k.kind != KeyEventKind::Release => Some(AppEvent::Key(k)),
            CtEvent::Mouse(m) => Some(AppEvent::Mouse(m)),
            CtEvent::Resize(w, h) => Some(AppEvent::Resize(w, h)),
            CtEvent::FocusLost => Some(AppEvent::FocusLost),
            CtEvent::FocusGained => Some(AppEvent::FocusGained),
            _ => None,
        }
    }
}

/// Spawns a blocking reader that polls the terminal for events and sends
/// them through the returned channel.
pub fn spawn_event_reader(tick_rate: Duration) -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || loop {
        // Poll with the tick rate so Tick events flow even when idle.
        let next = if event::poll(tick_rate).unwrap_or(false) {
            match event::read() {
                Ok(ev) => match AppEvent::from_crossterm(ev) {
                    Some(app_event) => app_event,
                    None => continue,
                },
                Err(e) => {
                    tracing::warn!("terminal read failed: {e}");
                    continue;
                }
            }
        } else {
            AppEvent::Tick
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
    use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};

    #[test]
    fn focus_events_pass_through() {
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::FocusLost),
            Some(AppEvent::FocusLost)
        ));
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::FocusGained),
            Some(AppEvent::FocusGained)
        ));
    }

    #[test]
    fn key_releases_are_dropped() {
        let release = KeyEvent {
            code: KeyCode::Char('g'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert!(AppEvent::from_crossterm(CtEvent::Key(release)).is_none());

        let press = KeyEvent::new(KeyCode::Char('g'), KeyModifiers::NONE);
        assert!(matches!(
            AppEvent::from_crossterm(CtEvent::Key(press)),
            Some(AppEvent::Key(_))
        ));
    }
}
