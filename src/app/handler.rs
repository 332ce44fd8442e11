//! Input handling — maps key/mouse/focus events and frame ticks to state
//! mutations.

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::config::Action;
use crate::core::driver::{FrameOutcome, Viewport};
use crate::ui::layout::{point_in_rect, AppLayout};

use super::state::AppState;

/// Rows moved per mouse-wheel notch.
const WHEEL_ROWS: i64 = 3;

/// Process a key event.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::Elevate => start_ride(state, false),
        Action::ScrollUp => manual_scroll(state, |v| v.scroll_rows(-1)),
        Action::ScrollDown => manual_scroll(state, |v| v.scroll_rows(1)),
        Action::PageUp => manual_scroll(state, |v| v.scroll_pages(-1)),
        Action::PageDown => manual_scroll(state, |v| v.scroll_pages(1)),
        Action::Bottom => manual_scroll(state, |v| v.scroll_to_bottom()),
    }
}

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::ScrollUp => manual_scroll(state, |v| v.scroll_rows(-WHEEL_ROWS)),
        MouseEventKind::ScrollDown => manual_scroll(state, |v| v.scroll_rows(WHEEL_ROWS)),
        MouseEventKind::Down(MouseButton::Left) => {
            let Some(button) = button_area(state) else {
                return;
            };
            if point_in_rect(button, mouse.column, mouse.row) {
                start_ride(state, true);
            }
        }
        _ => {}
    }
}

/// The terminal lost focus: abort any ride and park at the top.
pub fn handle_focus_lost(state: &mut AppState) {
    state.focused = false;
    if state.elevator.force_stop() {
        state.status_message = Some("Ride aborted, parked at the top".into());
    }
}

pub fn handle_focus_gained(state: &mut AppState) {
    state.focused = true;
}

pub fn handle_resize(state: &mut AppState, area: Rect) {
    state.terminal_area = area;
    let rows = AppLayout::from_area(area).page_rows();
    state.elevator.viewport_mut().set_visible_rows(rows);
}

/// Deliver the pending ride frame, if any.  Called on every frame-timer tick.
pub fn handle_frame(state: &mut AppState) {
    let clock = state.elevator.scheduler_mut();
    let Some(handle) = clock.take_due() else {
        return;
    };
    let now = clock.now_ms();

    if state.elevator.on_frame(handle, now) == FrameOutcome::Completed {
        state.status_message = Some(format!(
            "Ding! Arrived at the top at {}",
            Local::now().format("%H:%M:%S")
        ));
    }
}

/// Where the trigger button is drawn, when one is bound.
pub fn button_area(state: &AppState) -> Option<Rect> {
    let trigger = state.elevator.trigger()?;
    Some(AppLayout::from_area(state.terminal_area).button_area(&trigger.label))
}

// ── helpers ─────────────────────────────────────────────────────

fn start_ride(state: &mut AppState, from_trigger: bool) {
    let started = if from_trigger {
        state.elevator.on_trigger()
    } else {
        state.elevator.activate()
    };
    if !started {
        return;
    }
    if let Some(duration) = state.elevator.ride_duration() {
        state.status_message = Some(format!("Going up… ({:.1}s)", duration.as_secs_f64()));
    }
}

/// The ride is the only writer while it runs; manual scrolling waits.
fn manual_scroll(state: &mut AppState, f: impl FnOnce(&mut super::viewport::PageViewport)) {
    if state.elevator.is_running() {
        return;
    }
    state.status_message = None;
    f(state.elevator.viewport_mut());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::SilentBackend;
    use crate::core::driver::duration_for;
    use crate::config::AppConfig;
    use crate::core::page::Page;

    fn state() -> AppState {
        let mut s = AppState::new(Page::demo(50), AppConfig::default(), &mut SilentBackend);
        handle_resize(&mut s, Rect::new(0, 0, 80, 24));
        s
    }

    fn press(state: &mut AppState, c: char) {
        handle_key(state, KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind: MouseEventKind::Down(MouseButton::Left),
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn scroll_keys_move_the_viewport() {
        let mut s = state();
        press(&mut s, 'j');
        press(&mut s, 'j');
        assert_eq!(s.viewport().first_row(), 2);
        press(&mut s, 'k');
        assert_eq!(s.viewport().first_row(), 1);
    }

    #[test]
    fn elevate_key_starts_ride_and_locks_manual_scroll() {
        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        let bottom = s.viewport().scroll_offset();
        assert!(bottom > 0.0);

        press(&mut s, 'g');
        assert!(s.elevator.is_running());
        let expected = duration_for(bottom);
        assert_eq!(
            s.status_message.as_deref(),
            Some(format!("Going up… ({:.1}s)", expected.as_secs_f64()).as_str())
        );

        press(&mut s, 'k');
        assert_eq!(s.viewport().scroll_offset(), bottom);
    }

    #[test]
    fn clicking_the_button_triggers_a_ride() {
        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));

        click(&mut s, 2, 2);
        assert!(!s.elevator.is_running());

        let button = button_area(&s).expect("button bound by default");
        click(&mut s, button.x, button.y);
        assert!(s.elevator.is_running());
    }

    #[test]
    fn no_button_means_clicks_do_nothing() {
        let config = AppConfig {
            show_button: false,
            ..AppConfig::default()
        };
        let mut s = AppState::new(Page::demo(50), config, &mut SilentBackend);
        handle_resize(&mut s, Rect::new(0, 0, 80, 24));
        handle_key(&mut s, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));

        assert!(button_area(&s).is_none());
        click(&mut s, 72, 22);
        assert!(!s.elevator.is_running());

        press(&mut s, 'g');
        assert!(s.elevator.is_running());
    }

    #[test]
    fn focus_loss_mid_ride_parks_at_top() {
        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::End, KeyModifiers::NONE));
        press(&mut s, 'g');
        handle_frame(&mut s);

        handle_focus_lost(&mut s);
        assert!(!s.elevator.is_running());
        assert_eq!(s.viewport().scroll_offset(), 0.0);
        assert!(!s.focused);
        assert_eq!(s.status_message.as_deref(), Some("Ride aborted, parked at the top"));

        // Nothing left to deliver.
        handle_frame(&mut s);
        assert_eq!(s.viewport().scroll_offset(), 0.0);
    }

    #[test]
    fn focus_loss_while_idle_keeps_position() {
        let mut s = state();
        press(&mut s, 'j');
        let before = s.viewport().scroll_offset();

        handle_focus_lost(&mut s);
        assert_eq!(s.viewport().scroll_offset(), before);
        assert!(s.status_message.is_none());
        handle_focus_gained(&mut s);
        assert!(s.focused);
    }

    #[test]
    fn ride_from_top_arrives_on_first_frame() {
        let mut s = state();
        press(&mut s, 'g');
        assert!(s.elevator.is_running());

        handle_frame(&mut s);
        assert!(!s.elevator.is_running());
        assert!(s.status_message.as_deref().unwrap_or("").starts_with("Ding!"));
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        press(&mut s, 'q');
        assert!(s.should_quit);

        let mut s = state();
        handle_key(&mut s, KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(s.should_quit);
    }
}
