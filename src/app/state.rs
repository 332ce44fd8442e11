//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use ratatui::layout::Rect;

use crate::audio::AudioBackend;
use crate::config::AppConfig;
use crate::core::elevator::Elevator;
use crate::core::page::Page;

use super::frames::FrameClock;
use super::viewport::PageViewport;

/// The elevator as wired into the pager.
pub type PagerElevator = Elevator<FrameClock, PageViewport>;

/// Top-level application state.
pub struct AppState {
    /// The text being paged.
    pub page: Page,
    /// Ride controller; owns the viewport and the frame clock.
    pub elevator: PagerElevator,
    /// Keybindings and ride settings.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Full terminal area as of the last draw/resize.
    pub terminal_area: Rect,
    /// Monotonic tick counter (drives the ride indicator glyph).
    pub tick: u64,
    /// Whether the terminal window currently has focus.
    pub focused: bool,
}

impl AppState {
    pub fn new(page: Page, config: AppConfig, audio: &mut dyn AudioBackend) -> Self {
        let viewport = PageViewport::new(page.len(), config.row_height_px);
        let elevator = Elevator::initialize(config.elevator_options(), audio, FrameClock::new(), viewport);
        Self {
            page,
            elevator,
            config,
            should_quit: false,
            status_message: None,
            terminal_area: Rect::default(),
            tick: 0,
            focused: true,
        }
    }

    pub fn viewport(&self) -> &PageViewport {
        self.elevator.viewport()
    }

    /// Floor number shown while riding: rows from the top of the page.
    pub fn current_floor(&self) -> usize {
        self.viewport().first_row()
    }
}
