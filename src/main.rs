//! A terminal pager with a "back to top" button that rides the page up with
//! a bounce — and, if you give it some, elevator music.
//!
//! Run `elevator FILE` to page a file (or `-` for stdin); with no file a
//! demo tower is generated.  Press `g`/Home or click `[▲ top]` to ride.

mod app;
mod audio;
mod config;
mod core;
mod ui;

use std::io::{self, stdout, Stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::Rect,
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::time::MissedTickBehavior;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::AppConfig;
use crate::core::easing::Easing;
use crate::core::page::Page;
use crate::ui::{
    button::TriggerButton, indicator::RideIndicator, layout::AppLayout, page_widget::PageWidget,
    theme::Theme,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), version, about = "Pager with a bouncing back-to-top elevator")]
struct Cli {
    /// File to page (`-` for stdin).  Omit for a generated demo tower.
    file: Option<PathBuf>,

    /// Fixed ride length in milliseconds (default: 1.5 ms per pixel travelled).
    #[arg(long, value_name = "MS")]
    duration: Option<u64>,

    /// Music looped while riding.
    #[arg(long, value_name = "PATH")]
    main_audio: Option<PathBuf>,

    /// Sound played on arrival at the top.
    #[arg(long, value_name = "PATH")]
    end_audio: Option<PathBuf>,

    /// Don't draw or bind the clickable top button.
    #[arg(long)]
    no_button: bool,

    /// Ride curve: `bounce` or `quad`.
    #[arg(long)]
    easing: Option<Easing>,

    /// Ride frame rate.
    #[arg(long)]
    fps: Option<u32>,

    /// Virtual pixels per text row.
    #[arg(long, value_name = "PX")]
    row_height: Option<u32>,

    /// Storeys in the demo tower.
    #[arg(long, default_value_t = 60)]
    floors: usize,

    /// Write the effective settings to the config file before starting.
    #[arg(long)]
    save_config: bool,
}

impl Cli {
    /// Command-line flags win over the config file.
    fn apply(&self, config: &mut AppConfig) {
        if let Some(ms) = self.duration {
            config.duration_ms = (ms > 0).then_some(ms);
        }
        if let Some(path) = &self.main_audio {
            config.main_audio = Some(path.clone());
        }
        if let Some(path) = &self.end_audio {
            config.end_audio = Some(path.clone());
        }
        if self.no_button {
            config.show_button = false;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
        if let Some(fps) = self.fps {
            config.fps = fps.clamp(10, 240);
        }
        if let Some(px) = self.row_height {
            config.row_height_px = px.clamp(1, 64);
        }
    }
}

type Tui = Terminal<CrosstermBackend<Stdout>>;

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // the TUI owns stdout
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    cli.apply(&mut config);
    if cli.save_config {
        config.save()?;
    }

    let page = match &cli.file {
        Some(path) => Page::load(path)?,
        None => Page::demo(cli.floors),
    };

    // Keep the backend alive for the whole session: it owns the audio output.
    let mut audio = audio::default_backend();
    let mut state = AppState::new(page, config, audio.as_mut());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stdout(), EnterAlternateScreen, EnableMouseCapture, EnableFocusChange)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run(&mut terminal, &mut state).await;

    // ── teardown ──────────────────────────────────────────────
    state.elevator.dispose();
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

async fn run(terminal: &mut Tui, state: &mut AppState) -> Result<()> {
    let size = terminal.size()?;
    handler::handle_resize(state, Rect::new(0, 0, size.width, size.height));

    let mut events = spawn_event_reader(Duration::from_millis(100));
    let mut frame_timer = tokio::time::interval(state.config.frame_interval());
    frame_timer.set_missed_tick_behavior(MissedTickBehavior::Skip);

    // ── event loop ────────────────────────────────────────────
    loop {
        terminal.draw(|frame| draw(frame, state))?;

        tokio::select! {
            biased;

            Some(event) = events.recv() => {
                match event {
                    AppEvent::Key(k) => handler::handle_key(state, k),
                    AppEvent::Mouse(m) => handler::handle_mouse(state, m),
                    AppEvent::Resize(w, h) => handler::handle_resize(state, Rect::new(0, 0, w, h)),
                    AppEvent::FocusLost => handler::handle_focus_lost(state),
                    AppEvent::FocusGained => handler::handle_focus_gained(state),
                    AppEvent::Tick => state.tick = state.tick.wrapping_add(1),
                }
            }

            _ = frame_timer.tick(), if state.elevator.is_running() => {
                state.tick = state.tick.wrapping_add(1);
                handler::handle_frame(state);
            }

            else => break,
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame, state: &AppState) {
    let layout = AppLayout::from_area(frame.area());
    let riding = state.elevator.is_running();

    let page_block = Block::default()
        .title(format!(" {} ", state.page.title))
        .title_style(Theme::title_style())
        .borders(Borders::ALL)
        .border_style(Theme::border_style(state.focused));

    frame.render_widget(
        PageWidget::new(&state.page, state.viewport()).block(page_block),
        layout.page_area,
    );

    frame.render_widget(
        RideIndicator {
            visible: riding,
            tick: state.tick / 4,
            floor: state.current_floor(),
        },
        layout.page_area,
    );

    if let Some(trigger) = state.elevator.trigger() {
        frame.render_widget(
            TriggerButton {
                label: &trigger.label,
                riding,
            },
            layout.button_area(&trigger.label),
        );
    }

    let hint = state.config.status_bar_hint();
    let status_text = state.status_message.as_deref().unwrap_or(&hint);
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );
}
