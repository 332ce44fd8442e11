//! User configuration — keybindings, ride settings and persistence.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/elevator/config.toml` (default `~/.config/elevator/config.toml`).
//! Command-line flags override whatever is read from here.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::easing::Easing;
use crate::core::elevator::{ElevatorOptions, TriggerElement};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions in the pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Bottom,
    Elevate,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used when saving).
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Bottom,
        Action::Elevate,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Bottom => "bottom",
            Action::Elevate => "elevate",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding — key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    const MODIFIER_MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Does this binding match a key event?  Only CTRL/ALT/SHIFT are
    /// compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code
            && (self.modifiers & Self::MODIFIER_MASK) == (event.modifiers & Self::MODIFIER_MASK)
    }

    /// Short label for the status bar (e.g. `"Alt+↑"`, `"g"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        });
        s
    }

    /// Config-file form (e.g. `"Alt+Up"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&self.key_name());
        s
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        for (flag, name) in [
            (KeyModifiers::CONTROL, "Ctrl+"),
            (KeyModifiers::ALT, "Alt+"),
            (KeyModifiers::SHIFT, "Shift+"),
        ] {
            if self.modifiers.contains(flag) {
                s.push_str(name);
            }
        }
        s
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Up"`, `"g"`, `"Home"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            k if k.starts_with('f') && k.len() > 1 => KeyCode::F(k[1..].parse().ok()?),
            // Single characters keep their case: `G` and `g` differ.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── config ────────────

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_ROW_HEIGHT_PX: u32 = 16;

/// Application configuration — keybindings and ride settings.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Fixed ride length; `None` derives it from the distance.
    pub duration_ms: Option<u64>,
    pub main_audio: Option<PathBuf>,
    pub end_audio: Option<PathBuf>,
    pub easing: Easing,
    /// Draw (and bind) the clickable "top" button.
    pub show_button: bool,
    /// Frame rate of the ride.
    pub fps: u32,
    /// Virtual pixels per text row.
    pub row_height_px: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            duration_ms: None,
            main_audio: None,
            end_audio: None,
            easing: Easing::default(),
            show_button: true,
            fps: DEFAULT_FPS,
            row_height_px: DEFAULT_ROW_HEIGHT_PX,
        }
    }
}

impl AppConfig {
    /// Built-in keybindings.
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(KeyCode::Up, n), KeyBind::new(KeyCode::Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(KeyCode::Down, n), KeyBind::new(KeyCode::Char('j'), n)]);
        m.insert(PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(KeyCode::Char('b'), n)]);
        m.insert(PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(KeyCode::Char(' '), n)]);
        m.insert(Bottom, vec![KeyBind::new(KeyCode::End, n), KeyBind::new(KeyCode::Char('G'), KeyModifiers::SHIFT)]);
        m.insert(Elevate, vec![KeyBind::new(KeyCode::Home, n), KeyBind::new(KeyCode::Char('g'), n)]);
        m.insert(Quit, vec![KeyBind::new(KeyCode::Char('q'), n), KeyBind::new(KeyCode::Esc, n)]);

        m
    }

    /// Find the action that matches a key event.  When multiple bindings
    /// match, the one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .flat_map(|(&action, binds)| binds.iter().map(move |b| (action, b)))
            .filter(|(_, b)| b.matches(event))
            .max_by_key(|(_, b)| b.modifiers.bits().count_ones())
            .map(|(action, _)| action)
    }

    /// Short display of the first binding only (for the status bar).
    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Build the status-bar hint string from current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: scroll | {}: bottom | {}: elevate | {}: quit",
            self.short_binding(Action::ScrollUp),
            self.short_binding(Action::ScrollDown),
            self.short_binding(Action::Bottom),
            self.short_binding(Action::Elevate),
            self.short_binding(Action::Quit),
        )
    }

    /// Options handed to the elevator controller.
    pub fn elevator_options(&self) -> ElevatorOptions {
        ElevatorOptions {
            element: self.show_button.then(TriggerElement::default),
            duration: self.duration_ms.map(Duration::from_millis),
            main_audio: self.main_audio.clone(),
            end_audio: self.end_audio.clone(),
            easing: self.easing,
        }
    }

    /// Time between ride frames.
    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.fps.max(1)))
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        match std::fs::read_to_string(&path) {
            Ok(contents) => Self::parse(&contents),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "cannot read config: {e}");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    fn parse(s: &str) -> Self {
        let mut config = Self::default();

        for line in s.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');

            match key {
                "duration_ms" => {
                    config.duration_ms = value.parse::<u64>().ok().filter(|ms| *ms > 0);
                    continue;
                }
                "main_audio" => {
                    config.main_audio = non_empty_path(value);
                    continue;
                }
                "end_audio" => {
                    config.end_audio = non_empty_path(value);
                    continue;
                }
                "easing" => {
                    if let Ok(easing) = value.parse() {
                        config.easing = easing;
                    }
                    continue;
                }
                "show_button" => {
                    match value {
                        "true" => config.show_button = true,
                        "false" => config.show_button = false,
                        _ => tracing::debug!(value, "show_button must be true or false; keeping default"),
                    }
                    continue;
                }
                "fps" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.fps = v.clamp(10, 240);
                    }
                    continue;
                }
                "row_height_px" => {
                    if let Ok(v) = value.parse::<u32>() {
                        config.row_height_px = v.clamp(1, 64);
                    }
                    continue;
                }
                _ => {}
            }

            let Some(action) = Action::from_config_key(key) else {
                tracing::debug!(key, "unknown config key ignored");
                continue;
            };

            let parsed: Vec<KeyBind> = value
                .split(',')
                .filter_map(|part| KeyBind::parse(part.trim().trim_matches('"')))
                .collect();
            if !parsed.is_empty() {
                config.bindings.insert(action, parsed);
            }
        }

        config
    }

    fn serialise(&self) -> String {
        let opt_path = |p: &Option<PathBuf>| {
            p.as_ref()
                .map(|p| format!("\"{}\"", p.display()))
                .unwrap_or_else(|| "\"\"".into())
        };

        let mut lines = vec![
            "# elevator configuration".to_string(),
            String::new(),
            "# Ride settings (duration_ms = 0 derives it from the distance)".to_string(),
            format!("duration_ms = {}", self.duration_ms.unwrap_or(0)),
            format!("main_audio = {}", opt_path(&self.main_audio)),
            format!("end_audio = {}", opt_path(&self.end_audio)),
            format!("easing = {}", self.easing),
            format!("show_button = {}", self.show_button),
            format!("fps = {}", self.fps),
            format!("row_height_px = {}", self.row_height_px),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            "# Modifiers: Ctrl+, Alt+, Shift+ (prefix)".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn non_empty_path(value: &str) -> Option<PathBuf> {
    (!value.is_empty()).then(|| PathBuf::from(value))
}

/// Return the config file path (`$XDG_CONFIG_HOME/elevator/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("elevator").join("config.toml")
}
