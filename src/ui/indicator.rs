//! Ride indicator — a small spinner + floor readout rendered in the
//! top-right corner of the page pane while the elevator is moving.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

/// Arrow frames cycled on each tick.
const ARROW_FRAMES: &[&str] = &["▲", "△", "▴", "△"];

/// "▲ floor 42" readout on the pane's top border.
pub struct RideIndicator {
    /// Whether to show the indicator at all.
    pub visible: bool,
    /// Monotonically increasing tick counter (drives the arrow frame).
    pub tick: u64,
    /// Current floor (first visible row).
    pub floor: usize,
}

impl Widget for RideIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if !self.visible || area.width < 20 || area.height == 0 {
            return;
        }

        let frame = ARROW_FRAMES[(self.tick as usize) % ARROW_FRAMES.len()];
        let label = format!(" {frame} floor {} ", self.floor);

        let label_width = label.chars().count() as u16;
        // Top-right, inside the corner character.
        let x = area.x + area.width.saturating_sub(label_width + 2);
        let y = area.y;

        let line = Line::from(Span::styled(label, Theme::indicator_style()));
        buf.set_line(x, y, &line, label_width);
    }
}
