//! The clickable "back to top" button drawn on the page pane's border.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

pub struct TriggerButton<'a> {
    pub label: &'a str,
    /// Highlight while a ride is in progress.
    pub riding: bool,
}

impl Widget for TriggerButton<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height == 0 {
            return;
        }
        let style = if self.riding {
            Theme::button_riding_style()
        } else {
            Theme::button_style()
        };
        let text = format!("[{}]", self.label);
        buf.set_line(area.x, area.y, &Line::from(Span::styled(text, style)), area.width);
    }
}
