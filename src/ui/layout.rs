//! Layout helpers — split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout with the page pane and a bottom status bar.
pub struct AppLayout {
    pub page_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(3),    // page pane (takes all remaining space)
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            page_area: chunks[0],
            status_area: chunks[1],
        }
    }

    /// Rows of text visible inside the page pane's border.
    pub fn page_rows(&self) -> usize {
        self.page_area.height.saturating_sub(2) as usize
    }

    /// Where the trigger button sits: on the bottom border, right-aligned,
    /// as `[label]`.
    pub fn button_area(&self, label: &str) -> Rect {
        let width = (label.chars().count() as u16 + 2).min(self.page_area.width.saturating_sub(2));
        let x = self
            .page_area
            .right()
            .saturating_sub(width + 2)
            .max(self.page_area.x);
        let y = self.page_area.bottom().saturating_sub(1);
        Rect::new(x, y, width, 1.min(self.page_area.height))
    }
}

/// Is the cell `(col, row)` inside `rect`?
pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x && col < rect.right() && row >= rect.y && row < rect.bottom()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_bar_is_last_row() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.status_area, Rect::new(0, 23, 80, 1));
        assert_eq!(layout.page_area, Rect::new(0, 0, 80, 23));
        assert_eq!(layout.page_rows(), 21);
    }

    #[test]
    fn button_hugs_bottom_right_border() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        let button = layout.button_area("▲ top");
        assert_eq!(button, Rect::new(71, 22, 7, 1));
        assert!(point_in_rect(button, 71, 22));
        assert!(point_in_rect(button, 77, 22));
        assert!(!point_in_rect(button, 78, 22));
        assert!(!point_in_rect(button, 75, 21));
    }
}
