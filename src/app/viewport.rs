//! The pager's scroll position, kept in virtual pixels.
//!
//! Terminal rows are coarse, so the offset is tracked in pixels with a fixed
//! row height.  That keeps the ride duration (which scales with distance in
//! pixels) in a pleasant range and lets the bounce move in sub-row steps that
//! round to whole rows only when drawn.

use crate::core::driver::Viewport;

#[derive(Debug, Clone)]
pub struct PageViewport {
    offset_px: f64,
    row_height_px: f64,
    line_count: usize,
    visible_rows: usize,
}

impl PageViewport {
    pub fn new(line_count: usize, row_height_px: u32) -> Self {
        Self {
            offset_px: 0.0,
            row_height_px: f64::from(row_height_px.max(1)),
            line_count,
            visible_rows: 0,
        }
    }

    /// Update the number of rows the page pane can show.
    pub fn set_visible_rows(&mut self, rows: usize) {
        self.visible_rows = rows;
        self.offset_px = self.offset_px.min(self.max_offset());
    }

    /// Furthest offset that still fills the pane.
    pub fn max_offset(&self) -> f64 {
        let rows = self.line_count.saturating_sub(self.visible_rows);
        rows as f64 * self.row_height_px
    }

    /// Index of the first line drawn.
    pub fn first_row(&self) -> usize {
        (self.offset_px / self.row_height_px).round() as usize
    }

    /// Scroll by whole rows (negative is up).
    pub fn scroll_rows(&mut self, delta: i64) {
        let target = self.offset_px + delta as f64 * self.row_height_px;
        self.scroll_to(target);
    }

    pub fn scroll_pages(&mut self, delta: i64) {
        let page = self.visible_rows.saturating_sub(1).max(1) as i64;
        self.scroll_rows(delta * page);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_to(self.max_offset());
    }
}

impl Viewport for PageViewport {
    fn scroll_offset(&self) -> f64 {
        self.offset_px
    }

    fn scroll_to(&mut self, offset: f64) {
        self.offset_px = offset.clamp(0.0, self.max_offset());
    }
}
