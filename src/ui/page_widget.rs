//! Custom Ratatui widget that renders the paged text at the current
//! viewport offset, with a line-number gutter and a scrollbar.

use ratatui::{
    buffer::Buffer,
    layout::{Margin, Rect},
    text::{Line, Span},
    widgets::{Block, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget},
};

use crate::app::viewport::PageViewport;
use crate::core::driver::Viewport;
use crate::core::page::Page;

use super::theme::Theme;

/// The page widget — created fresh each frame.
pub struct PageWidget<'a> {
    page: &'a Page,
    viewport: &'a PageViewport,
    block: Option<Block<'a>>,
}

impl<'a> PageWidget<'a> {
    pub fn new(page: &'a Page, viewport: &'a PageViewport) -> Self {
        Self {
            page,
            viewport,
            block: None,
        }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for PageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let first = self.viewport.first_row();
        let gutter = self.page.len().to_string().len();

        for (i, line) in self
            .page
            .lines
            .iter()
            .enumerate()
            .skip(first)
            .take(inner.height as usize)
        {
            let y = inner.y + (i - first) as u16;
            let row = Line::from(vec![
                Span::styled(format!("{:>gutter$} ", i + 1), Theme::line_number_style()),
                Span::styled(line.as_str(), Theme::text_style()),
            ]);
            // Leave the last column for the scrollbar.
            buf.set_line(inner.x, y, &row, inner.width.saturating_sub(1));
        }

        if self.page.len() > inner.height as usize {
            let mut scroll = ScrollbarState::new(self.viewport.max_offset().ceil() as usize)
                .position(self.viewport.scroll_offset() as usize);
            Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None)
                .style(Theme::scrollbar_style())
                .render(area.inner(Margin::new(0, 1)), buf, &mut scroll);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    #[test]
    fn draws_from_first_visible_row() {
        let page = Page::from_text("t", &(1..=50).map(|n| format!("line {n}")).collect::<Vec<_>>().join("\n"));
        let mut viewport = PageViewport::new(page.len(), 16);
        viewport.set_visible_rows(10);
        viewport.scroll_to(16.0 * 7.0);

        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        PageWidget::new(&page, &viewport).render(area, &mut buf);

        assert!(row_text(&buf, 0).starts_with(" 8 line 8"));
        assert!(row_text(&buf, 9).starts_with("17 line 17"));
    }

    #[test]
    fn short_page_has_no_scrollbar() {
        let page = Page::from_text("t", "only");
        let viewport = PageViewport::new(page.len(), 16);
        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        PageWidget::new(&page, &viewport).render(area, &mut buf);

        assert!(row_text(&buf, 0).starts_with("1 only"));
        assert_eq!(buf[(19, 2)].symbol(), " ");
    }
}
