use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{
        Block, List, ListState, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};

/// Helper for rendering a selectable list with a scrollbar, or a
/// placeholder when there is nothing to show.
pub struct ScrollableList<'a> {
    items: Vec<Line<'a>>,
    selected_index: usize,
    viewport_offset: usize,
    highlight_symbol: &'a str,
    highlight_style: Style,
    placeholder: Line<'a>,
}

impl<'a> ScrollableList<'a> {
    pub fn new(items: Vec<Line<'a>>) -> Self {
        Self {
            items,
            selected_index: 0,
            viewport_offset: 0,
            highlight_symbol: "",
            highlight_style: Style::default(),
            placeholder: Line::default(),
        }
    }

    /// Sets the selected row and the first visible row.
    pub fn selection(mut self, selected_index: usize, viewport_offset: usize) -> Self {
        self.selected_index = selected_index;
        self.viewport_offset = viewport_offset;
        self
    }

    pub fn highlight_symbol(mut self, symbol: &'a str) -> Self {
        self.highlight_symbol = symbol;
        self
    }

    pub fn highlight_style(mut self, style: Style) -> Self {
        self.highlight_style = style;
        self
    }

    /// Text shown instead of the list when it has no rows.
    pub fn placeholder(mut self, placeholder: impl Into<Line<'a>>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Renders into `area` and returns the height available for rows.
    pub fn render(self, area: Rect, buf: &mut Buffer, block: Block<'a>) -> usize {
        let inner_area = block.inner(area);
        block.render(area, buf);

        if self.items.is_empty() {
            Paragraph::new(self.placeholder)
                .alignment(Alignment::Center)
                .render(inner_area, buf);
            return inner_area.height as usize;
        }

        let [list_area, scrollbar_area] =
            Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)]).areas(inner_area);

        let total_count = self.items.len();
        let list = List::new(self.items)
            .highlight_symbol(self.highlight_symbol)
            .highlight_style(self.highlight_style);

        let mut list_state = ListState::default();
        list_state.select(Some(self.selected_index));
        *list_state.offset_mut() = self.viewport_offset;
        StatefulWidget::render(list, list_area, buf, &mut list_state);

        if total_count > list_area.height as usize {
            let mut scrollbar_state = ScrollbarState::new(total_count)
                .position(self.selected_index)
                .viewport_content_length(0);
            let scrollbar = Scrollbar::default()
                .orientation(ScrollbarOrientation::VerticalRight)
                .begin_symbol(None)
                .end_symbol(None);
            StatefulWidget::render(scrollbar, scrollbar_area, buf, &mut scrollbar_state);
        }

        list_area.height as usize
    }
}
