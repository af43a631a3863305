use super::colors::{
    CURRENT_MARKER, FOCUSED_BORDER, HISTORY_CURRENT_FG, HISTORY_EMPTY_FG, HISTORY_HIGHLIGHT_BG, HISTORY_NAME_FG,
    HISTORY_PATH_FG, RIGHT_ARROW, SEARCH_MODE_BG, SEARCH_MODE_FG, UNFOCUSED_BORDER,
};
use super::scrollable_list::ScrollableList;
use crate::app::{App, Focus};
use crate::utils::truncate_start;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

impl App {
    pub(super) fn render_history_sidebar(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == Focus::History && self.overlay.is_none();
        let border_color = if focused { FOCUSED_BORDER } else { UNFOCUSED_BORDER };

        let rows = self.visible_history();
        let title = if self.history_filter.is_active() {
            format!(" Recent Files ({}/{}) ", rows.len(), self.history.len())
        } else {
            format!(" Recent Files ({}) ", self.history.len())
        };

        let selected_time = self
            .selected_history_index()
            .and_then(|index| self.history.records().get(index))
            .map(|record| format!(" {} ", record.formatted_time()))
            .unwrap_or_default();

        let block = Block::default()
            .title(title)
            .title_bottom(Line::from(selected_time).style(Style::default().fg(HISTORY_PATH_FG)).centered())
            .title_alignment(Alignment::Center)
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        // Search bar sits below the list while a query is typed or applied
        let list_area = if self.history_search_active || self.history_filter.is_active() {
            let [list_area, search_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
            self.render_history_search(search_area, buf);
            list_area
        } else {
            area
        };

        let current = self.history.current_index();
        let path_width = list_area.width.saturating_sub(6) as usize;
        let items: Vec<Line> = rows
            .iter()
            .map(|entry| {
                let name = entry.record.file_name();
                let dir = entry.record.path[..entry.record.path.len() - name.len()].trim_end_matches(['/', '\\']);
                let is_current = Some(entry.original_index) == current;
                let marker = if is_current { CURRENT_MARKER } else { " " };
                let name_color = if is_current { HISTORY_CURRENT_FG } else { HISTORY_NAME_FG };
                Line::from(vec![
                    Span::styled(marker, Style::default().fg(HISTORY_CURRENT_FG)),
                    Span::raw(" "),
                    Span::styled(name, Style::default().fg(name_color).add_modifier(Modifier::BOLD)),
                    Span::raw(" "),
                    Span::styled(
                        truncate_start(dir, path_width.saturating_sub(name.chars().count())),
                        Style::default().fg(HISTORY_PATH_FG),
                    ),
                ])
            })
            .collect();

        let placeholder = if self.history.is_empty() {
            "No recent files"
        } else {
            "No matches"
        };

        let highlight_style = if focused {
            Style::default().bg(HISTORY_HIGHLIGHT_BG).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        let height = ScrollableList::new(items)
            .selection(self.history_view.selected_index(), self.history_view.viewport_offset())
            .highlight_symbol(if focused { RIGHT_ARROW } else { " " })
            .highlight_style(highlight_style)
            .placeholder(Line::from(placeholder).style(Style::default().fg(HISTORY_EMPTY_FG)))
            .render(list_area, buf, block);

        self.history_view.set_viewport_height(height);
    }

    fn render_history_search(&self, area: Rect, buf: &mut Buffer) {
        let query = if self.history_search_active {
            self.input.value()
        } else {
            self.history_filter.query()
        };
        Paragraph::new(format!(" /{}", query))
            .style(Style::default().fg(SEARCH_MODE_FG).bg(SEARCH_MODE_BG))
            .render(area, buf);

        if self.history_search_active {
            let x = area.x + 2 + self.input.visual_cursor() as u16;
            if x < area.right() && area.height > 0 {
                buf[(x, area.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
            }
        }
    }
}
