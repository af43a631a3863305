use super::colors::{BROWSER_BORDER, BROWSER_DIR_FG, BROWSER_FILE_FG, BROWSER_FILTER_FG, BROWSER_HIGHLIGHT_BG, RIGHT_ARROW};
use super::scrollable_list::ScrollableList;
use crate::app::App;
use crate::utils::truncate_start;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

impl App {
    /// Renders the open file dialog.
    pub(super) fn render_open_dialog(&self, area: Rect, buf: &mut Buffer) {
        let Some(browser) = &self.file_browser else {
            return;
        };
        Clear.render(area, buf);

        let max_title = area.width.saturating_sub(4) as usize;
        let filter_label =
            Line::from(format!(" {} ", browser.filter().label())).style(Style::default().fg(BROWSER_FILTER_FG));
        let block = Block::default()
            .title(format!(" {} ", truncate_start(&browser.cwd().to_string_lossy(), max_title)))
            .title_alignment(Alignment::Center)
            .title_style(Style::default().add_modifier(Modifier::BOLD))
            .title_bottom(filter_label.centered())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(BROWSER_BORDER));

        let items: Vec<Line> = browser
            .entries()
            .iter()
            .map(|entry| {
                if entry.is_dir {
                    Line::from(format!("{}/", entry.name)).style(Style::default().fg(BROWSER_DIR_FG))
                } else {
                    Line::from(entry.name.as_str()).style(Style::default().fg(BROWSER_FILE_FG))
                }
            })
            .collect();

        let height = ScrollableList::new(items)
            .selection(browser.view().selected_index(), browser.view().viewport_offset())
            .highlight_symbol(RIGHT_ARROW)
            .highlight_style(Style::default().bg(BROWSER_HIGHLIGHT_BG).add_modifier(Modifier::BOLD))
            .placeholder("No matching files")
            .render(area, buf, block);

        browser.view().set_viewport_height(height);
    }
}
