pub mod colors;
mod browser;
mod editor;
mod footer;
mod popups;
mod scrollable_list;
mod sidebar;

use crate::app::{App, Overlay};
use crate::help::render_help_popup;
use crate::utils::truncate_start;
use colors::{MODIFIED_FG, TITLE_BG, WHITE_COLOR};
pub use popups::popup_area;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
};

/// Maximum length for file path display in the title bar.
const MAX_PATH_LENGTH: usize = 90;
/// Width of the history sidebar.
const SIDEBAR_WIDTH: u16 = 40;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [top, middle, bottom] =
            Layout::vertical([Constraint::Length(1), Constraint::Fill(1), Constraint::Length(1)]).areas(area);

        self.render_title(top, buf);

        // Main view
        if self.history_visible {
            let [sidebar_area, editor_area] =
                Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Fill(1)]).areas(middle);
            self.render_history_sidebar(sidebar_area, buf);
            self.render_editor(editor_area, buf);
        } else {
            self.render_editor(middle, buf);
        }

        self.render_footer(bottom, buf);

        // Overlays
        match &self.overlay {
            Some(Overlay::OpenDialog) => self.render_open_dialog(popup_area(area, 80, 24), buf),
            Some(Overlay::SaveAsPrompt) => self.render_save_as_popup(popup_area(area, 80, 3), buf),
            Some(Overlay::Message(message)) => self.render_message_popup(message, area, buf),
            Some(Overlay::Error(message)) => self.render_error_popup(message, area, buf),
            None => {}
        }

        if self.help_visible {
            render_help_popup(popup_area(area, 56, 30), buf);
        }
    }
}

impl App {
    fn render_title(&self, area: Rect, buf: &mut Buffer) {
        let file = match self.document.path() {
            Some(path) => truncate_start(&path.to_string_lossy(), MAX_PATH_LENGTH),
            None => "[No file]".to_string(),
        };
        let mut spans = vec![Span::raw(" "), Span::raw(file)];
        if self.document.is_modified() {
            spans.push(Span::styled(" [+]", Style::default().fg(MODIFIED_FG)));
        }

        let title_left = Line::from(spans);
        let title_middle = Line::from(" mdxedit ").centered();
        let title_right = Line::from(format!("v{} ", env!("CARGO_PKG_VERSION")))
            .right_aligned()
            .style(Style::default().fg(WHITE_COLOR));
        Block::default()
            .title_bottom(title_left)
            .title_bottom(title_middle)
            .title_bottom(title_right)
            .style(Style::default().bg(TITLE_BG))
            .render(area, buf);
    }
}
