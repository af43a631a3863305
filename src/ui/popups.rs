use super::colors::{MESSAGE_BORDER, MESSAGE_ERROR_FG, MESSAGE_INFO_FG, WHITE_COLOR};
use crate::app::App;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph, Widget},
};

/// Calculates a centered popup area within the given rect.
///
/// The popup will be centered with at least 2 characters margin on all sides.
pub fn popup_area(area: Rect, width: u16, height: u16) -> Rect {
    let min_margin = 2;

    let max_width = area.width.saturating_sub(2 * min_margin);
    let max_height = area.height.saturating_sub(2 * min_margin);

    let popup_width = width.min(max_width);
    let popup_height = height.min(max_height);

    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;

    Rect {
        x,
        y,
        width: popup_width,
        height: popup_height,
    }
}

impl App {
    /// Renders a centered popup that adapts to content size.
    fn render_popup(&self, message: &str, title: &str, color: Color, area: Rect, buf: &mut Buffer) {
        let lines: Vec<&str> = message.split('\n').collect();
        let max_line_width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);

        let popup_width = (max_line_width as u16).saturating_add(6);
        let popup_height = (lines.len() as u16).saturating_add(4);
        let popup_area = popup_area(area, popup_width, popup_height);

        Clear.render(popup_area, buf);

        let block = Block::default()
            .title(format!(" {} ", title))
            .title_style(Style::default().fg(color))
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(if color == MESSAGE_ERROR_FG { color } else { MESSAGE_BORDER }))
            .padding(Padding::horizontal(2));

        Paragraph::new(message)
            .block(block)
            .alignment(Alignment::Center)
            .render(popup_area, buf);
    }

    pub(super) fn render_message_popup(&self, message: &str, area: Rect, buf: &mut Buffer) {
        self.render_popup(message, "Message", MESSAGE_INFO_FG, area, buf);
    }

    pub(super) fn render_error_popup(&self, message: &str, area: Rect, buf: &mut Buffer) {
        self.render_popup(message, "Error", MESSAGE_ERROR_FG, area, buf);
    }

    /// Renders the save-as prompt with the editable target path.
    pub(super) fn render_save_as_popup(&self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(" Save as ")
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(WHITE_COLOR));
        let inner = block.inner(area);

        let width = inner.width.saturating_sub(1) as usize;
        let scroll = self.input.visual_scroll(width);
        Paragraph::new(self.input.value())
            .block(block)
            .style(Style::default().fg(WHITE_COLOR))
            .scroll((0, scroll as u16))
            .render(area, buf);

        let x = inner.x + self.input.visual_cursor().saturating_sub(scroll) as u16;
        if x < inner.right() && inner.height > 0 {
            buf[(x, inner.y)].set_style(Style::default().add_modifier(Modifier::REVERSED));
        }
    }
}
