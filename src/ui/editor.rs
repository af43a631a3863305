use super::colors::{CURSOR_BG, CURSOR_FG, FOCUSED_BORDER, LINE_NUMBER_FG, UNFOCUSED_BORDER};
use crate::app::{App, Focus};
use crate::utils::file_name;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Widget},
};

impl App {
    pub(super) fn render_editor(&self, area: Rect, buf: &mut Buffer) {
        let focused = self.focus == Focus::Editor && self.overlay.is_none() && !self.help_visible;
        let border_color = if focused { FOCUSED_BORDER } else { UNFOCUSED_BORDER };

        let title = match self.document.path() {
            Some(path) => format!(" {} ", file_name(&path.to_string_lossy())),
            None => " untitled ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color));

        let inner = block.inner(area);
        block.render(area, buf);

        let height = inner.height as usize;
        self.editor_height.set(height);

        let lines = self.document.lines();
        let gutter = lines.len().to_string().len() + 1;
        let text_width = (inner.width as usize).saturating_sub(gutter + 1);
        let (row, col) = self.document.cursor();
        let scroll = self.document.scroll_for(height);
        let h_scroll = (col + 1).saturating_sub(text_width);

        let visible: Vec<Line> = lines
            .iter()
            .enumerate()
            .skip(scroll)
            .take(height)
            .map(|(index, line)| {
                let text: String = line.chars().skip(h_scroll).take(text_width).collect();
                Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", index + 1, width = gutter),
                        Style::default().fg(LINE_NUMBER_FG),
                    ),
                    Span::raw(text),
                ])
            })
            .collect();
        Paragraph::new(visible).render(inner, buf);

        if focused && row >= scroll && row < scroll + height {
            let x = inner.x + (gutter + 1 + col.saturating_sub(h_scroll)) as u16;
            let y = inner.y + (row - scroll) as u16;
            if x < inner.right() && y < inner.bottom() {
                buf[(x, y)].set_style(Style::default().fg(CURSOR_FG).bg(CURSOR_BG));
            }
        }
    }
}
