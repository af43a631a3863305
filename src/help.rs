use crate::ui::colors::{HELP_BG, HELP_HEADER_FG};
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget};

fn header(title: &str) -> Line<'_> {
    Line::from(title).style(Style::default().fg(HELP_HEADER_FG).add_modifier(Modifier::BOLD))
}

pub fn render_help_popup(popup_area: Rect, buf: &mut Buffer) {
    Clear.render(popup_area, buf);

    let help_text = vec![
        header("File"),
        Line::from("Ctrl+O        Open file"),
        Line::from("Ctrl+S        Save"),
        Line::from("F12           Save as"),
        Line::from("Ctrl+Q        Quit"),
        Line::from(""),
        header("Editor"),
        Line::from("Arrows        Move cursor"),
        Line::from("Home/End      Start/end of line"),
        Line::from("PageUp/Down   Scroll a page"),
        Line::from(""),
        header("Recent files"),
        Line::from("Ctrl+R        Focus/hide sidebar"),
        Line::from("Tab           Switch focus"),
        Line::from("Up/Down j/k   Navigate"),
        Line::from("Enter         Open selected file"),
        Line::from("/             Search by file name"),
        Line::from("Del, d        Remove from history"),
        Line::from("y             Copy path"),
        Line::from("Esc           Clear search"),
        Line::from(""),
        header("Open dialog"),
        Line::from("Enter         Open file or folder"),
        Line::from("Backspace     Parent folder"),
        Line::from("Tab           Next file type"),
        Line::from(""),
        Line::from("F1 or Esc closes this help"),
    ];

    let block = Block::default()
        .title(" Help ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(HELP_BG));

    let help_popup = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(ratatui::widgets::Wrap { trim: true });

    help_popup.render(popup_area, buf);
}
