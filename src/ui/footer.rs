use super::colors::{FOOTER_BG, FOOTER_KEY_FG, WHITE_COLOR};
use crate::app::{App, Focus, Overlay};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// Key hints shown in the footer for the active mode.
fn key_hints(app: &App) -> &'static [(&'static str, &'static str)] {
    match (&app.overlay, app.focus) {
        (Some(Overlay::OpenDialog), _) => &[
            ("Enter", "open"),
            ("Backspace", "parent"),
            ("Tab", "file type"),
            ("Esc", "cancel"),
        ],
        (Some(Overlay::SaveAsPrompt), _) => &[("Enter", "save"), ("Esc", "cancel")],
        (Some(_), _) => &[("Enter", "close")],
        (None, Focus::History) if app.history_search_active => {
            &[("Enter", "apply"), ("Up/Down", "select"), ("Esc", "clear")]
        }
        (None, Focus::History) => &[
            ("Enter", "open"),
            ("/", "search"),
            ("Del", "remove"),
            ("y", "copy path"),
            ("Tab", "editor"),
            ("F1", "help"),
        ],
        (None, Focus::Editor) => &[
            ("^O", "open"),
            ("^S", "save"),
            ("F12", "save as"),
            ("^R", "recent"),
            ("^Q", "quit"),
            ("F1", "help"),
        ],
    }
}

impl App {
    pub(super) fn render_footer(&self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw(" ")];
        for (key, action) in key_hints(self) {
            spans.push(Span::styled(
                *key,
                Style::default().fg(FOOTER_KEY_FG).add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(format!(" {}  ", action)));
        }

        let (row, col) = self.document.cursor();
        let position = Line::from(format!("Ln {}, Col {} ", row + 1, col + 1)).right_aligned();

        let style = Style::default().fg(WHITE_COLOR).bg(FOOTER_BG);
        Paragraph::new(Line::from(spans)).style(style).render(area, buf);
        if self.focus == Focus::Editor {
            position.render(area, buf);
        }
    }
}
