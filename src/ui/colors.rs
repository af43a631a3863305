use ratatui::style::Color;

/// Symbol used to indicate the selected row.
pub const RIGHT_ARROW: &str = "▶";
/// Marker for the record currently open in the editor.
pub const CURRENT_MARKER: &str = "●";

/// Common colors
pub const GRAY_COLOR: Color = Color::Indexed(237);
pub const BLACK_COLOR: Color = Color::Indexed(234);
pub const WHITE_COLOR: Color = Color::White;

// Title and footer
pub const TITLE_BG: Color = GRAY_COLOR;
pub const FOOTER_BG: Color = GRAY_COLOR;
pub const FOOTER_KEY_FG: Color = Color::Yellow;
pub const MODIFIED_FG: Color = Color::Yellow;

// Focus
pub const FOCUSED_BORDER: Color = Color::Cyan;
pub const UNFOCUSED_BORDER: Color = Color::DarkGray;

// Editor
pub const LINE_NUMBER_FG: Color = Color::DarkGray;
pub const CURSOR_BG: Color = WHITE_COLOR;
pub const CURSOR_FG: Color = BLACK_COLOR;

// History sidebar
pub const HISTORY_NAME_FG: Color = WHITE_COLOR;
pub const HISTORY_PATH_FG: Color = Color::Gray;
pub const HISTORY_CURRENT_FG: Color = Color::Green;
pub const HISTORY_HIGHLIGHT_BG: Color = GRAY_COLOR;
pub const HISTORY_EMPTY_FG: Color = Color::DarkGray;

// Search
pub const SEARCH_MODE_FG: Color = BLACK_COLOR;
pub const SEARCH_MODE_BG: Color = Color::Yellow;

// Open dialog
pub const BROWSER_BORDER: Color = Color::Indexed(108);
pub const BROWSER_DIR_FG: Color = Color::LightBlue;
pub const BROWSER_FILE_FG: Color = WHITE_COLOR;
pub const BROWSER_HIGHLIGHT_BG: Color = GRAY_COLOR;
pub const BROWSER_FILTER_FG: Color = Color::Yellow;

// Help
pub const HELP_BG: Color = Color::Blue;
pub const HELP_HEADER_FG: Color = Color::Yellow;

// Messages
pub const MESSAGE_INFO_FG: Color = WHITE_COLOR;
pub const MESSAGE_BORDER: Color = Color::Blue;
pub const MESSAGE_ERROR_FG: Color = Color::Red;
