use std::cell::Cell;
use std::path::{Path, PathBuf};

/// The text being edited, with its file association and cursor.
#[derive(Debug)]
pub struct Document {
    /// Lines of text without line terminators. Never empty.
    lines: Vec<String>,
    /// File the document was loaded from or saved to.
    path: Option<PathBuf>,
    /// Cursor row.
    row: usize,
    /// Cursor column in characters.
    col: usize,
    /// True if the content changed since the last load or save.
    modified: bool,
    /// Whether the loaded file ended with a newline.
    trailing_newline: bool,
    /// Line terminator written back on save, `\r\n` for files loaded with one.
    line_ending: &'static str,
    /// First visible row. Updated while rendering.
    scroll: Cell<usize>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            path: None,
            row: 0,
            col: 0,
            modified: false,
            trailing_newline: false,
            line_ending: "\n",
            scroll: Cell::new(0),
        }
    }

    /// Replaces the content with a freshly opened file.
    pub fn load(&mut self, path: PathBuf, content: &str) {
        self.lines = content.lines().map(str::to_string).collect();
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
        self.trailing_newline = content.ends_with('\n');
        self.line_ending = if content.contains("\r\n") { "\r\n" } else { "\n" };
        self.path = Some(path);
        self.row = 0;
        self.col = 0;
        self.modified = false;
        self.scroll.set(0);
    }

    /// Returns the full text, lines joined with the file's line ending.
    pub fn content(&self) -> String {
        let mut content = self.lines.join(self.line_ending);
        if self.trailing_newline {
            content.push_str(self.line_ending);
        }
        content
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Marks the document as saved to `path`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.path = Some(path);
        self.modified = false;
    }

    /// Cursor position as (row, column).
    pub fn cursor(&self) -> (usize, usize) {
        (self.row, self.col)
    }

    /// Returns the first visible row for a viewport of `height` rows,
    /// scrolling just enough to keep the cursor visible.
    pub fn scroll_for(&self, height: usize) -> usize {
        let mut scroll = self.scroll.get();
        if height == 0 {
            return scroll;
        }
        if self.row < scroll {
            scroll = self.row;
        } else if self.row >= scroll + height {
            scroll = self.row + 1 - height;
        }
        self.scroll.set(scroll);
        scroll
    }

    fn line_len(&self, row: usize) -> usize {
        self.lines[row].chars().count()
    }

    fn byte_index(&self, row: usize, col: usize) -> usize {
        self.lines[row]
            .char_indices()
            .nth(col)
            .map(|(i, _)| i)
            .unwrap_or(self.lines[row].len())
    }

    pub fn insert_char(&mut self, c: char) {
        let at = self.byte_index(self.row, self.col);
        self.lines[self.row].insert(at, c);
        self.col += 1;
        self.modified = true;
    }

    /// Splits the current line at the cursor.
    pub fn insert_newline(&mut self) {
        let at = self.byte_index(self.row, self.col);
        let rest = self.lines[self.row].split_off(at);
        self.row += 1;
        self.lines.insert(self.row, rest);
        self.col = 0;
        self.modified = true;
    }

    /// Deletes the character before the cursor, joining lines at column 0.
    pub fn backspace(&mut self) {
        if self.col > 0 {
            self.col -= 1;
            let at = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(at);
            self.modified = true;
        } else if self.row > 0 {
            let line = self.lines.remove(self.row);
            self.row -= 1;
            self.col = self.line_len(self.row);
            self.lines[self.row].push_str(&line);
            self.modified = true;
        }
    }

    /// Deletes the character under the cursor, joining with the next line at the end.
    pub fn delete(&mut self) {
        if self.col < self.line_len(self.row) {
            let at = self.byte_index(self.row, self.col);
            self.lines[self.row].remove(at);
            self.modified = true;
        } else if self.row + 1 < self.lines.len() {
            let next = self.lines.remove(self.row + 1);
            self.lines[self.row].push_str(&next);
            self.modified = true;
        }
    }

    pub fn move_left(&mut self) {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row > 0 {
            self.row -= 1;
            self.col = self.line_len(self.row);
        }
    }

    pub fn move_right(&mut self) {
        if self.col < self.line_len(self.row) {
            self.col += 1;
        } else if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = 0;
        }
    }

    pub fn move_up(&mut self) {
        if self.row > 0 {
            self.row -= 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_down(&mut self) {
        if self.row + 1 < self.lines.len() {
            self.row += 1;
            self.col = self.col.min(self.line_len(self.row));
        }
    }

    pub fn move_line_start(&mut self) {
        self.col = 0;
    }

    pub fn move_line_end(&mut self) {
        self.col = self.line_len(self.row);
    }

    pub fn page_up(&mut self, rows: usize) {
        self.row = self.row.saturating_sub(rows.max(1));
        self.col = self.col.min(self.line_len(self.row));
    }

    pub fn page_down(&mut self, rows: usize) {
        self.row = (self.row + rows.max(1)).min(self.lines.len() - 1);
        self.col = self.col.min(self.line_len(self.row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(content: &str) -> Document {
        let mut doc = Document::new();
        doc.load(PathBuf::from("/tmp/doc.md"), content);
        doc
    }

    #[test]
    fn test_new_document_is_blank() {
        let doc = Document::new();
        assert_eq!(doc.content(), "");
        assert_eq!(doc.lines().len(), 1);
        assert!(doc.path().is_none());
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_load_resets_state() {
        let doc = loaded("# Title\nbody");
        assert_eq!(doc.lines(), ["# Title", "body"]);
        assert_eq!(doc.cursor(), (0, 0));
        assert_eq!(doc.path(), Some(Path::new("/tmp/doc.md")));
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_insert_and_newline() {
        let mut doc = Document::new();
        for c in "ab".chars() {
            doc.insert_char(c);
        }
        doc.move_left();
        doc.insert_newline();

        assert_eq!(doc.content(), "a\nb");
        assert_eq!(doc.cursor(), (1, 0));
        assert!(doc.is_modified());
    }

    #[test]
    fn test_insert_multibyte() {
        let mut doc = loaded("héllo");
        doc.move_line_end();
        doc.insert_char('ø');
        doc.move_left();
        doc.move_left();
        doc.backspace();
        assert_eq!(doc.content(), "héloø");
    }

    #[test]
    fn test_trailing_newline_is_kept() {
        assert_eq!(loaded("a\nb\n").content(), "a\nb\n");
        assert_eq!(loaded("a\nb").content(), "a\nb");
    }

    #[test]
    fn test_crlf_line_endings_are_kept() {
        let mut doc = loaded("# Title\r\nbody\r\n");
        assert_eq!(doc.lines(), ["# Title", "body"]);

        doc.move_down();
        doc.move_line_end();
        doc.insert_newline();
        doc.insert_char('x');
        assert_eq!(doc.content(), "# Title\r\nbody\r\nx\r\n");
    }

    #[test]
    fn test_new_document_uses_lf() {
        let mut doc = Document::new();
        doc.insert_char('a');
        doc.insert_newline();
        doc.insert_char('b');
        assert_eq!(doc.content(), "a\nb");
    }

    #[test]
    fn test_backspace_joins_lines() {
        let mut doc = loaded("one\ntwo");
        doc.move_down();
        doc.backspace();
        assert_eq!(doc.content(), "onetwo");
        assert_eq!(doc.cursor(), (0, 3));
    }

    #[test]
    fn test_delete_joins_next_line() {
        let mut doc = loaded("one\ntwo");
        doc.move_line_end();
        doc.delete();
        assert_eq!(doc.content(), "onetwo");
    }

    #[test]
    fn test_vertical_moves_clamp_column() {
        let mut doc = loaded("long line\nab");
        doc.move_line_end();
        doc.move_down();
        assert_eq!(doc.cursor(), (1, 2));
    }

    #[test]
    fn test_mark_saved_clears_modified() {
        let mut doc = Document::new();
        doc.insert_char('x');
        doc.mark_saved(PathBuf::from("/tmp/new.mdx"));
        assert!(!doc.is_modified());
        assert_eq!(doc.path(), Some(Path::new("/tmp/new.mdx")));
    }

    #[test]
    fn test_scroll_keeps_cursor_visible() {
        let content = (0..30).map(|i| i.to_string()).collect::<Vec<_>>().join("\n");
        let mut doc = loaded(&content);
        doc.page_down(20);
        assert_eq!(doc.scroll_for(10), 11);
        doc.page_up(15);
        assert_eq!(doc.scroll_for(10), 5);
    }
}
