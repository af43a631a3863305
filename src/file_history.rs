use serde::{Deserialize, Serialize};

/// Default maximum number of records kept in the history.
pub const DEFAULT_MAX_ENTRIES: usize = 100;

/// A previously opened file and when it was last accessed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileHistoryRecord {
    /// Path of the file, used as the identity key.
    #[serde(rename = "filePath")]
    pub path: String,
    /// Last access time in milliseconds since the Unix epoch.
    #[serde(rename = "timestamp")]
    pub last_accessed: i64,
}

impl FileHistoryRecord {
    pub fn new(path: impl Into<String>, last_accessed: i64) -> Self {
        Self {
            path: path.into(),
            last_accessed,
        }
    }

    /// Returns the file name component of the path.
    pub fn file_name(&self) -> &str {
        crate::utils::file_name(&self.path)
    }

    /// Formats the last access time in local time.
    pub fn formatted_time(&self) -> String {
        chrono::DateTime::<chrono::Utc>::from_timestamp_millis(self.last_accessed)
            .map(|utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
            })
            .unwrap_or_default()
    }
}

/// Current wall clock time in milliseconds since the Unix epoch.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Recency-ordered, deduplicated and capped list of opened files.
///
/// The most recently touched record is always last. The selection is either
/// `None` or a valid index into the list.
#[derive(Debug, Clone)]
pub struct FileHistory {
    /// Records ordered from oldest to most recent.
    records: Vec<FileHistoryRecord>,
    /// Currently selected record.
    current: Option<usize>,
    /// Maximum number of records kept.
    max_entries: usize,
    /// Source of "now" timestamps.
    clock: fn() -> i64,
}

impl Default for FileHistory {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

impl FileHistory {
    /// Creates an empty history holding at most `max_entries` records.
    pub fn new(max_entries: usize) -> Self {
        Self::with_clock(max_entries, now_millis)
    }

    /// Creates an empty history with a custom timestamp source.
    pub fn with_clock(max_entries: usize, clock: fn() -> i64) -> Self {
        Self {
            records: Vec::new(),
            current: None,
            max_entries: max_entries.max(1),
            clock,
        }
    }

    /// Replaces the timestamp source.
    pub fn set_clock(&mut self, clock: fn() -> i64) {
        self.clock = clock;
    }

    /// Replaces the content with previously persisted records.
    ///
    /// Blank paths are dropped, duplicates collapse to their most recent
    /// occurrence and only the newest `max_entries` records are kept. The
    /// last record becomes the selection.
    pub fn restore(&mut self, records: Vec<FileHistoryRecord>) {
        let mut restored: Vec<FileHistoryRecord> = Vec::with_capacity(records.len());
        for record in records {
            if record.path.trim().is_empty() {
                continue;
            }
            if let Some(existing) = restored.iter().position(|r| r.path == record.path) {
                restored.remove(existing);
            }
            restored.push(record);
        }

        let excess = restored.len().saturating_sub(self.max_entries);
        restored.drain(..excess);

        self.records = restored;
        self.current = self.records.len().checked_sub(1);
    }

    /// Records that `path` was just opened.
    ///
    /// A known path is moved to the end with a refreshed timestamp, a new one
    /// is appended. Blank paths are ignored. Returns true if the history changed.
    pub fn add(&mut self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }

        let now = (self.clock)();
        if let Some(index) = self.position(path) {
            let mut record = self.records.remove(index);
            record.last_accessed = record.last_accessed.max(now);
            self.records.push(record);
        } else {
            self.records.push(FileHistoryRecord::new(path, now));
            let excess = self.records.len().saturating_sub(self.max_entries);
            self.records.drain(..excess);
        }

        self.current = Some(self.records.len() - 1);
        true
    }

    /// Selects the record at `index` and returns it.
    ///
    /// Out of range indices leave the selection untouched and return None.
    pub fn select(&mut self, index: usize) -> Option<&FileHistoryRecord> {
        if index < self.records.len() {
            self.current = Some(index);
            self.records.get(index)
        } else {
            None
        }
    }

    /// Removes the record at `index`, adjusting the selection.
    ///
    /// Removing at or before the selection moves it one step back, or clears
    /// it when the first record was selected. Returns the removed record.
    pub fn remove(&mut self, index: usize) -> Option<FileHistoryRecord> {
        if index >= self.records.len() {
            return None;
        }

        let removed = self.records.remove(index);
        if let Some(current) = self.current
            && index <= current
        {
            self.current = current.checked_sub(1);
        }
        Some(removed)
    }

    /// Removes every record and clears the selection.
    pub fn clear(&mut self) {
        self.records.clear();
        self.current = None;
    }

    /// Returns the selected record, if any.
    pub fn current(&self) -> Option<&FileHistoryRecord> {
        self.current.and_then(|index| self.records.get(index))
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn records(&self) -> &[FileHistoryRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_entries
    }

    /// Returns the index of the record for `path`.
    pub fn position(&self, path: &str) -> Option<usize> {
        self.records.iter().position(|r| r.path == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn fixed_clock() -> i64 {
        1_000
    }

    fn paths(history: &FileHistory) -> Vec<&str> {
        history.records().iter().map(|r| r.path.as_str()).collect()
    }

    fn history_with(paths: &[&str]) -> FileHistory {
        let mut history = FileHistory::with_clock(DEFAULT_MAX_ENTRIES, fixed_clock);
        for path in paths {
            history.add(path);
        }
        history
    }

    #[test]
    fn test_new_history_is_empty() {
        let history = FileHistory::default();
        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
        assert_eq!(history.current(), None);
        assert_eq!(history.capacity(), DEFAULT_MAX_ENTRIES);
    }

    #[test]
    fn test_add_appends_and_selects_tail() {
        let history = history_with(&["/x/a.md", "/x/b.md"]);
        assert_eq!(paths(&history), ["/x/a.md", "/x/b.md"]);
        assert_eq!(history.current_index(), Some(1));
        assert_eq!(history.current().map(|r| r.path.as_str()), Some("/x/b.md"));
    }

    #[test]
    fn test_add_existing_path_promotes_to_tail() {
        let history = history_with(&["/x/a.md", "/x/b.md", "/x/a.md"]);
        assert_eq!(paths(&history), ["/x/b.md", "/x/a.md"]);
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn test_add_existing_path_keeps_length_and_updates_timestamp() {
        static NOW: AtomicI64 = AtomicI64::new(10);
        fn ticking_clock() -> i64 {
            NOW.fetch_add(10, Ordering::SeqCst)
        }

        let mut history = FileHistory::with_clock(10, ticking_clock);
        history.add("/x/a.md");
        history.add("/x/b.md");
        let before = history.records()[0].last_accessed;

        history.add("/x/a.md");

        assert_eq!(history.len(), 2);
        let promoted = &history.records()[1];
        assert_eq!(promoted.path, "/x/a.md");
        assert!(promoted.last_accessed > before);
    }

    #[test]
    fn test_add_never_moves_timestamp_backwards() {
        fn zero_clock() -> i64 {
            0
        }

        let mut history = FileHistory::with_clock(10, zero_clock);
        history.restore(vec![FileHistoryRecord::new("/x/a.md", 5_000)]);

        history.add("/x/a.md");

        assert_eq!(history.records()[0].last_accessed, 5_000);
    }

    #[test]
    fn test_add_blank_path_is_ignored() {
        let mut history = history_with(&["/x/a.md"]);
        assert!(!history.add(""));
        assert!(!history.add("   "));
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn test_add_keeps_paths_unique() {
        let history = history_with(&["/a", "/b", "/a", "/c", "/b", "/a"]);
        let mut unique = paths(&history);
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), history.len());
        assert_eq!(paths(&history), ["/c", "/b", "/a"]);
    }

    #[test]
    fn test_add_beyond_cap_evicts_oldest() {
        let mut history = FileHistory::with_clock(3, fixed_clock);
        history.add("/a");
        history.add("/b");
        history.add("/c");

        history.add("/d");

        assert_eq!(history.len(), 3);
        assert_eq!(paths(&history), ["/b", "/c", "/d"]);
        assert_eq!(history.current_index(), Some(2));
    }

    #[test]
    fn test_length_never_exceeds_cap() {
        let mut history = FileHistory::with_clock(5, fixed_clock);
        for i in 0..50 {
            history.add(&format!("/file-{}.md", i % 17));
            assert!(history.len() <= 5);
        }
    }

    #[test]
    fn test_select_in_range() {
        let mut history = history_with(&["/a", "/b", "/c"]);
        let selected = history.select(0).cloned();
        assert_eq!(selected.map(|r| r.path), Some("/a".to_string()));
        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut history = history_with(&["/a", "/b"]);
        assert_eq!(history.select(2), None);
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn test_remove_before_selection_decrements() {
        let mut history = history_with(&["/x/a.md", "/x/b.md", "/x/c.md"]);
        assert_eq!(history.current_index(), Some(2));

        history.remove(1);

        assert_eq!(paths(&history), ["/x/a.md", "/x/c.md"]);
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn test_remove_selected_first_clears_selection() {
        let mut history = history_with(&["/a", "/b"]);
        history.select(0);

        history.remove(0);

        assert_eq!(paths(&history), ["/b"]);
        assert_eq!(history.current_index(), None);
    }

    #[test]
    fn test_remove_after_selection_keeps_selection() {
        let mut history = history_with(&["/a", "/b", "/c"]);
        history.select(0);

        history.remove(2);

        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn test_remove_without_selection_keeps_none() {
        let mut history = history_with(&["/a", "/b"]);
        history.select(0);
        history.remove(0);
        assert_eq!(history.current_index(), None);

        history.remove(0);

        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut history = history_with(&["/a"]);
        assert_eq!(history.remove(5), None);
        assert_eq!(history.len(), 1);
        assert_eq!(history.current_index(), Some(0));
    }

    #[test]
    fn test_selection_stays_valid_after_removals() {
        let mut history = history_with(&["/a", "/b", "/c", "/d"]);
        for index in [3, 0, 1, 0, 0] {
            history.remove(index);
            if let Some(current) = history.current_index() {
                assert!(current < history.len());
                assert!(history.select(current).is_some());
            }
        }
    }

    #[test]
    fn test_restore_truncates_to_most_recent() {
        let mut history = FileHistory::with_clock(2, fixed_clock);
        history.restore(vec![
            FileHistoryRecord::new("/a", 1),
            FileHistoryRecord::new("/b", 2),
            FileHistoryRecord::new("/c", 3),
        ]);
        assert_eq!(paths(&history), ["/b", "/c"]);
        assert_eq!(history.current_index(), Some(1));
    }

    #[test]
    fn test_restore_empty_clears_selection() {
        let mut history = history_with(&["/a"]);
        history.restore(Vec::new());
        assert!(history.is_empty());
        assert_eq!(history.current_index(), None);
    }

    #[test]
    fn test_restore_collapses_duplicates_and_blank_paths() {
        let mut history = FileHistory::with_clock(10, fixed_clock);
        history.restore(vec![
            FileHistoryRecord::new("/a", 1),
            FileHistoryRecord::new("", 2),
            FileHistoryRecord::new("/b", 3),
            FileHistoryRecord::new("/a", 4),
        ]);
        assert_eq!(paths(&history), ["/b", "/a"]);
        assert_eq!(history.records()[1].last_accessed, 4);
    }

    #[test]
    fn test_clear() {
        let mut history = history_with(&["/a", "/b"]);
        history.clear();
        assert!(history.is_empty());
        assert_eq!(history.current(), None);
    }

    #[test]
    fn test_record_serializes_with_source_field_names() {
        let record = FileHistoryRecord::new("/x/a.md", 42);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"filePath":"/x/a.md","timestamp":42}"#);
    }
}
