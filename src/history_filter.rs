use crate::file_history::FileHistoryRecord;
use crate::utils::contains_ignore_case;

/// A record in the filtered view together with its position in the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilteredEntry<'a> {
    pub record: &'a FileHistoryRecord,
    /// Index of the record in the unfiltered history.
    pub original_index: usize,
}

/// Live search over the history by file name.
///
/// The filter never owns or mutates the history; it only derives views of it.
#[derive(Debug, Default, Clone)]
pub struct HistoryFilter {
    query: String,
}

impl HistoryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the active search string.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Clears the search string.
    pub fn clear(&mut self) {
        self.query.clear();
    }

    /// Returns true if the query restricts the view.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Returns true if the record's file name matches the query.
    pub fn matches(&self, record: &FileHistoryRecord) -> bool {
        !self.is_active() || contains_ignore_case(record.file_name(), &self.query)
    }

    /// Lazily yields the matching records paired with their original index.
    pub fn view<'a>(&'a self, records: &'a [FileHistoryRecord]) -> impl Iterator<Item = FilteredEntry<'a>> + 'a {
        records
            .iter()
            .enumerate()
            .filter(move |(_, record)| self.matches(record))
            .map(|(original_index, record)| FilteredEntry { record, original_index })
    }

    /// Collects the filtered view.
    pub fn entries<'a>(&'a self, records: &'a [FileHistoryRecord]) -> Vec<FilteredEntry<'a>> {
        self.view(records).collect()
    }
}
