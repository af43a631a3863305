use crate::debounce::Debouncer;
use crate::error::PersistError;
use crate::file_history::{DEFAULT_MAX_ENTRIES, FileHistory, FileHistoryRecord};
use crate::persistence::HistoryBackend;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info};

/// Default quiet period before the history is written to disk.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Called with every failed background save.
pub type SaveErrorHandler = Arc<dyn Fn(&PersistError) + Send + Sync>;

/// Tuning for a [`HistoryStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryOptions {
    /// Maximum number of records kept.
    pub max_entries: usize,
    /// Quiet period before a mutation is persisted.
    pub debounce: Duration,
}

impl Default for HistoryOptions {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            debounce: DEFAULT_DEBOUNCE,
        }
    }
}

/// File history synchronized with durable storage.
///
/// Every mutation schedules a debounced save of the whole list. Save
/// failures are logged and reported through the error handler but never
/// touch the in-memory state.
pub struct HistoryStore {
    history: FileHistory,
    writer: Arc<SnapshotWriter>,
    saver: Debouncer,
    /// Generation of the most recent mutation.
    generation: u64,
    on_save_error: Option<SaveErrorHandler>,
}

/// Serializes writes to the backend.
///
/// Every snapshot carries the generation of the mutation it was taken
/// after. Writes run one at a time and a snapshot older than the last
/// written one is dropped, so a debounced write that was already running
/// when `flush` was called can never land after a newer state.
#[derive(Debug)]
struct SnapshotWriter {
    backend: Arc<dyn HistoryBackend>,
    last_written: Mutex<u64>,
}

impl SnapshotWriter {
    /// Writes `records` unless a newer or equal generation is on disk already.
    /// Returns true if the backend was called.
    fn write(&self, generation: u64, records: &[FileHistoryRecord]) -> Result<bool, PersistError> {
        let mut last_written = self.last_written.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        if generation <= *last_written {
            return Ok(false);
        }
        self.backend.save_history(records)?;
        *last_written = generation;
        Ok(true)
    }
}

impl std::fmt::Debug for HistoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("history", &self.history)
            .field("writer", &self.writer)
            .field("generation", &self.generation)
            .field("saver", &self.saver)
            .finish_non_exhaustive()
    }
}

impl HistoryStore {
    /// Loads the persisted history and returns a ready store.
    pub async fn load(backend: Arc<dyn HistoryBackend>, options: HistoryOptions) -> Result<Self, PersistError> {
        let loader = backend.clone();
        let records = tokio::task::spawn_blocking(move || loader.load_history())
            .await
            .map_err(|e| PersistError::Unavailable(e.to_string()))??;

        let mut store = Self::empty(backend, options);
        let loaded = records.len();
        store.history.restore(records);
        info!(
            "Loaded {} history record(s), kept {} (max {})",
            loaded,
            store.history.len(),
            options.max_entries
        );
        Ok(store)
    }

    /// Creates a store without reading the backend, used when loading failed.
    pub fn empty(backend: Arc<dyn HistoryBackend>, options: HistoryOptions) -> Self {
        Self {
            history: FileHistory::new(options.max_entries),
            writer: Arc::new(SnapshotWriter {
                backend,
                last_written: Mutex::new(0),
            }),
            saver: Debouncer::new(options.debounce),
            generation: 0,
            on_save_error: None,
        }
    }

    /// Replaces the timestamp source of the underlying history.
    pub fn with_clock(mut self, clock: fn() -> i64) -> Self {
        self.history.set_clock(clock);
        self
    }

    /// Sets the handler notified when a background save fails.
    pub fn on_save_error(mut self, handler: SaveErrorHandler) -> Self {
        self.on_save_error = Some(handler);
        self
    }

    /// Records that `path` was opened and schedules a save. Blank paths are ignored.
    pub fn add(&mut self, path: &str) {
        if self.history.add(path) {
            debug!("History add {}", path);
            self.schedule_save();
        }
    }

    /// Selects the record at `index`, returning it if the index is valid.
    pub fn select(&mut self, index: usize) -> Option<&FileHistoryRecord> {
        self.history.select(index)
    }

    /// Removes the record at `index` and schedules a save. Out of range is a no-op.
    pub fn remove(&mut self, index: usize) -> Option<FileHistoryRecord> {
        let removed = self.history.remove(index)?;
        debug!("History remove {}", removed.path);
        self.schedule_save();
        Some(removed)
    }

    /// Removes every record and schedules a save.
    pub fn clear(&mut self) {
        self.history.clear();
        self.schedule_save();
    }

    pub fn current(&self) -> Option<&FileHistoryRecord> {
        self.history.current()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.history.current_index()
    }

    pub fn records(&self) -> &[FileHistoryRecord] {
        self.history.records()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.history.capacity()
    }

    /// Returns true while a save is waiting for the debounce delay.
    pub fn has_pending_save(&self) -> bool {
        self.saver.is_pending()
    }

    /// Writes a pending save immediately instead of waiting for the delay.
    ///
    /// Waits for a background write that is already running. Nothing is
    /// written twice for the same state.
    pub fn flush(&mut self) -> Result<(), PersistError> {
        if self.saver.cancel() && self.writer.write(self.generation, &self.snapshot())? {
            debug!("History flushed ({} records)", self.history.len());
        }
        Ok(())
    }

    fn snapshot(&self) -> Vec<FileHistoryRecord> {
        let records = self.history.records();
        let start = records.len().saturating_sub(self.history.capacity());
        records[start..].to_vec()
    }

    fn schedule_save(&mut self) {
        self.generation += 1;
        let generation = self.generation;
        let snapshot = self.snapshot();
        let writer = self.writer.clone();
        let on_error = self.on_save_error.clone();

        self.saver.schedule(move || match writer.write(generation, &snapshot) {
            Ok(true) => debug!("History saved ({} records)", snapshot.len()),
            Ok(false) => debug!("History save {} superseded", generation),
            Err(e) => {
                error!("Failed to save file history: {}", e);
                if let Some(handler) = on_error {
                    handler(&e);
                }
            }
        });
    }
}
