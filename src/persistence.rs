use crate::error::PersistError;
use crate::file_history::FileHistoryRecord;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// Directory name under the user config dir that holds the history file.
const APP_DIR: &str = "mdxEditor";
/// File name of the persisted history.
const HISTORY_FILE: &str = "file-history.json";

/// Durable storage for the file history.
pub trait HistoryBackend: Send + Sync + std::fmt::Debug {
    /// Loads the persisted records, oldest first. Nothing saved yet is an empty list.
    fn load_history(&self) -> Result<Vec<FileHistoryRecord>, PersistError>;

    /// Replaces the persisted records.
    fn save_history(&self, records: &[FileHistoryRecord]) -> Result<(), PersistError>;
}

/// Stores the history as a pretty-printed JSON array on disk.
#[derive(Debug, Clone)]
pub struct JsonFileBackend {
    path: PathBuf,
}

impl JsonFileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Uses `<config_dir>/mdxEditor/file-history.json`.
    pub fn in_config_dir() -> Result<Self, PersistError> {
        let config_dir = dirs::config_dir().ok_or(PersistError::NoConfigDir)?;
        Ok(Self::new(config_dir.join(APP_DIR).join(HISTORY_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory holding the history file, created if missing.
    fn ensure_parent_dir(&self) -> Result<&Path, PersistError> {
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                if !dir.exists() {
                    fs::create_dir_all(dir).map_err(|source| PersistError::Write {
                        path: dir.to_path_buf(),
                        source,
                    })?;
                }
                Ok(dir)
            }
            _ => Ok(Path::new(".")),
        }
    }

    fn write_error(&self, source: std::io::Error) -> PersistError {
        PersistError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl HistoryBackend for JsonFileBackend {
    fn load_history(&self) -> Result<Vec<FileHistoryRecord>, PersistError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No history file at {:?}, starting empty", self.path);
                return Ok(Vec::new());
            }
            Err(source) => {
                return Err(PersistError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        if json.trim().is_empty() {
            return Ok(Vec::new());
        }

        match serde_json::from_str::<Vec<FileHistoryRecord>>(&json) {
            Ok(records) => Ok(records),
            Err(e) => {
                // Corrupted history file, start over
                warn!("Ignoring malformed history file {:?}: {}", self.path, e);
                Ok(Vec::new())
            }
        }
    }

    fn save_history(&self, records: &[FileHistoryRecord]) -> Result<(), PersistError> {
        let dir = self.ensure_parent_dir()?;
        let json = serde_json::to_string_pretty(records)?;

        // Write next to the target and rename over it, so readers never see a partial file
        let mut file = NamedTempFile::new_in(dir).map_err(|e| self.write_error(e))?;
        file.write_all(json.as_bytes()).map_err(|e| self.write_error(e))?;
        file.as_file().sync_all().map_err(|e| self.write_error(e))?;
        file.persist(&self.path).map_err(|e| self.write_error(e.error))?;
        Ok(())
    }
}

/// Keeps the history in memory only. Used when persistence is disabled.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<FileHistoryRecord>,
    writes: usize,
    fail_writes: bool,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a backend that already holds `records`.
    pub fn with_records(records: Vec<FileHistoryRecord>) -> Self {
        let backend = Self::default();
        backend.lock().records = records;
        backend
    }

    /// Makes subsequent saves fail, simulating unavailable storage.
    pub fn set_fail_writes(&self, fail: bool) {
        self.lock().fail_writes = fail;
    }

    /// Returns the records of the last successful save.
    pub fn records(&self) -> Vec<FileHistoryRecord> {
        self.lock().records.clone()
    }

    /// Number of successful saves so far.
    pub fn write_count(&self) -> usize {
        self.lock().writes
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl HistoryBackend for MemoryBackend {
    fn load_history(&self) -> Result<Vec<FileHistoryRecord>, PersistError> {
        Ok(self.lock().records.clone())
    }

    fn save_history(&self, records: &[FileHistoryRecord]) -> Result<(), PersistError> {
        let mut state = self.lock();
        if state.fail_writes {
            return Err(PersistError::Unavailable("writes disabled".to_string()));
        }
        state.records = records.to_vec();
        state.writes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<FileHistoryRecord> {
        vec![
            FileHistoryRecord::new("/x/a.md", 1),
            FileHistoryRecord::new("/x/b.md", 2),
        ]
    }

    #[test]
    fn test_json_backend_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nope.json"));
        assert!(backend.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_json_backend_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join("nested").join(HISTORY_FILE));

        backend.save_history(&sample()).unwrap();

        assert!(backend.path().exists());
        assert_eq!(backend.load_history().unwrap(), sample());
    }

    #[test]
    fn test_json_backend_writes_source_format() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join(HISTORY_FILE));
        backend.save_history(&sample()[..1]).unwrap();

        let json = fs::read_to_string(backend.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([{ "filePath": "/x/a.md", "timestamp": 1 }]));
    }

    #[test]
    fn test_json_backend_replaces_file_without_leftovers() {
        let dir = tempfile::tempdir().unwrap();
        let backend = JsonFileBackend::new(dir.path().join(HISTORY_FILE));

        backend.save_history(&sample()).unwrap();
        backend.save_history(&sample()[..1]).unwrap();

        assert_eq!(backend.load_history().unwrap(), sample()[..1].to_vec());
        let files: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(files, [HISTORY_FILE]);
    }

    #[test]
    fn test_json_backend_failed_write_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        let backend = JsonFileBackend::new(&path);
        backend.save_history(&sample()).unwrap();

        // Renaming a file over a directory fails after the temp file was written
        let blocked = JsonFileBackend::new(dir.path());
        assert!(matches!(blocked.save_history(&sample()[..1]), Err(PersistError::Write { .. })));

        assert_eq!(backend.load_history().unwrap(), sample());
    }

    #[test]
    fn test_json_backend_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        fs::write(&path, "{ not json").unwrap();

        let backend = JsonFileBackend::new(path);
        assert!(backend.load_history().unwrap().is_empty());
    }

    #[test]
    fn test_json_backend_blank_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(HISTORY_FILE);
        fs::write(&path, "\n").unwrap();

        assert!(JsonFileBackend::new(path).load_history().unwrap().is_empty());
    }

    #[test]
    fn test_json_backend_read_error_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        // Reading a directory as a file fails with something other than NotFound
        let backend = JsonFileBackend::new(dir.path());
        assert!(matches!(backend.load_history(), Err(PersistError::Read { .. })));
    }

    #[test]
    fn test_memory_backend_counts_writes() {
        let backend = MemoryBackend::new();
        backend.save_history(&sample()).unwrap();
        backend.save_history(&sample()[..1]).unwrap();

        assert_eq!(backend.write_count(), 2);
        assert_eq!(backend.records().len(), 1);
    }

    #[test]
    fn test_memory_backend_failing_writes_keep_previous_records() {
        let backend = MemoryBackend::with_records(sample());
        backend.set_fail_writes(true);

        assert!(backend.save_history(&[]).is_err());
        assert_eq!(backend.records(), sample());
        assert_eq!(backend.write_count(), 0);
    }
}
