use crate::error::FileError;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default file name proposed by the save-as dialog.
pub const DEFAULT_FILE_NAME: &str = "untitled.mdx";

/// Result of a dialog: either a choice or a cancellation, which is not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    Picked(T),
    Cancelled,
}

/// A file read from disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    pub content: String,
}

/// Resolves `path` to an absolute path, following symlinks when the file exists.
pub fn absolute_path(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

/// Reads the file at `path`.
pub fn read_file(path: &Path) -> Result<OpenedFile, FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    let content = fs::read_to_string(path).map_err(|source| FileError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let path = absolute_path(path);
    info!("Opened {:?} ({} bytes)", path, content.len());
    Ok(OpenedFile { path, content })
}

/// Writes `content` to an existing document path.
pub fn save_file(path: &Path, content: &str) -> Result<(), FileError> {
    if path.is_dir() {
        return Err(FileError::IsDirectory(path.to_path_buf()));
    }
    fs::write(path, content).map_err(|source| FileError::Save {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {:?} ({} bytes)", path, content.len());
    Ok(())
}

/// Writes `content` to a newly chosen path and returns its absolute form.
pub fn save_file_as(path: &Path, content: &str) -> Result<PathBuf, FileError> {
    save_file(path, content)?;
    Ok(absolute_path(path))
}

/// Path proposed by the save-as dialog: the current document path, or
/// [`DEFAULT_FILE_NAME`] in the working directory.
pub fn suggested_save_path(current: Option<&Path>) -> PathBuf {
    match current {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()
            .map(|dir| dir.join(DEFAULT_FILE_NAME))
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_FILE_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_file_returns_absolute_path_and_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.md");
        fs::write(&path, "# Notes").unwrap();

        let opened = read_file(&path).unwrap();

        assert!(opened.path.is_absolute());
        assert_eq!(opened.path.file_name().unwrap(), "notes.md");
        assert_eq!(opened.content, "# Notes");
    }

    #[test]
    fn test_read_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_file(&dir.path().join("missing.md"));
        assert!(matches!(result, Err(FileError::Open { .. })));
    }

    #[test]
    fn test_read_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(read_file(dir.path()), Err(FileError::IsDirectory(_))));
    }

    #[test]
    fn test_save_file_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.mdx");
        fs::write(&path, "old").unwrap();

        save_file(&path, "new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn test_save_file_as_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.mdx");

        let saved = save_file_as(&path, "content").unwrap();

        assert!(saved.is_absolute());
        assert_eq!(fs::read_to_string(saved).unwrap(), "content");
    }

    #[test]
    fn test_save_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("doc.md");
        assert!(matches!(save_file(&path, "x"), Err(FileError::Save { .. })));
    }

    #[test]
    fn test_suggested_save_path_prefers_current() {
        let current = PathBuf::from("/tmp/doc.md");
        assert_eq!(suggested_save_path(Some(&current)), current);
        assert!(suggested_save_path(None).ends_with(DEFAULT_FILE_NAME));
    }
}
