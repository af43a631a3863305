use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or writing the history file.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("No config directory available for the history file")]
    NoConfigDir,

    #[error("Failed to read history file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write history file {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize history: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("History storage unavailable: {0}")]
    Unavailable(String),
}

/// Errors raised by the open/save file operations.
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to save {path:?}: {source}")]
    Save {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} is a directory")]
    IsDirectory(PathBuf),
}
