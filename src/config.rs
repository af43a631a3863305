use crate::file_history::DEFAULT_MAX_ENTRIES;
use crate::history_store::HistoryOptions;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::warn;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(skip)]
    path: Option<String>,
    /// Recent file history settings.
    #[serde(default)]
    pub history: HistoryConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HistoryConfig {
    /// Maximum number of remembered files.
    pub max_entries: usize,
    /// Delay in milliseconds before history changes are written.
    pub debounce_ms: u64,
    /// History file location. Defaults to the user config directory.
    pub file: Option<PathBuf>,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            debounce_ms: 500,
            file: None,
        }
    }
}

impl HistoryConfig {
    pub fn options(&self) -> HistoryOptions {
        HistoryOptions {
            max_entries: self.max_entries.max(1),
            debounce: Duration::from_millis(self.debounce_ms),
        }
    }
}

impl Config {
    /// Load configuration from the specified path, the default config dir (~/.config/mdxedit/) or a local .mdxedit.toml.
    pub fn load(path: &Option<String>) -> Self {
        let config_path = if let Some(p) = path {
            PathBuf::from(p)
        } else {
            Self::default_config_path()
        };
        Self::load_from_path(&config_path)
    }

    fn load_from_path(config_path: &Path) -> Self {
        if !config_path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(config_path) {
            Ok(content) => {
                let mut config = Self::parse(&content);
                config.path = config_path.to_str().map(|s| s.to_string());
                config
            }
            Err(e) => {
                warn!("Failed to read config {:?}: {}", config_path, e);
                Self::default()
            }
        }
    }

    /// Parses TOML content, falling back to defaults on errors.
    pub fn parse(content: &str) -> Self {
        toml::from_str(content).unwrap_or_else(|e| {
            warn!("Invalid config, using defaults: {}", e);
            Self::default()
        })
    }

    /// Get the path of the configuration file if it was loaded from a file.
    pub fn get_path(&self) -> Option<&String> {
        self.path.as_ref()
    }

    fn default_config_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("mdxedit").join("config.toml");
            if config_path.exists() {
                return config_path;
            }
        }
        // Fallback to local .mdxedit.toml (might not exist)
        PathBuf::from(".mdxedit.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::parse("");
        assert_eq!(config.history, HistoryConfig::default());
        assert_eq!(config.history.options(), HistoryOptions::default());
    }

    #[test]
    fn test_history_section() {
        let config = Config::parse(
            r#"
            [history]
            max_entries = 20
            debounce_ms = 250
            file = "/tmp/history.json"
            "#,
        );
        assert_eq!(config.history.max_entries, 20);
        assert_eq!(config.history.options().debounce, Duration::from_millis(250));
        assert_eq!(config.history.file, Some(PathBuf::from("/tmp/history.json")));
    }

    #[test]
    fn test_partial_history_section_keeps_other_defaults() {
        let config = Config::parse("[history]\nmax_entries = 5\n");
        assert_eq!(config.history.max_entries, 5);
        assert_eq!(config.history.debounce_ms, 500);
    }

    #[test]
    fn test_zero_max_entries_is_clamped() {
        let config = Config::parse("[history]\nmax_entries = 0\n");
        assert_eq!(config.history.options().max_entries, 1);
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let config = Config::parse("[history\nmax_entries = ");
        assert_eq!(config.history, HistoryConfig::default());
    }

    #[test]
    fn test_load_from_file_records_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[history]\ndebounce_ms = 100\n").unwrap();

        let config = Config::load(&Some(path.to_string_lossy().to_string()));

        assert_eq!(config.history.debounce_ms, 100);
        assert_eq!(config.get_path().map(String::as_str), path.to_str());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load(&Some("/definitely/not/here.toml".to_string()));
        assert!(config.get_path().is_none());
    }
}
