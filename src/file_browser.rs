use crate::error::FileError;
use crate::list_view_state::ListViewState;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File type filters offered by the open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileFilter {
    #[default]
    Mdx,
    Markdown,
    All,
}

impl FileFilter {
    pub fn label(&self) -> &'static str {
        match self {
            FileFilter::Mdx => "MDX Files (*.mdx)",
            FileFilter::Markdown => "Markdown Files (*.md)",
            FileFilter::All => "All Files (*.*)",
        }
    }

    /// Returns true if a file with this name passes the filter.
    pub fn accepts(&self, name: &str) -> bool {
        let extension = Path::new(name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match self {
            FileFilter::Mdx => extension.as_deref() == Some("mdx"),
            FileFilter::Markdown => extension.as_deref() == Some("md"),
            FileFilter::All => true,
        }
    }

    pub fn next(&self) -> Self {
        match self {
            FileFilter::Mdx => FileFilter::Markdown,
            FileFilter::Markdown => FileFilter::All,
            FileFilter::All => FileFilter::Mdx,
        }
    }
}

/// A row in the directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
}

/// In-terminal replacement for a native "open file" dialog.
#[derive(Debug)]
pub struct FileBrowser {
    cwd: PathBuf,
    entries: Vec<BrowserEntry>,
    filter: FileFilter,
    view: ListViewState,
}

impl FileBrowser {
    /// Opens the browser in `dir`.
    pub fn open(dir: &Path) -> Result<Self, FileError> {
        let mut browser = Self {
            cwd: dir.to_path_buf(),
            entries: Vec::new(),
            filter: FileFilter::default(),
            view: ListViewState::new(),
        };
        browser.refresh()?;
        Ok(browser)
    }

    /// Re-reads the current directory.
    pub fn refresh(&mut self) -> Result<(), FileError> {
        let read_dir = fs::read_dir(&self.cwd).map_err(|source| FileError::Open {
            path: self.cwd.clone(),
            source,
        })?;

        let mut dirs = Vec::new();
        let mut files = Vec::new();
        for entry in read_dir.flatten() {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.starts_with('.') {
                continue;
            }
            let path = entry.path();
            let is_dir = path.is_dir();
            if is_dir {
                dirs.push(BrowserEntry { name, path, is_dir });
            } else if self.filter.accepts(&name) {
                files.push(BrowserEntry { name, path, is_dir });
            }
        }
        dirs.sort_by_key(|e| e.name.to_lowercase());
        files.sort_by_key(|e| e.name.to_lowercase());

        self.entries.clear();
        if let Some(parent) = self.cwd.parent() {
            self.entries.push(BrowserEntry {
                name: "..".to_string(),
                path: parent.to_path_buf(),
                is_dir: true,
            });
        }
        self.entries.extend(dirs);
        self.entries.extend(files);
        self.view.set_item_count(self.entries.len());
        debug!("Listed {:?}: {} entries", self.cwd, self.entries.len());
        Ok(())
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn entries(&self) -> &[BrowserEntry] {
        &self.entries
    }

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    pub fn view(&self) -> &ListViewState {
        &self.view
    }

    pub fn selected(&self) -> Option<&BrowserEntry> {
        self.entries.get(self.view.selected_index())
    }

    pub fn move_up(&mut self) {
        self.view.move_up();
    }

    pub fn move_down(&mut self) {
        self.view.move_down();
    }

    pub fn page_up(&mut self) {
        self.view.page_up();
    }

    pub fn page_down(&mut self) {
        self.view.page_down();
    }

    /// Switches to the next file type filter.
    pub fn cycle_filter(&mut self) -> Result<(), FileError> {
        self.filter = self.filter.next();
        self.refresh()
    }

    /// Moves to the parent directory.
    pub fn go_up(&mut self) -> Result<(), FileError> {
        match self.cwd.parent() {
            Some(parent) => {
                let parent = parent.to_path_buf();
                self.change_dir(parent)
            }
            None => Ok(()),
        }
    }

    /// Enters the selected directory or picks the selected file.
    ///
    /// Returns the picked file path, or None after changing directory.
    pub fn activate(&mut self) -> Result<Option<PathBuf>, FileError> {
        let Some(entry) = self.selected().cloned() else {
            return Ok(None);
        };
        if entry.is_dir {
            self.change_dir(entry.path)?;
            Ok(None)
        } else {
            Ok(Some(entry.path))
        }
    }

    fn change_dir(&mut self, dir: PathBuf) -> Result<(), FileError> {
        let previous = std::mem::replace(&mut self.cwd, dir);
        if let Err(e) = self.refresh() {
            self.cwd = previous;
            return Err(e);
        }
        self.view.reset();
        Ok(())
    }
}
