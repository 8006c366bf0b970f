//! Directory listing for picking measurement and simulation tables.

pub mod ui;

use std::fs;
use std::path::{Path, PathBuf};

/// Extensions offered by the browser.
const TABLE_EXTENSIONS: &[&str] = &["tsv", "tab", "txt"];

/// One row of the listing.
#[derive(Debug, Clone)]
pub struct FileEntry {
    /// Full path (the link itself for symlinks).
    pub path: PathBuf,
    /// Basename shown in the list.
    pub name: String,
    /// Directory, following symlinks.
    pub is_dir: bool,
    /// Whether the path is a symlink.
    pub is_symlink: bool,
}

impl FileEntry {
    fn parent(dir: &Path) -> Self {
        Self {
            path: dir.to_path_buf(),
            name: "..".to_string(),
            is_dir: true,
            is_symlink: dir.is_symlink(),
        }
    }

    /// Build an entry for `path`, or `None` if it is neither a directory
    /// nor a table file.
    fn listed(path: PathBuf) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().to_string();
        let is_symlink = path.is_symlink();
        // metadata() follows links, so a link to a directory counts as one
        let is_dir = path.metadata().map(|m| m.is_dir()).unwrap_or(false);
        if !is_dir && !is_table_file(&path) {
            return None;
        }
        Some(Self {
            path,
            name,
            is_dir,
            is_symlink,
        })
    }

    /// `..` first, then directories, then files, each alphabetical.
    fn sort_key(&self) -> (bool, bool, String) {
        (self.name != "..", !self.is_dir, self.name.to_lowercase())
    }
}

/// Browser state: the directory shown and the cursor within it.
#[derive(Debug)]
pub struct FileBrowserState {
    /// Directory being listed.
    pub current_dir: PathBuf,
    /// Listed entries.
    pub entries: Vec<FileEntry>,
    /// Cursor position.
    pub cursor: usize,
    /// First visible entry.
    pub scroll: usize,
    /// Whether dot-prefixed entries are listed.
    pub show_hidden: bool,
}

impl FileBrowserState {
    /// Start in the working directory.
    pub fn new() -> Self {
        Self {
            current_dir: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            entries: Vec::new(),
            cursor: 0,
            scroll: 0,
            show_hidden: false,
        }
    }

    /// Re-read `current_dir` and reset the cursor. Unreadable directories
    /// list only their parent.
    pub fn load_directory(&mut self) {
        self.entries = self.current_dir.parent().map(FileEntry::parent).into_iter().collect();

        match fs::read_dir(&self.current_dir) {
            Ok(dir_entries) => {
                let show_hidden = self.show_hidden;
                self.entries.extend(
                    dir_entries
                        .flatten()
                        .filter(|e| show_hidden || !e.file_name().to_string_lossy().starts_with('.'))
                        .filter_map(|e| FileEntry::listed(e.path())),
                );
            },
            Err(e) => tracing::warn!("Cannot list {}: {}", self.current_dir.display(), e),
        }

        self.entries.sort_by_key(FileEntry::sort_key);
        self.cursor = 0;
        self.scroll = 0;
    }

    /// Move cursor up.
    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Move cursor down.
    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Entry under the cursor.
    pub fn current_entry(&self) -> Option<&FileEntry> {
        self.entries.get(self.cursor)
    }

    /// Enter the directory under the cursor, or return the file under it.
    pub fn select_current(&mut self) -> Option<PathBuf> {
        let entry = self.current_entry()?.clone();
        if !entry.is_dir {
            return Some(entry.path);
        }
        self.current_dir = entry.path;
        self.load_directory();
        None
    }

    /// List the parent directory.
    pub fn go_to_parent(&mut self) {
        if let Some(parent) = self.current_dir.parent() {
            self.current_dir = parent.to_path_buf();
            self.load_directory();
        }
    }

    /// Toggle dot-prefixed entries and re-list.
    pub fn toggle_hidden(&mut self) {
        self.show_hidden = !self.show_hidden;
        self.load_directory();
    }

    /// Scroll so the cursor stays within `viewport_height` rows.
    pub fn adjust_scroll(&mut self, viewport_height: usize) {
        if viewport_height == 0 {
            return;
        }
        if self.cursor < self.scroll {
            self.scroll = self.cursor;
        } else if self.cursor >= self.scroll + viewport_height {
            self.scroll = self.cursor + 1 - viewport_height;
        }
    }
}

impl Default for FileBrowserState {
    fn default() -> Self {
        Self::new()
    }
}

/// Whether a path has a PEtab table extension.
pub fn is_table_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| TABLE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn browser_at(dir: &Path) -> FileBrowserState {
        let mut browser = FileBrowserState::new();
        browser.current_dir = dir.to_path_buf();
        browser.load_directory();
        browser
    }

    #[test]
    fn lists_directories_first_and_only_table_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("b_measurements.tsv"), "").unwrap();
        fs::write(dir.path().join("a_model.xml"), "").unwrap();
        fs::write(dir.path().join(".hidden.tsv"), "").unwrap();

        let mut browser = browser_at(dir.path());
        let names: Vec<&str> = browser.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["..", "sub", "b_measurements.tsv"]);

        browser.toggle_hidden();
        assert_eq!(browser.entries.len(), 4);
    }

    #[test]
    fn selecting_a_file_returns_it_and_directories_are_entered() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("sub")).unwrap();
        fs::write(dir.path().join("sub").join("m.tsv"), "").unwrap();

        let mut browser = browser_at(dir.path());
        browser.cursor_down();
        assert_eq!(browser.select_current(), None);
        assert!(browser.current_dir.ends_with("sub"));

        browser.cursor_down();
        assert_eq!(browser.select_current(), Some(browser.current_dir.join("m.tsv")));
    }

    #[test]
    fn scroll_follows_cursor() {
        let dir = tempfile::tempdir().unwrap();
        for i in 0..5 {
            fs::write(dir.path().join(format!("t{}.tsv", i)), "").unwrap();
        }
        let mut browser = browser_at(dir.path());
        for _ in 0..4 {
            browser.cursor_down();
        }
        browser.adjust_scroll(3);
        assert_eq!(browser.scroll, 2);
        browser.cursor = 0;
        browser.adjust_scroll(3);
        assert_eq!(browser.scroll, 0);
    }

    #[test]
    fn table_extensions_are_case_insensitive() {
        assert!(is_table_file(Path::new("m.TSV")));
        assert!(is_table_file(Path::new("sim.tab")));
        assert!(!is_table_file(Path::new("model.xml")));
        assert!(!is_table_file(Path::new("README")));
    }
}
