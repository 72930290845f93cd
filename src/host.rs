//! Capabilities the plugin consumes from its host file manager.
//!
//! The host owns dialogs, cursor/selection state, navigation and process
//! execution. The plugin receives one value implementing [`Host`] at init and
//! calls nothing else.

use std::path::{Path, PathBuf};

use crate::environment::ScriptEnv;

/// A directory entry as the host reports it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileEntry {
    /// Directory containing the entry
    pub dir: PathBuf,
    /// File name within `dir`
    pub name: String,
}

impl FileEntry {
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        FileEntry {
            dir: dir.into(),
            name: name.into(),
        }
    }

    /// Split a path into its parent directory and file name
    pub fn from_path(path: &Path) -> Self {
        FileEntry {
            dir: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }
}

/// One of the two side-by-side directory views
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaneState {
    pub dir: PathBuf,
    /// Last highlighted entry in this pane
    pub selected: Option<FileEntry>,
}

/// Snapshot of cursor and selection state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostContext {
    pub cursor: FileEntry,
    pub left_pane: PaneState,
    pub right_pane: PaneState,
    /// Multi-selection across the active pane
    pub selected_files: Vec<FileEntry>,
}

/// A row in a pick list: `name` is displayed, `value` is returned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickItem {
    pub name: String,
    pub value: String,
}

impl PickItem {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        PickItem {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// How the host's message dialog renders text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Markup dialog (the file manager's webview)
    #[default]
    Html,
    /// Terminal with ANSI colors
    Ansi,
    /// Unformatted text (pipes, log files)
    Plain,
}

/// Modal UI primitives
pub trait Dialogs {
    fn show_message(&self, title: &str, message: &str);

    /// Ask for free text. `None` when the user cancels.
    fn ask_question(&self, title: &str, question: &str) -> Option<String>;

    /// Let the user pick one of `items` and return its value. With
    /// `allow_custom`, text that matches no item is returned as typed.
    /// `None` when the user cancels.
    fn pick_item(&self, prompt: &str, items: &[PickItem], allow_custom: bool) -> Option<String>;

    fn output_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

/// Cursor and pane state accessors
pub trait Selection {
    fn context(&self) -> HostContext;
}

/// Navigation and file operations owned by the host
pub trait Navigator {
    fn change_dir(&self, path: &Path);

    /// Open `path` in the user's editor
    fn edit_entry(&self, path: &Path);

    /// Copy `entries` into `dest`, overwriting existing files
    fn copy_entries(&self, entries: &[FileEntry], dest: &Path) -> anyhow::Result<()>;
}

/// The host's command-line execution primitive
pub trait CommandExecutor {
    /// Run `command_line` with `env` added to the environment and `cwd` as
    /// the working directory. `Ok` carries the output, `Err` a message.
    fn run_command_line(
        &self,
        command_line: &str,
        env: &ScriptEnv,
        cwd: &Path,
    ) -> Result<String, String>;
}

/// Everything the plugin needs from its host
pub trait Host: Dialogs + Selection + Navigator + CommandExecutor {}

impl<T: Dialogs + Selection + Navigator + CommandExecutor> Host for T {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_entry_from_path() {
        let entry = FileEntry::from_path(Path::new("/a/b/c.txt"));
        assert_eq!(entry.dir, PathBuf::from("/a/b"));
        assert_eq!(entry.name, "c.txt");
        assert_eq!(entry.path(), PathBuf::from("/a/b/c.txt"));
    }

    #[test]
    fn test_file_entry_root() {
        let entry = FileEntry::from_path(Path::new("/"));
        assert_eq!(entry.name, "");
        assert_eq!(entry.dir, PathBuf::new());
    }
}
