//! Environment variables handed to every script run.

use crate::host::{FileEntry, HostContext};

pub const CURRENT_DIRECTORY: &str = "CURRENT_DIRECTORY";
pub const CURRENT_FILE: &str = "CURRENT_FILE";
pub const LEFT_PANE: &str = "LEFT_PANE";
pub const LEFT_PANE_SELECTED_FILE: &str = "LEFT_PANE_SELECTED_FILE";
pub const RIGHT_PANE: &str = "RIGHT_PANE";
pub const RIGHT_PANE_SELECTED_FILE: &str = "RIGHT_PANE_SELECTED_FILE";
pub const FILES_SELECTED: &str = "FILES_SELECTED";

/// Separator between paths in FILES_SELECTED
const FILES_SELECTED_SEPARATOR: &str = ", ";

/// The seven variables describing the file manager's state at run time.
/// Rebuilt for every invocation, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScriptEnv {
    pub current_directory: String,
    pub current_file: String,
    pub left_pane: String,
    pub left_pane_selected_file: String,
    pub right_pane: String,
    pub right_pane_selected_file: String,
    pub files_selected: String,
}

impl ScriptEnv {
    /// Build the mapping from a host snapshot. Absent values become empty
    /// strings.
    pub fn build(ctx: &HostContext) -> Self {
        let selected_name = |entry: &Option<FileEntry>| {
            entry
                .as_ref()
                .map(|e| e.name.clone())
                .unwrap_or_default()
        };

        let files_selected = ctx
            .selected_files
            .iter()
            .map(|entry| entry.path().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(FILES_SELECTED_SEPARATOR);

        ScriptEnv {
            current_directory: ctx.cursor.dir.to_string_lossy().into_owned(),
            current_file: ctx.cursor.name.clone(),
            left_pane: ctx.left_pane.dir.to_string_lossy().into_owned(),
            left_pane_selected_file: selected_name(&ctx.left_pane.selected),
            right_pane: ctx.right_pane.dir.to_string_lossy().into_owned(),
            right_pane_selected_file: selected_name(&ctx.right_pane.selected),
            files_selected,
        }
    }

    /// Key/value pairs in a fixed order, ready for `Command::envs`
    pub fn vars(&self) -> [(&'static str, &str); 7] {
        [
            (CURRENT_DIRECTORY, self.current_directory.as_str()),
            (CURRENT_FILE, self.current_file.as_str()),
            (LEFT_PANE, self.left_pane.as_str()),
            (LEFT_PANE_SELECTED_FILE, self.left_pane_selected_file.as_str()),
            (RIGHT_PANE, self.right_pane.as_str()),
            (RIGHT_PANE_SELECTED_FILE, self.right_pane_selected_file.as_str()),
            (FILES_SELECTED, self.files_selected.as_str()),
        ]
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars()
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::PaneState;

    fn sample_context() -> HostContext {
        HostContext {
            cursor: FileEntry::new("/home/u/work", "notes.md"),
            left_pane: PaneState {
                dir: "/home/u/work".into(),
                selected: Some(FileEntry::new("/home/u/work", "notes.md")),
            },
            right_pane: PaneState {
                dir: "/tmp".into(),
                selected: Some(FileEntry::new("/tmp", "scratch")),
            },
            selected_files: vec![FileEntry::new("/a", "x"), FileEntry::new("/a", "y")],
        }
    }

    #[test]
    fn test_build_all_fields() {
        let env = ScriptEnv::build(&sample_context());
        assert_eq!(env.current_directory, "/home/u/work");
        assert_eq!(env.current_file, "notes.md");
        assert_eq!(env.left_pane, "/home/u/work");
        assert_eq!(env.left_pane_selected_file, "notes.md");
        assert_eq!(env.right_pane, "/tmp");
        assert_eq!(env.right_pane_selected_file, "scratch");
    }

    #[test]
    fn test_files_selected_joins_full_paths() {
        let env = ScriptEnv::build(&sample_context());
        assert_eq!(env.files_selected, "/a/x, /a/y");
    }

    #[test]
    fn test_files_selected_single_and_empty() {
        let mut ctx = sample_context();
        ctx.selected_files = vec![FileEntry::new("/b", "only")];
        assert_eq!(ScriptEnv::build(&ctx).files_selected, "/b/only");

        ctx.selected_files.clear();
        assert_eq!(ScriptEnv::build(&ctx).files_selected, "");
    }

    #[test]
    fn test_missing_context_yields_empty_strings() {
        let env = ScriptEnv::build(&HostContext::default());
        assert!(env.vars().iter().all(|(_, v)| v.is_empty()));
    }

    #[test]
    fn test_vars_cover_seven_fixed_keys() {
        let env = ScriptEnv::build(&sample_context());
        let keys: Vec<_> = env.vars().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "CURRENT_DIRECTORY",
                "CURRENT_FILE",
                "LEFT_PANE",
                "LEFT_PANE_SELECTED_FILE",
                "RIGHT_PANE",
                "RIGHT_PANE_SELECTED_FILE",
                "FILES_SELECTED",
            ]
        );
        assert_eq!(env.get(RIGHT_PANE), Some("/tmp"));
        assert_eq!(env.get("HOME"), None);
    }
}
