//! A host for running the plugin from a terminal.
//!
//! Dialogs print to stdout and read answers from stdin. Pane directories and
//! the selection come from command-line flags instead of a live file manager.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use tracing::{error, info, warn};

use crate::environment::ScriptEnv;
use crate::executor::ShellExecutor;
use crate::host::{
    CommandExecutor, Dialogs, FileEntry, HostContext, Navigator, OutputFormat, PaneState,
    PickItem, Selection,
};

pub struct TerminalHost {
    context: HostContext,
    executor: ShellExecutor,
    editor: String,
    /// Answers given up front; consumed before prompting
    preset: RefCell<VecDeque<String>>,
}

impl TerminalHost {
    /// Run the editor through the shell so `EDITOR="code --wait"` works.
    /// The path is passed as `$1`, never spliced into the command text.
    fn open_in_editor(&self, path: &Path) -> anyhow::Result<()> {
        info!(editor = %self.editor, path = %path.display(), "Opening file in editor");

        let status = Command::new(self.executor.shell())
            .arg("-c")
            .arg(format!("{} \"$1\"", self.editor))
            .arg("run-scripts-editor")
            .arg(path)
            .status()
            .with_context(|| format!("Failed to start editor '{}'", self.editor))?;

        if !status.success() {
            anyhow::bail!("Editor '{}' exited with {}", self.editor, status);
        }
        Ok(())
    }

    pub fn new(context: HostContext, executor: ShellExecutor, editor: impl Into<String>) -> Self {
        TerminalHost {
            context,
            executor,
            editor: editor.into(),
            preset: RefCell::new(VecDeque::new()),
        }
    }

    /// Queue an answer for the next prompt
    pub fn with_answer(self, answer: Option<String>) -> Self {
        if let Some(answer) = answer {
            self.preset.borrow_mut().push_back(answer);
        }
        self
    }

    fn next_preset(&self) -> Option<String> {
        self.preset.borrow_mut().pop_front()
    }

    fn read_line(&self, prompt: &str) -> Option<String> {
        print!("{} ", prompt);
        io::stdout().flush().ok()?;
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

/// Build a host snapshot from the working directory and command-line flags.
///
/// The cursor sits on the first selected file, or on `cwd` itself. Each
/// pane's highlighted entry is the last selected file inside that pane.
pub fn context_from_args(
    cwd: &Path,
    left: Option<PathBuf>,
    right: Option<PathBuf>,
    selected: &[PathBuf],
) -> HostContext {
    let absolute = |p: &Path| {
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            cwd.join(p)
        }
    };

    let selected_files: Vec<FileEntry> = selected
        .iter()
        .map(|p| FileEntry::from_path(&absolute(p)))
        .collect();

    let cursor = selected_files
        .first()
        .cloned()
        .unwrap_or_else(|| FileEntry::new(cwd, ""));

    let pane = |dir: Option<PathBuf>| {
        let dir = dir.map(|d| absolute(&d)).unwrap_or_else(|| cwd.to_path_buf());
        let highlighted = selected_files.iter().rev().find(|f| f.dir == dir).cloned();
        PaneState {
            dir,
            selected: highlighted,
        }
    };

    HostContext {
        left_pane: pane(left),
        right_pane: pane(right),
        cursor,
        selected_files,
    }
}

/// Map what the user typed at a numbered prompt to a pick-list value.
///
/// Accepts a 1-based index, an item's name or value, or (with
/// `allow_custom`) any other non-empty text.
pub fn resolve_choice(input: &str, items: &[PickItem], allow_custom: bool) -> Option<String> {
    let input = input.trim();
    if let Ok(index) = input.parse::<usize>() {
        if let Some(item) = index.checked_sub(1).and_then(|i| items.get(i)) {
            return Some(item.value.clone());
        }
    }
    resolve_answer(input, items, allow_custom)
}

/// Map an answer given on the command line to a pick-list value.
///
/// Numbers are never indexes here: `exec 2` runs the command `2`.
pub fn resolve_answer(input: &str, items: &[PickItem], allow_custom: bool) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if let Some(item) = items.iter().find(|i| i.name == input || i.value == input) {
        return Some(item.value.clone());
    }

    allow_custom.then(|| input.to_string())
}

impl Dialogs for TerminalHost {
    fn show_message(&self, title: &str, message: &str) {
        println!("== {} ==", title);
        println!("{}", message.trim_end());
    }

    fn ask_question(&self, title: &str, question: &str) -> Option<String> {
        println!("== {} ==", title);
        self.next_preset()
            .or_else(|| self.read_line(question))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    fn pick_item(&self, prompt: &str, items: &[PickItem], allow_custom: bool) -> Option<String> {
        if let Some(answer) = self.next_preset() {
            let choice = resolve_answer(&answer, items, allow_custom);
            if choice.is_none() {
                warn!(answer = %answer, prompt = prompt, "Answer matches no item");
                self.show_message(prompt, &format!("No match for '{}'.", answer.trim()));
            }
            return choice;
        }

        for (i, item) in items.iter().enumerate() {
            println!("{:>3}) {}", i + 1, item.name);
        }
        let input = self.read_line(prompt)?;
        resolve_choice(&input, items, allow_custom)
    }

    fn output_format(&self) -> OutputFormat {
        if io::stdout().is_terminal() {
            OutputFormat::Ansi
        } else {
            OutputFormat::Plain
        }
    }
}

impl Selection for TerminalHost {
    fn context(&self) -> HostContext {
        self.context.clone()
    }
}

impl Navigator for TerminalHost {
    /// A child process cannot move its parent shell, so print the path for
    /// `cd "$(run-scripts dir)"`
    fn change_dir(&self, path: &Path) {
        println!("{}", path.display());
    }

    fn edit_entry(&self, path: &Path) {
        if let Err(e) = self.open_in_editor(path) {
            error!(editor = %self.editor, error = %format!("{:#}", e), "Failed to open editor");
            self.show_message("Edit Script", &format!("{:#}", e));
        }
    }

    fn copy_entries(&self, entries: &[FileEntry], dest: &Path) -> anyhow::Result<()> {
        for entry in entries {
            let from = entry.path();
            let to = dest.join(&entry.name);
            fs::copy(&from, &to).with_context(|| {
                format!("Failed to copy {} to {}", from.display(), to.display())
            })?;
        }
        info!(count = entries.len(), dest = %dest.display(), "Copied entries");
        Ok(())
    }
}

impl CommandExecutor for TerminalHost {
    fn run_command_line(
        &self,
        command_line: &str,
        env: &ScriptEnv,
        cwd: &Path,
    ) -> Result<String, String> {
        self.executor.run_command_line(command_line, env, cwd)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn items() -> Vec<PickItem> {
        vec![
            PickItem::new("build.sh", "/s/build.sh"),
            PickItem::new("clean.sh", "/s/clean.sh"),
        ]
    }

    #[test]
    fn test_resolve_choice_by_index() {
        assert_eq!(resolve_choice("2", &items(), false).as_deref(), Some("/s/clean.sh"));
        assert_eq!(resolve_choice("0", &items(), false), None);
        assert_eq!(resolve_choice("9", &items(), false), None);
    }

    #[test]
    fn test_resolve_choice_by_name_or_value() {
        assert_eq!(
            resolve_choice(" build.sh ", &items(), false).as_deref(),
            Some("/s/build.sh")
        );
        assert_eq!(
            resolve_choice("/s/clean.sh", &items(), false).as_deref(),
            Some("/s/clean.sh")
        );
    }

    #[test]
    fn test_resolve_choice_custom() {
        assert_eq!(resolve_choice("make all", &items(), false), None);
        assert_eq!(
            resolve_choice("make all", &items(), true).as_deref(),
            Some("make all")
        );
        assert_eq!(resolve_choice("   ", &items(), true), None);
    }

    #[test]
    fn test_numeric_answer_is_a_command_not_an_index() {
        let history = vec![
            PickItem::new("ls", "ls"),
            PickItem::new("rm -rf build", "rm -rf build"),
        ];
        assert_eq!(resolve_answer("2", &history, true).as_deref(), Some("2"));
        assert_eq!(resolve_answer("2", &history, false), None);
        assert_eq!(resolve_answer("ls", &history, true).as_deref(), Some("ls"));
    }

    #[test]
    fn test_numeric_preset_runs_literally() {
        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            "true",
        )
        .with_answer(Some("2".to_string()));
        let history = vec![
            PickItem::new("ls", "ls"),
            PickItem::new("rm -rf build", "rm -rf build"),
        ];
        assert_eq!(
            host.pick_item("Command Line:", &history, true).as_deref(),
            Some("2")
        );
    }

    #[test]
    fn test_unmatched_preset_resolves_to_none() {
        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            "true",
        )
        .with_answer(Some("typo.sh".to_string()));
        assert_eq!(host.pick_item("Which Script?", &items(), false), None);
        assert!(host.preset.borrow().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_editor_with_arguments_receives_path() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("source.txt");
        let target = dir.path().join("my script.sh");
        fs::write(&source, "edited").unwrap();

        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            format!("cp -f '{}'", source.display()),
        );
        host.open_in_editor(&target).unwrap();

        assert_eq!(fs::read_to_string(&target).unwrap(), "edited");
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_editor_is_error() {
        let dir = tempdir().unwrap();
        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            "false",
        );
        let err = host.open_in_editor(&dir.path().join("x.sh")).unwrap_err();
        assert!(err.to_string().contains("'false'"));
    }

    #[test]
    fn test_context_from_args_defaults_to_cwd() {
        let ctx = context_from_args(Path::new("/work"), None, None, &[]);
        assert_eq!(ctx.cursor, FileEntry::new("/work", ""));
        assert_eq!(ctx.left_pane.dir, PathBuf::from("/work"));
        assert_eq!(ctx.right_pane.dir, PathBuf::from("/work"));
        assert!(ctx.selected_files.is_empty());
        assert_eq!(ctx.left_pane.selected, None);
    }

    #[test]
    fn test_context_from_args_with_selection() {
        let ctx = context_from_args(
            Path::new("/work"),
            Some(PathBuf::from("/work")),
            Some(PathBuf::from("/other")),
            &[PathBuf::from("a.txt"), PathBuf::from("/other/b.txt")],
        );
        assert_eq!(ctx.cursor, FileEntry::new("/work", "a.txt"));
        assert_eq!(ctx.left_pane.selected, Some(FileEntry::new("/work", "a.txt")));
        assert_eq!(ctx.right_pane.selected, Some(FileEntry::new("/other", "b.txt")));

        let env = ScriptEnv::build(&ctx);
        assert_eq!(env.files_selected, "/work/a.txt, /other/b.txt");
    }

    #[test]
    fn test_preset_answer_skips_prompt() {
        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            "true",
        )
        .with_answer(Some("clean.sh".to_string()));
        assert_eq!(
            host.pick_item("Which Script?", &items(), false).as_deref(),
            Some("/s/clean.sh")
        );
    }

    #[test]
    fn test_copy_entries_overwrites() {
        let src = tempdir().unwrap();
        let dest = tempdir().unwrap();
        fs::write(src.path().join("one.sh"), "new").unwrap();
        fs::write(dest.path().join("one.sh"), "old").unwrap();

        let host = TerminalHost::new(
            HostContext::default(),
            ShellExecutor::new("/bin/sh"),
            "true",
        );
        host.copy_entries(&[FileEntry::new(src.path(), "one.sh")], dest.path())
            .unwrap();

        assert_eq!(fs::read_to_string(dest.path().join("one.sh")).unwrap(), "new");
    }
}
