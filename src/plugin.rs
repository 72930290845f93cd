//! The plugin context and its command handlers.
//!
//! `RunScripts` is built once by [`RunScripts::init`] and owns all plugin
//! state: the script store, the command history and the show-output flag.
//! Every handler reports problems through the host's message dialog and
//! never fails the caller.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::commands::CommandId;
use crate::config::Config;
use crate::environment::ScriptEnv;
use crate::error::{ResultExt, RunScriptsError};
use crate::executor::{self, render_result, OUTPUT_TITLE};
use crate::history::{self, HistoryLog};
use crate::host::{FileEntry, Host, PickItem};
use crate::scripts::{ScriptEntry, ScriptStore, BUNDLED_EXAMPLES};
use crate::setup::Paths;
use crate::tasks::{self, MASKFILE, NPM_MANIFEST};

pub const MESSAGE_TITLE: &str = "Run User Scripts";
pub const CREATE_TITLE: &str = "Create User Scripts";
pub const CREATE_ERROR_TITLE: &str = "Create User Script";
pub const COMMAND_LINE_TITLE: &str = "Run Command Line";

pub const NO_SCRIPTS_MESSAGE: &str = "No scripts created yet. Start making some!";
pub const SCRIPT_EXISTS_MESSAGE: &str = "Script already exists!";
pub const BAD_COMMAND_LINE_MESSAGE: &str = "Not a proper command line. Try again.";

pub struct RunScripts<H: Host> {
    host: H,
    config: Config,
    paths: Paths,
    store: ScriptStore,
    history: HistoryLog,
    show_output: bool,
}

impl<H: Host> RunScripts<H> {
    /// Set up the plugin.
    ///
    /// Creates the scripts directory (seeding it with the example scripts)
    /// when missing, and loads the command history, creating it when absent.
    /// A history file that cannot be read is moved aside to `<name>.bak`,
    /// the user is told, and the default entry is used in its place.
    #[instrument(name = "run_scripts_init", skip_all, fields(scripts_dir = %paths.scripts_dir.display()))]
    pub fn init(host: H, config: Config, paths: Paths) -> Self {
        let default_entry = config.get_default_history_entry().to_string();
        let history = match HistoryLog::load_with_default(&paths.history_file, &default_entry) {
            Ok(history) => history,
            Err(e) => {
                error!(error = %format!("{:#}", e), "Failed to load command history");
                let message = match history::back_up(&paths.history_file) {
                    Ok(backup) => format!(
                        "Command history was unreadable and has been reset. Backup at {}",
                        backup.display()
                    ),
                    Err(backup_err) => {
                        error!(error = %format!("{:#}", backup_err), "Failed to back up command history");
                        format!("Command history was unreadable and has been reset: {:#}", e)
                    }
                };
                host.show_message(COMMAND_LINE_TITLE, &message);
                HistoryLog::with_entries(&paths.history_file, vec![default_entry.clone()])
            }
        };

        let mut plugin = RunScripts {
            store: ScriptStore::new(&paths.scripts_dir),
            show_output: config.get_show_output(),
            host,
            config,
            paths,
            history,
        };

        match plugin.store.ensure_dir() {
            Ok(true) => plugin.install_example_scripts(),
            Ok(false) => {}
            Err(e) => {
                error!(error = %e, "Could not create scripts directory");
                plugin.report(MESSAGE_TITLE, &e);
            }
        }

        info!(
            history_entries = plugin.history.len(),
            show_output = plugin.show_output,
            "Run scripts plugin initialized"
        );
        plugin
    }

    /// Commands to register with the host, in order
    pub fn commands() -> &'static [CommandId] {
        &CommandId::ALL
    }

    #[instrument(skip(self, command), fields(command = %command.id()))]
    pub fn dispatch(&mut self, command: CommandId) {
        debug!("Dispatching command");
        match command {
            CommandId::RunScript => self.run_script(),
            CommandId::RunNpmScript => self.run_npm_script(),
            CommandId::RunMaskScript => self.run_mask_script(),
            CommandId::CreateScript => self.create_script(),
            CommandId::ToggleShowOutput => {
                self.toggle_show_output();
            }
            CommandId::RunCommandLine => self.run_command_line(),
            CommandId::EditScript => self.edit_script(),
            CommandId::GoToScriptsDirectory => self.go_to_scripts_directory(),
            CommandId::InstallExampleScripts => self.install_example_scripts(),
        }
    }

    /// Persist history. Call when the host unloads the plugin.
    pub fn unload(&mut self) {
        self.history.save().log_err();
    }

    /// Pick a script from the scripts directory and run it
    pub fn run_script(&mut self) {
        if let Some(path) = self.pick_script() {
            self.invoke(&shell_quote(&path));
        }
    }

    /// Pick a script from the scripts directory and open it in the editor
    pub fn edit_script(&mut self) {
        if let Some(path) = self.pick_script() {
            self.host.edit_entry(Path::new(&path));
        }
    }

    /// Pick one of the npm scripts next to the cursor and run it
    pub fn run_npm_script(&mut self) {
        let dir = self.host.context().cursor.dir;
        match tasks::npm_scripts(&dir) {
            Ok(None) => self.host.show_message(
                MESSAGE_TITLE,
                &format!("No {} file in this directory!", NPM_MANIFEST),
            ),
            Ok(Some(scripts)) if scripts.is_empty() => self
                .host
                .show_message(MESSAGE_TITLE, &format!("No scripts in {}!", NPM_MANIFEST)),
            Ok(Some(scripts)) => {
                let items = same_name_items(&scripts);
                if let Some(script) = self.host.pick_item("Which Npm Script?", &items, false) {
                    self.invoke(&tasks::npm_command(&script));
                }
            }
            Err(e) => self.report(MESSAGE_TITLE, &e),
        }
    }

    /// Pick one of the Mask tasks next to the cursor and run it
    pub fn run_mask_script(&mut self) {
        let dir = self.host.context().cursor.dir;
        match tasks::mask_tasks(&dir) {
            Ok(None) => self.host.show_message(
                MESSAGE_TITLE,
                &format!("No {} file in this directory!", MASKFILE),
            ),
            Ok(Some(found)) if found.is_empty() => self
                .host
                .show_message(MESSAGE_TITLE, &format!("No tasks in {}!", MASKFILE)),
            Ok(Some(found)) => {
                let items = same_name_items(&found);
                if let Some(task) = self.host.pick_item("Which Mask Script?", &items, false) {
                    self.invoke(&tasks::mask_command(&task));
                }
            }
            Err(e) => self.report(MESSAGE_TITLE, &e),
        }
    }

    /// Ask for a file name, create the script and open it in the editor
    pub fn create_script(&mut self) {
        if let Some(name) = self
            .host
            .ask_question(CREATE_TITLE, "Name of the script file (with extension):")
        {
            self.create_script_named(&name);
        }
    }

    /// Create a script from the configured template and open it for editing.
    ///
    /// Returns the new path, or `None` after telling the user why not.
    pub fn create_script_named(&mut self, name: &str) -> Option<PathBuf> {
        match self.store.create(name, self.config.get_script_template()) {
            Ok(path) => {
                self.host.edit_entry(&path);
                Some(path)
            }
            Err(e) => {
                warn!(error = %e, "Script not created");
                self.report(CREATE_ERROR_TITLE, &e);
                None
            }
        }
    }

    /// Flip the show-output flag and return its new value
    pub fn toggle_show_output(&mut self) -> bool {
        self.show_output = !self.show_output;
        info!(show_output = self.show_output, "Toggled show output");
        self.show_output
    }

    /// Offer past command lines (or a new one) and run the choice
    pub fn run_command_line(&mut self) {
        let items = same_name_items(self.history.entries());
        let choice = self.host.pick_item("Command Line:", &items, true);
        self.run_command_line_with(choice);
    }

    /// Record, persist and run `line`. `None` or a blank line is rejected.
    pub fn run_command_line_with(&mut self, line: Option<String>) {
        let line = match line {
            Some(line) if !line.trim().is_empty() => line,
            _ => {
                self.host
                    .show_message(COMMAND_LINE_TITLE, BAD_COMMAND_LINE_MESSAGE);
                return;
            }
        };

        self.history.record(line.clone());
        if let Err(e) = self.history.save() {
            error!(error = %format!("{:#}", e), "Failed to save command history");
            self.host.show_message(
                COMMAND_LINE_TITLE,
                &format!("Could not save command history: {:#}", e),
            );
        }
        self.invoke(&line);
    }

    pub fn go_to_scripts_directory(&mut self) {
        self.host.change_dir(self.store.dir());
    }

    /// Copy the example scripts into the scripts directory, overwriting any
    /// earlier copies.
    ///
    /// A configured example directory is bulk-copied by the host; otherwise
    /// the bundled examples are written.
    #[instrument(skip(self))]
    pub fn install_example_scripts(&mut self) {
        let dest = self.store.dir();
        if !dest.is_dir() {
            warn!(dir = %dest.display(), "Scripts directory missing, examples not installed");
            self.host.show_message(
                MESSAGE_TITLE,
                &format!("Scripts directory {} does not exist.", dest.display()),
            );
            return;
        }

        match &self.paths.example_scripts_dir {
            Some(source) if source.is_dir() => {
                let entries = list_entries(source);
                info!(source = %source.display(), count = entries.len(), "Installing example scripts");
                if let Err(e) = self.host.copy_entries(&entries, dest) {
                    error!(error = %format!("{:#}", e), "Failed to copy example scripts");
                    self.host.show_message(
                        MESSAGE_TITLE,
                        &format!("Could not install example scripts: {:#}", e),
                    );
                }
            }
            Some(source) => {
                warn!(source = %source.display(), "Example scripts directory not found");
                self.host.show_message(
                    MESSAGE_TITLE,
                    &format!("Example scripts directory {} not found.", source.display()),
                );
            }
            None => {
                info!(count = BUNDLED_EXAMPLES.len(), "Installing bundled example scripts");
                if let Err(e) = self.store.write_all(BUNDLED_EXAMPLES) {
                    error!(error = %e, "Failed to write bundled example scripts");
                    self.report(MESSAGE_TITLE, &e);
                }
            }
        }
    }

    pub fn show_output(&self) -> bool {
        self.show_output
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn store(&self) -> &ScriptStore {
        &self.store
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// List scripts and let the user pick one. Returns the chosen path.
    fn pick_script(&self) -> Option<String> {
        let scripts = self.store.list();
        if scripts.is_empty() {
            self.host.show_message(MESSAGE_TITLE, NO_SCRIPTS_MESSAGE);
            return None;
        }
        let items: Vec<PickItem> = scripts.iter().map(script_item).collect();
        self.host.pick_item("Which Script?", &items, false)
    }

    /// Build the environment from live host state and run `command_line`
    /// in the cursor's directory.
    fn invoke(&self, command_line: &str) {
        let ctx = self.host.context();
        let env = ScriptEnv::build(&ctx);
        let cwd = if ctx.cursor.dir.as_os_str().is_empty() {
            PathBuf::from(".")
        } else {
            ctx.cursor.dir.clone()
        };

        executor::run(&self.host, command_line, &env, &cwd, |result| {
            if !self.show_output {
                return;
            }
            let result = result.map_err(|e| e.user_message());
            let text = render_result(&result, self.host.output_format());
            self.host.show_message(OUTPUT_TITLE, &text);
        });
    }

    fn report(&self, title: &str, err: &RunScriptsError) {
        self.host.show_message(title, &err.user_message());
    }
}

fn script_item(script: &ScriptEntry) -> PickItem {
    PickItem::new(&script.name, script.path.to_string_lossy())
}

fn same_name_items(values: &[String]) -> Vec<PickItem> {
    values
        .iter()
        .map(|v| PickItem::new(v.as_str(), v.as_str()))
        .collect()
}

/// Entries of `dir` as host file entries, sorted by name
fn list_entries(dir: &Path) -> Vec<FileEntry> {
    let mut entries: Vec<FileEntry> = match fs::read_dir(dir) {
        Ok(read) => read
            .flatten()
            .map(|e| FileEntry::new(dir, e.file_name().to_string_lossy()))
            .collect(),
        Err(e) => {
            warn!(error = %e, dir = %dir.display(), "Failed to list example scripts");
            Vec::new()
        }
    };
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

/// Single-quote a path for the shell
fn shell_quote(path: &str) -> String {
    format!("'{}'", path.replace('\'', r"'\''"))
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
