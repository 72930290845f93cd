//! Configuration type definitions

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// User configuration, read from `<data dir>/config.json`.
///
/// Every field is optional; getters fall back to the defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Show script output after each run (default: true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_output: Option<bool>,
    /// Shell that interprets command lines (default: /bin/sh)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shell: Option<String>,
    /// Editor for Create/Edit Script (default: $EDITOR, then vi)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
    /// Scripts directory (default: <data dir>/scripts)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scripts_dir: Option<String>,
    /// Directory holding example scripts to install
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_scripts_dir: Option<String>,
    /// Template for new scripts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub script_template: Option<String>,
    /// Entry a new history file starts with (default: "ls")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_history_entry: Option<String>,
}

impl Config {
    pub fn get_show_output(&self) -> bool {
        self.show_output.unwrap_or(DEFAULT_SHOW_OUTPUT)
    }

    pub fn get_shell(&self) -> String {
        self.shell
            .clone()
            .unwrap_or_else(|| DEFAULT_SHELL.to_string())
    }

    /// Returns the editor command, falling back to $EDITOR and then vi
    pub fn get_editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .unwrap_or_else(|| DEFAULT_EDITOR.to_string())
    }

    pub fn get_script_template(&self) -> &str {
        self.script_template
            .as_deref()
            .unwrap_or(DEFAULT_SCRIPT_TEMPLATE)
    }

    pub fn get_default_history_entry(&self) -> &str {
        self.default_history_entry
            .as_deref()
            .unwrap_or(DEFAULT_HISTORY_ENTRY)
    }
}
