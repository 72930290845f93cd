//! Commands the plugin registers with the host's command palette.

use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    RunScript,
    RunNpmScript,
    RunMaskScript,
    CreateScript,
    ToggleShowOutput,
    RunCommandLine,
    EditScript,
    GoToScriptsDirectory,
    InstallExampleScripts,
}

impl CommandId {
    /// Registration order
    pub const ALL: [CommandId; 9] = [
        CommandId::RunScript,
        CommandId::RunNpmScript,
        CommandId::RunMaskScript,
        CommandId::CreateScript,
        CommandId::ToggleShowOutput,
        CommandId::RunCommandLine,
        CommandId::EditScript,
        CommandId::GoToScriptsDirectory,
        CommandId::InstallExampleScripts,
    ];

    /// Name shown in the command palette
    pub fn name(self) -> &'static str {
        match self {
            CommandId::RunScript => "Run Script",
            CommandId::RunNpmScript => "Run NPM Script",
            CommandId::RunMaskScript => "Run Mask Script",
            CommandId::CreateScript => "Create Script",
            CommandId::ToggleShowOutput => "Toggle Show Output",
            CommandId::RunCommandLine => "Run Command Line",
            CommandId::EditScript => "Edit Script",
            CommandId::GoToScriptsDirectory => "Go To Scripts Directory",
            CommandId::InstallExampleScripts => "Install Example Scripts",
        }
    }

    /// Stable identifier for key bindings
    pub fn id(self) -> &'static str {
        match self {
            CommandId::RunScript => "runScripts.runScript",
            CommandId::RunNpmScript => "runScripts.runNpmScript",
            CommandId::RunMaskScript => "runScripts.runMaskScript",
            CommandId::CreateScript => "runScripts.createScript",
            CommandId::ToggleShowOutput => "runScripts.toggleShowOutput",
            CommandId::RunCommandLine => "runScripts.runCommandLine",
            CommandId::EditScript => "runScripts.editScript",
            CommandId::GoToScriptsDirectory => "runScripts.goToScript",
            CommandId::InstallExampleScripts => "runScripts.copyExampleScripts",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            CommandId::RunScript => "Run a user created script.",
            CommandId::RunNpmScript => "Run a npm script.",
            CommandId::RunMaskScript => "Run a Mask script.",
            CommandId::CreateScript => "Create a script.",
            CommandId::ToggleShowOutput => {
                "Toggle the showing of an output from running scripts."
            }
            CommandId::RunCommandLine => "Run a command line the user gives.",
            CommandId::EditScript => "Edit the user specified script.",
            CommandId::GoToScriptsDirectory => "Open the scripts directory.",
            CommandId::InstallExampleScripts => {
                "Install the example scripts. If you have changed any, they will be overwritten."
            }
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown command: '{0}'")]
pub struct UnknownCommand(pub String);

impl FromStr for CommandId {
    type Err = UnknownCommand;

    /// Accepts either the identifier or the display name (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CommandId::ALL
            .into_iter()
            .find(|cmd| cmd.id() == s || cmd.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}
