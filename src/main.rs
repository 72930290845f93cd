//! run-scripts - run user scripts from the terminal
//!
//! # Usage
//!
//! ```bash
//! run-scripts run build.sh --select notes.txt
//! run-scripts npm test
//! run-scripts exec 'ls -la' --left ~/src --right /tmp
//! cd "$(run-scripts dir)"
//! ```

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use run_scripts::commands::CommandId;
use run_scripts::config::load_config;
use run_scripts::executor::ShellExecutor;
use run_scripts::logging;
use run_scripts::plugin::RunScripts;
use run_scripts::setup::{self, Paths};
use run_scripts::terminal_host::{context_from_args, TerminalHost};

#[derive(Parser, Debug)]
#[command(name = "run-scripts", version, about = "Run user scripts with file manager context")]
struct Cli {
    /// Directory shown in the left pane
    #[arg(long, global = true)]
    left: Option<PathBuf>,

    /// Directory shown in the right pane
    #[arg(long, global = true)]
    right: Option<PathBuf>,

    /// Selected file; the first one is the cursor. Repeatable.
    #[arg(short, long = "select", global = true)]
    select: Vec<PathBuf>,

    /// Do not show script output
    #[arg(long, global = true, default_value_t = false)]
    no_output: bool,

    /// Also log to stderr
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Run a script from the scripts directory
    Run { name: Option<String> },
    /// Run an npm script from ./package.json
    Npm { script: Option<String> },
    /// Run a task from ./maskfile.md
    Mask { task: Option<String> },
    /// Create a script from the template and open it in the editor
    Create { name: Option<String> },
    /// Run a command line and remember it
    Exec { line: Option<String> },
    /// Open a script in the editor
    Edit { name: Option<String> },
    /// Print the scripts directory
    Dir,
    /// Copy the example scripts into the scripts directory
    InstallExamples,
    /// List scripts in the scripts directory
    List,
    /// List registered commands
    Commands,
    /// Dispatch a command by id or name
    Dispatch { command: CommandId },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = logging::init(cli.verbose);

    let config = load_config(&setup::config_path());
    let paths = Paths::resolve(setup::get_data_path(), &config);

    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let context = context_from_args(&cwd, cli.left, cli.right, &cli.select);

    let answer = match &cli.command {
        Cmd::Run { name } | Cmd::Edit { name } | Cmd::Create { name } => name.clone(),
        Cmd::Npm { script } => script.clone(),
        Cmd::Mask { task } => task.clone(),
        Cmd::Exec { line } => line.clone(),
        _ => None,
    };
    let host = TerminalHost::new(
        context,
        ShellExecutor::new(config.get_shell()),
        config.get_editor(),
    )
    .with_answer(answer);

    let mut plugin = RunScripts::init(host, config, paths);
    if cli.no_output && plugin.show_output() {
        plugin.toggle_show_output();
    }

    info!(command = ?cli.command, "Starting");
    match cli.command {
        Cmd::Run { .. } => plugin.dispatch(CommandId::RunScript),
        Cmd::Npm { .. } => plugin.dispatch(CommandId::RunNpmScript),
        Cmd::Mask { .. } => plugin.dispatch(CommandId::RunMaskScript),
        Cmd::Create { .. } => plugin.dispatch(CommandId::CreateScript),
        Cmd::Exec { .. } => plugin.dispatch(CommandId::RunCommandLine),
        Cmd::Edit { .. } => plugin.dispatch(CommandId::EditScript),
        Cmd::Dir => plugin.dispatch(CommandId::GoToScriptsDirectory),
        Cmd::InstallExamples => plugin.dispatch(CommandId::InstallExampleScripts),
        Cmd::List => {
            for script in plugin.store().list() {
                println!("{}", script.name);
            }
        }
        Cmd::Commands => {
            for command in RunScripts::<TerminalHost>::commands() {
                println!("{:<30} {:<24} {}", command.id(), command.name(), command.description());
            }
        }
        Cmd::Dispatch { command } => plugin.dispatch(command),
    }

    plugin.unload();
    Ok(())
}
