//! Command-line invocation
//!
//! - `run` hands a command line to the host's execution primitive and reports
//!   the result through a completion callback
//! - `ShellExecutor` is the stock primitive, running the line through a shell

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Instant;

use tracing::{error, info, instrument};

use crate::environment::ScriptEnv;
use crate::error::RunScriptsError;
use crate::host::CommandExecutor;

/// Run `command_line` through `executor` with `env` and `cwd` passed
/// verbatim. `on_complete` is called exactly once with the output or the
/// failure. There is no retry and no timeout.
#[instrument(name = "run_command_line", skip(executor, env, on_complete), fields(cwd = %cwd.display()))]
pub fn run<E, F>(executor: &E, command_line: &str, env: &ScriptEnv, cwd: &Path, on_complete: F)
where
    E: CommandExecutor + ?Sized,
    F: FnOnce(Result<String, RunScriptsError>),
{
    let started = Instant::now();
    let result = executor
        .run_command_line(command_line, env, cwd)
        .map_err(RunScriptsError::Execution);

    let duration_ms = started.elapsed().as_millis() as u64;
    match &result {
        Ok(output) => info!(
            event_type = "script_event",
            command_line = command_line,
            duration_ms = duration_ms,
            output_bytes = output.len(),
            success = true,
            "Command line finished"
        ),
        Err(e) => error!(
            event_type = "script_event",
            command_line = command_line,
            duration_ms = duration_ms,
            error = %e,
            success = false,
            "Command line failed"
        ),
    }

    on_complete(result);
}

/// Runs command lines as `<shell> -c <line>`
#[derive(Debug, Clone)]
pub struct ShellExecutor {
    shell: PathBuf,
}

impl ShellExecutor {
    pub fn new(shell: impl Into<PathBuf>) -> Self {
        ShellExecutor {
            shell: shell.into(),
        }
    }

    pub fn shell(&self) -> &Path {
        &self.shell
    }
}

impl CommandExecutor for ShellExecutor {
    fn run_command_line(
        &self,
        command_line: &str,
        env: &ScriptEnv,
        cwd: &Path,
    ) -> Result<String, String> {
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command_line)
            .envs(env.vars())
            .current_dir(cwd)
            .output()
            .map_err(|e| format!("Failed to run '{}': {}", self.shell.display(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if output.status.success() {
            if stdout.is_empty() {
                Ok(stderr.into_owned())
            } else {
                Ok(stdout.into_owned())
            }
        } else if stderr.is_empty() {
            Err(format!(
                "Command '{}' failed with status: {}",
                command_line, output.status
            ))
        } else {
            Err(stderr.into_owned())
        }
    }
}
