use std::path::PathBuf;

use thiserror::Error;
use tracing::{error, warn};

/// Domain-specific errors for the script runner
#[derive(Error, Debug)]
pub enum RunScriptsError {
    #[error("Script already exists: {}", path.display())]
    AlreadyExists { path: PathBuf },

    #[error("Invalid script name: '{0}'")]
    InvalidScriptName(String),

    #[error("IO error for '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {source}", path.display())]
    Manifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Command execution failed: {0}")]
    Execution(String),
}

impl RunScriptsError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Text suitable for the host's message dialog
    pub fn user_message(&self) -> String {
        match self {
            Self::AlreadyExists { .. } => "Script already exists!".to_string(),
            Self::InvalidScriptName(name) if name.trim().is_empty() => {
                "A script needs a file name.".to_string()
            }
            Self::InvalidScriptName(name) => {
                format!("'{}' is not a valid script file name.", name)
            }
            Self::Io { path, source } => {
                format!("Could not access {}: {}", path.display(), source)
            }
            Self::Manifest { path, source } => {
                format!("Could not read {}: {}", path.display(), source)
            }
            Self::Execution(msg) => msg.clone(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RunScriptsError>;

/// Extension trait for silent error logging with caller location tracking.
/// Use when the operation is recoverable and the user doesn't need to know.
///
/// # Examples
///
/// ```ignore
/// use run_scripts::error::ResultExt;
///
/// let history = HistoryLog::load(&path).log_err();
/// let config = read_config().warn_on_err();
/// ```
pub trait ResultExt<T> {
    /// Log error with caller location and return None.
    fn log_err(self) -> Option<T>;
    /// Log as warning with caller location and return None.
    fn warn_on_err(self) -> Option<T>;
}

impl<T, E: std::fmt::Debug> ResultExt<T> for std::result::Result<T, E> {
    #[track_caller]
    fn log_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                error!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation failed"
                );
                None
            }
        }
    }

    #[track_caller]
    fn warn_on_err(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(error) => {
                let caller = std::panic::Location::caller();
                warn!(
                    error = ?error,
                    file = caller.file(),
                    line = caller.line(),
                    "Operation had warning"
                );
                None
            }
        }
    }
}
