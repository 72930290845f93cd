//! Data directory layout.
//!
//! Everything the plugin persists lives under `~/.run-scripts`. The location
//! can be overridden via the RUN_SCRIPTS_PATH environment variable.

use std::path::PathBuf;

use crate::config::Config;

/// Environment variable overriding the data directory
pub const DATA_PATH_ENV: &str = "RUN_SCRIPTS_PATH";

const HISTORY_FILE_NAME: &str = "cmdhist.json";
const SCRIPTS_DIR_NAME: &str = "scripts";
const CONFIG_FILE_NAME: &str = "config.json";

/// Get the data path, respecting RUN_SCRIPTS_PATH
///
/// Priority:
/// 1. RUN_SCRIPTS_PATH environment variable (if set)
/// 2. ~/.run-scripts (default)
/// 3. Temp directory fallback (if home dir unavailable)
pub fn get_data_path() -> PathBuf {
    if let Ok(path) = std::env::var(DATA_PATH_ENV) {
        return PathBuf::from(shellexpand::tilde(&path).as_ref());
    }

    match dirs::home_dir() {
        Some(home) => home.join(".run-scripts"),
        None => std::env::temp_dir().join("run-scripts"),
    }
}

/// Path of the optional JSON config file
pub fn config_path() -> PathBuf {
    get_data_path().join(CONFIG_FILE_NAME)
}

/// Resolved locations the plugin reads and writes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub scripts_dir: PathBuf,
    pub history_file: PathBuf,
    /// Directory whose entries "Install Example Scripts" copies, if configured
    pub example_scripts_dir: Option<PathBuf>,
}

impl Paths {
    /// Resolve paths relative to `data_dir`, honouring config overrides
    pub fn resolve(data_dir: impl Into<PathBuf>, config: &Config) -> Self {
        let data_dir = data_dir.into();
        let expand = |p: &str| PathBuf::from(shellexpand::tilde(p).as_ref());

        Paths {
            scripts_dir: config
                .scripts_dir
                .as_deref()
                .map(expand)
                .unwrap_or_else(|| data_dir.join(SCRIPTS_DIR_NAME)),
            history_file: data_dir.join(HISTORY_FILE_NAME),
            example_scripts_dir: config.example_scripts_dir.as_deref().map(expand),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let paths = Paths::resolve("/data", &Config::default());
        assert_eq!(paths.scripts_dir, PathBuf::from("/data/scripts"));
        assert_eq!(paths.history_file, PathBuf::from("/data/cmdhist.json"));
        assert_eq!(paths.example_scripts_dir, None);
    }

    #[test]
    fn test_resolve_overrides() {
        let config = Config {
            scripts_dir: Some("/elsewhere/scripts".to_string()),
            example_scripts_dir: Some("/opt/examples".to_string()),
            ..Config::default()
        };
        let paths = Paths::resolve("/data", &config);
        assert_eq!(paths.scripts_dir, PathBuf::from("/elsewhere/scripts"));
        assert_eq!(paths.history_file, PathBuf::from("/data/cmdhist.json"));
        assert_eq!(
            paths.example_scripts_dir,
            Some(PathBuf::from("/opt/examples"))
        );
    }
}
