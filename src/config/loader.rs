//! Configuration loading from file system

use std::path::Path;

use tracing::{info, instrument, warn};

use super::types::Config;

/// Load configuration from a JSON file.
///
/// Returns `Config::default()` if the file is missing, unreadable or invalid.
#[instrument(name = "load_config", skip_all, fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        info!(path = %path.display(), "Config file not found, using defaults");
        return Config::default();
    }

    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "Failed to read config file, using defaults");
            return Config::default();
        }
    };

    match serde_json::from_str::<Config>(&content) {
        Ok(config) => {
            info!(path = %path.display(), "Successfully loaded config");
            config
        }
        Err(e) => {
            warn!(
                error = %e,
                path = %path.display(),
                "Failed to parse config JSON, using defaults"
            );
            Config::default()
        }
    }
}
