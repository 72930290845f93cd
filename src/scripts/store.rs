//! The scripts directory: listing, creation and example seeding.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use crate::error::{Result, RunScriptsError};

use super::types::ScriptEntry;

#[derive(Debug, Clone)]
pub struct ScriptStore {
    dir: PathBuf,
}

impl ScriptStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        ScriptStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the directory if it is missing.
    ///
    /// Returns true when the directory was created by this call.
    #[instrument(name = "ensure_scripts_dir", skip(self), fields(dir = %self.dir.display()))]
    pub fn ensure_dir(&self) -> Result<bool> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir).map_err(|e| RunScriptsError::io(&self.dir, e))?;
        info!(dir = %self.dir.display(), "Created scripts directory");
        Ok(true)
    }

    /// All entries in the scripts directory, sorted by name.
    ///
    /// Returns an empty vec if the directory doesn't exist or is inaccessible.
    #[instrument(level = "debug", skip(self))]
    pub fn list(&self) -> Vec<ScriptEntry> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    error = %e,
                    path = %self.dir.display(),
                    "Failed to read scripts directory"
                );
                return Vec::new();
            }
        };

        let mut scripts: Vec<ScriptEntry> = entries
            .flatten()
            .map(|entry| ScriptEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
            })
            .collect();
        scripts.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(count = scripts.len(), "Listed scripts");
        scripts
    }

    pub fn exists(&self, name: &str) -> bool {
        validate_name(name)
            .map(|name| self.dir.join(name).exists())
            .unwrap_or(false)
    }

    /// Write `template` to a new script called `name` and return its path.
    ///
    /// # Errors
    ///
    /// - `InvalidScriptName` for an empty name or one that leaves the directory
    /// - `AlreadyExists` if the file is present; it is left untouched
    /// - `Io` if the file cannot be written
    #[instrument(name = "create_script", skip(self, template))]
    pub fn create(&self, name: &str, template: &str) -> Result<PathBuf> {
        let name = validate_name(name)?;
        let script_path = self.dir.join(name);

        if script_path.exists() {
            return Err(RunScriptsError::AlreadyExists { path: script_path });
        }

        fs::write(&script_path, template).map_err(|e| RunScriptsError::io(&script_path, e))?;

        info!(path = %script_path.display(), "Created new script");
        Ok(script_path)
    }

    /// Write each `(file name, contents)` pair, replacing existing files
    #[instrument(name = "write_scripts", skip_all, fields(count = scripts.len()))]
    pub fn write_all(&self, scripts: &[(&str, &str)]) -> Result<()> {
        for (name, contents) in scripts {
            let path = self.dir.join(name);
            fs::write(&path, contents).map_err(|e| RunScriptsError::io(&path, e))?;
            debug!(path = %path.display(), "Wrote script");
        }
        Ok(())
    }
}

/// Trim `name` and reject anything that is not a plain file name
fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    let is_plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains(std::path::MAIN_SEPARATOR);
    if is_plain {
        Ok(name)
    } else {
        Err(RunScriptsError::InvalidScriptName(name.to_string()))
    }
}
