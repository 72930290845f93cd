//! Command-line history, persisted as a JSON array of strings.
//!
//! Entries are appended in memory as command lines run and deduplicated on
//! save. Dedup keeps the first occurrence of each entry, so the picker shows
//! commands in the order they were first used.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info, instrument, warn};

use crate::config::DEFAULT_HISTORY_ENTRY;

#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: Vec<String>,
    file_path: PathBuf,
}

impl HistoryLog {
    /// Load history from `path` using the stock seed entry
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        Self::load_with_default(path, DEFAULT_HISTORY_ENTRY)
    }

    /// Load history from `path`.
    ///
    /// A missing file is created holding only `default_entry`.
    #[instrument(name = "history_load", skip_all)]
    pub fn load_with_default(path: impl Into<PathBuf>, default_entry: &str) -> Result<Self> {
        let file_path = path.into();

        if !file_path.exists() {
            info!(path = %file_path.display(), "History file not found, seeding");
            let mut log = HistoryLog {
                entries: vec![default_entry.to_string()],
                file_path,
            };
            log.save()?;
            return Ok(log);
        }

        let content = std::fs::read_to_string(&file_path).with_context(|| {
            format!("Failed to read history file: {}", file_path.display())
        })?;
        let entries: Vec<String> = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse history JSON: {}", file_path.display()))?;

        info!(
            path = %file_path.display(),
            entry_count = entries.len(),
            "Loaded command history"
        );

        Ok(HistoryLog { entries, file_path })
    }

    /// An in-memory log that saves to `path` (nothing is read)
    pub fn with_entries(path: impl Into<PathBuf>, entries: Vec<String>) -> Self {
        HistoryLog {
            entries,
            file_path: path.into(),
        }
    }

    /// Append a command line. Duplicates are removed on the next save.
    pub fn record(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(entry = %entry, "Recorded history entry");
        self.entries.push(entry);
    }

    /// Deduplicate and write to disk using atomic write (write temp + rename)
    #[instrument(name = "history_save", skip(self))]
    pub fn save(&mut self) -> Result<()> {
        dedup_in_place(&mut self.entries);

        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let json =
            serde_json::to_string(&self.entries).context("Failed to serialize history")?;

        let temp_path = self.file_path.with_extension("json.tmp");
        std::fs::write(&temp_path, &json).with_context(|| {
            format!("Failed to write temp history file: {}", temp_path.display())
        })?;
        std::fs::rename(&temp_path, &self.file_path).with_context(|| {
            format!("Failed to rename temp file to {}", self.file_path.display())
        })?;

        info!(
            path = %self.file_path.display(),
            entry_count = self.entries.len(),
            "Saved command history (atomic)"
        );
        Ok(())
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Move an unreadable history file to `<name>.bak` so the next save does not
/// overwrite it. Returns the backup path.
pub fn back_up(path: &Path) -> Result<PathBuf> {
    let backup = path.with_extension("json.bak");
    std::fs::rename(path, &backup).with_context(|| {
        format!(
            "Failed to move {} to {}",
            path.display(),
            backup.display()
        )
    })?;
    warn!(path = %path.display(), backup = %backup.display(), "Backed up unreadable history");
    Ok(backup)
}

/// Drop repeated entries, keeping each first occurrence in place
fn dedup_in_place(entries: &mut Vec<String>) {
    let mut seen = HashSet::with_capacity(entries.len());
    entries.retain(|entry| seen.insert(entry.clone()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn read_persisted(path: &Path) -> Vec<String> {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_load_missing_file_seeds_ls() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");

        let log = HistoryLog::load(&path).unwrap();

        assert_eq!(log.entries(), ["ls"]);
        assert_eq!(read_persisted(&path), vec!["ls"]);
    }

    #[test]
    fn test_load_missing_file_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/deeper/cmdhist.json");
        let log = HistoryLog::load_with_default(&path, "pwd").unwrap();
        assert_eq!(log.entries(), ["pwd"]);
        assert!(path.exists());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        fs::write(&path, r#"["git status","make"]"#).unwrap();

        let log = HistoryLog::load(&path).unwrap();
        assert_eq!(log.entries(), ["git status", "make"]);
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        fs::write(&path, "not valid json").unwrap();

        assert!(HistoryLog::load(&path).is_err());
    }

    #[test]
    fn test_back_up_moves_file_aside() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        fs::write(&path, r#"["git status",]"#).unwrap();

        let backup = back_up(&path).unwrap();

        assert_eq!(backup, dir.path().join("cmdhist.json.bak"));
        assert!(!path.exists());
        assert_eq!(fs::read_to_string(&backup).unwrap(), r#"["git status",]"#);
    }

    #[test]
    fn test_back_up_missing_file_is_error() {
        let dir = tempdir().unwrap();
        assert!(back_up(&dir.path().join("cmdhist.json")).is_err());
    }

    #[test]
    fn test_save_persists_distinct_entries() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        let mut log = HistoryLog::load(&path).unwrap();

        for entry in ["make", "ls", "make", "cargo test", "ls", "make"] {
            log.record(entry);
        }
        log.save().unwrap();

        let persisted = read_persisted(&path);
        let distinct: HashSet<_> = persisted.iter().cloned().collect();
        assert_eq!(persisted.len(), distinct.len());
        assert_eq!(
            distinct,
            ["ls", "make", "cargo test"]
                .iter()
                .map(|s| s.to_string())
                .collect()
        );
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_order() {
        let mut entries: Vec<String> = ["b", "a", "b", "c", "a"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        dedup_in_place(&mut entries);
        assert_eq!(entries, ["b", "a", "c"]);
    }

    #[test]
    fn test_record_does_not_write() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        let mut log = HistoryLog::load(&path).unwrap();
        log.record("echo hi");
        assert_eq!(read_persisted(&path), vec!["ls"]);
        assert_eq!(log.entries(), ["ls", "echo hi"]);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cmdhist.json");
        {
            let mut log = HistoryLog::with_entries(&path, vec![]);
            log.record("one");
            log.record("two");
            log.save().unwrap();
        }
        let log = HistoryLog::load(&path).unwrap();
        assert_eq!(log.entries(), ["one", "two"]);
        assert!(!dir.path().join("cmdhist.json.tmp").exists());
    }
}
