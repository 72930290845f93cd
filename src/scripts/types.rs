//! Script entry type

use std::path::PathBuf;

/// A file in the scripts directory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScriptEntry {
    /// File name, shown in pick lists
    pub name: String,
    /// Full path, passed to the shell or the editor
    pub path: PathBuf,
}
