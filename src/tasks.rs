//! Task-runner targets found next to the cursor: npm scripts from
//! `package.json` and Mask tasks from `maskfile.md`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{Result, RunScriptsError};

pub const NPM_MANIFEST: &str = "package.json";
pub const MASKFILE: &str = "maskfile.md";

/// The part of package.json we care about
#[derive(Debug, Deserialize)]
struct PackageManifest {
    #[serde(default)]
    scripts: serde_json::Map<String, serde_json::Value>,
}

/// Names of the npm scripts in `dir/package.json`, in manifest order.
///
/// `Ok(None)` when there is no manifest.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn npm_scripts(dir: &Path) -> Result<Option<Vec<String>>> {
    let path = dir.join(NPM_MANIFEST);
    if !path.is_file() {
        debug!(path = %path.display(), "No npm manifest");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| RunScriptsError::io(&path, e))?;
    let manifest: PackageManifest = serde_json::from_str(&content)
        .map_err(|source| RunScriptsError::Manifest {
            path: path.clone(),
            source,
        })?;

    Ok(Some(manifest.scripts.keys().cloned().collect()))
}

/// Names of the level-2 headings (`## name ...`) in `dir/maskfile.md`.
///
/// `Ok(None)` when there is no maskfile.
#[instrument(level = "debug", skip_all, fields(dir = %dir.display()))]
pub fn mask_tasks(dir: &Path) -> Result<Option<Vec<String>>> {
    let path = dir.join(MASKFILE);
    if !path.is_file() {
        debug!(path = %path.display(), "No maskfile");
        return Ok(None);
    }

    let content = std::fs::read_to_string(&path).map_err(|e| RunScriptsError::io(&path, e))?;
    Ok(Some(parse_mask_tasks(&content)))
}

fn mask_heading() -> &'static Regex {
    static HEADING: OnceLock<Regex> = OnceLock::new();
    HEADING.get_or_init(|| Regex::new(r"^##[ \t]+(\S+)").expect("valid mask heading regex"))
}

fn parse_mask_tasks(content: &str) -> Vec<String> {
    content
        .lines()
        .filter_map(|line| mask_heading().captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

pub fn npm_command(script: &str) -> String {
    format!("npm run {}", script)
}

pub fn mask_command(task: &str) -> String {
    format!("mask {}", task)
}
