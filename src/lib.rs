//! Run Scripts - user script runner for a dual-pane file manager
//!
//! This library lets the user run shell scripts, npm scripts, Mask tasks and
//! ad-hoc command lines with the file manager's cursor and selection exposed
//! as environment variables.

pub mod commands;
pub mod config;
pub mod environment;
pub mod error;
pub mod executor;
pub mod history;
pub mod host;
pub mod logging;
pub mod plugin;
pub mod scripts;
pub mod setup;
pub mod tasks;

// Terminal front end used by the binary
pub mod terminal_host;

pub use commands::CommandId;
pub use error::{Result, RunScriptsError};
pub use host::Host;
pub use plugin::RunScripts;
