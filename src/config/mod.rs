//! Configuration module - user preferences
//!
//! - `defaults` - All default constant values
//! - `types` - The `Config` struct and its getters
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    DEFAULT_EDITOR, DEFAULT_HISTORY_ENTRY, DEFAULT_SCRIPT_TEMPLATE, DEFAULT_SHELL,
    DEFAULT_SHOW_OUTPUT,
};
pub use loader::load_config;
pub use types::Config;

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
