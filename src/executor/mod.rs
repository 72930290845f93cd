//! Script execution module
//!
//! - `runner` - the invoker and the stock shell execution primitive
//! - `output` - rendering of script output for the message dialog

mod output;
mod runner;

pub use output::{render_output, render_result, OUTPUT_TITLE};
pub use runner::{run, ShellExecutor};
