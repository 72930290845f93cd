//! Scripts module - the user's script directory
//!
//! - `types` - `ScriptEntry`
//! - `store` - listing, creation and seeding of the scripts directory
//! - `examples` - example scripts bundled with the crate

mod examples;
mod store;
mod types;

pub use examples::BUNDLED_EXAMPLES;
pub use store::ScriptStore;
pub use types::ScriptEntry;
