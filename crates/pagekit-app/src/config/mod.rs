//! Configuration file parsing for pagekit
//!
//! Supports:
//! - `.pagekit/config.toml` - Markers, state classes and tunables

pub mod settings;
pub mod types;

pub use settings::{init_config_dir, load_settings, save_settings};
pub use types::*;
