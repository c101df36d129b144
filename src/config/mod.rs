//! Application configuration stored as TOML under the `.imgrate` directory.
//!
//! Every field carries a serde default, so a missing file or a partial one
//! loads cleanly. Components receive the values they need at construction
//! and never read the file themselves.

mod defaults;
mod io;
mod types;

pub use io::{CONFIG_FILE_NAME, config_path, load_from, load_or_default, save, save_to_path};
pub use types::{AppConfig, ConfigError, DisplaySettings, GenerationSettings, PathSettings};

#[cfg(test)]
mod tests;
