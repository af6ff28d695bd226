//! Configuration file loading for cldr-vetting
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `VETTING_*` environment variables
//! 2. `load(Some(path))` explicit file
//! 3. Project root: `./vetting.toml` or `./.vetting.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/cldr-vetting/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{FileConfig, FileDataConfig, FileLoggingConfig, FileVotingConfig};
pub use loader::ConfigLoader;
