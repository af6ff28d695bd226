//! Infrastructure layer for cldr-vetting
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: configuration loading, TOML data files,
//! tracing setup and the JSONL result reporter.

pub mod bootstrap;
pub mod config;
pub mod data;
pub mod logging;

// Re-export commonly used types
pub use bootstrap::{BootstrapError, VettingServices};
pub use config::{ConfigLoader, FileConfig, FileDataConfig, FileLoggingConfig, FileVotingConfig};
pub use data::{
    InMemoryLocaleData, LoadError, load_parent_locales, load_roster, parse_parent_locales,
    parse_roster,
};
pub use logging::{JsonlResolutionReporter, LoggingError, init_tracing, verbosity_filter};
