//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! level = "info"
//! directory = "~/.local/state/cldr-vetting/logs"
//! results_file = "out/resolutions.jsonl"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;
use vetting_domain::{ConfigIssue, ConfigIssueCode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// "off", "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Write logs to daily-rolling files here instead of stderr
    pub directory: Option<PathBuf>,
    /// Write every resolution to this JSONL file
    pub results_file: Option<PathBuf>,
}

impl Default for FileLoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            directory: None,
            results_file: None,
        }
    }
}

impl FileLoggingConfig {
    /// Parse `level`, falling back to `warn` with a warning
    pub fn parse_level(&self) -> (LevelFilter, Vec<ConfigIssue>) {
        match self.level.parse::<LevelFilter>() {
            Ok(level) => (level, vec![]),
            Err(_) => {
                let issue = ConfigIssue::warning(
                    ConfigIssueCode::InvalidEnumValue {
                        field: "logging.level".to_string(),
                        value: self.level.clone(),
                        valid_values: ["off", "error", "warn", "info", "debug", "trace"]
                            .iter()
                            .map(|s| s.to_string())
                            .collect(),
                    },
                    format!(
                        "logging.level: unknown value '{}', falling back to 'warn'",
                        self.level
                    ),
                );
                (LevelFilter::WARN, vec![issue])
            }
        }
    }
}
