//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted to application types with
//! lenient parsing that reports [`ConfigIssue`]s.

mod data;
mod logging;
mod voting;

pub use data::FileDataConfig;
pub use logging::FileLoggingConfig;
pub use voting::FileVotingConfig;

use serde::{Deserialize, Serialize};
use vetting_domain::ConfigIssue;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Approval thresholds
    pub voting: FileVotingConfig,
    /// Shared data files
    pub data: FileDataConfig,
    /// Logging and result output
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    ///
    /// Checks thresholds and established locales, the log level, and that
    /// every configured data file exists.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();
        issues.extend(self.voting.to_voting_policy().1);
        issues.extend(self.logging.parse_level().1);
        issues.extend(self.data.validate());
        issues
    }
}
