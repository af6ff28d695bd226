//! Data file locations from TOML (`[data]` section)
//!
//! ```toml
//! [data]
//! roster = "data/voters.toml"
//! parent_locales = "data/parent_locales.toml"
//! locale_values = "data/values.toml"
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use vetting_domain::{ConfigIssue, ConfigIssueCode};

/// Paths of the files the resolver reads its shared data from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// Voter roster (`[[voter]]` entries)
    pub roster: Option<PathBuf>,
    /// Parent-locale overrides and default scripts
    pub parent_locales: Option<PathBuf>,
    /// Existing locale values used as baselines
    pub locale_values: Option<PathBuf>,
}

impl FileDataConfig {
    /// Report configured files that do not exist
    pub fn validate(&self) -> Vec<ConfigIssue> {
        [
            ("data.roster", &self.roster),
            ("data.parent_locales", &self.parent_locales),
            ("data.locale_values", &self.locale_values),
        ]
        .into_iter()
        .filter_map(|(field, path)| {
            let path = path.as_ref()?;
            if path.exists() {
                return None;
            }
            Some(ConfigIssue::error(
                ConfigIssueCode::MissingDataFile {
                    field: field.to_string(),
                    path: path.display().to_string(),
                },
                format!("{}: file not found: {}", field, path.display()),
            ))
        })
        .collect()
    }
}
