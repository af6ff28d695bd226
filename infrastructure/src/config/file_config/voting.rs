//! Voting thresholds from TOML (`[voting]` section)
//!
//! Example configuration:
//!
//! ```toml
//! [voting]
//! required_votes = 8
//! non_established_required_votes = 4
//! established_locales = ["de", "fr", "ja", "zh_Hant"]
//! high_bar_paths = ["//ldml/numbers/symbols", "//ldml/dates/calendars/calendar[@type=\"gregorian\"]/eras"]
//! ```

use serde::{Deserialize, Serialize};
use vetting_application::VotingPolicy;
use vetting_domain::{
    ConfigIssue, ConfigIssueCode, DEFAULT_REQUIRED_VOTES, LocaleId,
    NON_ESTABLISHED_REQUIRED_VOTES,
};

/// Voting configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    /// Weight needed for `approved` in an established locale
    pub required_votes: u32,
    /// Weight needed for `approved` in any other locale
    pub non_established_required_votes: u32,
    /// Established locales or languages; empty means all
    pub established_locales: Vec<String>,
    /// Xpath prefixes that need a technical-committee vote
    pub high_bar_paths: Vec<String>,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            required_votes: DEFAULT_REQUIRED_VOTES,
            non_established_required_votes: NON_ESTABLISHED_REQUIRED_VOTES,
            established_locales: Vec::new(),
            high_bar_paths: Vec::new(),
        }
    }
}

impl FileVotingConfig {
    /// Build the voting policy, returning warnings for values that were
    /// replaced by defaults or skipped.
    pub fn to_voting_policy(&self) -> (VotingPolicy, Vec<ConfigIssue>) {
        let mut issues = Vec::new();

        let required_votes = threshold(
            "voting.required_votes",
            self.required_votes,
            DEFAULT_REQUIRED_VOTES,
            &mut issues,
        );
        let non_established_required_votes = threshold(
            "voting.non_established_required_votes",
            self.non_established_required_votes,
            NON_ESTABLISHED_REQUIRED_VOTES,
            &mut issues,
        );
        if non_established_required_votes > required_votes {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ThresholdOrder {
                    field: "voting.non_established_required_votes".to_string(),
                    limit_field: "voting.required_votes".to_string(),
                },
                format!(
                    "voting.non_established_required_votes ({}) is above voting.required_votes ({}); new locales will be harder to approve than established ones",
                    non_established_required_votes, required_votes
                ),
            ));
        }

        let mut established_locales = std::collections::BTreeSet::new();
        for raw in &self.established_locales {
            match LocaleId::parse(raw) {
                Ok(locale) if !locale.is_root() => {
                    established_locales.insert(locale);
                }
                _ => issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InvalidLocale {
                        field: "voting.established_locales".to_string(),
                        value: raw.clone(),
                    },
                    format!("voting.established_locales: '{}' is not a locale, ignored", raw),
                )),
            }
        }

        // An empty set means "every locale", the opposite of what was asked for.
        if established_locales.is_empty() && !self.established_locales.is_empty() {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::EmptyAfterValidation {
                    field: "voting.established_locales".to_string(),
                },
                "voting.established_locales: no entry is a valid locale",
            ));
        }

        let policy = VotingPolicy {
            required_votes,
            non_established_required_votes,
            established_locales,
            high_bar_paths: self.high_bar_paths.clone(),
        };
        (policy, issues)
    }
}

fn threshold(field: &str, value: u32, default: u32, issues: &mut Vec<ConfigIssue>) -> u32 {
    if value > 0 {
        return value;
    }
    issues.push(ConfigIssue::warning(
        ConfigIssueCode::ZeroThreshold {
            field: field.to_string(),
        },
        format!("{}: must be at least 1, falling back to {}", field, default),
    ));
    default
}
