//! Voting policy: how much weight a data point needs for approval.
//!
//! [`VotingPolicy`] turns the locale and xpath of a data point into the
//! `required_votes` handed to the resolver. The resolver itself has no
//! notion of which locales are established or which paths are sensitive.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use vetting_domain::{DEFAULT_REQUIRED_VOTES, HIGH_BAR, LocaleId, NON_ESTABLISHED_REQUIRED_VOTES};

/// Approval thresholds per locale and path.
///
/// | Data point | Required votes |
/// |------------|----------------|
/// | xpath under a `high_bar_paths` prefix | [`HIGH_BAR`] (at least `required_votes`) |
/// | established locale | `required_votes` |
/// | any other locale | `non_established_required_votes` |
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotingPolicy {
    /// Required votes in an established locale.
    pub required_votes: u32,
    /// Required votes in a locale that is not established yet.
    pub non_established_required_votes: u32,
    /// Established locales or languages. Empty means every locale is established.
    pub established_locales: BTreeSet<LocaleId>,
    /// Xpath prefixes that need a technical-committee vote.
    pub high_bar_paths: Vec<String>,
}

impl Default for VotingPolicy {
    fn default() -> Self {
        Self {
            required_votes: DEFAULT_REQUIRED_VOTES,
            non_established_required_votes: NON_ESTABLISHED_REQUIRED_VOTES,
            established_locales: BTreeSet::new(),
            high_bar_paths: Vec::new(),
        }
    }
}

impl VotingPolicy {
    // ==================== Builder Methods ====================

    pub fn with_required_votes(mut self, votes: u32) -> Self {
        self.required_votes = votes;
        self
    }

    pub fn with_non_established_required_votes(mut self, votes: u32) -> Self {
        self.non_established_required_votes = votes;
        self
    }

    pub fn with_established_locales<I>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = LocaleId>,
    {
        self.established_locales.extend(locales);
        self
    }

    pub fn with_high_bar_path(mut self, prefix: impl Into<String>) -> Self {
        self.high_bar_paths.push(prefix.into());
        self
    }

    // ==================== Queries ====================

    /// A locale is established if it, or its bare language, is listed
    pub fn is_established(&self, locale: &LocaleId) -> bool {
        if self.established_locales.is_empty() {
            return true;
        }
        self.established_locales.contains(locale)
            || self
                .established_locales
                .iter()
                .any(|listed| listed.as_str() == locale.language())
    }

    pub fn is_high_bar(&self, xpath: &str) -> bool {
        self.high_bar_paths
            .iter()
            .any(|prefix| xpath.starts_with(prefix.as_str()))
    }

    /// Votes needed for `approved` on this data point
    pub fn required_votes_for(&self, locale: &LocaleId, xpath: &str) -> u32 {
        if self.is_high_bar(xpath) {
            return HIGH_BAR.max(self.required_votes);
        }
        if self.is_established(locale) {
            self.required_votes
        } else {
            self.non_established_required_votes
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> LocaleId {
        LocaleId::parse(s).unwrap()
    }

    #[test]
    fn test_default_treats_everything_as_established() {
        let policy = VotingPolicy::default();
        assert_eq!(policy.required_votes_for(&id("kw"), "//ldml/x"), 8);
    }

    #[test]
    fn test_non_established_locale() {
        let policy = VotingPolicy::default().with_established_locales([id("de"), id("fr_CA")]);
        assert_eq!(policy.required_votes_for(&id("de_AT"), "//ldml/x"), 8);
        assert_eq!(policy.required_votes_for(&id("fr_CA"), "//ldml/x"), 8);
        assert_eq!(policy.required_votes_for(&id("fr"), "//ldml/x"), 4);
        assert_eq!(policy.required_votes_for(&id("kw"), "//ldml/x"), 4);
    }

    #[test]
    fn test_high_bar_paths() {
        let policy = VotingPolicy::default()
            .with_established_locales([id("de")])
            .with_high_bar_path("//ldml/numbers/symbols");
        assert_eq!(
            policy.required_votes_for(&id("kw"), "//ldml/numbers/symbols/decimal"),
            HIGH_BAR
        );
        assert_eq!(
            policy.required_votes_for(&id("kw"), "//ldml/numbers/currencies"),
            4
        );
    }

    #[test]
    fn test_high_bar_never_lowers_threshold() {
        let policy = VotingPolicy::default()
            .with_required_votes(30)
            .with_high_bar_path("//ldml/numbers");
        assert_eq!(policy.required_votes_for(&id("de"), "//ldml/numbers/x"), 30);
    }
}
