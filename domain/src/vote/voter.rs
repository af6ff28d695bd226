//! Voters and the voter roster
//!
//! The roster is owned by the external user registry. The domain only ever
//! sees an immutable snapshot of it: a reload builds a new [`VoterRoster`]
//! and swaps it in whole, so a resolver holding the old snapshot keeps a
//! consistent view until it is done.

use super::level::Level;
use super::organization::Organization;
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt;

/// Identifier of a voter in the user registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VoterId(pub u32);

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for VoterId {
    fn from(id: u32) -> Self {
        VoterId(id)
    }
}

/// What the registry knows about one voter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterInfo {
    pub organization: Organization,
    pub level: Level,
    pub name: String,
    /// Locales this voter is assigned to (may be empty)
    #[serde(default)]
    pub locales: BTreeSet<String>,
}

impl VoterInfo {
    pub fn new(organization: Organization, level: Level, name: impl Into<String>) -> Self {
        Self {
            organization,
            level,
            name: name.into(),
            locales: BTreeSet::new(),
        }
    }

    pub fn with_locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales.extend(locales.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for VoterInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}, {}, {}}}", self.name, self.level, self.organization)
    }
}

/// Vetters of one locale, grouped by organization then level
pub type LocaleVetters = BTreeMap<Organization, BTreeMap<Level, BTreeSet<VoterId>>>;

/// Immutable snapshot of the voter registry
///
/// # Example
///
/// ```
/// use vetting_domain::vote::{Level, Organization, VoterId, VoterInfo, VoterRoster};
///
/// let roster: VoterRoster = [
///     (VoterId(666), VoterInfo::new(Organization::Google, Level::Vetter, "J. Smith")),
///     (VoterId(333), VoterInfo::new(Organization::Apple, Level::Vetter, "A. Mutton")),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(roster.voter_info(VoterId(666)).unwrap().organization, Organization::Google);
/// assert!(roster.voter_info(VoterId(1)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VoterRoster {
    voters: HashMap<VoterId, VoterInfo>,
}

impl VoterRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a voter, failing with `UnknownVoter` if absent
    pub fn voter_info(&self, voter: VoterId) -> Result<&VoterInfo, DomainError> {
        self.voters
            .get(&voter)
            .ok_or(DomainError::UnknownVoter(voter))
    }

    pub fn contains(&self, voter: VoterId) -> bool {
        self.voters.contains_key(&voter)
    }

    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (VoterId, &VoterInfo)> {
        self.voters.iter().map(|(id, info)| (*id, info))
    }

    /// Map each locale to its assigned voters, skipping locked accounts
    pub fn locale_to_vetters(&self) -> BTreeMap<String, LocaleVetters> {
        let mut result: BTreeMap<String, LocaleVetters> = BTreeMap::new();
        for (voter, info) in self.iter() {
            if info.level == Level::Locked {
                continue;
            }
            for locale in &info.locales {
                result
                    .entry(locale.clone())
                    .or_default()
                    .entry(info.organization)
                    .or_default()
                    .entry(info.level)
                    .or_default()
                    .insert(voter);
            }
        }
        result
    }
}

impl FromIterator<(VoterId, VoterInfo)> for VoterRoster {
    fn from_iter<I: IntoIterator<Item = (VoterId, VoterInfo)>>(iter: I) -> Self {
        Self {
            voters: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> VoterRoster {
        [
            (
                VoterId(1),
                VoterInfo::new(Organization::Google, Level::Vetter, "A").with_locales(["de", "fr"]),
            ),
            (
                VoterId(2),
                VoterInfo::new(Organization::Google, Level::Street, "B").with_locales(["de"]),
            ),
            (
                VoterId(3),
                VoterInfo::new(Organization::Apple, Level::Locked, "C").with_locales(["de"]),
            ),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_unknown_voter() {
        assert_eq!(
            roster().voter_info(VoterId(99)),
            Err(DomainError::UnknownVoter(VoterId(99)))
        );
    }

    #[test]
    fn test_locale_to_vetters_skips_locked() {
        let map = roster().locale_to_vetters();
        let de = &map["de"];
        assert_eq!(de.len(), 1);
        let google = &de[&Organization::Google];
        assert!(google[&Level::Vetter].contains(&VoterId(1)));
        assert!(google[&Level::Street].contains(&VoterId(2)));
        assert_eq!(map["fr"][&Organization::Google][&Level::Vetter].len(), 1);
    }

    #[test]
    fn test_voter_info_display() {
        let info = VoterInfo::new(Organization::Adobe, Level::Expert, "A. Aldus");
        assert_eq!(info.to_string(), "{A. Aldus, expert, adobe}");
    }
}
