//! Per-organization vote tallies
//!
//! Within an organization, several voters backing the same value do not
//! stack: the organization's support for a value is the largest single
//! ballot weight for it ("capped"). The plain sum ("raw") is kept as a
//! secondary signal for choosing between values an organization backs
//! with equal capped weight.
//!
//! A ballot for [`INHERITANCE_MARKER`] ("soft" vote) and a ballot for the
//! inherited value itself ("hard" vote) name the same thing; when the
//! inherited value is known, the tally treats them as one vote for
//! conflicts and opposition.
//!
//! Every ordering in here is a pure function of the ballot set, so the
//! insertion order of ballots never matters.

use super::organization::Organization;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

/// Ballot value meaning "keep whatever this locale inherits"
pub const INHERITANCE_MARKER: &str = "↑↑↑";

/// A counted ballot: one voter's value together with the weight it carries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ballot {
    pub value: String,
    pub organization: Organization,
    pub votes: u32,
}

/// How strongly one organization supports one value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValueSupport {
    /// Largest single-voter weight
    pub capped: u32,
    /// Sum of all voters' weights
    pub raw: u32,
}

impl ValueSupport {
    fn add(&mut self, votes: u32) {
        self.capped = self.capped.max(votes);
        self.raw += votes;
    }
}

/// Total order used to break ties between candidate values.
///
/// The baseline value is preferred, then [`INHERITANCE_MARKER`]; otherwise
/// values compare by their UTF-8 bytes, lowest first. This is plain byte
/// order, not a locale collation, so results are identical on every platform.
pub fn tie_break(a: &str, b: &str, baseline: Option<&str>) -> Ordering {
    let a_is_baseline = baseline == Some(a);
    let b_is_baseline = baseline == Some(b);
    b_is_baseline
        .cmp(&a_is_baseline)
        .then_with(|| (b == INHERITANCE_MARKER).cmp(&(a == INHERITANCE_MARKER)))
        .then_with(|| a.as_bytes().cmp(b.as_bytes()))
}

/// Ballots grouped by organization and value
///
/// Ballots carrying no weight are not counted.
#[derive(Debug, Clone, Default)]
pub struct OrganizationTally {
    by_org: BTreeMap<Organization, BTreeMap<String, ValueSupport>>,
    bailey_value: Option<String>,
}

impl OrganizationTally {
    pub fn from_ballots<'a, I>(ballots: I) -> Self
    where
        I: IntoIterator<Item = &'a Ballot>,
    {
        let mut by_org: BTreeMap<Organization, BTreeMap<String, ValueSupport>> = BTreeMap::new();
        for ballot in ballots.into_iter().filter(|ballot| ballot.votes > 0) {
            by_org
                .entry(ballot.organization)
                .or_default()
                .entry(ballot.value.clone())
                .or_default()
                .add(ballot.votes);
        }
        Self {
            by_org,
            bailey_value: None,
        }
    }

    /// Treat votes for `bailey_value` and for the inheritance marker as the same vote
    pub fn with_bailey_value(mut self, bailey_value: Option<&str>) -> Self {
        self.bailey_value = bailey_value.map(str::to_string);
        self
    }

    /// Whether two values name the same thing once inheritance is resolved
    pub fn same_vote(&self, a: &str, b: &str) -> bool {
        a == b
            || self.bailey_value.as_deref().is_some_and(|bailey| {
                (a == INHERITANCE_MARKER && b == bailey) || (b == INHERITANCE_MARKER && a == bailey)
            })
    }

    /// Number of organizations with at least one counted ballot
    pub fn organization_count(&self) -> usize {
        self.by_org.len()
    }

    /// Capped weight per value for one organization
    pub fn org_to_votes(&self, org: Organization) -> BTreeMap<String, u32> {
        self.by_org
            .get(&org)
            .map(|values| {
                values
                    .iter()
                    .map(|(value, support)| (value.clone(), support.capped))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Sum over organizations of each organization's capped weight per value.
    ///
    /// Diagnostic only: an organization split between two values shows up
    /// under both here, while only its chosen value counts for the winner.
    pub fn total_votes(&self) -> BTreeMap<String, u32> {
        let mut totals: BTreeMap<String, u32> = BTreeMap::new();
        for values in self.by_org.values() {
            for (value, support) in values {
                *totals.entry(value.clone()).or_default() += support.capped;
            }
        }
        totals
    }

    /// The single value an organization backs, with its capped weight.
    ///
    /// Highest capped weight wins; ties go to the higher raw weight, then to
    /// [`tie_break`].
    pub fn choice(&self, org: Organization, baseline: Option<&str>) -> Option<(&str, u32)> {
        self.by_org
            .get(&org)?
            .iter()
            .min_by(|(a, sa), (b, sb)| {
                sb.capped
                    .cmp(&sa.capped)
                    .then_with(|| sb.raw.cmp(&sa.raw))
                    .then_with(|| tie_break(a, b, baseline))
            })
            .map(|(value, support)| (value.as_str(), support.capped))
    }

    /// Every organization's choice
    pub fn choices(&self, baseline: Option<&str>) -> BTreeMap<Organization, (&str, u32)> {
        self.by_org
            .keys()
            .filter_map(|org| self.choice(*org, baseline).map(|choice| (*org, choice)))
            .collect()
    }

    /// Organizations whose voters named more than one distinct value
    pub fn conflicted_organizations(&self) -> BTreeSet<Organization> {
        self.by_org
            .iter()
            .filter(|(_, values)| {
                values
                    .keys()
                    .any(|a| values.keys().any(|b| !self.same_vote(a, b)))
            })
            .map(|(org, _)| *org)
            .collect()
    }

    /// Number of organizations with any ballot for `value`
    pub fn org_count(&self, value: &str) -> usize {
        self.by_org
            .values()
            .filter(|values| values.keys().any(|v| self.same_vote(v, value)))
            .count()
    }

    /// Total weight if every organization put its strongest voter behind one value
    pub fn best_possible_vote(&self) -> u32 {
        self.by_org
            .values()
            .map(|values| values.values().map(|s| s.capped).max().unwrap_or(0))
            .sum()
    }

    /// Whether any ballot names something other than `value`
    pub fn has_opposition_to(&self, value: &str) -> bool {
        self.by_org
            .values()
            .any(|values| values.keys().any(|v| !self.same_vote(v, value)))
    }
}
