//! Vote resolution for a single data point
//!
//! [`VoteResolver`] takes the ballots cast for one xpath in one locale and
//! decides the winning value, its status, and which organizations are
//! internally split.
//!
//! # Algorithm
//!
//! ```text
//! ballots ──► per-org capping ──► one choice per org ──► totals per value
//!                                                            │
//!          baseline (old value/status) ──► tie-breaks ◄──────┘
//!                                              │
//!                          winner (O) / runner-up (N) ──► status
//! ```
//!
//! 1. Within an organization, a value's weight is the largest single ballot
//!    for it, not the sum.
//! 2. Each organization backs the value it supports most strongly (ties: more
//!    raw weight, then the baseline value, then byte order).
//! 3. A value's total is the sum of the weights of the organizations backing it.
//! 4. When the inherited ("bailey") value is known, votes for
//!    [`INHERITANCE_MARKER`] and votes for the inherited value itself are
//!    pooled under whichever of the two has more weight (the marker on a tie).
//! 5. The highest total wins; ties go to the baseline value, then the
//!    inheritance marker, then byte order.
//! 6. A lone ballot from an auto-approving level that outweighs every other
//!    value combined wins outright as `approved`.
//! 7. Status is derived from the winner's total `O` and the runner-up's `N`;
//!    a value that would end up with a lower status than the baseline does
//!    not displace the baseline.
//!
//! Ballots from levels that carry no weight are not counted.
//!
//! Only the current ballot set matters: insertion order, overwrites and
//! removals that reach the same set give the same result.

use super::level::Level;
use super::organization::Organization;
use super::status::Status;
use super::tally::{Ballot, INHERITANCE_MARKER, OrganizationTally, tie_break};
use super::voter::{VoterId, VoterRoster};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Required votes for approval in an established locale
pub const DEFAULT_REQUIRED_VOTES: u32 = 8;

/// Required votes for approval in a locale that is not yet established
pub const NON_ESTABLISHED_REQUIRED_VOTES: u32 = 4;

/// Required votes for paths that need a technical-committee level vote
pub const HIGH_BAR: u32 = 20;

/// Weight at which an uncontested value becomes `contributed` on its own
const CONTRIBUTED_VOTES: u32 = 4;

/// Weight at which a value backed by two organizations becomes `contributed`
const MULTI_ORG_CONTRIBUTED_VOTES: u32 = 2;

/// Minimum weight for `provisional`
const PROVISIONAL_VOTES: u32 = 2;

/// Value and status in effect before any ballots are counted
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionContext {
    pub old_value: Option<String>,
    pub old_status: Status,
    /// Value the locale would inherit if it had no value of its own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bailey_value: Option<String>,
}

impl ResolutionContext {
    pub fn new(old_value: Option<String>, old_status: Status) -> Self {
        Self {
            old_value,
            old_status,
            bailey_value: None,
        }
    }

    pub fn with_bailey_value(mut self, bailey_value: Option<String>) -> Self {
        self.bailey_value = bailey_value;
        self
    }
}

/// Result of resolving one data point
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub winning_value: Option<String>,
    pub winning_status: Status,
    /// Runner-up ("N value"), if more than one value has organizational support
    pub next_value: Option<String>,
    /// Values tied with the winner, winner first
    pub values_with_same_votes: Vec<String>,
    pub conflicted_organizations: BTreeSet<Organization>,
    /// Diagnostic per-value totals (see [`OrganizationTally::total_votes`])
    pub total_votes: BTreeMap<String, u32>,
    /// The value each organization ended up backing
    pub org_votes: BTreeMap<Organization, String>,
    /// Best status reachable if every organization agreed
    pub possible_status: Status,
}

impl Resolution {
    /// Result with no counted ballots: the baseline, or inheritance when
    /// there is no baseline value but an inherited one exists
    fn baseline(context: &ResolutionContext) -> Self {
        let (value, status) = match (&context.old_value, &context.bailey_value) {
            (None, Some(_)) => (Some(INHERITANCE_MARKER.to_string()), Status::Missing),
            (value, _) => (value.clone(), context.old_status),
        };
        Self {
            values_with_same_votes: value.iter().cloned().collect(),
            winning_value: value,
            winning_status: status,
            possible_status: status,
            ..Self::default()
        }
    }

    /// Winning status is below `contributed`, but would reach it if all the
    /// organizations that voted had voted for one value
    pub fn is_disputed(&self) -> bool {
        self.winning_status < Status::Contributed && self.possible_status >= Status::Contributed
    }
}

#[derive(Debug, Clone)]
struct CastBallot {
    ballot: Ballot,
    level: Level,
}

/// Resolves the ballots of one data point
///
/// A resolver is not shared between threads; create one per data point (or
/// per worker) and reuse it through [`new_path`](Self::new_path).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use vetting_domain::vote::{
///     Level, Organization, Status, VoteResolver, VoterId, VoterInfo, VoterRoster,
/// };
///
/// let roster: VoterRoster = [
///     (VoterId(1), VoterInfo::new(Organization::Google, Level::Vetter, "G")),
///     (VoterId(2), VoterInfo::new(Organization::Apple, Level::Vetter, "A")),
/// ]
/// .into_iter()
/// .collect();
///
/// let mut resolver = VoteResolver::new(Arc::new(roster));
/// resolver.new_path(None, Status::Unconfirmed);
/// resolver.add(Some("zebra".to_string()), VoterId(1)).unwrap();
/// resolver.add(Some("apple".to_string()), VoterId(2)).unwrap();
///
/// assert_eq!(resolver.winning_value(), Some("apple"));
/// assert_eq!(resolver.winning_status(), Status::Provisional);
/// ```
#[derive(Debug, Clone)]
pub struct VoteResolver {
    roster: Arc<VoterRoster>,
    required_votes: u32,
    context: Option<ResolutionContext>,
    ballots: BTreeMap<VoterId, CastBallot>,
    resolution: Resolution,
}

impl VoteResolver {
    /// Create a resolver bound to one roster snapshot
    pub fn new(roster: Arc<VoterRoster>) -> Self {
        Self {
            roster,
            required_votes: DEFAULT_REQUIRED_VOTES,
            context: None,
            ballots: BTreeMap::new(),
            resolution: Resolution::default(),
        }
    }

    pub fn with_required_votes(mut self, required_votes: u32) -> Self {
        self.set_required_votes(required_votes);
        self
    }

    /// Weight needed for `approved`; kept across `new_path` calls
    pub fn required_votes(&self) -> u32 {
        self.required_votes
    }

    pub fn set_required_votes(&mut self, required_votes: u32) {
        self.required_votes = required_votes;
        self.recompute();
    }

    pub fn roster(&self) -> &Arc<VoterRoster> {
        &self.roster
    }

    /// Start a fresh data point with the given baseline, dropping all ballots
    pub fn new_path(&mut self, old_value: Option<String>, old_status: Status) {
        self.start(ResolutionContext::new(old_value, old_status));
    }

    /// Same as [`new_path`](Self::new_path) with a prepared context
    pub fn start(&mut self, context: ResolutionContext) {
        self.ballots.clear();
        self.context = Some(context);
        self.recompute();
    }

    pub fn context(&self) -> Option<&ResolutionContext> {
        self.context.as_ref()
    }

    /// Set the value this data point would inherit without a value of its
    /// own. Ballots for [`INHERITANCE_MARKER`] then pool with ballots for
    /// that value. Cleared by [`new_path`](Self::new_path).
    pub fn set_bailey_value(&mut self, bailey_value: Option<String>) -> Result<(), DomainError> {
        let context = self
            .context
            .as_mut()
            .ok_or(DomainError::UninitializedResolution)?;
        context.bailey_value = bailey_value;
        self.recompute();
        Ok(())
    }

    pub fn bailey_value(&self) -> Option<&str> {
        self.context.as_ref()?.bailey_value.as_deref()
    }

    /// Record, replace, or (with `None`) withdraw a voter's ballot
    pub fn add(&mut self, value: Option<String>, voter: VoterId) -> Result<(), DomainError> {
        self.add_with_votes(value, voter, None)
    }

    /// Like [`add`](Self::add), voting at `votes` instead of the voter's full
    /// level weight. The weight never exceeds what the level allows.
    pub fn add_with_votes(
        &mut self,
        value: Option<String>,
        voter: VoterId,
        votes: Option<u32>,
    ) -> Result<(), DomainError> {
        if self.context.is_none() {
            return Err(DomainError::UninitializedResolution);
        }
        let info = self.roster.voter_info(voter)?;
        match value {
            Some(value) => {
                let cast = CastBallot {
                    ballot: Ballot {
                        value,
                        organization: info.organization,
                        votes: info.level.effective_votes(votes),
                    },
                    level: info.level,
                };
                self.ballots.insert(voter, cast);
            }
            None => {
                self.ballots.remove(&voter);
            }
        }
        self.recompute();
        Ok(())
    }

    /// Current ballot of a voter, if any
    pub fn ballot_of(&self, voter: VoterId) -> Option<&str> {
        self.ballots.get(&voter).map(|cast| cast.ballot.value.as_str())
    }

    pub fn ballot_count(&self) -> usize {
        self.ballots.len()
    }

    // ==================== Results ====================

    /// Winning value; the baseline value when nothing has been voted
    pub fn winning_value(&self) -> Option<&str> {
        self.resolution.winning_value.as_deref()
    }

    pub fn winning_status(&self) -> Status {
        self.resolution.winning_status
    }

    /// Organizations whose voters did not all vote for the same value
    pub fn conflicted_organizations(&self) -> &BTreeSet<Organization> {
        &self.resolution.conflicted_organizations
    }

    /// Runner-up value ("N value")
    pub fn next_value(&self) -> Option<&str> {
        self.resolution.next_value.as_deref()
    }

    pub fn values_with_same_votes(&self) -> &[String] {
        &self.resolution.values_with_same_votes
    }

    /// The value an organization ended up backing
    pub fn org_vote(&self, org: Organization) -> Option<&str> {
        self.resolution.org_votes.get(&org).map(String::as_str)
    }

    /// Capped weight per value for one organization
    pub fn org_to_votes(&self, org: Organization) -> BTreeMap<String, u32> {
        self.tally().org_to_votes(org)
    }

    /// Diagnostic weight per value across all organizations
    pub fn total_votes(&self) -> &BTreeMap<String, u32> {
        &self.resolution.total_votes
    }

    /// Best status the winner could reach if every organization agreed
    pub fn possible_winning_status(&self) -> Status {
        self.resolution.possible_status
    }

    pub fn is_disputed(&self) -> bool {
        self.resolution.is_disputed()
    }

    /// Snapshot of the full result
    pub fn resolution(&self) -> &Resolution {
        &self.resolution
    }

    // ==================== Resolution ====================

    fn tally(&self) -> OrganizationTally {
        OrganizationTally::from_ballots(self.ballots.values().map(|cast| &cast.ballot))
            .with_bailey_value(self.bailey_value())
    }

    fn recompute(&mut self) {
        self.resolution = match &self.context {
            Some(context) => self.resolve(context),
            None => Resolution::default(),
        };
    }

    fn resolve(&self, context: &ResolutionContext) -> Resolution {
        let baseline = context.old_value.as_deref();
        let tally = self.tally();
        let choices = tally.choices(baseline);

        let mut totals: BTreeMap<&str, u32> = BTreeMap::new();
        for (value, weight) in choices.values() {
            *totals.entry(*value).or_default() += *weight;
        }
        let pooled = context
            .bailey_value
            .as_deref()
            .and_then(|bailey| pool_inheritance(&mut totals, bailey));
        let mut ranked: Vec<(&str, u32)> = totals.into_iter().collect();
        ranked.sort_by(|(a, wa), (b, wb)| wb.cmp(wa).then_with(|| tie_break(a, b, baseline)));

        let Some(&(top, top_weight)) = ranked.first() else {
            return Resolution::baseline(context);
        };
        let weight_of = |value: &str| {
            ranked
                .iter()
                .find(|(v, _)| *v == value)
                .map_or(0, |(_, w)| *w)
        };
        let (winner, o, n, unilateral) = match self.unilateral_winner(&ranked, pooled) {
            Some(value) => {
                let n = ranked
                    .iter()
                    .find(|(v, _)| *v != value)
                    .map_or(0, |(_, w)| *w);
                (value, weight_of(value), n, true)
            }
            None => {
                let n = ranked.get(1).map_or(0, |(_, w)| *w);
                (top, top_weight, n, false)
            }
        };

        let next_value = ranked
            .iter()
            .find(|(v, _)| *v != winner)
            .map(|(v, _)| v.to_string());
        let mut values_with_same_votes = vec![winner.to_string()];
        values_with_same_votes.extend(
            ranked
                .iter()
                .filter(|(v, w)| *v != winner && *w == o)
                .map(|(v, _)| v.to_string()),
        );

        let computed = if unilateral {
            Status::Approved
        } else {
            self.compute_status(
                o,
                n,
                tally.has_opposition_to(winner),
                tally.org_count(winner),
                context.old_status,
            )
        };
        // As if every organization had voted for one value, unopposed.
        let possible = self
            .compute_status(
                tally.best_possible_vote(),
                0,
                false,
                tally.organization_count(),
                context.old_status,
            )
            .max(computed);

        let mut resolution = Resolution {
            winning_value: Some(winner.to_string()),
            winning_status: computed,
            next_value,
            values_with_same_votes,
            conflicted_organizations: tally.conflicted_organizations(),
            total_votes: tally.total_votes(),
            org_votes: choices
                .iter()
                .map(|(org, (value, _))| (*org, value.to_string()))
                .collect(),
            possible_status: possible,
        };

        if computed < context.old_status {
            resolution.winning_value = context.old_value.clone();
            resolution.winning_status = context.old_status;
            resolution.values_with_same_votes = context.old_value.iter().cloned().collect();
        }
        resolution
    }

    /// A ballot from an auto-approving level whose weight alone exceeds the
    /// totals of every other value combined
    ///
    /// A ballot for a value that was pooled into another counts for the
    /// value it was pooled into.
    fn unilateral_winner<'a>(
        &'a self,
        ranked: &[(&'a str, u32)],
        pooled: Option<Pooled<'a>>,
    ) -> Option<&'a str> {
        let grand_total: u32 = ranked.iter().map(|(_, w)| w).sum();
        let counted_as = |value: &'a str| match pooled {
            Some(pooled) if value == pooled.dropped => pooled.kept,
            _ => value,
        };
        self.ballots
            .values()
            .filter(|cast| cast.level.can_auto_approve() && cast.ballot.votes > 0)
            .map(|cast| (counted_as(cast.ballot.value.as_str()), cast.ballot.votes))
            .filter(|(value, votes)| {
                let own = ranked
                    .iter()
                    .find(|(v, _)| v == value)
                    .map_or(0, |(_, w)| *w);
                *votes > grand_total - own
            })
            .min_by(|(a, va), (b, vb)| vb.cmp(va).then_with(|| a.as_bytes().cmp(b.as_bytes())))
            .map(|(value, _)| value)
    }

    /// Status for a winner with weight `o` against a runner-up with `n`,
    /// backed by `backing_orgs` organizations
    fn compute_status(
        &self,
        o: u32,
        n: u32,
        contested: bool,
        backing_orgs: usize,
        old_status: Status,
    ) -> Status {
        if o >= self.required_votes && o >= 2 * n {
            return Status::Approved;
        }
        if o > n && !contested {
            if o >= CONTRIBUTED_VOTES && old_status < Status::Contributed {
                return Status::Contributed;
            }
            if o >= MULTI_ORG_CONTRIBUTED_VOTES && backing_orgs >= 2 {
                return Status::Contributed;
            }
        }
        if o >= n && o >= PROVISIONAL_VOTES {
            return Status::Provisional;
        }
        Status::Unconfirmed
    }
}

/// Outcome of pooling soft and hard votes for the inherited value
#[derive(Debug, Clone, Copy)]
struct Pooled<'a> {
    kept: &'a str,
    dropped: &'a str,
}

/// Pool the weight of [`INHERITANCE_MARKER`] with the weight of the inherited
/// value when both have any. The side with more weight keeps the sum; the
/// marker keeps it on a tie.
fn pool_inheritance<'a>(
    totals: &mut BTreeMap<&'a str, u32>,
    bailey: &'a str,
) -> Option<Pooled<'a>> {
    let hard = totals.get(bailey).copied().filter(|w| *w > 0)?;
    let soft = totals.get(INHERITANCE_MARKER).copied().filter(|w| *w > 0)?;
    let pooled = if hard > soft {
        Pooled {
            kept: bailey,
            dropped: INHERITANCE_MARKER,
        }
    } else {
        Pooled {
            kept: INHERITANCE_MARKER,
            dropped: bailey,
        }
    };
    totals.remove(pooled.dropped);
    totals.insert(pooled.kept, hard + soft);
    Some(pooled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vote::voter::VoterInfo;
    use proptest::prelude::*;

    // ==================== Helpers ====================

    fn info(org: Organization, level: Level, name: &str) -> VoterInfo {
        VoterInfo::new(org, level, name)
    }

    fn roster() -> Arc<VoterRoster> {
        Arc::new(
            [
                (666, info(Organization::Google, Level::Vetter, "J. Smith")),
                (555, info(Organization::Google, Level::Street, "S. Jones")),
                (444, info(Organization::Google, Level::Vetter, "S. Samuels")),
                (333, info(Organization::Apple, Level::Vetter, "A. Mutton")),
                (222, info(Organization::Adobe, Level::Expert, "A. Aldus")),
                (111, info(Organization::Ibm, Level::Street, "J. Henry")),
                (101, info(Organization::Ibm, Level::Street, "I. Street")),
                (801, info(Organization::Microsoft, Level::Street, "M. Street")),
                (704, info(Organization::Oracle, Level::Vetter, "O. Vetter")),
                (604, info(Organization::Mozilla, Level::Vetter, "Z. Vetter")),
                (504, info(Organization::Sil, Level::Vetter, "S. Vetter")),
                (920, info(Organization::Cldr, Level::Tc, "T. Committee")),
                (999, info(Organization::Surveytool, Level::Admin, "A. Admin")),
                (998, info(Organization::Surveytool, Level::Admin, "B. Admin")),
                (900, info(Organization::Guest, Level::Locked, "L. Locked")),
            ]
            .into_iter()
            .map(|(id, info)| (VoterId(id), info))
            .collect(),
        )
    }

    fn resolver() -> VoteResolver {
        VoteResolver::new(roster())
    }

    fn vote(resolver: &mut VoteResolver, voter: u32, value: &str) {
        resolver
            .add(Some(value.to_string()), VoterId(voter))
            .unwrap();
    }

    fn withdraw(resolver: &mut VoteResolver, voter: u32) {
        resolver.add(None, VoterId(voter)).unwrap();
    }

    fn conflicts(resolver: &VoteResolver) -> Vec<Organization> {
        resolver.conflicted_organizations().iter().copied().collect()
    }

    // ==================== Errors ====================

    #[test]
    fn test_add_before_new_path_fails() {
        let mut r = resolver();
        assert_eq!(
            r.add(Some("x".to_string()), VoterId(666)),
            Err(DomainError::UninitializedResolution)
        );
    }

    #[test]
    fn test_unknown_voter_fails() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        assert_eq!(
            r.add(Some("x".to_string()), VoterId(12345)),
            Err(DomainError::UnknownVoter(VoterId(12345)))
        );
        assert_eq!(
            r.add(None, VoterId(12345)),
            Err(DomainError::UnknownVoter(VoterId(12345)))
        );
        assert_eq!(r.ballot_count(), 0);
    }

    // ==================== Baseline ====================

    #[test]
    fn test_no_votes_reproduces_baseline() {
        let mut r = resolver();
        r.new_path(Some("x".to_string()), Status::Provisional);
        assert_eq!(r.winning_value(), Some("x"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert!(r.conflicted_organizations().is_empty());
        assert_eq!(r.values_with_same_votes(), ["x".to_string()]);
    }

    #[test]
    fn test_no_votes_no_baseline() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        assert_eq!(r.winning_value(), None);
        assert_eq!(r.winning_status(), Status::Missing);
    }

    #[test]
    fn test_removing_every_ballot_restores_baseline() {
        let mut r = resolver();
        r.new_path(Some("old".to_string()), Status::Contributed);
        vote(&mut r, 222, "new");
        assert_eq!(r.winning_value(), Some("new"));
        withdraw(&mut r, 222);
        assert_eq!(r.winning_value(), Some("old"));
        assert_eq!(r.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_new_path_clears_ballots() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 222, "primo");
        r.new_path(Some("fresh".to_string()), Status::Approved);
        assert_eq!(r.ballot_count(), 0);
        assert_eq!(r.winning_value(), Some("fresh"));
        assert_eq!(r.winning_status(), Status::Approved);
    }

    // ==================== Tie-breaks ====================

    #[test]
    fn test_alphabetical_tie_break() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 666, "zebra");
        vote(&mut r, 333, "apple");
        assert_eq!(r.winning_value(), Some("apple"));
        assert_eq!(r.next_value(), Some("zebra"));
        assert_eq!(
            r.values_with_same_votes(),
            ["apple".to_string(), "zebra".to_string()]
        );
    }

    #[test]
    fn test_baseline_preferred_tie_break() {
        let mut r = resolver();
        r.new_path(Some("existing".to_string()), Status::Unconfirmed);
        vote(&mut r, 666, "existing");
        vote(&mut r, 333, "aardvark");
        assert_eq!(r.winning_value(), Some("existing"));
    }

    // ==================== Capping and conflicts ====================

    #[test]
    fn test_org_internal_capping() {
        let mut same_org = resolver();
        same_org.new_path(None, Status::Missing);
        vote(&mut same_org, 666, "x");
        vote(&mut same_org, 444, "x");
        assert_eq!(same_org.total_votes()["x"], 4);
        assert_eq!(same_org.org_to_votes(Organization::Google)["x"], 4);

        let mut cross_org = resolver();
        cross_org.new_path(None, Status::Missing);
        vote(&mut cross_org, 666, "x");
        vote(&mut cross_org, 333, "x");
        assert_eq!(cross_org.total_votes()["x"], 8);
        assert_eq!(cross_org.winning_status(), Status::Approved);
        assert_eq!(same_org.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_conflict_flagging() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 666, "x");
        vote(&mut r, 555, "y");
        vote(&mut r, 333, "x");
        assert_eq!(r.winning_value(), Some("x"));
        assert_eq!(conflicts(&r), vec![Organization::Google]);
        assert_eq!(r.org_vote(Organization::Google), Some("x"));
    }

    #[test]
    fn test_unanimous_losing_org_is_not_conflicted() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 222, "x");
        vote(&mut r, 333, "y");
        assert_eq!(r.winning_value(), Some("x"));
        assert!(r.conflicted_organizations().is_empty());
    }

    // ==================== Unilateral override ====================

    #[test]
    fn test_unilateral_override() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        for voter in [666, 333, 704, 604, 504] {
            vote(&mut r, voter, "y");
        }
        vote(&mut r, 999, "z");
        assert_eq!(r.winning_value(), Some("z"));
        assert_eq!(r.winning_status(), Status::Approved);
        assert_eq!(r.next_value(), Some("y"));
    }

    #[test]
    fn test_reduced_weight_loses_override() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 666, "y");
        vote(&mut r, 333, "y");
        r.add_with_votes(Some("z".to_string()), VoterId(920), Some(4))
            .unwrap();
        assert_eq!(r.total_votes()["z"], 4);
        assert_eq!(r.winning_value(), Some("y"));
    }

    #[test]
    fn test_tc_override_needs_to_exceed_others() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        for voter in [666, 333, 704, 604] {
            vote(&mut r, voter, "y");
        }
        vote(&mut r, 920, "z");
        assert_eq!(r.winning_value(), Some("z"));
        assert_eq!(r.winning_status(), Status::Approved);

        // 20 against 5 × 4 is a plain tie, settled by byte order.
        vote(&mut r, 504, "y");
        assert_eq!(r.winning_value(), Some("y"));
        assert_eq!(r.winning_status(), Status::Provisional);
    }

    #[test]
    fn test_competing_admins_are_deterministic() {
        let mut a = resolver();
        a.new_path(None, Status::Missing);
        vote(&mut a, 999, "q");
        vote(&mut a, 998, "p");

        let mut b = resolver();
        b.new_path(None, Status::Missing);
        vote(&mut b, 998, "p");
        vote(&mut b, 999, "q");

        assert_eq!(a.resolution(), b.resolution());
        assert_eq!(a.winning_value(), Some("p"));
        assert_eq!(conflicts(&a), vec![Organization::Surveytool]);
    }

    // ==================== Status ====================

    #[test]
    fn test_contributed_with_lower_baseline() {
        let mut r = resolver();
        r.new_path(Some("old-value".to_string()), Status::Provisional);
        vote(&mut r, 444, "best");
        assert_eq!(r.winning_value(), Some("best"));
        assert_eq!(r.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_weaker_value_does_not_displace_baseline() {
        let mut r = resolver();
        r.new_path(Some("old-value".to_string()), Status::Contributed);
        vote(&mut r, 444, "best");
        assert_eq!(r.winning_value(), Some("old-value"));
        assert_eq!(r.winning_status(), Status::Contributed);
        assert_eq!(r.values_with_same_votes(), ["old-value".to_string()]);
    }

    #[test]
    fn test_two_organizations_contribute() {
        let mut r = resolver();
        r.new_path(Some("old-value".to_string()), Status::Contributed);
        vote(&mut r, 555, "best");
        vote(&mut r, 101, "best");
        assert_eq!(r.winning_value(), Some("best"));
        assert_eq!(r.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_single_street_vote_is_unconfirmed() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 111, "x");
        assert_eq!(r.winning_status(), Status::Unconfirmed);
    }

    #[test]
    fn test_zero_weight_ballot_never_wins() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 900, "spam");
        assert_eq!(r.ballot_of(VoterId(900)), Some("spam"));
        assert_eq!(r.winning_value(), None);
        assert_eq!(r.winning_status(), Status::Missing);
        assert!(r.total_votes().is_empty());

        vote(&mut r, 111, "x");
        assert_eq!(r.winning_value(), Some("x"));
        assert!(r.conflicted_organizations().is_empty());
    }

    #[test]
    fn test_zero_weight_ballot() {
        let mut r = resolver();
        r.new_path(Some("kept".to_string()), Status::Provisional);
        vote(&mut r, 900, "ignored");
        assert_eq!(r.winning_value(), Some("kept"));
        assert_eq!(r.winning_status(), Status::Provisional);
    }

    #[test]
    fn test_required_votes_lowered() {
        let mut r = resolver().with_required_votes(NON_ESTABLISHED_REQUIRED_VOTES);
        r.new_path(None, Status::Missing);
        vote(&mut r, 333, "x");
        assert_eq!(r.winning_status(), Status::Approved);
        r.set_required_votes(DEFAULT_REQUIRED_VOTES);
        assert_eq!(r.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_disputed() {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        vote(&mut r, 333, "x");
        vote(&mut r, 704, "y");
        assert_eq!(r.winning_status(), Status::Provisional);
        assert_eq!(r.possible_winning_status(), Status::Approved);
        assert!(r.is_disputed());
    }

    #[test]
    fn test_disputed_when_agreement_would_contribute() {
        let mut r = resolver();
        r.new_path(None, Status::Unconfirmed);
        vote(&mut r, 666, "x");
        vote(&mut r, 111, "y");
        assert_eq!(r.winning_value(), Some("x"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert_eq!(r.possible_winning_status(), Status::Contributed);
        assert!(r.is_disputed());

        // The same two voters agreeing reach the status computed above.
        vote(&mut r, 111, "x");
        assert_eq!(r.winning_status(), Status::Contributed);
        assert!(!r.is_disputed());
    }

    // ==================== Inheritance ====================

    fn inheriting(bailey: &str) -> VoteResolver {
        let mut r = resolver();
        r.new_path(None, Status::Missing);
        r.set_bailey_value(Some(bailey.to_string())).unwrap();
        r
    }

    #[test]
    fn test_bailey_requires_new_path() {
        let mut r = resolver();
        assert_eq!(
            r.set_bailey_value(Some("x".to_string())),
            Err(DomainError::UninitializedResolution)
        );
    }

    #[test]
    fn test_no_votes_inherits() {
        let r = inheriting("inherited");
        assert_eq!(r.winning_value(), Some(INHERITANCE_MARKER));
        assert_eq!(r.winning_status(), Status::Missing);
    }

    #[test]
    fn test_hard_and_soft_votes_pool_against_third_value() {
        let mut r = inheriting("inherited");
        vote(&mut r, 666, "inherited");
        vote(&mut r, 333, INHERITANCE_MARKER);
        vote(&mut r, 704, "other");
        assert_eq!(r.winning_value(), Some(INHERITANCE_MARKER));
        assert_eq!(r.winning_status(), Status::Approved);
        assert_eq!(r.next_value(), Some("other"));
        // Diagnostics keep the two kinds of vote apart.
        assert_eq!(r.total_votes()["inherited"], 4);
        assert_eq!(r.total_votes()[INHERITANCE_MARKER], 4);

        let mut unpooled = resolver();
        unpooled.new_path(None, Status::Missing);
        vote(&mut unpooled, 666, "inherited");
        vote(&mut unpooled, 333, INHERITANCE_MARKER);
        vote(&mut unpooled, 704, "other");
        assert_eq!(unpooled.winning_status(), Status::Provisional);
    }

    #[test]
    fn test_heavier_hard_vote_keeps_pooled_weight() {
        let mut r = inheriting("inherited");
        vote(&mut r, 222, "inherited");
        vote(&mut r, 333, INHERITANCE_MARKER);
        assert_eq!(r.winning_value(), Some("inherited"));
        assert_eq!(r.winning_status(), Status::Approved);
        assert_eq!(r.next_value(), None);
    }

    #[test]
    fn test_soft_vote_wins_pooled_tie() {
        let mut r = inheriting("inherited");
        vote(&mut r, 666, "inherited");
        vote(&mut r, 333, INHERITANCE_MARKER);
        assert_eq!(r.winning_value(), Some(INHERITANCE_MARKER));
        assert_eq!(r.winning_status(), Status::Approved);
    }

    #[test]
    fn test_soft_and_hard_votes_are_not_a_conflict() {
        let mut r = inheriting("inherited");
        vote(&mut r, 666, INHERITANCE_MARKER);
        vote(&mut r, 555, "inherited");
        assert!(r.conflicted_organizations().is_empty());
        assert_eq!(r.winning_value(), Some(INHERITANCE_MARKER));
        assert_eq!(r.winning_status(), Status::Contributed);
    }

    #[test]
    fn test_new_path_clears_bailey() {
        let mut r = inheriting("inherited");
        r.new_path(None, Status::Missing);
        assert_eq!(r.bailey_value(), None);
        assert_eq!(r.winning_value(), None);
    }

    // ==================== Idempotence ====================

    #[test]
    fn test_readd_same_value_is_noop() {
        let mut r = resolver();
        r.new_path(None, Status::Unconfirmed);
        vote(&mut r, 666, "best");
        vote(&mut r, 555, "next");
        let once = r.resolution().clone();
        vote(&mut r, 555, "next");
        assert_eq!(r.resolution(), &once);
    }

    // ==================== End-to-end ====================

    #[test]
    fn test_end_to_end_scenario() {
        let mut r = resolver();
        r.new_path(None, Status::Unconfirmed);

        vote(&mut r, 555, "next");
        vote(&mut r, 666, "best");
        assert_eq!(r.winning_value(), Some("best"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert_eq!(conflicts(&r), vec![Organization::Google]);

        vote(&mut r, 444, "next");
        assert_eq!(r.winning_value(), Some("next"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert_eq!(conflicts(&r), vec![Organization::Google]);

        withdraw(&mut r, 555);
        assert_eq!(r.winning_value(), Some("best"));
        assert_eq!(conflicts(&r), vec![Organization::Google]);

        withdraw(&mut r, 444);
        vote(&mut r, 555, "best");
        vote(&mut r, 333, "app");
        assert_eq!(r.winning_value(), Some("app"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert!(conflicts(&r).is_empty());

        vote(&mut r, 222, "primo");
        assert_eq!(r.winning_value(), Some("primo"));
        assert_eq!(r.winning_status(), Status::Approved);
        assert!(conflicts(&r).is_empty());

        vote(&mut r, 111, "best");
        assert_eq!(r.winning_value(), Some("primo"));
        assert_eq!(r.winning_status(), Status::Provisional);
        assert_eq!(r.total_votes()["best"], 5);
        assert!(conflicts(&r).is_empty());
    }

    // ==================== Order invariance ====================

    const VOTERS: [u32; 8] = [666, 555, 444, 333, 222, 111, 920, 999];
    const VALUES: [&str; 4] = ["app", "best", "next", "primo"];

    fn ballots_strategy() -> impl Strategy<Value = Vec<(u32, Option<&'static str>)>> {
        prop::collection::vec(
            (
                prop::sample::select(VOTERS.to_vec()),
                prop::option::of(prop::sample::select(VALUES.to_vec())),
            ),
            0..24,
        )
    }

    fn apply(ops: &[(u32, Option<&str>)], baseline: Option<&str>) -> VoteResolver {
        let mut r = resolver();
        r.new_path(baseline.map(str::to_string), Status::Provisional);
        for (voter, value) in ops {
            r.add(value.map(str::to_string), VoterId(*voter)).unwrap();
        }
        r
    }

    proptest! {
        #[test]
        fn prop_only_final_ballot_set_matters(
            ops in ballots_strategy(),
            baseline in prop::option::of(prop::sample::select(VALUES.to_vec())),
        ) {
            let replayed = apply(&ops, baseline);

            // Rebuild the same final ballot set directly, in reverse voter order.
            let mut final_set: BTreeMap<u32, Option<&str>> = BTreeMap::new();
            for (voter, value) in &ops {
                final_set.insert(*voter, *value);
            }
            let direct_ops: Vec<(u32, Option<&str>)> = final_set
                .into_iter()
                .rev()
                .filter(|(_, value)| value.is_some())
                .collect();
            let direct = apply(&direct_ops, baseline);

            prop_assert_eq!(replayed.resolution(), direct.resolution());
        }
    }
}
