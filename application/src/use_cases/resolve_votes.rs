//! Resolve Votes use case
//!
//! Resolves a batch of independent data points. Each data point gets its
//! own [`VoteResolver`], seeded with the baseline found through locale
//! fallback and with the required votes from the [`VotingPolicy`].
//!
//! ```text
//! DataPoint ──► baseline (fallback chain) ──► VoteResolver ──► Resolution
//!    × N          one tokio task per data point, results in input order
//! ```
//!
//! A failing data point (unknown voter, ...) is reported and recorded; it
//! never aborts the rest of the batch.

use crate::config::VotingPolicy;
use crate::ports::locale_data::LocaleDataSource;
use crate::ports::resolution_reporter::{NoReporter, ResolutionReporter};
use crate::snapshot::SharedRoster;
use crate::use_cases::resolve_baseline::ResolveBaselineUseCase;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vetting_domain::{DomainError, LocaleId, Resolution, VoteResolver, VoterId, VoterRoster};

/// Errors that can occur while resolving a data point
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Resolution task failed: {0}")]
    TaskFailed(String),
}

/// Identifies a data point: one xpath in one locale
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DataPointKey {
    pub locale: LocaleId,
    pub xpath: String,
}

impl DataPointKey {
    pub fn new(locale: LocaleId, xpath: impl Into<String>) -> Self {
        Self {
            locale,
            xpath: xpath.into(),
        }
    }
}

impl fmt::Display for DataPointKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.locale, self.xpath)
    }
}

/// One voter's current ballot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotEntry {
    pub voter: VoterId,
    /// `None` withdraws an earlier ballot
    pub value: Option<String>,
    /// Reduced weight, if the voter chose one
    #[serde(default)]
    pub votes: Option<u32>,
}

impl BallotEntry {
    pub fn new(voter: VoterId, value: impl Into<String>) -> Self {
        Self {
            voter,
            value: Some(value.into()),
            votes: None,
        }
    }

    pub fn with_votes(mut self, votes: u32) -> Self {
        self.votes = Some(votes);
        self
    }
}

/// Input for one data point
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataPoint {
    pub key: DataPointKey,
    pub ballots: Vec<BallotEntry>,
}

impl DataPoint {
    pub fn new(key: DataPointKey, ballots: Vec<BallotEntry>) -> Self {
        Self { key, ballots }
    }
}

/// What happened to one data point
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataPointOutcome {
    Resolved(Resolution),
    Failed(ResolveError),
    /// The batch was cancelled before this data point was resolved
    Cancelled,
}

impl DataPointOutcome {
    pub fn resolution(&self) -> Option<&Resolution> {
        match self {
            DataPointOutcome::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }
}

/// Result for one data point of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDataPoint {
    pub key: DataPointKey,
    pub outcome: DataPointOutcome,
}

/// Counts over a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub resolved: usize,
    pub failed: usize,
    pub cancelled: usize,
    /// Resolved data points that are disputed (see [`Resolution::is_disputed`])
    pub disputed: usize,
}

impl BatchSummary {
    fn from_points(points: &[ResolvedDataPoint]) -> Self {
        let mut summary = BatchSummary {
            total: points.len(),
            ..Self::default()
        };
        for point in points {
            match &point.outcome {
                DataPointOutcome::Resolved(resolution) => {
                    summary.resolved += 1;
                    if resolution.is_disputed() {
                        summary.disputed += 1;
                    }
                }
                DataPointOutcome::Failed(_) => summary.failed += 1,
                DataPointOutcome::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }
}

/// Output of a batch, in input order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub points: Vec<ResolvedDataPoint>,
    pub summary: BatchSummary,
}

/// Use case for resolving ballots into winning values
pub struct ResolveVotesUseCase<D: LocaleDataSource + ?Sized + 'static> {
    roster: Arc<SharedRoster>,
    baseline: Arc<ResolveBaselineUseCase<D>>,
    policy: Arc<VotingPolicy>,
    cancellation_token: Option<CancellationToken>,
}

impl<D: LocaleDataSource + ?Sized + 'static> ResolveVotesUseCase<D> {
    pub fn new(
        roster: Arc<SharedRoster>,
        baseline: Arc<ResolveBaselineUseCase<D>>,
        policy: VotingPolicy,
    ) -> Self {
        Self {
            roster,
            baseline,
            policy: Arc::new(policy),
            cancellation_token: None,
        }
    }

    /// Stop starting new data points once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    pub fn policy(&self) -> &VotingPolicy {
        &self.policy
    }

    /// Resolve a single data point against the current roster
    pub fn resolve_one(&self, point: &DataPoint) -> Result<Resolution, ResolveError> {
        resolve_point(self.roster.snapshot(), &self.baseline, &self.policy, point)
    }

    /// Execute the use case with the default (no-op) reporter
    pub async fn execute(&self, points: Vec<DataPoint>) -> BatchOutcome {
        self.execute_with_reporter(points, &NoReporter).await
    }

    /// Execute the use case, reporting each data point as it finishes
    ///
    /// The whole batch sees the roster as it was when the batch started.
    pub async fn execute_with_reporter(
        &self,
        points: Vec<DataPoint>,
        reporter: &dyn ResolutionReporter,
    ) -> BatchOutcome {
        let roster = self.roster.snapshot();
        let token = self.cancellation_token.clone().unwrap_or_default();
        info!("Resolving {} data points", points.len());

        let keys: Vec<DataPointKey> = points.iter().map(|p| p.key.clone()).collect();
        let mut slots: Vec<Option<DataPointOutcome>> = vec![None; points.len()];
        let mut join_set = JoinSet::new();

        for (index, point) in points.into_iter().enumerate() {
            let roster = Arc::clone(&roster);
            let baseline = Arc::clone(&self.baseline);
            let policy = Arc::clone(&self.policy);
            let token = token.clone();

            join_set.spawn(async move {
                if token.is_cancelled() {
                    return (index, DataPointOutcome::Cancelled);
                }
                let outcome = match resolve_point(roster, &baseline, &policy, &point) {
                    Ok(resolution) => DataPointOutcome::Resolved(resolution),
                    Err(e) => DataPointOutcome::Failed(e),
                };
                (index, outcome)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    let key = &keys[index];
                    match &outcome {
                        DataPointOutcome::Resolved(resolution) => {
                            debug!(
                                "{}: {:?} ({})",
                                key, resolution.winning_value, resolution.winning_status
                            );
                            reporter.on_resolved(key, resolution);
                        }
                        DataPointOutcome::Failed(e) => {
                            warn!("{}: {}", key, e);
                            reporter.on_failed(key, e);
                        }
                        DataPointOutcome::Cancelled => {}
                    }
                    slots[index] = Some(outcome);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        let points: Vec<ResolvedDataPoint> = keys
            .into_iter()
            .zip(slots)
            .map(|(key, slot)| {
                let outcome = slot.unwrap_or_else(|| {
                    let error = ResolveError::TaskFailed("task did not complete".to_string());
                    reporter.on_failed(&key, &error);
                    DataPointOutcome::Failed(error)
                });
                ResolvedDataPoint { key, outcome }
            })
            .collect();

        let summary = BatchSummary::from_points(&points);
        info!(
            "Batch complete: {} resolved, {} failed, {} cancelled",
            summary.resolved, summary.failed, summary.cancelled
        );
        reporter.on_batch_complete(&summary);
        BatchOutcome { points, summary }
    }
}

fn resolve_point<D: LocaleDataSource + ?Sized>(
    roster: Arc<VoterRoster>,
    baseline: &ResolveBaselineUseCase<D>,
    policy: &VotingPolicy,
    point: &DataPoint,
) -> Result<Resolution, ResolveError> {
    let key = &point.key;
    let baseline = baseline.execute(&key.locale, &key.xpath);
    let required = policy.required_votes_for(&key.locale, &key.xpath);

    let mut resolver = VoteResolver::new(roster).with_required_votes(required);
    resolver.start(baseline.context);
    for ballot in &point.ballots {
        resolver.add_with_votes(ballot.value.clone(), ballot.voter, ballot.votes)?;
    }
    Ok(resolver.resolution().clone())
}
