//! Application layer for cldr-vetting
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod snapshot;
pub mod use_cases;

// Re-export commonly used types
pub use config::VotingPolicy;
pub use ports::{
    locale_data::{LocaleDataSource, LocaleValue},
    resolution_reporter::{NoReporter, ResolutionReporter},
};
pub use snapshot::{SharedFallback, SharedRoster, SharedSnapshot};
pub use use_cases::resolve_baseline::{Baseline, ResolveBaselineUseCase};
pub use use_cases::resolve_votes::{
    BallotEntry, BatchOutcome, BatchSummary, DataPoint, DataPointKey, DataPointOutcome,
    ResolveError, ResolveVotesUseCase, ResolvedDataPoint,
};
