//! Resolution reporting port
//!
//! Receives results as a batch is resolved. Implementations live in the
//! infrastructure layer and can persist or display them.

use crate::use_cases::resolve_votes::{BatchSummary, DataPointKey, ResolveError};
use vetting_domain::Resolution;

/// Callback for each resolved (or failed) data point
pub trait ResolutionReporter: Send + Sync {
    /// Called when a data point resolves
    fn on_resolved(&self, key: &DataPointKey, resolution: &Resolution);

    /// Called when a data point could not be resolved; the batch continues
    fn on_failed(&self, key: &DataPointKey, error: &ResolveError);

    /// Called once after every data point has been handled
    fn on_batch_complete(&self, _summary: &BatchSummary) {}
}

/// No-op reporter for when results are only needed as a return value
pub struct NoReporter;

impl ResolutionReporter for NoReporter {
    fn on_resolved(&self, _key: &DataPointKey, _resolution: &Resolution) {}
    fn on_failed(&self, _key: &DataPointKey, _error: &ResolveError) {}
}
