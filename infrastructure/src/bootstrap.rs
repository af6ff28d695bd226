//! Wiring: configuration in, ready-to-use resolution services out.
//!
//! ```text
//! FileConfig ─┬─ [voting] ──────────► VotingPolicy ─────┐
//!             ├─ data.roster ───────► SharedRoster ─────┼─► ResolveVotesUseCase
//!             ├─ data.parent_locales ► SharedFallback ──┤
//!             └─ data.locale_values ► InMemoryLocaleData┘
//! ```
//!
//! Roster and parent-locale data can be reloaded while resolutions run; the
//! new data is swapped in whole. The `[logging]` section drives
//! [`VettingServices::init_logging`] and [`VettingServices::results_reporter`].

use crate::config::FileConfig;
use crate::data::{InMemoryLocaleData, LoadError, load_parent_locales, load_roster};
use crate::logging::{JsonlResolutionReporter, LoggingError, init_tracing};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use vetting_application::{
    ResolveBaselineUseCase, ResolveVotesUseCase, SharedFallback, SharedRoster, SharedSnapshot,
};
use vetting_domain::core::validation::has_errors;
use vetting_domain::{ConfigIssue, LocaleFallback, VoterRoster};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Invalid configuration: {}", format_issues(.0))]
    InvalidConfig(Vec<ConfigIssue>),

    #[error(transparent)]
    Load(#[from] LoadError),
}

fn format_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Shared data plus the use cases built on it
pub struct VettingServices {
    config: FileConfig,
    roster: Arc<SharedRoster>,
    fallback: Arc<SharedFallback>,
    resolve_votes: ResolveVotesUseCase<InMemoryLocaleData>,
}

impl VettingServices {
    /// Load every configured data file and build the use cases.
    ///
    /// Warnings are logged and returned; any error-severity issue aborts.
    pub fn from_config(config: FileConfig) -> Result<(Self, Vec<ConfigIssue>), BootstrapError> {
        let issues = config.validate();
        if has_errors(&issues) {
            return Err(BootstrapError::InvalidConfig(issues));
        }
        for issue in &issues {
            warn!("{}", issue.message);
        }

        let (policy, _) = config.voting.to_voting_policy();
        let roster = match &config.data.roster {
            Some(path) => load_roster(path)?,
            None => VoterRoster::new(),
        };
        let fallback = match &config.data.parent_locales {
            Some(path) => load_parent_locales(path)?,
            None => LocaleFallback::structural(),
        };
        let locale_data = match &config.data.locale_values {
            Some(path) => InMemoryLocaleData::load(path)?,
            None => InMemoryLocaleData::new(),
        };
        info!(
            "Loaded {} voters and {} locale values",
            roster.len(),
            locale_data.len()
        );

        let roster = Arc::new(SharedSnapshot::new(roster));
        let fallback = Arc::new(SharedSnapshot::new(fallback));
        let baseline = ResolveBaselineUseCase::new(Arc::new(locale_data), Arc::clone(&fallback));
        let resolve_votes =
            ResolveVotesUseCase::new(Arc::clone(&roster), Arc::new(baseline), policy);

        let services = Self {
            config,
            roster,
            fallback,
            resolve_votes,
        };
        Ok((services, issues))
    }

    pub fn config(&self) -> &FileConfig {
        &self.config
    }

    pub fn roster(&self) -> &Arc<SharedRoster> {
        &self.roster
    }

    pub fn fallback(&self) -> &Arc<SharedFallback> {
        &self.fallback
    }

    pub fn resolve_votes(&self) -> &ResolveVotesUseCase<InMemoryLocaleData> {
        &self.resolve_votes
    }

    /// Install the global tracing subscriber at `[logging] level`, writing to
    /// `[logging] directory` when set. Keep the guard alive while logging.
    pub fn init_logging(&self) -> Result<Option<WorkerGuard>, LoggingError> {
        let (level, _) = self.config.logging.parse_level();
        init_tracing(level, self.config.logging.directory.as_deref())
    }

    /// Reporter writing every resolution to `[logging] results_file`;
    /// `None` when unset or the file cannot be opened.
    pub fn results_reporter(&self) -> Option<JsonlResolutionReporter> {
        let path = self.config.logging.results_file.as_ref()?;
        JsonlResolutionReporter::new(path)
    }

    /// Re-read the roster file and swap it in; returns the new voter count.
    ///
    /// On failure the current roster stays in place.
    pub fn reload_roster(&self) -> Result<usize, LoadError> {
        let Some(path) = &self.config.data.roster else {
            return Ok(self.roster.snapshot().len());
        };
        let roster = load_roster(path)?;
        let count = roster.len();
        self.roster.replace(roster);
        info!("Reloaded roster: {} voters", count);
        Ok(count)
    }

    /// Re-read the parent-locale file and swap it in.
    ///
    /// On failure the current data stays in place.
    pub fn reload_parent_locales(&self) -> Result<(), LoadError> {
        let Some(path) = &self.config.data.parent_locales else {
            return Ok(());
        };
        self.fallback.replace(load_parent_locales(path)?);
        info!("Reloaded parent locales");
        Ok(())
    }
}
