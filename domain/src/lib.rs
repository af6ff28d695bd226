//! Domain layer for cldr-vetting
//!
//! This crate contains the vote model and the locale model. It is pure and
//! synchronous: no I/O, no logging, no global state.
//!
//! # Core Concepts
//!
//! ## Vote resolution
//!
//! Voters belong to an [`Organization`] and hold a [`Level`] that fixes the
//! weight of their ballot. A [`VoteResolver`] collects the ballots cast for a
//! single data point and derives:
//!
//! - **Winning value**: what the locale should say
//! - **Winning status**: how sure we are ([`Status`])
//! - **Conflicted organizations**: organizations whose own voters disagree
//!
//! ## Locale fallback
//!
//! A [`LocaleFallback`] maps every [`LocaleId`] to its parent, so a data
//! point with no local value can inherit one (`en_US_POSIX → en_US → en → root`).

pub mod core;
pub mod locale;
pub mod vote;

// Re-export commonly used types
pub use core::{
    error::{DomainError, RoleKind},
    validation::{ConfigIssue, ConfigIssueCode, Severity},
};
pub use locale::{LocaleFallback, LocaleId, LocaleParts};
pub use vote::{
    DEFAULT_REQUIRED_VOTES, HIGH_BAR, INHERITANCE_MARKER, Level, LocaleVetters,
    NON_ESTABLISHED_REQUIRED_VOTES, Organization, Resolution, ResolutionContext, Status,
    VoteResolver, VoterId, VoterInfo, VoterRoster,
};
