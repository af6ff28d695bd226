//! Domain error types

use crate::vote::VoterId;
use std::fmt;
use thiserror::Error;

/// Which closed enumeration a name failed to parse into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleKind {
    Level,
    Organization,
    Status,
}

impl fmt::Display for RoleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleKind::Level => write!(f, "level"),
            RoleKind::Organization => write!(f, "organization"),
            RoleKind::Status => write!(f, "status"),
        }
    }
}

/// Domain-level errors
///
/// These are contract violations at the boundary of the vote resolver and
/// the locale model. None of them is produced for ordinary data conditions
/// such as "no votes" or "all votes tie".
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown voter: {0}")]
    UnknownVoter(VoterId),

    #[error("Ballot added before new_path() was called")]
    UninitializedResolution,

    #[error("Unknown {kind}: '{name}'")]
    UnknownRoleKind { kind: RoleKind, name: String },

    #[error("Invalid locale identifier: '{0}'")]
    InvalidLocale(String),

    #[error("Locale parent overrides form a cycle through '{0}'")]
    LocaleCycle(String),
}

impl DomainError {
    pub(crate) fn unknown_role(kind: RoleKind, name: impl Into<String>) -> Self {
        DomainError::UnknownRoleKind {
            kind,
            name: name.into(),
        }
    }

    /// Check if this error was caused by the caller misusing the resolver API
    /// rather than by bad external data
    pub fn is_programmer_error(&self) -> bool {
        matches!(
            self,
            DomainError::UninitializedResolution | DomainError::UnknownVoter(_)
        )
    }
}
