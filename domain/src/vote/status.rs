//! Approval status of a resolved data point

use crate::core::error::{DomainError, RoleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Status of the winning value, in ascending order
///
/// - `Approved`: enough uncontested weight to be used in a release
/// - `Contributed`: enough weight for most implementations
/// - `Provisional`: has support, but not enough (or contested)
/// - `Unconfirmed`: token support only
/// - `Missing`: nothing there at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Missing,
    Unconfirmed,
    Provisional,
    Contributed,
    Approved,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Missing,
        Status::Unconfirmed,
        Status::Provisional,
        Status::Contributed,
        Status::Approved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Missing => "missing",
            Status::Unconfirmed => "unconfirmed",
            Status::Provisional => "provisional",
            Status::Contributed => "contributed",
            Status::Approved => "approved",
        }
    }

    /// Parse an optional status string the way locale data stores it:
    /// an absent attribute means `Missing`.
    pub fn from_optional(source: Option<&str>) -> Result<Status, DomainError> {
        source.map_or(Ok(Status::Missing), str::parse)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::unknown_role(RoleKind::Status, s))
    }
}
