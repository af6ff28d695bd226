//! Voter levels and their voting weight
//!
//! A [`Level`] is the role a voter holds in the survey tool. Each level
//! carries a fixed vote weight, the numeric userlevel used by the external
//! user registry, and whether a ballot at that level may approve a value
//! on its own.

use crate::core::error::{DomainError, RoleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role of a voter, ordered by seniority
///
/// Declaration order is the total order: `locked < street < anonymous <
/// vetter < expert < manager < tc < admin`. Vote weight follows the same
/// order except for `expert`, which carries an outsized weight of 8 above
/// the more senior `manager`.
///
/// # Example
///
/// ```
/// use vetting_domain::vote::Level;
///
/// assert!(Level::Tc > Level::Vetter);
/// assert_eq!(Level::Expert.votes(), 8);
/// assert!(Level::Admin.can_auto_approve());
/// assert!(!Level::Expert.can_auto_approve());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Locked,
    Street,
    Anonymous,
    Vetter,
    Expert,
    Manager,
    Tc,
    Admin,
}

struct LevelEntry {
    name: &'static str,
    votes: u32,
    st_level: u32,
    auto_approve: bool,
}

// Indexed by discriminant.
const LEVELS: [LevelEntry; 8] = [
    LevelEntry {
        name: "locked",
        votes: 0,
        st_level: 999,
        auto_approve: false,
    },
    LevelEntry {
        name: "street",
        votes: 1,
        st_level: 10,
        auto_approve: false,
    },
    LevelEntry {
        name: "anonymous",
        votes: 0,
        st_level: 8,
        auto_approve: false,
    },
    LevelEntry {
        name: "vetter",
        votes: 4,
        st_level: 5,
        auto_approve: false,
    },
    LevelEntry {
        name: "expert",
        votes: 8,
        st_level: 3,
        auto_approve: false,
    },
    LevelEntry {
        name: "manager",
        votes: 4,
        st_level: 2,
        auto_approve: false,
    },
    LevelEntry {
        name: "tc",
        votes: 20,
        st_level: 1,
        auto_approve: true,
    },
    LevelEntry {
        name: "admin",
        votes: 100,
        st_level: 0,
        auto_approve: true,
    },
];

impl Level {
    /// All levels, least senior first
    pub const ALL: [Level; 8] = [
        Level::Locked,
        Level::Street,
        Level::Anonymous,
        Level::Vetter,
        Level::Expert,
        Level::Manager,
        Level::Tc,
        Level::Admin,
    ];

    fn entry(self) -> &'static LevelEntry {
        &LEVELS[self as usize]
    }

    /// Vote weight of a ballot cast at this level
    pub fn votes(self) -> u32 {
        self.entry().votes
    }

    /// Survey-tool userlevel (0 = admin, 999 = locked; lower is more privileged)
    pub fn st_level(self) -> u32 {
        self.entry().st_level
    }

    /// Whether a single ballot at this level can take a value straight to
    /// `approved` when it outweighs every other candidate combined
    pub fn can_auto_approve(self) -> bool {
        self.entry().auto_approve
    }

    /// Lowercase name as used in roster files
    pub fn as_str(self) -> &'static str {
        self.entry().name
    }

    /// Weight actually counted for a ballot that asked for `requested` votes.
    ///
    /// A voter may vote below their level but never above it.
    pub fn effective_votes(self, requested: Option<u32>) -> u32 {
        match requested {
            Some(requested) => requested.min(self.votes()),
            None => self.votes(),
        }
    }

    /// Look up a level by its survey-tool userlevel
    pub fn from_st_level(st_level: u32) -> Result<Level, DomainError> {
        Level::ALL
            .into_iter()
            .find(|level| level.st_level() == st_level)
            .ok_or_else(|| DomainError::unknown_role(RoleKind::Level, st_level.to_string()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Level::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DomainError::unknown_role(RoleKind::Level, s))
    }
}
