//! Contributing organizations

use crate::core::error::{DomainError, RoleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The entity a voter belongs to
///
/// Organizations group ballots for conflict detection and per-organization
/// capping; they never add weight of their own. The derived ordering only
/// exists so that sets of organizations iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Organization {
    Adlam,
    Adobe,
    Apple,
    Cldr,
    Gnome,
    Google,
    Guest,
    Ibm,
    Longnow,
    Microsoft,
    Mozilla,
    OpenofficeOrg,
    Oracle,
    Sil,
    Surveytool,
    Unaffiliated,
    Wikimedia,
    Yahoo,
}

// (name, display name), indexed by discriminant.
const ORGANIZATIONS: [(&str, &str); 18] = [
    ("adlam", "Winden Jangen Adlam"),
    ("adobe", "Adobe"),
    ("apple", "Apple"),
    ("cldr", "Cldr"),
    ("gnome", "Gnome Foundation"),
    ("google", "Google"),
    ("guest", "Guest (Unicode)"),
    ("ibm", "IBM"),
    ("longnow", "The Long Now Foundation"),
    ("microsoft", "Microsoft"),
    ("mozilla", "Mozilla"),
    ("openoffice_org", "Open Office"),
    ("oracle", "Oracle"),
    ("sil", "SIL"),
    ("surveytool", "Survey Tool"),
    ("unaffiliated", "Unaffiliated"),
    ("wikimedia", "Wikimedia Foundation"),
    ("yahoo", "Yahoo"),
];

impl Organization {
    pub const ALL: [Organization; 18] = [
        Organization::Adlam,
        Organization::Adobe,
        Organization::Apple,
        Organization::Cldr,
        Organization::Gnome,
        Organization::Google,
        Organization::Guest,
        Organization::Ibm,
        Organization::Longnow,
        Organization::Microsoft,
        Organization::Mozilla,
        Organization::OpenofficeOrg,
        Organization::Oracle,
        Organization::Sil,
        Organization::Surveytool,
        Organization::Unaffiliated,
        Organization::Wikimedia,
        Organization::Yahoo,
    ];

    /// Identifier as used in roster files
    pub fn as_str(self) -> &'static str {
        ORGANIZATIONS[self as usize].0
    }

    /// Human-readable name
    pub fn display_name(self) -> &'static str {
        ORGANIZATIONS[self as usize].1
    }
}

impl fmt::Display for Organization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Organization {
    type Err = DomainError;

    /// Accepts the identifier (`openoffice_org`) or the display name (`Open Office`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Organization::ALL
            .into_iter()
            .find(|org| {
                org.as_str().eq_ignore_ascii_case(trimmed)
                    || org.display_name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| DomainError::unknown_role(RoleKind::Organization, s))
    }
}
