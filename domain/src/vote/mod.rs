//! Weighted-ballot vote resolution
//!
//! This module contains everything needed to decide one data point:
//!
//! - [`Level`] / [`Organization`]: who a voter is and how much a ballot weighs
//! - [`VoterRoster`]: immutable snapshot of the voter registry
//! - [`VoteResolver`]: ballots in, winning value / status / conflicts out
//!
//! ```text
//! ┌──────────────┐   VoterId    ┌──────────────┐
//! │ VoterRoster  │◄─────────────│ VoteResolver │◄── add(value, voter)
//! │ (snapshot)   │  VoterInfo   │              │◄── new_path(old, status)
//! └──────────────┘─────────────►│              │──► winning value / status
//!                               └──────────────┘──► conflicted organizations
//! ```

pub mod level;
pub mod organization;
pub mod resolver;
pub mod status;
pub mod tally;
pub mod voter;

pub use level::Level;
pub use organization::Organization;
pub use resolver::{
    DEFAULT_REQUIRED_VOTES, HIGH_BAR, NON_ESTABLISHED_REQUIRED_VOTES, Resolution,
    ResolutionContext, VoteResolver,
};
pub use status::Status;
pub use tally::{Ballot, INHERITANCE_MARKER, OrganizationTally, ValueSupport, tie_break};
pub use voter::{LocaleVetters, VoterId, VoterInfo, VoterRoster};
