//! Application-level configuration.
//!
//! - [`VotingPolicy`]: required votes per locale and path

pub mod voting_policy;

pub use voting_policy::VotingPolicy;
