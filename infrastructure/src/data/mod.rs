//! File-backed data adapters
//!
//! Loaders for the three kinds of shared data a resolution reads:
//!
//! | File | Loader | Produces |
//! |------|--------|----------|
//! | voter roster | [`load_roster`] | [`VoterRoster`](vetting_domain::VoterRoster) |
//! | parent locales | [`load_parent_locales`] | [`LocaleFallback`](vetting_domain::LocaleFallback) |
//! | locale values | [`InMemoryLocaleData::load`] | [`LocaleDataSource`](vetting_application::LocaleDataSource) |
//!
//! All three are TOML. Names that do not parse (unknown level, malformed
//! locale) fail the whole load rather than being skipped.

mod locale_values;
mod parent_locales;
mod roster;

pub use locale_values::InMemoryLocaleData;
pub use parent_locales::{load_parent_locales, parse_parent_locales};
pub use roster::{load_roster, parse_roster};

use std::path::{Path, PathBuf};
use thiserror::Error;
use vetting_domain::{DomainError, LocaleId, VoterId};

/// Errors that can occur while loading data files
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid data: {0}")]
    Domain(#[from] DomainError),

    #[error("Voter {0} is listed more than once")]
    DuplicateVoter(VoterId),

    #[error("Locale '{locale}' is given two parents: '{first}' and '{second}'")]
    ConflictingParent {
        locale: LocaleId,
        first: LocaleId,
        second: LocaleId,
    },
}

pub(crate) fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}
