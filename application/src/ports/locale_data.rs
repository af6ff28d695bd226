//! Locale data port
//!
//! Defines how the application reads values that locales already define.
//! The data itself (XML files, a database, fixtures) lives behind this trait.

use serde::{Deserialize, Serialize};
use vetting_domain::{LocaleId, Status};

/// A value explicitly present in one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleValue {
    pub value: String,
    #[serde(default)]
    pub status: Status,
}

impl LocaleValue {
    pub fn new(value: impl Into<String>, status: Status) -> Self {
        Self {
            value: value.into(),
            status,
        }
    }
}

/// Read access to locale data
///
/// Implementations answer only for the exact locale asked; walking the
/// parent chain is the caller's job.
pub trait LocaleDataSource: Send + Sync {
    /// Value of `xpath` if `locale` defines it itself
    fn explicit_value(&self, locale: &LocaleId, xpath: &str) -> Option<LocaleValue>;
}
