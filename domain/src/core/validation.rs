//! Structured configuration issues
//!
//! Configuration is parsed leniently: a bad value falls back to its default
//! and produces a [`ConfigIssue`] instead of an error, so the caller can
//! report every problem at once. Only [`Severity::Error`] issues should stop
//! a run.

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Non-fatal: the configuration works but may not behave as expected.
    Warning,
    /// Fatal: the configuration cannot work at all.
    Error,
}

/// Identifies a specific configuration issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigIssueCode {
    /// A vote threshold is zero, so every value would be approved.
    ZeroThreshold { field: String },
    /// A threshold that should not exceed another one does.
    ThresholdOrder { field: String, limit_field: String },
    /// A string could not be parsed into a closed enumeration.
    InvalidEnumValue {
        field: String,
        value: String,
        valid_values: Vec<String>,
    },
    /// A locale identifier in a list is malformed.
    InvalidLocale { field: String, value: String },
    /// A non-empty list lost every entry to validation.
    EmptyAfterValidation { field: String },
    /// A configured data file does not exist.
    MissingDataFile { field: String, path: String },
}

/// A detected issue in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    pub code: ConfigIssueCode,
    pub message: String,
}

impl ConfigIssue {
    pub fn warning(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
        }
    }

    pub fn error(code: ConfigIssueCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Whether any issue in the list is fatal
pub fn has_errors(issues: &[ConfigIssue]) -> bool {
    issues.iter().any(ConfigIssue::is_error)
}
