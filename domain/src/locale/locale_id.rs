//! Locale identifiers
//!
//! A [`LocaleId`] is either `root` or
//! `language[_Script][_REGION][_VARIANT...]`. Parsing accepts BCP-47 style
//! hyphens and any letter case, and always stores the canonical form
//! (`sr_Latn_RS`, `en_US_POSIX`).

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Validated, canonical locale identifier
///
/// # Example
///
/// ```
/// use vetting_domain::locale::LocaleId;
///
/// let id: LocaleId = "sr-latn-rs".parse().unwrap();
/// assert_eq!(id.as_str(), "sr_Latn_RS");
/// assert_eq!(id.parts().script, Some("Latn"));
/// assert!(LocaleId::parse("").unwrap().is_root());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocaleId(String);

/// Subtags of a locale identifier, borrowed from it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleParts<'a> {
    pub language: &'a str,
    pub script: Option<&'a str>,
    pub region: Option<&'a str>,
    pub variants: Vec<&'a str>,
}

impl LocaleId {
    pub const ROOT: &'static str = "root";

    pub fn root() -> Self {
        LocaleId(Self::ROOT.to_string())
    }

    /// Parse and canonicalize. The empty string is treated as `root`.
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(Self::ROOT) {
            return Ok(Self::root());
        }

        let invalid = || DomainError::InvalidLocale(input.to_string());
        let mut subtags = trimmed.split(['_', '-']).peekable();

        let language = subtags.next().filter(|s| is_language(s)).ok_or_else(invalid)?;
        let mut canonical = language.to_ascii_lowercase();

        if let Some(script) = subtags.next_if(|s| is_script(s)) {
            canonical.push('_');
            canonical.push_str(&title_case(script));
        }
        if let Some(region) = subtags.next_if(|s| is_region(s)) {
            canonical.push('_');
            canonical.push_str(&region.to_ascii_uppercase());
        }
        for variant in subtags {
            if !is_variant(variant) {
                return Err(invalid());
            }
            canonical.push('_');
            canonical.push_str(&variant.to_ascii_uppercase());
        }
        Ok(LocaleId(canonical))
    }

    /// Wrap a string already known to be canonical (e.g. a prefix of one)
    pub(crate) fn from_canonical(id: &str) -> Self {
        LocaleId(id.to_string())
    }

    pub fn is_root(&self) -> bool {
        self.0 == Self::ROOT
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Language subtag (`root` for the root locale)
    pub fn language(&self) -> &str {
        self.parts().language
    }

    pub fn parts(&self) -> LocaleParts<'_> {
        let mut subtags = self.0.split('_').peekable();
        let language = subtags.next().unwrap_or(Self::ROOT);
        let script = subtags.next_if(|s| is_script(s));
        let region = subtags.next_if(|s| is_region(s));
        LocaleParts {
            language,
            script,
            region,
            variants: subtags.collect(),
        }
    }
}

fn is_language(s: &str) -> bool {
    matches!(s.len(), 2..=3 | 5..=8) && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_script(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_alphabetic())
}

fn is_region(s: &str) -> bool {
    (s.len() == 2 && s.bytes().all(|b| b.is_ascii_alphabetic()))
        || (s.len() == 3 && s.bytes().all(|b| b.is_ascii_digit()))
}

fn is_variant(s: &str) -> bool {
    let alnum = s.bytes().all(|b| b.is_ascii_alphanumeric());
    match s.len() {
        5..=8 => alnum,
        4 => alnum && s.as_bytes()[0].is_ascii_digit(),
        _ => false,
    }
}

fn title_case(s: &str) -> String {
    let mut out = s.to_ascii_lowercase();
    if let Some(first) = out.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    out
}

impl fmt::Display for LocaleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for LocaleId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LocaleId::parse(s)
    }
}

impl TryFrom<String> for LocaleId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        LocaleId::parse(&value)
    }
}

impl From<LocaleId> for String {
    fn from(id: LocaleId) -> Self {
        id.0
    }
}
