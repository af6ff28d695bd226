//! In-memory locale data
//!
//! Holds existing values keyed by locale and xpath, loaded from TOML:
//!
//! ```toml
//! [[value]]
//! locale = "de"
//! xpath = "//ldml/numbers/symbols/decimal"
//! value = ","
//! status = "approved"
//! ```

use super::{LoadError, read_file};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;
use vetting_application::{LocaleDataSource, LocaleValue};
use vetting_domain::{LocaleId, Status};

#[derive(Debug, Deserialize)]
struct FileLocaleValues {
    #[serde(default, rename = "value")]
    values: Vec<FileLocaleValue>,
}

#[derive(Debug, Deserialize)]
struct FileLocaleValue {
    locale: LocaleId,
    xpath: String,
    value: String,
    #[serde(default)]
    status: Option<String>,
}

/// [`LocaleDataSource`] backed by a hash map
#[derive(Debug, Clone, Default)]
pub struct InMemoryLocaleData {
    values: HashMap<LocaleId, HashMap<String, LocaleValue>>,
}

impl InMemoryLocaleData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a value, replacing any earlier one for the same locale and xpath
    pub fn insert(&mut self, locale: LocaleId, xpath: impl Into<String>, value: LocaleValue) {
        self.values
            .entry(locale)
            .or_default()
            .insert(xpath.into(), value);
    }

    pub fn with(mut self, locale: LocaleId, xpath: impl Into<String>, value: LocaleValue) -> Self {
        self.insert(locale, xpath, value);
        self
    }

    /// Number of stored values
    pub fn len(&self) -> usize {
        self.values.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parse values from TOML text; a missing status means `missing`
    pub fn parse(text: &str) -> Result<Self, LoadError> {
        let file: FileLocaleValues = toml::from_str(text)?;
        let mut data = Self::new();
        for entry in file.values {
            let status = Status::from_optional(entry.status.as_deref())?;
            data.insert(entry.locale, entry.xpath, LocaleValue::new(entry.value, status));
        }
        Ok(data)
    }

    /// Read and parse a values file
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let data = Self::parse(&read_file(path)?)?;
        debug!("Loaded {} locale values from {}", data.len(), path.display());
        Ok(data)
    }
}

impl LocaleDataSource for InMemoryLocaleData {
    fn explicit_value(&self, locale: &LocaleId, xpath: &str) -> Option<LocaleValue> {
        self.values.get(locale)?.get(xpath).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetting_domain::DomainError;

    const XPATH: &str = "//ldml/numbers/symbols/decimal";

    #[test]
    fn test_parse_values() {
        let data = InMemoryLocaleData::parse(
            r#"
[[value]]
locale = "de"
xpath = "//ldml/numbers/symbols/decimal"
value = ","
status = "approved"

[[value]]
locale = "de-CH"
xpath = "//ldml/numbers/symbols/decimal"
value = "."
"#,
        )
        .unwrap();

        assert_eq!(data.len(), 2);
        let de = data
            .explicit_value(&LocaleId::parse("de").unwrap(), XPATH)
            .unwrap();
        assert_eq!(de, LocaleValue::new(",", Status::Approved));
        let de_ch = data
            .explicit_value(&LocaleId::parse("de_CH").unwrap(), XPATH)
            .unwrap();
        assert_eq!(de_ch.status, Status::Missing);
    }

    #[test]
    fn test_only_exact_locale_answers() {
        let data = InMemoryLocaleData::new().with(
            LocaleId::parse("de").unwrap(),
            XPATH,
            LocaleValue::new(",", Status::Approved),
        );
        assert!(
            data.explicit_value(&LocaleId::parse("de_AT").unwrap(), XPATH)
                .is_none()
        );
        assert!(
            data.explicit_value(&LocaleId::parse("de").unwrap(), "//ldml/other")
                .is_none()
        );
    }

    #[test]
    fn test_bad_status_fails() {
        let result = InMemoryLocaleData::parse(
            "[[value]]\nlocale = \"de\"\nxpath = \"x\"\nvalue = \"y\"\nstatus = \"great\"\n",
        );
        assert!(matches!(
            result,
            Err(LoadError::Domain(DomainError::UnknownRoleKind { .. }))
        ));
    }

    #[test]
    fn test_bad_locale_fails() {
        let result =
            InMemoryLocaleData::parse("[[value]]\nlocale = \"?\"\nxpath = \"x\"\nvalue = \"y\"\n");
        assert!(matches!(result, Err(LoadError::Toml(_))));
    }
}
