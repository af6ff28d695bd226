//! Parent-locale file
//!
//! Lists explicit parents the way supplemental data does: one parent with
//! the children that inherit from it directly.
//!
//! ```toml
//! [parent_locales]
//! es_419 = ["es_MX", "es_AR", "es_CO"]
//! en_001 = ["en_AU", "en_GB"]
//! root = ["az_Arab", "uz_Arab"]
//!
//! [default_scripts]
//! sr = "Cyrl"
//! zh = "Hans"
//! ```

use super::{LoadError, read_file};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;
use vetting_domain::{LocaleFallback, LocaleId};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileParentLocales {
    parent_locales: BTreeMap<String, Vec<String>>,
    default_scripts: BTreeMap<String, String>,
}

/// Parse parent-locale data from TOML text
///
/// Fails on malformed locales, on a child listed under two different
/// parents, and on cycles.
pub fn parse_parent_locales(text: &str) -> Result<LocaleFallback, LoadError> {
    let file: FileParentLocales = toml::from_str(text)?;

    let mut parents: BTreeMap<LocaleId, LocaleId> = BTreeMap::new();
    for (parent, children) in &file.parent_locales {
        let parent = LocaleId::parse(parent)?;
        for child in children {
            let child = LocaleId::parse(child)?;
            match parents.get(&child) {
                Some(first) if *first != parent => {
                    return Err(LoadError::ConflictingParent {
                        locale: child,
                        first: first.clone(),
                        second: parent,
                    });
                }
                _ => {
                    parents.insert(child, parent.clone());
                }
            }
        }
    }

    Ok(LocaleFallback::new(parents, file.default_scripts)?)
}

/// Read and parse a parent-locale file
pub fn load_parent_locales(path: &Path) -> Result<LocaleFallback, LoadError> {
    let fallback = parse_parent_locales(&read_file(path)?)?;
    debug!("Loaded parent locales from {}", path.display());
    Ok(fallback)
}
