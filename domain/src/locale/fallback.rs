//! Locale inheritance
//!
//! Computes the parent of a locale and the full fallback chain down to
//! `root`:
//!
//! ```text
//! en_US_POSIX ──► en_US ──► en ──► root
//! es_MX ══════► es_419 ──► es ──► root      (══ explicit override)
//! sr_Latn_RS ─► sr_Latn ─────────► root     (Latn is not sr's default script)
//! sr_Cyrl_RS ─► sr_Cyrl ──► sr ──► root
//! ```
//!
//! Explicit overrides come from supplemental data and always win. Without
//! one, the last subtag is dropped, except that a non-default script jumps
//! straight to `root`: `sr_Latn` must not inherit Cyrillic data from `sr`.

use super::locale_id::LocaleId;
use crate::core::error::DomainError;
use std::collections::{BTreeMap, BTreeSet};

/// Parent relation over locales
///
/// Construction validates the override table, so every chain produced by
/// [`LocaleFallback::chain_from`] is finite and ends at `root`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleFallback {
    explicit_parents: BTreeMap<LocaleId, LocaleId>,
    /// language -> default script (e.g. `sr` -> `Cyrl`)
    default_scripts: BTreeMap<String, String>,
}

impl LocaleFallback {
    /// Build from override data.
    ///
    /// Fails with `LocaleCycle` if following parents from any overridden
    /// locale comes back to a locale already visited. An override for
    /// `root` itself is reported the same way.
    pub fn new(
        explicit_parents: BTreeMap<LocaleId, LocaleId>,
        default_scripts: BTreeMap<String, String>,
    ) -> Result<Self, DomainError> {
        if explicit_parents.contains_key(&LocaleId::root()) {
            return Err(DomainError::LocaleCycle(LocaleId::ROOT.to_string()));
        }

        let default_scripts = default_scripts
            .into_iter()
            .map(|(language, script)| {
                let mut script = script.to_ascii_lowercase();
                if let Some(first) = script.get_mut(..1) {
                    first.make_ascii_uppercase();
                }
                (language.to_ascii_lowercase(), script)
            })
            .collect();

        let fallback = Self {
            explicit_parents,
            default_scripts,
        };
        fallback.check_acyclic()?;
        Ok(fallback)
    }

    /// Structural fallback only, with no overrides and no default scripts
    pub fn structural() -> Self {
        Self::default()
    }

    fn check_acyclic(&self) -> Result<(), DomainError> {
        for start in self.explicit_parents.keys() {
            let mut seen = BTreeSet::new();
            let mut current = start.clone();
            while let Some(parent) = self.parent_of(&current) {
                if !seen.insert(current.clone()) {
                    return Err(DomainError::LocaleCycle(current.to_string()));
                }
                current = parent;
            }
        }
        Ok(())
    }

    /// Immediate parent, or `None` for `root`
    pub fn parent_of(&self, locale: &LocaleId) -> Option<LocaleId> {
        if locale.is_root() {
            return None;
        }
        if let Some(parent) = self.explicit_parents.get(locale) {
            return Some(parent.clone());
        }
        Some(self.structural_parent(locale))
    }

    fn structural_parent(&self, locale: &LocaleId) -> LocaleId {
        let Some((truncated, last)) = locale.as_str().rsplit_once('_') else {
            return LocaleId::root();
        };

        let parts = locale.parts();
        let last_is_script =
            parts.script == Some(last) && parts.region.is_none() && parts.variants.is_empty();
        if last_is_script && self.default_script(parts.language) != Some(last) {
            return LocaleId::root();
        }
        LocaleId::from_canonical(truncated)
    }

    /// Default script registered for a language, if any
    pub fn default_script(&self, language: &str) -> Option<&str> {
        self.default_scripts.get(language).map(String::as_str)
    }

    /// Whether `locale` has an explicit parent override
    pub fn has_explicit_parent(&self, locale: &LocaleId) -> bool {
        self.explicit_parents.contains_key(locale)
    }

    /// `locale` followed by each successive parent, ending with `root`
    pub fn chain_from(&self, locale: &LocaleId) -> Vec<LocaleId> {
        let mut chain = vec![locale.clone()];
        let mut current = locale.clone();
        while let Some(parent) = self.parent_of(&current) {
            chain.push(parent.clone());
            current = parent;
        }
        chain
    }

    /// Parse `locale` and return its chain
    pub fn chain_from_str(&self, locale: &str) -> Result<Vec<LocaleId>, DomainError> {
        Ok(self.chain_from(&LocaleId::parse(locale)?))
    }
}
