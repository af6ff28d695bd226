//! Resolve Baseline use case
//!
//! Finds the value a data point has before any ballots are counted: the
//! value in the locale itself, or else the first one found walking up the
//! locale's fallback chain. The first value found above the locale itself
//! is the inherited ("bailey") value that inheritance votes stand for.

use crate::ports::locale_data::LocaleDataSource;
use crate::snapshot::SharedFallback;
use std::sync::Arc;
use tracing::trace;
use vetting_domain::{LocaleId, ResolutionContext, Status};

/// Baseline of one data point
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Baseline {
    pub context: ResolutionContext,
    /// Locale the value came from; `None` when nothing in the chain has one
    pub source_locale: Option<LocaleId>,
}

impl Baseline {
    /// Whether the value was inherited rather than defined by the locale itself
    pub fn is_inherited(&self, locale: &LocaleId) -> bool {
        self.source_locale
            .as_ref()
            .is_some_and(|source| source != locale)
    }
}

/// Use case for looking up baselines through locale inheritance
pub struct ResolveBaselineUseCase<D: LocaleDataSource + ?Sized> {
    source: Arc<D>,
    fallback: Arc<SharedFallback>,
}

impl<D: LocaleDataSource + ?Sized> ResolveBaselineUseCase<D> {
    pub fn new(source: Arc<D>, fallback: Arc<SharedFallback>) -> Self {
        Self { source, fallback }
    }

    /// Baseline for `xpath` in `locale`, or `(None, missing)` if no locale
    /// in the chain defines it
    pub fn execute(&self, locale: &LocaleId, xpath: &str) -> Baseline {
        let fallback = self.fallback.snapshot();
        let mut chain = fallback.chain_from(locale).into_iter();
        let own = chain
            .next()
            .and_then(|first| self.source.explicit_value(&first, xpath));
        let inherited = chain.find_map(|candidate| {
            self.source
                .explicit_value(&candidate, xpath)
                .map(|found| (candidate, found))
        });

        match (own, inherited) {
            (Some(found), inherited) => {
                trace!("Baseline for {} {} defined locally", locale, xpath);
                let bailey = inherited.map(|(_, value)| value.value);
                Baseline {
                    context: ResolutionContext::new(Some(found.value), found.status)
                        .with_bailey_value(bailey),
                    source_locale: Some(locale.clone()),
                }
            }
            (None, Some((candidate, found))) => {
                trace!("Baseline for {} {} found in {}", locale, xpath, candidate);
                Baseline {
                    context: ResolutionContext::new(Some(found.value.clone()), found.status)
                        .with_bailey_value(Some(found.value)),
                    source_locale: Some(candidate),
                }
            }
            (None, None) => {
                trace!("No baseline for {} {}", locale, xpath);
                Baseline {
                    context: ResolutionContext::new(None, Status::Missing),
                    source_locale: None,
                }
            }
        }
    }
}
