//! Learning-interval lookup for lexical units.
//!
//! This module provides:
//! - `IntervalStore`, the interface to whatever records review history
//! - `CachedIntervals` for memoising lookups across many texts
//! - `resolve_intervals` for filling units before highlighting

use dashmap::DashMap;

use crate::settings::HighlightSettings;
use crate::status::LexicalUnit;

/// Source of the highest learning interval seen for a unit.
///
/// `None` means the unit has never been reviewed and counts as 0.
pub trait IntervalStore {
    fn inflection_interval(&self, lemma: &str, inflection: &str) -> Option<u32>;
    fn lemma_interval(&self, lemma: &str) -> Option<u32>;
}

/// Thread-safe memo in front of an `IntervalStore`.
///
/// Every key reaches the inner store at most once per cache, misses included.
#[derive(Debug, Default)]
pub struct CachedIntervals<S> {
    store: S,
    inflections: DashMap<(String, String), Option<u32>>,
    lemmas: DashMap<String, Option<u32>>,
}

impl<S: IntervalStore> CachedIntervals<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            inflections: DashMap::new(),
            lemmas: DashMap::new(),
        }
    }

    /// Drop all memoised values, e.g. after new reviews were recorded.
    pub fn clear(&self) {
        self.inflections.clear();
        self.lemmas.clear();
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}

impl<S: IntervalStore> IntervalStore for CachedIntervals<S> {
    fn inflection_interval(&self, lemma: &str, inflection: &str) -> Option<u32> {
        let key = (lemma.to_string(), inflection.to_string());
        if let Some(hit) = self.inflections.get(&key) {
            return *hit;
        }
        *self
            .inflections
            .entry(key)
            .or_insert_with(|| self.store.inflection_interval(lemma, inflection))
    }

    fn lemma_interval(&self, lemma: &str) -> Option<u32> {
        if let Some(hit) = self.lemmas.get(lemma) {
            return *hit;
        }
        *self
            .lemmas
            .entry(lemma.to_string())
            .or_insert_with(|| self.store.lemma_interval(lemma))
    }
}

/// Look up the interval `settings` judges by and store it on each unit.
///
/// Only the selected interval is fetched; the other one is left as it was.
pub fn resolve_intervals<S: IntervalStore>(
    store: &S,
    units: &mut [LexicalUnit],
    settings: &HighlightSettings,
) {
    for unit in units.iter_mut() {
        if settings.evaluate_inflection {
            unit.inflection_interval = store
                .inflection_interval(&unit.lemma, &unit.inflection)
                .unwrap_or(0);
        } else {
            unit.lemma_interval = store.lemma_interval(&unit.lemma).unwrap_or(0);
        }
    }
}
