//! Memoization of country/year aggregates
//!
//! Entries are keyed by `(iso3, year)` and tagged with the generation of the
//! dataset snapshot they were computed from. A lookup with a different
//! generation is a miss, and `reset` drops every entry at once.

use std::sync::{Arc, PoisonError, RwLock};

use rustc_hash::FxHashMap;

use crate::models::CountryYearAggregate;

type Entry = Option<Arc<CountryYearAggregate>>;

#[derive(Debug, Default)]
struct CacheState {
    generation: u64,
    entries: FxHashMap<(String, i32), Entry>,
}

/// Thread-safe aggregate cache
#[derive(Debug, Default)]
pub struct AggregateCache {
    state: RwLock<CacheState>,
}

impl AggregateCache {
    /// Create an empty cache bound to a dataset generation
    #[must_use]
    pub fn new(generation: u64) -> Self {
        Self {
            state: RwLock::new(CacheState {
                generation,
                entries: FxHashMap::default(),
            }),
        }
    }

    /// Cached result for a key, `None` on a miss
    ///
    /// A hit may itself be `Some(None)`: the lookup was done before and found
    /// no rows.
    #[must_use]
    pub fn get(&self, generation: u64, iso3: &str, year: i32) -> Option<Entry> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        if state.generation != generation {
            return None;
        }
        state.entries.get(&(iso3.to_string(), year)).cloned()
    }

    /// Store a result; ignored when the cache has moved to another generation
    pub fn insert(&self, generation: u64, iso3: &str, year: i32, entry: Entry) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation == generation {
            state.entries.insert((iso3.to_string(), year), entry);
        }
    }

    /// Return the cached result or compute and store it
    pub fn get_or_compute(
        &self,
        generation: u64,
        iso3: &str,
        year: i32,
        compute: impl FnOnce() -> Option<CountryYearAggregate>,
    ) -> Entry {
        if let Some(hit) = self.get(generation, iso3, year) {
            log::debug!("Aggregate cache hit for {iso3}/{year}");
            return hit;
        }
        log::debug!("Aggregate cache miss for {iso3}/{year}");
        let entry = compute().map(Arc::new);
        self.insert(generation, iso3, year, entry.clone());
        entry
    }

    /// Drop every entry and bind the cache to a new generation
    pub fn reset(&self, generation: u64) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.entries.clear();
        state.generation = generation;
    }

    /// Number of cached keys
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .entries
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
