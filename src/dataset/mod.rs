//! Immutable, indexed dataset snapshot
//!
//! A `MortalityDataset` is built once from normalized rows and shared behind
//! an `Arc`. Each snapshot gets a process-unique generation id so caches built
//! over one snapshot can never serve results for another.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::models::{MortalityRow, RawRecord};
use crate::schema::normalize;

static NEXT_GENERATION: AtomicU64 = AtomicU64::new(1);

/// Normalized rows plus lookup indices
#[derive(Debug, Clone)]
pub struct MortalityDataset {
    rows: Arc<[MortalityRow]>,
    by_year: FxHashMap<i32, Vec<usize>>,
    by_iso3: FxHashMap<String, Vec<usize>>,
    causes: Vec<String>,
    year_range: Option<(i32, i32)>,
    generation: u64,
}

impl MortalityDataset {
    /// Build a snapshot from normalized rows
    #[must_use]
    pub fn new(rows: Vec<MortalityRow>) -> Self {
        let mut by_year: FxHashMap<i32, Vec<usize>> = FxHashMap::default();
        let mut by_iso3: FxHashMap<String, Vec<usize>> = FxHashMap::default();

        for (idx, row) in rows.iter().enumerate() {
            by_year.entry(row.year).or_default().push(idx);
            if !row.iso3.is_empty() {
                by_iso3.entry(row.iso3.clone()).or_default().push(idx);
            }
        }

        let causes = rows
            .iter()
            .filter(|r| !r.cause.is_empty())
            .map(|r| r.cause.clone())
            .unique()
            .sorted()
            .collect_vec();

        let year_range = rows
            .iter()
            .map(|r| r.year)
            .minmax()
            .into_option();

        Self {
            rows: rows.into(),
            by_year,
            by_iso3,
            causes,
            year_range,
            generation: NEXT_GENERATION.fetch_add(1, Ordering::Relaxed),
        }
    }

    /// Normalize raw records and build a snapshot
    #[must_use]
    pub fn from_raw(raw: &[RawRecord]) -> Self {
        Self::new(normalize(raw))
    }

    /// Merge several snapshots into a new one, preserving row order
    #[must_use]
    pub fn merge(datasets: impl IntoIterator<Item = Self>) -> Self {
        let rows = datasets
            .into_iter()
            .flat_map(|d| d.rows.iter().cloned().collect_vec())
            .collect_vec();
        Self::new(rows)
    }

    /// All rows in input order
    #[must_use]
    pub fn rows(&self) -> &[MortalityRow] {
        &self.rows
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows of one year, in input order
    pub fn rows_for_year(&self, year: i32) -> impl Iterator<Item = &MortalityRow> + '_ {
        self.indexed(self.by_year.get(&year))
    }

    /// Rows of one ISO3 code, in input order
    pub fn rows_for_iso3<'a>(&'a self, iso3: &str) -> impl Iterator<Item = &'a MortalityRow> + 'a {
        self.indexed(self.by_iso3.get(iso3))
    }

    fn indexed<'a>(
        &'a self,
        indices: Option<&'a Vec<usize>>,
    ) -> impl Iterator<Item = &'a MortalityRow> + 'a {
        indices
            .into_iter()
            .flatten()
            .map(move |&idx| &self.rows[idx])
    }

    /// Sorted unique cause names
    #[must_use]
    pub fn causes(&self) -> &[String] {
        &self.causes
    }

    /// Smallest and largest year, `None` for an empty dataset
    #[must_use]
    pub const fn year_range(&self) -> Option<(i32, i32)> {
        self.year_range
    }

    /// Sorted unique years
    #[must_use]
    pub fn years(&self) -> Vec<i32> {
        self.by_year.keys().copied().sorted().collect()
    }

    /// ISO3 codes present in the dataset, sorted
    #[must_use]
    pub fn iso3_codes(&self) -> Vec<&str> {
        self.by_iso3.keys().map(String::as_str).sorted().collect()
    }

    /// Process-unique id of this snapshot
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

impl Default for MortalityDataset {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<MortalityRow>> for MortalityDataset {
    fn from(rows: Vec<MortalityRow>) -> Self {
        Self::new(rows)
    }
}
