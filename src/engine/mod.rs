//! Engine context for the mortality dashboard
//!
//! This module provides a high-level interface over one dataset snapshot:
//! every dashboard query is a method, and country/year aggregates are
//! memoized across queries.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::algorithm::aggregation::{AggregateCache, aggregate_year_rows, aggregate_year_rows_with};
use crate::algorithm::breakdown::{CauseBreakdown, cause_breakdown, country_series};
use crate::algorithm::choropleth::{self, CauseOption, MapValues};
use crate::algorithm::comparison::{self, FastestCauses, TrendQuery, TrendSummary};
use crate::algorithm::narrative::{NO_DATA, SummaryRanks, build_trend_narrative, summarize_aggregate};
use crate::algorithm::phases::detect_phases;
use crate::algorithm::ranking;
use crate::async_io::{load_dataset_async, load_datasets_async};
use crate::config::EngineConfig;
use crate::dataset::MortalityDataset;
use crate::error::Result;
use crate::models::{
    CauseSelection, CountryYearAggregate, Metric, MortalityRow, Phase, RankResult, RankedCountry,
    TrendPoint, TrendSeries,
};
use crate::reader::load_dataset;
use crate::session::SessionState;

/// Query engine over a dataset snapshot
///
/// The snapshot is swapped as a whole by `replace_dataset`; queries always
/// see either the old or the new snapshot, never a mix.
#[derive(Debug)]
pub struct MortalityEngine {
    /// Current snapshot
    dataset: RwLock<Arc<MortalityDataset>>,

    /// Thresholds and loading options
    config: EngineConfig,

    /// Aggregates of the current snapshot
    cache: AggregateCache,
}

impl MortalityEngine {
    /// Create an engine over a dataset
    #[must_use]
    pub fn new(dataset: MortalityDataset, config: EngineConfig) -> Self {
        let cache = AggregateCache::new(dataset.generation());
        Self {
            dataset: RwLock::new(Arc::new(dataset)),
            config,
            cache,
        }
    }

    /// Load a dataset file and create an engine over it
    pub fn from_path(path: &Path, config: EngineConfig) -> Result<Self> {
        let dataset = load_dataset(path, &config)?;
        Ok(Self::new(dataset, config))
    }

    /// Load a dataset file on the blocking pool and create an engine over it
    pub async fn from_path_async(path: &Path, config: EngineConfig) -> Result<Self> {
        let dataset = load_dataset_async(path, &config).await?;
        Ok(Self::new(dataset, config))
    }

    /// Load and merge several dataset files and create an engine over them
    pub async fn from_paths_async(paths: &[PathBuf], config: EngineConfig) -> Result<Self> {
        let dataset = load_datasets_async(paths, &config).await?;
        Ok(Self::new(dataset, config))
    }

    /// Current dataset snapshot
    #[must_use]
    pub fn dataset(&self) -> Arc<MortalityDataset> {
        Arc::clone(&self.dataset.read().unwrap_or_else(PoisonError::into_inner))
    }

    #[must_use]
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Swap in a new snapshot and drop every cached aggregate
    pub fn replace_dataset(&self, dataset: MortalityDataset) {
        let generation = dataset.generation();
        let mut current = self.dataset.write().unwrap_or_else(PoisonError::into_inner);
        *current = Arc::new(dataset);
        self.cache.reset(generation);
        log::info!(
            "Replaced dataset with {} rows (generation {generation})",
            current.len()
        );
    }

    /// Reload the dataset from a file, keeping the old one on failure
    pub async fn reload_async(&self, path: &Path) -> Result<()> {
        let dataset = load_dataset_async(path, &self.config).await?;
        self.replace_dataset(dataset);
        Ok(())
    }

    /// Number of memoized aggregates
    #[must_use]
    pub fn cached_aggregates(&self) -> usize {
        self.cache.len()
    }

    /// Aggregate of one country and year
    ///
    /// Only the ISO3 lookup is memoized. The name tiers run on every call
    /// that misses by code, so the result never depends on earlier queries.
    ///
    /// # Arguments
    /// * `iso3` - ISO3 code of the country
    /// * `name` - Country name for the name-based fallback tiers
    /// * `year` - Year to aggregate
    ///
    /// # Returns
    /// * `Option<Arc<CountryYearAggregate>>` - `None` when no rows match
    #[must_use]
    pub fn aggregate(
        &self,
        iso3: &str,
        name: Option<&str>,
        year: i32,
    ) -> Option<Arc<CountryYearAggregate>> {
        let dataset = self.dataset();
        let year_rows = || dataset.rows_for_year(year).collect::<Vec<&MortalityRow>>();

        if !iso3.is_empty() {
            let by_code = self.cache.get_or_compute(dataset.generation(), iso3, year, || {
                aggregate_year_rows(&year_rows(), iso3, None, year)
            });
            if by_code.is_some() {
                return by_code;
            }
        }

        let name = name.filter(|n| !n.trim().is_empty())?;
        aggregate_year_rows_with(&year_rows(), iso3, Some(name), year, self.config.partial_match)
            .map(Arc::new)
    }

    /// Rank of a country among every country of a year
    #[must_use]
    pub fn rank(&self, iso3: &str, year: i32, metric: Metric) -> Option<RankResult> {
        let dataset = self.dataset();
        ranking::rank(
            dataset.rows_for_year(year),
            iso3,
            metric,
            self.config.tie_break,
        )
    }

    /// Full ranking table of a year
    #[must_use]
    pub fn rank_table(&self, year: i32, metric: Metric) -> Vec<RankedCountry> {
        let dataset = self.dataset();
        ranking::rank_table(dataset.rows_for_year(year), metric, self.config.tie_break)
    }

    /// Summary text of a country and year
    ///
    /// Uses `name` when given, otherwise the country name of the matched rows.
    #[must_use]
    pub fn country_summary(&self, iso3: &str, name: Option<&str>, year: i32) -> String {
        let Some(agg) = self.aggregate(iso3, name, year) else {
            return NO_DATA.to_string();
        };

        let dataset = self.dataset();
        let year_rows: Vec<&MortalityRow> = dataset.rows_for_year(year).collect();
        let ranks = SummaryRanks::for_country(&year_rows, &agg.iso3, self.config.tie_break);

        let display_name = name.filter(|n| !n.is_empty()).unwrap_or(&agg.country);
        summarize_aggregate(display_name, &agg, ranks)
    }

    /// Yearly totals of a country
    #[must_use]
    pub fn country_series(&self, iso3: &str) -> Vec<TrendPoint> {
        let dataset = self.dataset();
        country_series(dataset.rows_for_iso3(iso3))
    }

    /// Phases of a country's total deaths
    #[must_use]
    pub fn country_phases(&self, iso3: &str) -> Vec<Phase> {
        detect_phases(&self.country_series(iso3), &self.config.phase)
    }

    /// Trend narrative of a country
    #[must_use]
    pub fn trend_narrative(&self, iso3: &str) -> String {
        build_trend_narrative(
            &self.country_series(iso3),
            &self.config.phase,
            &self.config.narrative,
        )
    }

    /// Cause breakdown of a country and year
    #[must_use]
    pub fn cause_breakdown(&self, iso3: &str, name: Option<&str>, year: i32) -> Option<CauseBreakdown> {
        self.aggregate(iso3, name, year)
            .map(|agg| cause_breakdown(&agg))
    }

    /// Map values of every country in a year
    #[must_use]
    pub fn map_values(&self, year: i32, selection: &CauseSelection, metric: Metric) -> MapValues {
        let dataset = self.dataset();
        choropleth::map_values(dataset.rows_for_year(year), year, selection, metric)
    }

    /// Number of countries with data for a selection
    #[must_use]
    pub fn countries_with_data(&self, year: i32, selection: &CauseSelection) -> usize {
        let dataset = self.dataset();
        choropleth::countries_with_data(dataset.rows_for_year(year), selection)
    }

    /// Series of a trend comparison
    #[must_use]
    pub fn compare_trends(&self, query: &TrendQuery) -> Vec<TrendSeries> {
        comparison::compare_trends(self.dataset().rows(), query)
    }

    /// Series and summary of a trend comparison
    #[must_use]
    pub fn trend_summary(&self, query: &TrendQuery) -> Option<TrendSummary> {
        comparison::summarize_trends(&self.compare_trends(query), query)
    }

    /// Causes with the largest growth and decline between two years
    #[must_use]
    pub fn fastest_changing_causes(&self, start_year: i32, end_year: i32) -> FastestCauses {
        comparison::fastest_changing_causes(self.dataset().rows(), start_year, end_year)
    }

    /// Sorted unique cause names
    #[must_use]
    pub fn available_causes(&self) -> Vec<String> {
        self.dataset().causes().to_vec()
    }

    /// Entries of the cause selector
    #[must_use]
    pub fn cause_options(&self) -> Vec<CauseOption> {
        choropleth::cause_options(self.dataset().causes())
    }

    /// Smallest and largest year of the dataset
    #[must_use]
    pub fn year_range(&self) -> Option<(i32, i32)> {
        self.dataset().year_range()
    }

    /// Restore a session from JSON, clamped to the configured years
    #[must_use]
    pub fn restore_session(&self, json: &str) -> SessionState {
        SessionState::from_json(json, &self.config.year_bounds)
    }
}

impl From<MortalityDataset> for MortalityEngine {
    fn from(dataset: MortalityDataset) -> Self {
        Self::new(dataset, EngineConfig::default())
    }
}
