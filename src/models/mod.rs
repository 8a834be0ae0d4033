//! Domain models for the mortality dataset
//!
//! This module contains the raw record shape as it arrives from a dataset
//! file, the canonical normalized row, and the derived shapes produced by the
//! aggregation, ranking and trend modules.

pub mod aggregate;
pub mod raw;
pub mod row;
pub mod selection;
pub mod trend;

// Re-export commonly used types
pub use aggregate::{CausePercentageEntry, CountryYearAggregate, MatchTier, RankResult, RankedCountry};
pub use raw::{RawField, RawRecord};
pub use row::{MortalityRow, rate_per_100k};
pub use selection::{CauseSelection, Metric};
pub use trend::{Phase, PhaseDirection, SeriesPoint, TrendPoint, TrendSeries};
