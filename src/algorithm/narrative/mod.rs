//! Human-readable narratives
//!
//! Text is plain: markup is left to the presentation layer.

pub mod summary;
pub mod trend;

pub use summary::{SummaryRanks, build_country_summary, summarize_aggregate};
pub use trend::{
    OverallTrajectory, build_trend_narrative, magnitude_qualifier, overall_trajectory,
    percent_change, population_story,
};

/// Returned when a country has no rows for the selection
pub const NO_DATA: &str = "No data available for this selection.";

/// Returned for an empty country series
pub const NO_TREND_DATA: &str = "No trend data available.";
