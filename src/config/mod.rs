//! Configuration for the mortality engine.
//!
//! Every threshold used by phase detection and narrative wording lives here
//! with the dashboard's observed defaults, so callers can tune them without
//! touching the algorithms.

use std::fmt;

/// Default batch size for Parquet reading
pub const DEFAULT_BATCH_SIZE: usize = 16384;

/// Thresholds of the trend-phase detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseThresholds {
    /// Minimum number of points before any phase is detected
    pub min_points: usize,
    /// Yearly fractional change above which a step counts as up or down
    pub step_change: f64,
    /// Accumulated change a phase needs before a direction change closes it
    pub phase_close: f64,
    /// Years a phase must cover before it can be closed
    pub min_phase_years: i32,
    /// Accumulated change that makes a short trailing phase worth emitting
    pub trailing_change: f64,
    /// Phases weaker than this are kept only when long enough
    pub keep_change: f64,
    /// Years that keep a weak phase
    pub keep_years: i32,
}

impl Default for PhaseThresholds {
    fn default() -> Self {
        Self {
            min_points: 5,
            step_change: 0.03,
            phase_close: 0.1,
            min_phase_years: 4,
            trailing_change: 0.05,
            keep_change: 0.05,
            keep_years: 5,
        }
    }
}

/// Thresholds of the trend narrative wording
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NarrativeThresholds {
    /// Percent change below which a metric "remained relatively stable"
    pub stable_percent: f64,
    /// Phases with a larger fractional magnitude get their own sentence
    pub major_phase: f64,
    /// Percentage points of divergence between absolute and per-capita change
    pub population_divergence: f64,
    /// Peak over trough ratio that earns a swing sentence
    pub peak_trough_ratio: f64,
}

impl Default for NarrativeThresholds {
    fn default() -> Self {
        Self {
            stable_percent: 5.0,
            major_phase: 0.1,
            population_divergence: 15.0,
            peak_trough_ratio: 1.3,
        }
    }
}

/// Ordering of countries that share the same ranking value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Alphabetical ISO3 code
    #[default]
    Iso3Ascending,
    /// First occurrence in the dataset
    InputOrder,
}

/// Rows kept by the substring tier of the country lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PartialMatch {
    /// Only the first matching country, in input order
    #[default]
    FirstCountry,
    /// Every row whose country name matches
    AllCountries,
}

/// Inclusive range of selectable years
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearBounds {
    pub min: i32,
    pub max: i32,
}

impl YearBounds {
    /// Clamp a year into the range
    #[must_use]
    pub fn clamp(self, year: i32) -> i32 {
        year.clamp(self.min, self.max)
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self { min: 1990, max: 2019 }
    }
}

/// Configuration for the `MortalityEngine`
#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub phase: PhaseThresholds,
    pub narrative: NarrativeThresholds,
    pub tie_break: TieBreak,
    pub partial_match: PartialMatch,
    /// Years accepted by session state
    pub year_bounds: YearBounds,
    /// Fail loading when any row needs coercion
    pub strict_rows: bool,
    /// Batch size for Parquet reading, `DEFAULT_BATCH_SIZE` when unset
    pub batch_size: Option<usize>,
}

impl EngineConfig {
    /// Effective Parquet batch size
    #[must_use]
    pub fn batch_size(&self) -> usize {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine Configuration:")?;
        writeln!(
            f,
            "  Phase Step/Close: {}/{}",
            self.phase.step_change, self.phase.phase_close
        )?;
        writeln!(f, "  Phase Minimum Years: {}", self.phase.min_phase_years)?;
        writeln!(f, "  Tie Break: {:?}", self.tie_break)?;
        writeln!(f, "  Partial Match: {:?}", self.partial_match)?;
        writeln!(
            f,
            "  Year Bounds: {}-{}",
            self.year_bounds.min, self.year_bounds.max
        )?;
        writeln!(f, "  Strict Rows: {}", self.strict_rows)?;
        writeln!(f, "  Batch Size: {}", self.batch_size())?;
        Ok(())
    }
}
