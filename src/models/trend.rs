//! Yearly series and the phases detected in them

use std::fmt;

use serde::{Deserialize, Serialize};

/// One year of a country's totals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub total_deaths: f64,
    pub population: f64,
    /// Deaths per 100k, 0 when the population is unknown
    pub per_100k: f64,
}

impl TrendPoint {
    #[must_use]
    pub fn new(year: i32, total_deaths: f64, population: f64) -> Self {
        let per_100k = if population > 0.0 {
            total_deaths / population * 100_000.0
        } else {
            0.0
        };
        Self {
            year,
            total_deaths,
            population,
            per_100k,
        }
    }
}

/// Direction of a year-over-year step or of a whole phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseDirection {
    Up,
    Down,
    Flat,
}

impl PhaseDirection {
    /// Verb used in narratives
    #[must_use]
    pub const fn verb(self) -> &'static str {
        match self {
            Self::Up => "rose",
            Self::Down => "fell",
            Self::Flat => "stabilized",
        }
    }
}

impl fmt::Display for PhaseDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Flat => "flat",
        };
        f.write_str(s)
    }
}

/// A run of years moving in one direction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phase {
    pub start_year: i32,
    pub end_year: i32,
    pub direction: PhaseDirection,
    /// Sum of the yearly fractional changes inside the phase
    pub magnitude: f64,
    pub start_value: f64,
    pub end_value: f64,
}

impl Phase {
    /// Number of years between the first and last point
    #[must_use]
    pub const fn span_years(&self) -> i32 {
        self.end_year - self.start_year
    }
}

/// A `(year, value)` pair of a comparison series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub year: i32,
    pub value: f64,
}

/// A labelled series of yearly values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    /// Cause name, or "All Causes"
    pub label: String,
    /// Sorted by year
    pub points: Vec<SeriesPoint>,
}

impl TrendSeries {
    /// Percent change from the first to the last point, 0 when the first is 0
    #[must_use]
    pub fn percent_change(&self) -> f64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if first.value > 0.0 => {
                (last.value - first.value) / first.value * 100.0
            }
            _ => 0.0,
        }
    }

    #[must_use]
    pub fn first_value(&self) -> f64 {
        self.points.first().map_or(0.0, |p| p.value)
    }

    #[must_use]
    pub fn last_value(&self) -> f64 {
        self.points.last().map_or(0.0, |p| p.value)
    }
}
