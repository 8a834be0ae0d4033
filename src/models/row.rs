//! Canonical mortality row
//!
//! A `MortalityRow` is one fact: deaths from one cause in one country and
//! year. `total_deaths` and `population` are repeated across every cause row
//! of the same country/year in the source data.

use serde::{Deserialize, Serialize};

/// Deaths per 100,000 people, with the population floored at one
///
/// # Arguments
/// * `value` - Number of deaths
/// * `population` - Population the deaths are measured against
#[inline]
#[must_use]
pub fn rate_per_100k(value: f64, population: f64) -> f64 {
    value / population.max(1.0) * 100_000.0
}

/// One normalized dataset row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortalityRow {
    /// Country name as spelled in the dataset
    pub country: String,
    /// ISO 3166-1 alpha-3 code
    pub iso3: String,
    pub year: i32,
    /// Cause of death label
    pub cause: String,
    pub deaths_from_cause: f64,
    /// All deaths for the country/year, specified or not
    pub total_deaths: f64,
    pub population: f64,
    /// Derived once at normalization time
    pub deaths_per_100k: f64,
}

impl MortalityRow {
    /// Create a row and derive its per-100k rate
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        iso3: impl Into<String>,
        year: i32,
        cause: impl Into<String>,
        deaths_from_cause: f64,
        total_deaths: f64,
        population: f64,
    ) -> Self {
        Self {
            country: country.into(),
            iso3: iso3.into(),
            year,
            cause: cause.into(),
            deaths_from_cause,
            total_deaths,
            population,
            deaths_per_100k: rate_per_100k(deaths_from_cause, population),
        }
    }
}
