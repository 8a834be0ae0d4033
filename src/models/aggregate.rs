//! Derived country/year shapes
//!
//! These are built on demand from the row set and never persisted.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::models::row::rate_per_100k;

/// Which lookup strategy matched the dataset rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchTier {
    /// Exact ISO3 code
    Iso3,
    /// Exact country name
    ExactName,
    /// Case-insensitive substring of the country name, either direction
    PartialName,
}

/// A cause paired with its death count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CausePercentageEntry {
    pub cause: String,
    pub deaths: f64,
}

/// All rows of one country and year reduced to totals and per-cause values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryYearAggregate {
    /// ISO3 code of the matched rows
    pub iso3: String,
    /// Country name of the matched rows
    pub country: String,
    pub year: i32,
    /// Largest `total_deaths` seen across the matched rows
    pub total_deaths: f64,
    /// Largest `population` seen across the matched rows
    pub population: f64,
    /// Deaths per cause, duplicates summed
    pub by_cause: BTreeMap<String, f64>,
    /// Deaths per 100k per cause, duplicates summed
    pub by_cause_per_100k: BTreeMap<String, f64>,
    pub matched_by: MatchTier,
}

impl CountryYearAggregate {
    /// Deaths attributed to a listed cause
    #[must_use]
    pub fn specified_deaths(&self) -> f64 {
        self.by_cause.values().sum()
    }

    /// Deaths not attributed to any listed cause, never negative
    #[must_use]
    pub fn unspecified_deaths(&self) -> f64 {
        (self.total_deaths - self.specified_deaths()).max(0.0)
    }

    /// Total deaths per 100k, or 0 without a population
    #[must_use]
    pub fn total_per_100k(&self) -> f64 {
        if self.population > 0.0 {
            rate_per_100k(self.total_deaths, self.population)
        } else {
            0.0
        }
    }

    #[must_use]
    pub fn specified_per_100k(&self) -> f64 {
        self.by_cause_per_100k.values().sum()
    }

    #[must_use]
    pub fn unspecified_per_100k(&self) -> f64 {
        (self.total_per_100k() - self.specified_per_100k()).max(0.0)
    }

    /// Causes with at least one death, most deaths first
    ///
    /// Equal counts keep cause-name order.
    #[must_use]
    pub fn ranked_causes(&self) -> Vec<CausePercentageEntry> {
        self.by_cause
            .iter()
            .filter(|(_, deaths)| **deaths > 0.0)
            .map(|(cause, deaths)| CausePercentageEntry {
                cause: cause.clone(),
                deaths: *deaths,
            })
            .sorted_by(|a, b| b.deaths.total_cmp(&a.deaths))
            .collect()
    }

    /// Share of all deaths in percent, 0 when no deaths are recorded
    #[must_use]
    pub fn cause_percentage(&self, cause_deaths: f64) -> f64 {
        cause_percentage(cause_deaths, self.total_deaths)
    }
}

/// Share of `total_deaths` in percent, guarding a zero total
#[inline]
#[must_use]
pub fn cause_percentage(cause_deaths: f64, total_deaths: f64) -> f64 {
    if total_deaths > 0.0 {
        cause_deaths / total_deaths * 100.0
    } else {
        0.0
    }
}

/// Position of a country in a yearly ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankResult {
    /// 1 = highest value
    pub rank: usize,
    /// Countries that took part in the ranking
    pub total: usize,
}

/// One row of a full ranking table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCountry {
    pub iso3: String,
    pub rank: usize,
    pub value: f64,
}
