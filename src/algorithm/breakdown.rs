//! Country series and cause breakdown for the country panel

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{CountryYearAggregate, MortalityRow, TrendPoint};

/// Yearly totals of one country, sorted by year
///
/// Per year the largest `total_deaths` and `population` seen are used.
#[must_use]
pub fn country_series<'a>(rows: impl IntoIterator<Item = &'a MortalityRow>) -> Vec<TrendPoint> {
    let mut years: BTreeMap<i32, (f64, f64)> = BTreeMap::new();
    for row in rows {
        let entry = years.entry(row.year).or_insert((0.0, 0.0));
        entry.0 = entry.0.max(row.total_deaths);
        entry.1 = entry.1.max(row.population);
    }
    years
        .into_iter()
        .map(|(year, (total, population))| TrendPoint::new(year, total, population))
        .collect()
}

/// One bar of the cause chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseShare {
    pub cause: String,
    pub deaths: f64,
    /// Percent of all deaths of the country/year
    pub percent: f64,
}

/// Causes of one country/year ordered by deaths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseBreakdown {
    /// Causes with at least one death, most deaths first
    pub shares: Vec<CauseShare>,
    /// Index of the share where the running total first reaches half of all
    /// listed deaths; shares up to it are the top contributors
    pub top_contributors_end: Option<usize>,
    /// Causes recorded with zero deaths, by name
    pub zero_causes: Vec<String>,
}

impl CauseBreakdown {
    /// Shares up to and including the cutoff
    #[must_use]
    pub fn top_contributors(&self) -> &[CauseShare] {
        match self.top_contributors_end {
            Some(end) => &self.shares[..=end],
            None => &[],
        }
    }
}

/// Break an aggregate down by cause
#[must_use]
pub fn cause_breakdown(agg: &CountryYearAggregate) -> CauseBreakdown {
    let shares: Vec<CauseShare> = agg
        .ranked_causes()
        .into_iter()
        .map(|entry| CauseShare {
            percent: agg.cause_percentage(entry.deaths),
            cause: entry.cause,
            deaths: entry.deaths,
        })
        .collect();

    let listed: f64 = shares.iter().map(|s| s.deaths).sum();
    let mut running = 0.0;
    let top_contributors_end = if listed > 0.0 {
        shares.iter().position(|s| {
            running += s.deaths;
            running >= listed * 0.5
        })
    } else {
        None
    };

    let zero_causes = agg
        .by_cause
        .iter()
        .filter(|(_, deaths)| **deaths <= 0.0)
        .map(|(cause, _)| cause.clone())
        .collect();

    CauseBreakdown {
        shares,
        top_contributors_end,
        zero_causes,
    }
}
