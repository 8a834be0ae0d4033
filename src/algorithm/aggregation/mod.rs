//! Country/year aggregation
//!
//! Reduces the rows of one country and year to a `CountryYearAggregate`:
//! deaths and per-100k values summed per cause, totals and population taken
//! as the maximum over the matched rows.

pub mod cache;
pub mod matching;

use std::collections::BTreeMap;

pub use cache::AggregateCache;
pub use matching::{match_country, match_country_with, partial_match};

use crate::config::PartialMatch;
use crate::models::{CountryYearAggregate, MatchTier, MortalityRow};

/// Aggregate one country and year from the full row set
///
/// # Arguments
/// * `rows` - All dataset rows
/// * `iso3` - ISO3 code of the country
/// * `name` - Country name for the fallback tiers
/// * `year` - Year to aggregate
#[must_use]
pub fn aggregate(
    rows: &[MortalityRow],
    iso3: &str,
    name: Option<&str>,
    year: i32,
) -> Option<CountryYearAggregate> {
    let year_rows: Vec<&MortalityRow> = rows.iter().filter(|r| r.year == year).collect();
    aggregate_year_rows(&year_rows, iso3, name, year)
}

/// Aggregate one country from rows already restricted to `year`
#[must_use]
pub fn aggregate_year_rows(
    year_rows: &[&MortalityRow],
    iso3: &str,
    name: Option<&str>,
    year: i32,
) -> Option<CountryYearAggregate> {
    aggregate_year_rows_with(year_rows, iso3, name, year, PartialMatch::FirstCountry)
}

/// `aggregate_year_rows` with an explicit policy for the substring tier
#[must_use]
pub fn aggregate_year_rows_with(
    year_rows: &[&MortalityRow],
    iso3: &str,
    name: Option<&str>,
    year: i32,
    partial: PartialMatch,
) -> Option<CountryYearAggregate> {
    let (tier, matched) = match_country_with(year_rows, iso3, name, partial)?;
    reduce(&matched, year, tier)
}

/// Reduce matched rows to an aggregate, `None` for an empty slice
///
/// Rows with an empty cause still contribute to the totals.
#[must_use]
pub fn reduce(rows: &[&MortalityRow], year: i32, tier: MatchTier) -> Option<CountryYearAggregate> {
    let first = rows.first()?;

    let mut by_cause: BTreeMap<String, f64> = BTreeMap::new();
    let mut by_cause_per_100k: BTreeMap<String, f64> = BTreeMap::new();
    let mut total_deaths = 0.0_f64;
    let mut population = 0.0_f64;

    for row in rows {
        total_deaths = total_deaths.max(row.total_deaths);
        population = population.max(row.population);
        if row.cause.is_empty() {
            continue;
        }
        *by_cause.entry(row.cause.clone()).or_default() += row.deaths_from_cause;
        *by_cause_per_100k.entry(row.cause.clone()).or_default() += row.deaths_per_100k;
    }

    Some(CountryYearAggregate {
        iso3: first.iso3.clone(),
        country: first.country.clone(),
        year,
        total_deaths,
        population,
        by_cause,
        by_cause_per_100k,
        matched_by: tier,
    })
}
