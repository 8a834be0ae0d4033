//! Global ranking of countries within a year
//!
//! Each country is reduced to one scalar (total deaths or deaths per 100k),
//! countries without a usable scalar are left out, and the rest are ordered
//! from highest to lowest.

use std::cmp::Ordering;

use itertools::Itertools;
use rustc_hash::FxHashMap;

use crate::config::TieBreak;
use crate::models::{Metric, MortalityRow, RankResult, RankedCountry};

#[derive(Debug)]
struct CountryScalar<'a> {
    iso3: &'a str,
    total_deaths: f64,
    population: f64,
    first_seen: usize,
}

impl CountryScalar<'_> {
    fn value(&self, metric: Metric) -> Option<f64> {
        let value = match metric {
            Metric::Absolute => self.total_deaths,
            Metric::Rate if self.population > 0.0 => {
                self.total_deaths / self.population * 100_000.0
            }
            Metric::Rate => return None,
        };
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

/// Full ranking table of a year, best rank first
///
/// # Arguments
/// * `year_rows` - Rows of a single year
/// * `metric` - Absolute deaths or deaths per 100k
/// * `tie_break` - Ordering of countries with equal values
#[must_use]
pub fn rank_table<'a>(
    year_rows: impl IntoIterator<Item = &'a MortalityRow>,
    metric: Metric,
    tie_break: TieBreak,
) -> Vec<RankedCountry> {
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut scalars: Vec<CountryScalar<'a>> = Vec::new();

    for row in year_rows {
        if row.iso3.is_empty() {
            continue;
        }
        let slot = *index.entry(row.iso3.as_str()).or_insert_with(|| {
            scalars.push(CountryScalar {
                iso3: row.iso3.as_str(),
                total_deaths: 0.0,
                population: 0.0,
                first_seen: scalars.len(),
            });
            scalars.len() - 1
        });
        let scalar = &mut scalars[slot];
        scalar.total_deaths = scalar.total_deaths.max(row.total_deaths);
        scalar.population = scalar.population.max(row.population);
    }

    scalars
        .iter()
        .filter_map(|s| s.value(metric).map(|v| (s, v)))
        .sorted_by(|(a, va), (b, vb)| {
            vb.total_cmp(va).then_with(|| tie_order(a, b, tie_break))
        })
        .enumerate()
        .map(|(pos, (s, value))| RankedCountry {
            iso3: s.iso3.to_string(),
            rank: pos + 1,
            value,
        })
        .collect()
}

fn tie_order(a: &CountryScalar<'_>, b: &CountryScalar<'_>, tie_break: TieBreak) -> Ordering {
    match tie_break {
        TieBreak::Iso3Ascending => a.iso3.cmp(b.iso3),
        TieBreak::InputOrder => a.first_seen.cmp(&b.first_seen),
    }
}

/// Rank of one country in a year
///
/// A country without a usable value gets the last rank. Returns `None` when
/// no country in the year can be ranked.
#[must_use]
pub fn rank<'a>(
    year_rows: impl IntoIterator<Item = &'a MortalityRow>,
    iso3: &str,
    metric: Metric,
    tie_break: TieBreak,
) -> Option<RankResult> {
    let table = rank_table(year_rows, metric, tie_break);
    rank_in_table(&table, iso3)
}

/// Look up a country in a table built by `rank_table`
#[must_use]
pub fn rank_in_table(table: &[RankedCountry], iso3: &str) -> Option<RankResult> {
    if table.is_empty() {
        return None;
    }
    let total = table.len();
    let rank = table
        .iter()
        .find(|entry| entry.iso3 == iso3)
        .map_or(total, |entry| entry.rank);
    Some(RankResult { rank, total })
}
