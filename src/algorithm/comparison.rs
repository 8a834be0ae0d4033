//! Trend comparison across causes
//!
//! Builds yearly series for all causes together or for a set of causes over
//! a year range, summarizes their change, and finds the causes that changed
//! the most between two years.

use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::algorithm::narrative::percent_change;
use crate::models::{Metric, MortalityRow, SeriesPoint, TrendSeries};

/// Label of the series that covers every cause
pub const ALL_CAUSES_LABEL: &str = "All Causes";

/// Causes included in a comparison
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CauseFilter {
    /// One combined series
    #[default]
    All,
    /// One series per cause, in the given order
    Causes(Vec<String>),
}

impl CauseFilter {
    /// Filter from a list of causes; an empty list means all causes
    #[must_use]
    pub fn from_causes<I, S>(causes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let causes = causes.into_iter().map(Into::into).unique().collect_vec();
        if causes.is_empty() {
            Self::All
        } else {
            Self::Causes(causes)
        }
    }
}

/// Parameters of a comparison
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendQuery {
    pub start_year: i32,
    pub end_year: i32,
    pub causes: CauseFilter,
    pub metric: Metric,
}

impl TrendQuery {
    /// Create a query; a reversed range is swapped
    #[must_use]
    pub fn new(start_year: i32, end_year: i32, causes: CauseFilter, metric: Metric) -> Self {
        let (start_year, end_year) = if start_year > end_year {
            (end_year, start_year)
        } else {
            (start_year, end_year)
        };
        Self {
            start_year,
            end_year,
            causes,
            metric,
        }
    }

    /// Whether a year falls inside the range
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        year >= self.start_year && year <= self.end_year
    }

    /// Years between start and end
    #[must_use]
    pub const fn span(&self) -> i32 {
        self.end_year - self.start_year
    }
}

#[derive(Default)]
struct YearAccumulator<'a> {
    deaths: f64,
    population: FxHashMap<&'a str, f64>,
}

impl<'a> YearAccumulator<'a> {
    fn add(&mut self, row: &'a MortalityRow) {
        self.deaths += row.deaths_from_cause;
        let key = if row.iso3.is_empty() {
            row.country.as_str()
        } else {
            row.iso3.as_str()
        };
        let population = self.population.entry(key).or_insert(0.0);
        *population = population.max(row.population);
    }

    fn value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Absolute => self.deaths,
            Metric::Rate => {
                let population: f64 = self.population.values().sum();
                if population > 0.0 {
                    self.deaths / population * 100_000.0
                } else {
                    0.0
                }
            }
        }
    }
}

fn build_series<'a>(
    label: &str,
    rows: impl Iterator<Item = &'a MortalityRow>,
    metric: Metric,
) -> Option<TrendSeries> {
    let mut years: BTreeMap<i32, YearAccumulator<'a>> = BTreeMap::new();
    for row in rows {
        years.entry(row.year).or_default().add(row);
    }
    if years.is_empty() {
        return None;
    }
    Some(TrendSeries {
        label: label.to_string(),
        points: years
            .iter()
            .map(|(year, acc)| SeriesPoint {
                year: *year,
                value: acc.value(metric),
            })
            .collect(),
    })
}

/// Series for a query
///
/// Absolute values sum deaths. Rates divide the summed deaths by the summed
/// population of the contributing countries. Causes without rows in the
/// range produce no series.
#[must_use]
pub fn compare_trends(rows: &[MortalityRow], query: &TrendQuery) -> Vec<TrendSeries> {
    let in_range = || rows.iter().filter(|r| query.contains(r.year));
    match &query.causes {
        CauseFilter::All => build_series(ALL_CAUSES_LABEL, in_range(), query.metric)
            .into_iter()
            .collect(),
        CauseFilter::Causes(causes) => causes
            .iter()
            .filter_map(|cause| {
                build_series(cause, in_range().filter(|r| r.cause == *cause), query.metric)
            })
            .collect(),
    }
}

/// Change figures of one series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesChange {
    pub label: String,
    /// Percent change from the first to the last point
    pub change: f64,
}

/// Summary of a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub start_year: i32,
    pub end_year: i32,
    /// Percent change of the combined first and last values
    pub total_change: f64,
    /// `total_change` spread over the years of the range, 0 for a single year
    pub annual_change: f64,
    /// Sum of the last value of every series
    pub end_value: f64,
    pub series: Vec<SeriesChange>,
}

/// Summarize comparison series, `None` when there are none
#[must_use]
pub fn summarize_trends(series: &[TrendSeries], query: &TrendQuery) -> Option<TrendSummary> {
    if series.is_empty() {
        return None;
    }

    let start_value: f64 = series.iter().map(TrendSeries::first_value).sum();
    let end_value: f64 = series.iter().map(TrendSeries::last_value).sum();
    let total_change = percent_change(start_value, end_value);
    let span = query.span();
    let annual_change = if span > 0 {
        total_change / f64::from(span)
    } else {
        0.0
    };

    Some(TrendSummary {
        start_year: query.start_year,
        end_year: query.end_year,
        total_change,
        annual_change,
        end_value,
        series: series
            .iter()
            .map(|s| SeriesChange {
                label: s.label.clone(),
                change: s.percent_change(),
            })
            .collect(),
    })
}

/// Change of one cause between two years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CauseChange {
    pub cause: String,
    /// Percent change
    pub change: f64,
    pub start_deaths: f64,
    pub end_deaths: f64,
}

/// Causes with the largest growth and decline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FastestCauses {
    /// Largest positive change, if any cause grew
    pub growing: Option<CauseChange>,
    /// Most negative change, if any cause declined
    pub declining: Option<CauseChange>,
}

/// Causes that changed the most between two years
///
/// Deaths are summed across countries. A cause takes part only when it has
/// rows in both years and a positive start value.
#[must_use]
pub fn fastest_changing_causes<'a>(
    rows: impl IntoIterator<Item = &'a MortalityRow>,
    start_year: i32,
    end_year: i32,
) -> FastestCauses {
    let mut totals: BTreeMap<&str, (Option<f64>, Option<f64>)> = BTreeMap::new();
    for row in rows {
        let slot = if row.year == start_year {
            0
        } else if row.year == end_year {
            1
        } else {
            continue;
        };
        let entry = totals.entry(row.cause.as_str()).or_default();
        let value = if slot == 0 { &mut entry.0 } else { &mut entry.1 };
        *value = Some(value.unwrap_or(0.0) + row.deaths_from_cause);
    }

    let changes = totals
        .into_iter()
        .filter_map(|(cause, totals)| match totals {
            (Some(start), Some(end)) if start > 0.0 => Some(CauseChange {
                cause: cause.to_string(),
                change: percent_change(start, end),
                start_deaths: start,
                end_deaths: end,
            }),
            _ => None,
        })
        .sorted_by(|a, b| b.change.total_cmp(&a.change))
        .collect_vec();

    FastestCauses {
        growing: changes.first().filter(|c| c.change > 0.0).cloned(),
        declining: changes.last().filter(|c| c.change < 0.0).cloned(),
    }
}
