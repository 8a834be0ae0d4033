//! Per-country values for the world map
//!
//! A cause selection and a metric pick one number per country for a year.
//! Countries are keyed by ISO3; rows without a code never reach the map.

use std::collections::BTreeMap;

use itertools::Itertools;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::algorithm::aggregation::reduce;
use crate::models::{CauseSelection, CountryYearAggregate, MatchTier, Metric, MortalityRow};

/// Value of an aggregate under a selection and metric
///
/// Every branch is finite and non-negative for normalized input.
#[must_use]
pub fn selection_value(agg: &CountryYearAggregate, selection: &CauseSelection, metric: Metric) -> f64 {
    match (selection, metric) {
        (CauseSelection::AllCauses, Metric::Absolute) => agg.total_deaths,
        (CauseSelection::AllCauses, Metric::Rate) => agg.total_per_100k(),
        (CauseSelection::SpecifiedCauses, Metric::Absolute) => agg.specified_deaths(),
        (CauseSelection::SpecifiedCauses, Metric::Rate) => agg.specified_per_100k(),
        (CauseSelection::UnspecifiedCauses, Metric::Absolute) => agg.unspecified_deaths(),
        (CauseSelection::UnspecifiedCauses, Metric::Rate) => agg.unspecified_per_100k(),
        (CauseSelection::Cause(cause), Metric::Absolute) => {
            agg.by_cause.get(cause).copied().unwrap_or(0.0)
        }
        (CauseSelection::Cause(cause), Metric::Rate) => {
            agg.by_cause_per_100k.get(cause).copied().unwrap_or(0.0)
        }
    }
}

/// Label shown next to a selected value
#[must_use]
pub fn selection_label(selection: &CauseSelection) -> String {
    match selection {
        CauseSelection::AllCauses => "All causes (total)".to_string(),
        CauseSelection::SpecifiedCauses => "All specified causes".to_string(),
        CauseSelection::UnspecifiedCauses => "Non-specific causes".to_string(),
        CauseSelection::Cause(cause) => format!("Cause: {cause}"),
    }
}

/// Map values of one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapValues {
    pub year: i32,
    /// Value per ISO3 code
    pub values: BTreeMap<String, f64>,
    /// Upper end of the colour scale, 1 when no value is positive
    pub scale_max: f64,
}

impl MapValues {
    /// Countries with a positive value
    #[must_use]
    pub fn data_count(&self) -> usize {
        self.values.values().filter(|v| **v > 0.0).count()
    }

    /// Value of one country, 0 when absent
    #[must_use]
    pub fn value(&self, iso3: &str) -> f64 {
        self.values.get(iso3).copied().unwrap_or(0.0)
    }
}

/// Aggregates of every country in a year, keyed by ISO3
#[must_use]
pub fn year_aggregates<'a>(
    year_rows: impl IntoIterator<Item = &'a MortalityRow>,
    year: i32,
) -> BTreeMap<String, CountryYearAggregate> {
    let grouped = year_rows
        .into_iter()
        .filter(|r| !r.iso3.is_empty())
        .into_group_map_by(|r| r.iso3.as_str());

    grouped
        .into_iter()
        .filter_map(|(iso3, rows)| {
            reduce(&rows, year, MatchTier::Iso3).map(|agg| (iso3.to_string(), agg))
        })
        .collect()
}

/// Value of every country in a year
///
/// # Arguments
/// * `year_rows` - Rows of a single year
/// * `year` - The year, recorded in the result
/// * `selection` - Causes to show
/// * `metric` - Absolute deaths or deaths per 100k
#[must_use]
pub fn map_values<'a>(
    year_rows: impl IntoIterator<Item = &'a MortalityRow>,
    year: i32,
    selection: &CauseSelection,
    metric: Metric,
) -> MapValues {
    let values: BTreeMap<String, f64> = year_aggregates(year_rows, year)
        .into_iter()
        .map(|(iso3, agg)| {
            let value = selection_value(&agg, selection, metric);
            (iso3, value)
        })
        .collect();

    let max = values
        .values()
        .copied()
        .filter(|v| v.is_finite())
        .fold(0.0_f64, f64::max);

    MapValues {
        year,
        values,
        scale_max: if max > 0.0 { max } else { 1.0 },
    }
}

/// Number of countries with data for a selection
///
/// Aggregate selections count every country with rows; a single cause only
/// counts countries where it caused at least one death.
#[must_use]
pub fn countries_with_data<'a>(
    year_rows: impl IntoIterator<Item = &'a MortalityRow>,
    selection: &CauseSelection,
) -> usize {
    let countries: FxHashSet<&str> = match selection {
        CauseSelection::Cause(cause) => year_rows
            .into_iter()
            .filter(|r| r.cause == *cause && r.deaths_from_cause > 0.0)
            .filter(|r| !r.iso3.is_empty())
            .map(|r| r.iso3.as_str())
            .collect(),
        _ => year_rows
            .into_iter()
            .filter(|r| !r.iso3.is_empty())
            .map(|r| r.iso3.as_str())
            .collect(),
    };
    countries.len()
}

/// Entry of the cause selector
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CauseOption {
    pub value: String,
    pub label: String,
}

impl From<&CauseSelection> for CauseOption {
    fn from(selection: &CauseSelection) -> Self {
        Self {
            value: selection.value().to_string(),
            label: selection.label(),
        }
    }
}

/// Selector entries: the three aggregate options, then each cause
#[must_use]
pub fn cause_options(causes: &[String]) -> Vec<CauseOption> {
    [
        CauseSelection::AllCauses,
        CauseSelection::SpecifiedCauses,
        CauseSelection::UnspecifiedCauses,
    ]
    .iter()
    .map(CauseOption::from)
    .chain(causes.iter().sorted().dedup().map(|cause| CauseOption {
        value: cause.clone(),
        label: cause.clone(),
    }))
    .collect()
}
