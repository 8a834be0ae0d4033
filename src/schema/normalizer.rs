//! Dataset normalizer
//!
//! Turns raw records into `MortalityRow`s. The normalizer never rejects a
//! record: malformed fields are coerced to defaults and reported alongside
//! the rows so the caller can decide whether to drop or fail.

use std::fmt;
use std::time::Instant;

use rayon::prelude::*;

use crate::models::{MortalityRow, RawRecord};
use crate::schema::conversions::{CoercionReason, coerce_count, coerce_text, coerce_year};

/// Column of a dataset record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowField {
    Country,
    Iso3,
    Year,
    Cause,
    DeathsFromCause,
    TotalDeaths,
    Population,
}

impl RowField {
    /// Every column, in dataset order
    pub const ALL: [Self; 7] = [
        Self::Country,
        Self::Iso3,
        Self::Year,
        Self::Cause,
        Self::DeathsFromCause,
        Self::TotalDeaths,
        Self::Population,
    ];

    /// Column name used by dataset files
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Iso3 => "ISO3",
            Self::Year => "Year",
            Self::Cause => "CauseOfDeath",
            Self::DeathsFromCause => "DeathsFromCause",
            Self::TotalDeaths => "TotalDeaths",
            Self::Population => "Population",
        }
    }
}

impl fmt::Display for RowField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// A field that had to be coerced during normalization
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("row {index}: {field} {reason} (raw: {raw})")]
pub struct MalformedRowError {
    /// Position of the record in the input
    pub index: usize,
    pub field: RowField,
    /// Raw value as text, empty when missing
    pub raw: String,
    pub reason: CoercionReason,
}

/// Normalized rows plus every coercion that produced them
#[derive(Debug, Clone, Default)]
pub struct NormalizeReport {
    pub rows: Vec<MortalityRow>,
    pub issues: Vec<MalformedRowError>,
}

impl NormalizeReport {
    /// Whether every record was already well formed
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Normalize raw records, coercing malformed fields
#[must_use]
pub fn normalize(raw: &[RawRecord]) -> Vec<MortalityRow> {
    normalize_with_report(raw).rows
}

/// Normalize raw records and report every coercion
///
/// Records are processed in parallel; output order matches input order.
#[must_use]
pub fn normalize_with_report(raw: &[RawRecord]) -> NormalizeReport {
    let start = Instant::now();

    let (rows, issues): (Vec<MortalityRow>, Vec<Vec<MalformedRowError>>) = raw
        .par_iter()
        .enumerate()
        .map(|(index, record)| normalize_record(index, record))
        .unzip();

    let issues: Vec<MalformedRowError> = issues.into_iter().flatten().collect();

    if !issues.is_empty() {
        log::warn!(
            "Coerced {} malformed fields while normalizing {} rows",
            issues.len(),
            rows.len()
        );
    }
    log::debug!("Normalized {} rows in {:?}", rows.len(), start.elapsed());

    NormalizeReport { rows, issues }
}

/// Normalize one record
///
/// # Arguments
/// * `index` - Position of the record, used in issue reports
/// * `record` - The raw record
///
/// # Returns
/// The normalized row and the coercions applied to it
#[must_use]
pub fn normalize_record(index: usize, record: &RawRecord) -> (MortalityRow, Vec<MalformedRowError>) {
    let mut issues = Vec::new();
    let mut note = |field: RowField, reason: Option<CoercionReason>| {
        if let Some(reason) = reason {
            let raw = raw_field(record, field).map(|v| v.as_text()).unwrap_or_default();
            issues.push(MalformedRowError {
                index,
                field,
                raw,
                reason,
            });
        }
    };

    let (country, reason) = coerce_text(record.country.as_ref());
    note(RowField::Country, reason);
    let (iso3, reason) = coerce_text(record.iso3.as_ref());
    note(RowField::Iso3, reason);
    let (year, reason) = coerce_year(record.year.as_ref());
    note(RowField::Year, reason);
    let (cause, reason) = coerce_text(record.cause.as_ref());
    note(RowField::Cause, reason);
    let (deaths, reason) = coerce_count(record.deaths_from_cause.as_ref());
    note(RowField::DeathsFromCause, reason);
    let (total, reason) = coerce_count(record.total_deaths.as_ref());
    note(RowField::TotalDeaths, reason);
    let (population, reason) = coerce_count(record.population.as_ref());
    note(RowField::Population, reason);

    let row = MortalityRow::new(country, iso3, year, cause, deaths, total, population);
    (row, issues)
}

fn raw_field(record: &RawRecord, field: RowField) -> Option<&crate::models::RawField> {
    match field {
        RowField::Country => record.country.as_ref(),
        RowField::Iso3 => record.iso3.as_ref(),
        RowField::Year => record.year.as_ref(),
        RowField::Cause => record.cause.as_ref(),
        RowField::DeathsFromCause => record.deaths_from_cause.as_ref(),
        RowField::TotalDeaths => record.total_deaths.as_ref(),
        RowField::Population => record.population.as_ref(),
    }
}
