//! Raw dataset records
//!
//! Dataset files carry the seven dashboard columns with either string or
//! numeric values (`"1990"` and `1990` are both common). A `RawRecord` keeps
//! them untyped; the normalizer is the only place that interprets them.

use serde::{Deserialize, Serialize};

/// A single untyped field value from a dataset file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    /// Numeric JSON value or numeric Arrow column
    Number(f64),
    /// Text value, possibly holding a number
    Text(String),
    /// Boolean value (never a valid number or name)
    Flag(bool),
}

impl RawField {
    /// Text form of the field, as used for names and codes
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            Self::Number(n) if n.fract() == 0.0 && n.is_finite() => format!("{n:.0}"),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.trim().to_string(),
            Self::Flag(b) => b.to_string(),
        }
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for RawField {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

/// One record of the source dataset, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "Country", default)]
    pub country: Option<RawField>,
    #[serde(rename = "ISO3", default)]
    pub iso3: Option<RawField>,
    #[serde(rename = "Year", default)]
    pub year: Option<RawField>,
    #[serde(rename = "CauseOfDeath", default)]
    pub cause: Option<RawField>,
    #[serde(rename = "DeathsFromCause", default)]
    pub deaths_from_cause: Option<RawField>,
    #[serde(rename = "TotalDeaths", default)]
    pub total_deaths: Option<RawField>,
    #[serde(rename = "Population", default)]
    pub population: Option<RawField>,
}

impl RawRecord {
    /// Build a fully populated record
    #[must_use]
    pub fn new(
        country: impl Into<RawField>,
        iso3: impl Into<RawField>,
        year: impl Into<RawField>,
        cause: impl Into<RawField>,
        deaths_from_cause: impl Into<RawField>,
        total_deaths: impl Into<RawField>,
        population: impl Into<RawField>,
    ) -> Self {
        Self {
            country: Some(country.into()),
            iso3: Some(iso3.into()),
            year: Some(year.into()),
            cause: Some(cause.into()),
            deaths_from_cause: Some(deaths_from_cause.into()),
            total_deaths: Some(total_deaths.into()),
            population: Some(population.into()),
        }
    }
}
