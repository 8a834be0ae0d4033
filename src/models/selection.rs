//! Dashboard selections: which causes to show and in which unit

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unit of a displayed value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Metric {
    /// Raw death counts
    #[default]
    #[serde(rename = "absolute")]
    Absolute,
    /// Deaths per 100,000 people
    #[serde(rename = "relative", alias = "rate", alias = "per100k")]
    Rate,
}

impl Metric {
    /// Human-readable description used by legends and indicators
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Absolute => "absolute deaths",
            Self::Rate => "deaths per 100k",
        }
    }
}

impl From<&str> for Metric {
    fn from(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "relative" | "rate" | "per100k" => Self::Rate,
            _ => Self::Absolute,
        }
    }
}

/// Cause filter of the map and tooltip
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CauseSelection {
    /// Every recorded death
    #[default]
    AllCauses,
    /// Sum of the listed causes
    SpecifiedCauses,
    /// Deaths not covered by a listed cause
    UnspecifiedCauses,
    /// A single cause by name
    Cause(String),
}

impl CauseSelection {
    pub const ALL_CAUSES: &'static str = "all_causes";
    pub const SPECIFIED_CAUSES: &'static str = "specified_causes";
    pub const UNSPECIFIED_CAUSES: &'static str = "unspecified_causes";

    /// Value used in selectors and session state
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::AllCauses => Self::ALL_CAUSES,
            Self::SpecifiedCauses => Self::SPECIFIED_CAUSES,
            Self::UnspecifiedCauses => Self::UNSPECIFIED_CAUSES,
            Self::Cause(name) => name,
        }
    }

    /// Label shown in selectors
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::AllCauses => "All Causes (Total)".to_string(),
            Self::SpecifiedCauses => "All Specified Causes".to_string(),
            Self::UnspecifiedCauses => "Non-Specific Causes".to_string(),
            Self::Cause(name) => name.clone(),
        }
    }

    /// Whether the selection spans several causes
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        !matches!(self, Self::Cause(_))
    }
}

impl From<&str> for CauseSelection {
    fn from(s: &str) -> Self {
        match s {
            Self::ALL_CAUSES | "" => Self::AllCauses,
            Self::SPECIFIED_CAUSES => Self::SpecifiedCauses,
            Self::UNSPECIFIED_CAUSES => Self::UnspecifiedCauses,
            cause => Self::Cause(cause.to_string()),
        }
    }
}

impl From<String> for CauseSelection {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<CauseSelection> for String {
    fn from(selection: CauseSelection) -> Self {
        selection.value().to_string()
    }
}

impl fmt::Display for CauseSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
