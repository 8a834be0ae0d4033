//! Ephemeral dashboard session state
//!
//! The selected year, cause and metric survive a page reload as a small JSON
//! document. Restoring is forgiving: each field that is absent keeps its
//! default, and an unreadable document yields the defaults.

use serde::{Deserialize, Serialize};

use crate::config::YearBounds;
use crate::error::Result;
use crate::models::{CauseSelection, Metric};
use crate::utils::logging::log_warning;

/// Selections of a dashboard session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub year: i32,
    pub cause: CauseSelection,
    pub metric: Metric,
}

/// Stored document, every field optional
#[derive(Debug, Deserialize)]
struct StoredSession {
    year: Option<i32>,
    cause: Option<String>,
    metric: Option<Metric>,
}

impl SessionState {
    /// Default session: the first selectable year, all causes, absolute deaths
    #[must_use]
    pub fn new(bounds: &YearBounds) -> Self {
        Self {
            year: bounds.min,
            cause: CauseSelection::AllCauses,
            metric: Metric::Absolute,
        }
    }

    /// Serialize for storage
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Restore from storage, clamping the year to `bounds`
    ///
    /// Invalid JSON is logged and replaced by the default session.
    #[must_use]
    pub fn from_json(json: &str, bounds: &YearBounds) -> Self {
        let mut state = Self::new(bounds);
        match serde_json::from_str::<StoredSession>(json) {
            Ok(stored) => {
                if let Some(year) = stored.year {
                    state.year = bounds.clamp(year);
                }
                if let Some(cause) = stored.cause.filter(|c| !c.is_empty()) {
                    state.cause = CauseSelection::from(cause);
                }
                if let Some(metric) = stored.metric {
                    state.metric = metric;
                }
            }
            Err(e) => log_warning(&format!("Could not restore session state: {e}"), None),
        }
        state
    }

    /// Change the year, clamped to `bounds`
    pub fn set_year(&mut self, year: i32, bounds: &YearBounds) {
        self.year = bounds.clamp(year);
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(&YearBounds::default())
    }
}
