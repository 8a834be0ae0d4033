//! Trend narrative for one country series

use crate::algorithm::narrative::NO_TREND_DATA;
use crate::algorithm::phases::detect_phases;
use crate::config::{NarrativeThresholds, PhaseThresholds};
use crate::models::{Phase, TrendPoint};
use crate::utils::format::format_int;

/// Percent change between two values, 0 when the start is 0
#[inline]
#[must_use]
pub fn percent_change(start: f64, end: f64) -> f64 {
    if start == 0.0 {
        0.0
    } else {
        (end - start) / start * 100.0
    }
}

/// Start-to-end figures of a series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverallTrajectory {
    pub first_year: i32,
    pub last_year: i32,
    /// Percent change of total deaths
    pub absolute_change: f64,
    /// Percent change of deaths per 100k
    pub per_capita_change: f64,
    pub peak: f64,
    pub peak_year: i32,
    pub trough: f64,
    pub trough_year: i32,
}

/// Overall trajectory of a non-empty series
#[must_use]
pub fn overall_trajectory(series: &[TrendPoint]) -> Option<OverallTrajectory> {
    let first = series.first()?;
    let last = series.last()?;

    // Earliest year wins on equal values
    let mut peak = first;
    let mut trough = first;
    for point in series {
        if point.total_deaths > peak.total_deaths {
            peak = point;
        }
        if point.total_deaths < trough.total_deaths {
            trough = point;
        }
    }

    Some(OverallTrajectory {
        first_year: first.year,
        last_year: last.year,
        absolute_change: percent_change(first.total_deaths, last.total_deaths),
        per_capita_change: percent_change(first.per_100k, last.per_100k),
        peak: peak.total_deaths,
        peak_year: peak.year,
        trough: trough.total_deaths,
        trough_year: trough.year,
    })
}

/// Explanation when absolute and per-capita trends diverge
#[must_use]
pub fn population_story(
    series: &[TrendPoint],
    thresholds: &NarrativeThresholds,
) -> Option<&'static str> {
    let first = series.first()?;
    let last = series.last()?;

    let absolute_rising = last.total_deaths > first.total_deaths;
    let per_capita_rising = last.per_100k > first.per_100k;
    if absolute_rising == per_capita_rising {
        return None;
    }

    let divergence = (percent_change(first.per_100k, last.per_100k)
        - percent_change(first.total_deaths, last.total_deaths))
    .abs();
    if divergence <= thresholds.population_divergence {
        return None;
    }

    Some(if absolute_rising {
        "population growth has outpaced the increase in deaths"
    } else {
        "a shrinking population has masked worsening health outcomes"
    })
}

/// Adverb for the size of a phase, from its percent magnitude
#[must_use]
pub fn magnitude_qualifier(percent: f64) -> &'static str {
    let percent = percent.abs();
    if percent < 5.0 {
        "slightly"
    } else if percent < 10.0 {
        "moderately"
    } else if percent < 20.0 {
        "significantly"
    } else {
        "sharply"
    }
}

fn change_description(change: f64, thresholds: &NarrativeThresholds) -> String {
    if change.abs() < thresholds.stable_percent {
        "remained relatively stable".to_string()
    } else if change > 0.0 {
        format!("increased by {:.1}%", change.abs())
    } else {
        format!("declined by {:.1}%", change.abs())
    }
}

fn phase_sentence(phase: &Phase) -> String {
    let percent = phase.magnitude * 100.0;
    let verb = phase.direction.verb();
    let qualifier = magnitude_qualifier(percent);
    if phase.start_year == phase.end_year {
        format!("In {}, deaths {verb} {qualifier}.", phase.start_year)
    } else {
        let sign = if percent > 0.0 { "+" } else { "" };
        format!(
            "From {} to {}, deaths {verb} {qualifier} ({sign}{percent:.1}%).",
            phase.start_year, phase.end_year
        )
    }
}

/// Narrative of a country series
///
/// # Arguments
/// * `series` - Yearly points sorted by year
/// * `phase_thresholds` - Thresholds for phase detection
/// * `thresholds` - Thresholds for the wording
#[must_use]
pub fn build_trend_narrative(
    series: &[TrendPoint],
    phase_thresholds: &PhaseThresholds,
    thresholds: &NarrativeThresholds,
) -> String {
    let Some(overall) = overall_trajectory(series) else {
        return NO_TREND_DATA.to_string();
    };
    let phases = detect_phases(series, phase_thresholds);
    compose(series, &overall, &phases, thresholds)
}

fn compose(
    series: &[TrendPoint],
    overall: &OverallTrajectory,
    phases: &[Phase],
    thresholds: &NarrativeThresholds,
) -> String {
    let mut sentences = vec![format!(
        "Between {} and {}, total deaths {}, while the death rate per 100,000 people {}.",
        overall.first_year,
        overall.last_year,
        change_description(overall.absolute_change, thresholds),
        change_description(overall.per_capita_change, thresholds),
    )];

    let major: Vec<&Phase> = phases
        .iter()
        .filter(|p| p.magnitude.abs() > thresholds.major_phase)
        .collect();
    if !major.is_empty() {
        sentences.push("The most significant trends emerged in distinct periods:".to_string());
        sentences.extend(major.into_iter().map(phase_sentence));
    }

    if let Some(story) = population_story(series, thresholds) {
        sentences.push(format!(
            "Notably, {story}, indicating that demographic changes have played a key role."
        ));
    }

    if overall.peak != overall.trough && overall.trough > 0.0 {
        let ratio = overall.peak / overall.trough;
        if ratio > thresholds.peak_trough_ratio {
            sentences.push(format!(
                "The most dramatic swing occurred between {} ({} deaths) and {} ({} deaths), representing a {:.0}% variation.",
                overall.trough_year,
                format_int(overall.trough),
                overall.peak_year,
                format_int(overall.peak),
                (ratio - 1.0) * 100.0
            ));
        }
    }

    sentences.join(" ")
}
