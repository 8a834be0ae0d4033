//! Trend-phase detection
//!
//! Splits a yearly series of total deaths into runs that move in one
//! direction. Year-over-year steps are classified with a small dead band;
//! runs are closed when the direction changes after enough accumulated
//! change and enough years.

use crate::config::PhaseThresholds;
use crate::models::{Phase, PhaseDirection, SeriesPoint, TrendPoint};

/// Fractional change from `prev` to `next`, 0 when `prev` is 0
#[inline]
#[must_use]
pub fn fractional_change(prev: f64, next: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (next - prev) / prev
    }
}

/// Direction of a single step
#[must_use]
pub fn classify(change: f64, thresholds: &PhaseThresholds) -> PhaseDirection {
    if change > thresholds.step_change {
        PhaseDirection::Up
    } else if change < -thresholds.step_change {
        PhaseDirection::Down
    } else {
        PhaseDirection::Flat
    }
}

/// Detect phases in a country series, using total deaths
#[must_use]
pub fn detect_phases(series: &[TrendPoint], thresholds: &PhaseThresholds) -> Vec<Phase> {
    let points: Vec<SeriesPoint> = series
        .iter()
        .map(|p| SeriesPoint {
            year: p.year,
            value: p.total_deaths,
        })
        .collect();
    detect_value_phases(&points, thresholds)
}

struct PhaseBuilder<'a> {
    points: &'a [SeriesPoint],
    start: usize,
    direction: PhaseDirection,
    accumulated: f64,
}

impl PhaseBuilder<'_> {
    fn years_to(&self, idx: usize) -> i32 {
        self.points[idx].year - self.points[self.start].year
    }

    fn close(&self, end: usize) -> Phase {
        let first = self.points[self.start];
        let last = self.points[end];
        Phase {
            start_year: first.year,
            end_year: last.year,
            direction: self.direction,
            magnitude: self.accumulated,
            start_value: first.value,
            end_value: last.value,
        }
    }

    fn restart(&mut self, start: usize, direction: PhaseDirection, change: f64) {
        self.start = start;
        self.direction = direction;
        self.accumulated = change;
    }
}

/// Detect phases in any yearly series sorted by year
///
/// # Arguments
/// * `points` - Series sorted by year
/// * `thresholds` - Step, closing and filtering thresholds
///
/// # Returns
/// Phases in chronological order; adjacent phases share their boundary point
#[must_use]
pub fn detect_value_phases(points: &[SeriesPoint], thresholds: &PhaseThresholds) -> Vec<Phase> {
    if points.len() < thresholds.min_points.max(2) {
        return Vec::new();
    }

    let mut phases = Vec::new();
    let first_change = fractional_change(points[0].value, points[1].value);
    let mut builder = PhaseBuilder {
        points,
        start: 0,
        direction: classify(first_change, thresholds),
        accumulated: 0.0,
    };

    for i in 1..points.len() {
        let change = fractional_change(points[i - 1].value, points[i].value);
        let direction = classify(change, thresholds);
        let significant = builder.accumulated.abs() > thresholds.phase_close;

        // A flat stretch that went nowhere takes the direction of the first real move
        if builder.direction == PhaseDirection::Flat
            && direction != PhaseDirection::Flat
            && !significant
        {
            if builder.years_to(i - 1) >= thresholds.min_phase_years {
                phases.push(builder.close(i - 1));
            }
            builder.restart(i - 1, direction, change);
            continue;
        }

        let long_enough = builder.years_to(i) >= thresholds.min_phase_years;
        let reversed = direction != builder.direction && significant && long_enough;
        let flattened = direction == PhaseDirection::Flat
            && builder.direction != PhaseDirection::Flat
            && long_enough;

        if reversed || flattened {
            phases.push(builder.close(i - 1));
            builder.restart(i - 1, direction, change);
        } else {
            builder.accumulated += change;
        }
    }

    let last = points.len() - 1;
    let remaining = points.len() - builder.start;
    if remaining >= usize::try_from(thresholds.min_phase_years).unwrap_or(usize::MAX)
        || builder.accumulated.abs() > thresholds.trailing_change
    {
        phases.push(builder.close(last));
    }

    phases
        .into_iter()
        .filter(|p| p.magnitude.abs() > thresholds.keep_change || p.span_years() >= thresholds.keep_years)
        .collect()
}
