use crate::utils::{heart_and_cancer_rows, series_rows};
use mortality_atlas::algorithm::breakdown::country_series;
use mortality_atlas::algorithm::narrative::SummaryRanks;
use mortality_atlas::{
    MortalityRow, NO_DATA, NO_TREND_DATA, NarrativeThresholds, PhaseDirection, PhaseThresholds,
    RankResult, TrendPoint, build_country_summary, build_trend_narrative, detect_phases,
};

fn points(values: &[(i32, f64)]) -> Vec<TrendPoint> {
    values
        .iter()
        .map(|&(year, total)| TrendPoint::new(year, total, 1_000_000.0))
        .collect()
}

/// Test the no-data sentinel
#[test]
fn test_empty_summary_is_sentinel() {
    let rows: Vec<&MortalityRow> = Vec::new();
    assert_eq!(
        build_country_summary("Nowhere", 2000, &rows, SummaryRanks::default()),
        NO_DATA
    );
}

/// Test the full summary text of a country
#[test]
fn test_country_summary_text() {
    let rows = heart_and_cancer_rows();
    let refs: Vec<&MortalityRow> = rows.iter().collect();
    let ranks = SummaryRanks {
        absolute: Some(RankResult { rank: 4, total: 10 }),
        rate: None,
    };
    let summary = build_country_summary("United States", 2000, &refs, ranks);

    assert_eq!(
        summary,
        "In United States, 500 deaths were recorded in 2000, corresponding to 50.0 deaths per 100,000 people among its 1,000,000 inhabitants. \
         Globally, this corresponds to rank 4 in total deaths, out of 10 countries with recorded data. \
         Heart was the leading cause at 20.00% contribution, responsible for 100 deaths. \
         The second leading cause was Cancer at 16.00% contribution, with 80 deaths. \
         At the other end of the spectrum, Cancer accounted for the fewest deaths, 80."
    );
}

/// Test phase detection on the documented example series
#[test]
fn test_example_series_has_one_rising_phase() {
    let series = points(&[(2000, 100.0), (2001, 100.0), (2002, 150.0), (2003, 200.0), (2004, 205.0)]);
    let phases = detect_phases(&series, &PhaseThresholds::default());

    assert_eq!(phases.len(), 1);
    assert_eq!(phases[0].direction, PhaseDirection::Up);
    assert_eq!((phases[0].start_year, phases[0].end_year), (2001, 2004));
    assert!(phases[0].magnitude > 0.1);
}

/// Test that short series never produce phases
#[test]
fn test_short_series_has_no_phases() {
    let series = points(&[(2000, 100.0), (2001, 200.0), (2002, 400.0), (2003, 800.0)]);
    assert!(detect_phases(&series, &PhaseThresholds::default()).is_empty());
}

/// Test the trend narrative built from dataset rows
#[test]
fn test_trend_narrative_from_rows() {
    let rows = series_rows(
        "NGA",
        "Nigeria",
        &[
            (2000, 100.0, 1_000_000.0),
            (2001, 100.0, 1_000_000.0),
            (2002, 150.0, 1_000_000.0),
            (2003, 200.0, 1_000_000.0),
            (2004, 205.0, 1_000_000.0),
        ],
    );
    let narrative = build_trend_narrative(
        &country_series(&rows),
        &PhaseThresholds::default(),
        &NarrativeThresholds::default(),
    );

    assert!(narrative.starts_with(
        "Between 2000 and 2004, total deaths increased by 105.0%, while the death rate per 100,000 people increased by 105.0%."
    ));
    assert!(narrative.contains("The most significant trends emerged in distinct periods:"));
    assert!(narrative.contains("From 2001 to 2004, deaths rose sharply"));
    assert!(narrative.contains("The most dramatic swing occurred between 2000 (100 deaths) and 2004 (205 deaths)"));
    assert!(!narrative.contains("Notably"));

    assert_eq!(
        build_trend_narrative(&[], &PhaseThresholds::default(), &NarrativeThresholds::default()),
        NO_TREND_DATA
    );
}
