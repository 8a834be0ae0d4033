use crate::utils::{heart_and_cancer_rows, random_year_rows, test_rng};
use mortality_atlas::algorithm::aggregation::aggregate;
use mortality_atlas::models::MatchTier;
use mortality_atlas::{MortalityRow, normalize};

/// Test the documented example aggregate
#[test]
fn test_unspecified_deaths_example() {
    let rows = heart_and_cancer_rows();
    let agg = aggregate(&rows, "USA", None, 2000).unwrap();

    assert_eq!(agg.specified_deaths(), 180.0);
    assert_eq!(agg.unspecified_deaths(), 320.0);
    assert_eq!(agg.matched_by, MatchTier::Iso3);
}

/// Test aggregate invariants over random data
#[test]
fn test_aggregate_invariants_random() {
    let mut rng = test_rng(7);
    for round in 0..50 {
        let rows = random_year_rows(&mut rng, 2000 + round, 12);
        for iso3 in ["C00", "C05", "C11"] {
            let agg = aggregate(&rows, iso3, None, 2000 + round).unwrap();
            assert!(agg.unspecified_deaths() >= 0.0);
            assert!(agg.unspecified_per_100k() >= 0.0);
            if agg.specified_deaths() <= agg.total_deaths {
                assert_eq!(
                    agg.unspecified_deaths(),
                    agg.total_deaths - agg.specified_deaths()
                );
            }

            let again = aggregate(&rows, iso3, None, 2000 + round).unwrap();
            assert_eq!(agg, again);
        }
    }
}

/// Test that name fallbacks never mix countries
#[test]
fn test_partial_name_keeps_one_country() {
    let rows = vec![
        MortalityRow::new("Guinea", "GIN", 2010, "Malaria", 10.0, 100.0, 1000.0),
        MortalityRow::new("Guinea-Bissau", "GNB", 2010, "Malaria", 20.0, 200.0, 2000.0),
        MortalityRow::new("Equatorial Guinea", "GNQ", 2010, "Malaria", 30.0, 300.0, 3000.0),
    ];
    let agg = aggregate(&rows, "XXX", Some("guinea"), 2010).unwrap();

    assert_eq!(agg.matched_by, MatchTier::PartialName);
    assert_eq!(agg.iso3, "GIN");
    assert_eq!(agg.by_cause["Malaria"], 10.0);
}

/// Test that unparseable counts become zero instead of poisoning sums
#[test]
fn test_normalized_garbage_aggregates_cleanly() {
    use mortality_atlas::RawRecord;

    let raw = vec![
        RawRecord::new("Peru", "PER", "2001", "Drowning", "n/a", "-40", "30000000"),
        RawRecord::new("Peru", "PER", 2001, "Malaria", 12.0, 500.0, "NaN"),
    ];
    let rows = normalize(&raw);
    let agg = aggregate(&rows, "PER", None, 2001).unwrap();

    assert_eq!(agg.by_cause["Drowning"], 0.0);
    assert_eq!(agg.total_deaths, 500.0);
    assert_eq!(agg.population, 30_000_000.0);
    assert!(agg.by_cause_per_100k.values().all(|v| v.is_finite()));
}
