use itertools::Itertools;

use crate::utils::{north_america_rows, random_year_rows, test_rng};
use mortality_atlas::algorithm::ranking::rank_table;
use mortality_atlas::{Metric, MortalityRow, TieBreak, rank};

/// Test the documented three-country example
#[test]
fn test_north_america_ranks() {
    let rows = north_america_rows();
    let ranks: Vec<usize> = ["USA", "CAN", "MEX"]
        .iter()
        .map(|iso3| {
            rank(&rows, iso3, Metric::Absolute, TieBreak::Iso3Ascending)
                .unwrap()
                .rank
        })
        .sorted()
        .collect();
    assert_eq!(ranks, vec![1, 2, 3]);

    let mex = rank(&rows, "MEX", Metric::Absolute, TieBreak::Iso3Ascending).unwrap();
    let can = rank(&rows, "CAN", Metric::Absolute, TieBreak::Iso3Ascending).unwrap();
    assert_eq!(mex.rank, 1);
    assert_eq!(can.rank, 3);
    assert_eq!(can.total, 3);
}

/// Test that ranks form 1..=total without gaps over random data
#[test]
fn test_rank_contiguity_random() {
    let mut rng = test_rng(42);
    for round in 0..100 {
        let rows = random_year_rows(&mut rng, 2005, 3 + round % 20);
        for metric in [Metric::Absolute, Metric::Rate] {
            for tie_break in [TieBreak::Iso3Ascending, TieBreak::InputOrder] {
                let table = rank_table(&rows, metric, tie_break);
                let ranks = table.iter().map(|entry| entry.rank).collect_vec();
                assert_eq!(ranks, (1..=table.len()).collect_vec());
                assert!(table.iter().map(|entry| &entry.iso3).all_unique());
                assert!(table.windows(2).all(|w| w[0].value >= w[1].value));

                for entry in &table {
                    let result = rank(&rows, &entry.iso3, metric, tie_break).unwrap();
                    assert_eq!(result.rank, entry.rank);
                    assert_eq!(result.total, table.len());
                }
            }
        }
    }
}

/// Test that an unrankable country gets the last rank
#[test]
fn test_absent_country_gets_last_rank() {
    let rows = north_america_rows();
    let result = rank(&rows, "GTM", Metric::Rate, TieBreak::Iso3Ascending).unwrap();
    assert_eq!(result.rank, 3);
    assert_eq!(result.total, 3);

    let empty: Vec<MortalityRow> = Vec::new();
    assert!(rank(&empty, "GTM", Metric::Rate, TieBreak::Iso3Ascending).is_none());
}
