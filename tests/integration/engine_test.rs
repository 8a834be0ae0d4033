use std::sync::Arc;
use std::thread;

use crate::utils::{andes_rows, cleanup, north_america_rows, temp_dataset_path, write_parquet_dataset};
use mortality_atlas::algorithm::comparison::{CauseFilter, TrendQuery};
use mortality_atlas::{
    CauseSelection, EngineConfig, Metric, MortalityDataset, MortalityEngine, NO_DATA, Result,
};

fn andes_engine() -> MortalityEngine {
    MortalityEngine::from(MortalityDataset::new(andes_rows()))
}

/// Test building an engine from a file and answering panel queries
#[tokio::test]
async fn test_engine_from_file() -> Result<()> {
    let path = temp_dataset_path("parquet");
    write_parquet_dataset(&path, &andes_rows())?;
    let engine = MortalityEngine::from_path_async(&path, EngineConfig::default()).await;
    cleanup(&path);
    let engine = engine?;

    let summary = engine.country_summary("PER", None, 2002);
    assert!(summary.starts_with("In Peru, 2,400 deaths were recorded in 2002"));
    assert!(summary.contains("rank 1 in total deaths and rank 1 in deaths per 100,000 people, out of 3 countries"));
    assert!(summary.contains("Malaria was the leading cause at 30.00% contribution"));

    let breakdown = engine.cause_breakdown("PER", None, 2002).unwrap();
    assert_eq!(breakdown.shares.len(), 3);
    assert_eq!(engine.country_summary("PER", None, 1990), NO_DATA);
    Ok(())
}

/// Test map values and data counts
#[test]
fn test_map_queries() {
    let engine = andes_engine();

    let all = engine.map_values(2002, &CauseSelection::AllCauses, Metric::Absolute);
    assert_eq!(all.values.len(), 3);
    assert!((all.value("PER") - 2400.0).abs() < 1e-6);
    assert_eq!(all.scale_max, all.value("PER"));
    assert_eq!(all.value("BOL"), 400.0);

    let unspecified = engine.map_values(2002, &CauseSelection::UnspecifiedCauses, Metric::Absolute);
    assert_eq!(unspecified.value("BOL"), 350.0);

    let tuberculosis = CauseSelection::Cause("Tuberculosis".into());
    assert_eq!(engine.countries_with_data(2002, &CauseSelection::AllCauses), 3);
    assert_eq!(engine.countries_with_data(2002, &tuberculosis), 2);

    let empty = engine.map_values(1995, &CauseSelection::AllCauses, Metric::Rate);
    assert_eq!(empty.data_count(), 0);
    assert_eq!(empty.scale_max, 1.0);
}

/// Test trend comparison through the engine
#[test]
fn test_trend_queries() {
    let engine = andes_engine();
    let query = TrendQuery::new(
        2002,
        2000,
        CauseFilter::from_causes(["Malaria", "Drowning"]),
        Metric::Absolute,
    );

    let series = engine.compare_trends(&query);
    assert_eq!(series.len(), 2);
    assert_eq!(series[0].label, "Malaria");
    assert_eq!(series[0].points.len(), 3);

    let summary = engine.trend_summary(&query).unwrap();
    assert_eq!((summary.start_year, summary.end_year), (2000, 2002));
    assert_eq!(summary.series.len(), 2);

    let fastest = engine.fastest_changing_causes(2000, 2002);
    assert_eq!(fastest.growing.unwrap().cause, "Malaria");
    assert!(fastest.declining.is_none());
}

/// Test phases and narrative of a country series
#[test]
fn test_country_trend() {
    let engine = andes_engine();
    let series = engine.country_series("CHL");
    assert_eq!(series.iter().map(|p| p.year).collect::<Vec<_>>(), vec![2000, 2001, 2002]);
    assert!(engine.country_phases("CHL").is_empty());
    assert!(engine.trend_narrative("CHL").starts_with("Between 2000 and 2002, total deaths increased by 20.0%"));
}

/// Test concurrent queries while the dataset is replaced
#[test]
fn test_concurrent_queries_and_replacement() {
    let engine = Arc::new(andes_engine());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..200 {
                    if let Some(agg) = engine.aggregate("CHL", None, 2000) {
                        assert_eq!(agg.iso3, "CHL");
                        assert_eq!(agg.total_deaths, 1000.0);
                    }
                    let _ = engine.rank("CHL", 2000, Metric::Rate);
                }
            })
        })
        .collect();

    for _ in 0..20 {
        engine.replace_dataset(MortalityDataset::new(andes_rows()));
    }
    engine.replace_dataset(MortalityDataset::new(north_america_rows()));

    for reader in readers {
        reader.join().unwrap();
    }

    assert!(engine.aggregate("CHL", None, 2000).is_none());
    assert_eq!(engine.aggregate("CAN", None, 2000).unwrap().total_deaths, 300.0);
}

/// Test session restore through the engine configuration
#[test]
fn test_session_restore() {
    let engine = andes_engine();
    let session = engine.restore_session(r#"{"year": 1985, "metric": "per100k"}"#);
    assert_eq!(session.year, 1990);
    assert_eq!(session.cause, CauseSelection::AllCauses);
    assert_eq!(session.metric, Metric::Rate);
}
