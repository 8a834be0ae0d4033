use std::path::Path;

use crate::utils::{
    andes_rows, cleanup, raw_records, temp_dataset_path, write_json_dataset, write_parquet_dataset,
};
use mortality_atlas::{
    DatasetFormat, DatasetReader, EngineConfig, MortalityError, RawRecord, Result, load_dataset,
};

/// Test reading a JSON dataset with mixed string and numeric fields
#[test]
fn test_load_json_dataset() -> Result<()> {
    let path = temp_dataset_path("json");
    write_json_dataset(&path, &raw_records())?;

    let dataset = load_dataset(&path, &EngineConfig::default());
    cleanup(&path);
    let dataset = dataset?;

    assert_eq!(dataset.len(), 3);
    assert_eq!(dataset.year_range(), Some((2010, 2010)));
    assert_eq!(dataset.causes(), ["HIV/AIDS", "Malaria"]);
    let kenya: Vec<_> = dataset.rows_for_iso3("KEN").collect();
    assert_eq!(kenya.len(), 2);
    assert_eq!(kenya[0].deaths_from_cause, 2000.0);
    assert!((kenya[0].deaths_per_100k - 5.0).abs() < 1e-9);
    Ok(())
}

/// Test reading a Parquet dataset with typed columns
#[test]
fn test_load_parquet_dataset() -> Result<()> {
    let path = temp_dataset_path("parquet");
    let rows = andes_rows();
    write_parquet_dataset(&path, &rows)?;

    let dataset = load_dataset(&path, &EngineConfig::default());
    cleanup(&path);
    let dataset = dataset?;

    assert_eq!(dataset.rows(), rows.as_slice());
    assert_eq!(dataset.years(), vec![2000, 2001, 2002]);
    Ok(())
}

/// Test small Parquet batches produce the same rows
#[test]
fn test_parquet_batch_size() -> Result<()> {
    let path = temp_dataset_path("parquet");
    write_parquet_dataset(&path, &andes_rows())?;

    let config = EngineConfig {
        batch_size: Some(4),
        ..EngineConfig::default()
    };
    let raw = DatasetReader::new(&config).read_raw(&path);
    cleanup(&path);

    assert_eq!(raw?.len(), andes_rows().len());
    Ok(())
}

/// Test strict mode rejects coerced rows and lenient mode keeps them
#[test]
fn test_strict_rows() -> Result<()> {
    let path = temp_dataset_path("json");
    let mut records = raw_records();
    records.push(RawRecord {
        year: Some("soon".into()),
        population: Some("many".into()),
        ..records[0].clone()
    });
    write_json_dataset(&path, &records)?;

    let lenient = load_dataset(&path, &EngineConfig::default());
    let strict = load_dataset(
        &path,
        &EngineConfig {
            strict_rows: true,
            ..EngineConfig::default()
        },
    );
    cleanup(&path);

    assert_eq!(lenient?.len(), 4);
    match strict {
        Err(err @ MortalityError::MalformedRows { .. }) => {
            // Two coerced fields in one row
            assert_eq!(
                err.to_string(),
                "2 malformed fields, first: row 3: Year is not a number (raw: soon)"
            );
            let MortalityError::MalformedRows { count, first } = err else {
                unreachable!()
            };
            assert_eq!(count, 2);
            assert_eq!(first.index, 3);
        }
        other => panic!("expected malformed rows, got {other:?}"),
    }
    Ok(())
}

/// Test error cases of the reader
#[test]
fn test_reader_errors() {
    assert!(matches!(
        DatasetFormat::from_path(Path::new("deaths.csv")),
        Err(MortalityError::UnsupportedFormat(_))
    ));
    assert!(matches!(
        load_dataset(Path::new("/nonexistent/deaths.json"), &EngineConfig::default()),
        Err(MortalityError::Io { .. })
    ));

    let path = temp_dataset_path("json");
    std::fs::write(&path, "{\"not\": \"an array\"}").unwrap();
    let result = load_dataset(&path, &EngineConfig::default());
    cleanup(&path);
    assert!(matches!(result, Err(MortalityError::Json(_))));
}
