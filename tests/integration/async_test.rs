use crate::utils::{
    andes_rows, cleanup, heart_and_cancer_rows, raw_records, temp_dataset_path, temp_dir,
    write_json_dataset, write_parquet_dataset,
};
use mortality_atlas::async_io::{AsyncDatasetLoader, BlockingDatasetLoader};
use mortality_atlas::{
    EngineConfig, MortalityError, Result, find_dataset_files_async, load_dataset_async,
    load_datasets_async,
};

/// Test async loading of a single file
#[tokio::test]
async fn test_async_load() -> Result<()> {
    let path = temp_dataset_path("parquet");
    write_parquet_dataset(&path, &andes_rows())?;

    let dataset = load_dataset_async(&path, &EngineConfig::default()).await;
    cleanup(&path);

    assert_eq!(dataset?.len(), andes_rows().len());
    Ok(())
}

/// Test parallel async loading of several files in both formats
#[tokio::test]
async fn test_async_load_many_merges_in_order() -> Result<()> {
    let parquet = temp_dataset_path("parquet");
    let json = temp_dataset_path("json");
    write_parquet_dataset(&parquet, &heart_and_cancer_rows())?;
    write_json_dataset(&json, &raw_records())?;

    let paths = vec![parquet.clone(), json.clone()];
    let dataset = load_datasets_async(&paths, &EngineConfig::default()).await;
    cleanup(&parquet);
    cleanup(&json);
    let dataset = dataset?;

    assert_eq!(dataset.len(), 5);
    assert_eq!(dataset.rows()[0].iso3, "USA");
    assert_eq!(dataset.rows()[4].iso3, "GHA");
    assert_eq!(dataset.iso3_codes(), vec!["GHA", "KEN", "USA"]);
    Ok(())
}

/// Test that one failing file fails the whole load
#[tokio::test]
async fn test_async_load_many_propagates_errors() -> Result<()> {
    let json = temp_dataset_path("json");
    write_json_dataset(&json, &raw_records())?;
    let missing = temp_dataset_path("parquet");

    let loader = BlockingDatasetLoader::new(&EngineConfig::default());
    let paths = vec![json.clone(), missing];
    let result = loader.load_many_async(&paths).await;
    cleanup(&json);

    assert!(matches!(result, Err(MortalityError::Io { .. })));
    Ok(())
}

/// Test dataset discovery in a directory
#[tokio::test]
async fn test_find_dataset_files() -> Result<()> {
    let dir = temp_dir()?;
    write_json_dataset(&dir.join("b.json"), &raw_records())?;
    write_parquet_dataset(&dir.join("a.parquet"), &andes_rows())?;
    std::fs::write(dir.join("notes.txt"), "ignored").map_err(|e| MortalityError::io(&dir, e))?;

    let files = find_dataset_files_async(&dir).await;
    let dataset = match &files {
        Ok(files) => load_datasets_async(files, &EngineConfig::default()).await,
        Err(_) => Ok(Default::default()),
    };
    cleanup(&dir);

    let files = files?;
    let names: Vec<_> = files
        .iter()
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
        .collect();
    assert_eq!(names, vec!["a.parquet", "b.json"]);
    assert_eq!(dataset?.len(), andes_rows().len() + 3);
    Ok(())
}
