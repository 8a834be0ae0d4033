//! Test helper functions
//!
//! Writes fixture datasets to disk so the readers can be exercised end to end.

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arrow::array::{ArrayRef, Float64Array, Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

use crate::error::{MortalityError, Result};
use crate::models::{MortalityRow, RawRecord};

static NEXT_FILE: AtomicUsize = AtomicUsize::new(0);

/// A fresh path in the system temp directory
#[must_use]
pub fn temp_dataset_path(extension: &str) -> PathBuf {
    let n = NEXT_FILE.fetch_add(1, Ordering::Relaxed);
    std::env::temp_dir().join(format!(
        "mortality-atlas-{}-{n}.{extension}",
        std::process::id()
    ))
}

/// Write raw records as a JSON array
pub fn write_json_dataset(path: &Path, records: &[RawRecord]) -> Result<()> {
    let file = File::create(path).map_err(|e| MortalityError::io(path, e))?;
    serde_json::to_writer(file, records)?;
    Ok(())
}

/// Write normalized rows as a Parquet file with typed columns
pub fn write_parquet_dataset(path: &Path, rows: &[MortalityRow]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Country", DataType::Utf8, true),
        Field::new("ISO3", DataType::Utf8, true),
        Field::new("Year", DataType::Int32, true),
        Field::new("CauseOfDeath", DataType::Utf8, true),
        Field::new("DeathsFromCause", DataType::Float64, true),
        Field::new("TotalDeaths", DataType::Float64, true),
        Field::new("Population", DataType::Float64, true),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.country.as_str()))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.iso3.as_str()))),
        Arc::new(Int32Array::from_iter_values(rows.iter().map(|r| r.year))),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.cause.as_str()))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.deaths_from_cause))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.total_deaths))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.population))),
    ];
    let batch = RecordBatch::try_new(schema.clone(), columns)?;

    let file = File::create(path).map_err(|e| MortalityError::io(path, e))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}
