//! Dataset reading
//!
//! Dataset files are either a JSON array of records or a Parquet file with
//! the seven dataset columns. Both are turned into `RawRecord`s and routed
//! through the normalizer, so coercion rules are identical for every format.

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Instant;

use arrow::array::{Array, ArrayRef, Float64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

use crate::config::EngineConfig;
use crate::dataset::MortalityDataset;
use crate::error::{MortalityError, Result};
use crate::models::{RawField, RawRecord};
use crate::schema::{ColumnReport, RowField, normalize_with_report};
use crate::utils::logging::{log_load_complete, log_load_start, log_warning};

/// Supported dataset file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetFormat {
    Json,
    Parquet,
}

impl DatasetFormat {
    /// Detect the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("parquet") => Ok(Self::Parquet),
            _ => Err(MortalityError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("JSON"),
            Self::Parquet => f.write_str("Parquet"),
        }
    }
}

/// Reader that turns dataset files into snapshots
#[derive(Debug, Clone)]
pub struct DatasetReader {
    batch_size: usize,
    strict_rows: bool,
}

impl DatasetReader {
    /// Create a reader from the engine configuration
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            batch_size: config.batch_size(),
            strict_rows: config.strict_rows,
        }
    }

    /// Read the raw records of a file
    pub fn read_raw(&self, path: &Path) -> Result<Vec<RawRecord>> {
        match DatasetFormat::from_path(path)? {
            DatasetFormat::Json => read_json_records(path),
            DatasetFormat::Parquet => read_parquet_records(path, self.batch_size),
        }
    }

    /// Read and normalize a file into a dataset snapshot
    ///
    /// In strict mode any coerced field fails the load.
    pub fn read(&self, path: &Path) -> Result<MortalityDataset> {
        let start = Instant::now();
        let format = DatasetFormat::from_path(path)?;
        log_load_start(&format.to_string(), path);

        let raw = self.read_raw(path)?;
        let report = normalize_with_report(&raw);

        if let Some(first) = report.issues.first() {
            if self.strict_rows {
                return Err(MortalityError::MalformedRows {
                    count: report.issues.len(),
                    first: first.clone(),
                });
            }
            log_warning(&format!("First coerced field: {first}"), Some(path));
        }

        log_load_complete(path, report.rows.len(), report.issues.len(), start.elapsed());
        Ok(MortalityDataset::new(report.rows))
    }
}

/// Load a dataset file with the given configuration
pub fn load_dataset(path: &Path, config: &EngineConfig) -> Result<MortalityDataset> {
    DatasetReader::new(config).read(path)
}

/// Read a JSON array of records
pub fn read_json_records(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| MortalityError::io(path, e))?;
    let records: Vec<RawRecord> = serde_json::from_reader(BufReader::new(file))?;
    Ok(records)
}

/// Read every record batch of a Parquet file as raw records
pub fn read_parquet_records(path: &Path, batch_size: usize) -> Result<Vec<RawRecord>> {
    let file = File::open(path).map_err(|e| MortalityError::io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)?;

    let columns = ColumnReport::for_schema(builder.schema());
    columns.require_all()?;

    let reader = builder.with_batch_size(batch_size).build()?;

    let mut records = Vec::new();
    for batch in reader {
        let batch = batch?;
        records.extend(batch_records(&batch)?);
    }
    Ok(records)
}

/// Convert one record batch to raw records
///
/// Numeric columns become numbers, everything else is read as text. Nulls
/// become missing fields.
pub fn batch_records(batch: &RecordBatch) -> Result<Vec<RawRecord>> {
    let columns = ColumnReport::for_schema(&batch.schema());
    columns.require_all()?;

    let column = |field: RowField| -> Result<Vec<Option<RawField>>> {
        let idx = columns
            .index_of(field)
            .ok_or_else(|| MortalityError::MissingColumn(field.column().to_string()))?;
        column_fields(batch.column(idx))
    };

    let country = column(RowField::Country)?;
    let iso3 = column(RowField::Iso3)?;
    let year = column(RowField::Year)?;
    let cause = column(RowField::Cause)?;
    let deaths = column(RowField::DeathsFromCause)?;
    let total = column(RowField::TotalDeaths)?;
    let population = column(RowField::Population)?;

    let records = itertools::izip!(country, iso3, year, cause, deaths, total, population)
        .map(
            |(country, iso3, year, cause, deaths_from_cause, total_deaths, population)| RawRecord {
                country,
                iso3,
                year,
                cause,
                deaths_from_cause,
                total_deaths,
                population,
            },
        )
        .collect();
    Ok(records)
}

fn column_fields(array: &ArrayRef) -> Result<Vec<Option<RawField>>> {
    if array.data_type().is_numeric() {
        let values = cast(array, &DataType::Float64)?;
        let values = values
            .as_any()
            .downcast_ref::<Float64Array>()
            .ok_or_else(|| ArrowError::CastError("expected a Float64 array".to_string()))?;
        return Ok((0..values.len())
            .map(|i| (!values.is_null(i)).then(|| RawField::Number(values.value(i))))
            .collect());
    }

    let values = cast(array, &DataType::Utf8)?;
    let values = values
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| ArrowError::CastError("expected a Utf8 array".to_string()))?;
    Ok((0..values.len())
        .map(|i| (!values.is_null(i)).then(|| RawField::Text(values.value(i).to_string())))
        .collect())
}
