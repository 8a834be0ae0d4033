//! Fixtures and helpers for tests

pub mod helpers;

pub use fixtures::{andes_rows, heart_and_cancer_rows, north_america_rows, raw_records, series_rows};
pub use helpers::{temp_dataset_path, write_json_dataset, write_parquet_dataset};
