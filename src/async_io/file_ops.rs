//! Async discovery of dataset files

use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{MortalityError, Result};
use crate::reader::DatasetFormat;
use crate::utils::logging::log_warning;

/// Find every JSON and Parquet dataset file in a directory, sorted by path
///
/// # Errors
/// Returns an error if the directory or an entry's metadata cannot be read
pub async fn find_dataset_files_async(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| MortalityError::io(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MortalityError::io(dir, e))?
    {
        let path = entry.path();
        let metadata = fs::metadata(&path)
            .await
            .map_err(|e| MortalityError::io(&path, e))?;
        if metadata.is_file() && DatasetFormat::from_path(&path).is_ok() {
            files.push(path);
        }
    }

    files.sort();
    if files.is_empty() {
        log_warning("No dataset files found in directory", Some(dir));
    } else {
        log::info!("Found {} dataset files in {}", files.len(), dir.display());
    }
    Ok(files)
}
