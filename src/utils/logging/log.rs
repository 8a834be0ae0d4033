//! Logging helpers for dataset loading
//!
//! Keeps the wording of load messages consistent between the sync and async
//! readers.

use std::path::Path;
use std::time::Duration;

/// Log the start of a dataset load
///
/// # Arguments
/// * `format` - Dataset format being read
/// * `path` - Path of the dataset file
pub fn log_load_start(format: &str, path: &Path) {
    log::info!("Loading {} dataset from {}", format, path.display());
}

/// Log a completed dataset load
///
/// # Arguments
/// * `path` - Path of the dataset file
/// * `rows` - Number of normalized rows
/// * `coerced` - Number of fields that needed coercion
/// * `elapsed` - Time spent reading and normalizing
pub fn log_load_complete(path: &Path, rows: usize, coerced: usize, elapsed: Duration) {
    if coerced == 0 {
        log::info!(
            "Loaded {} rows from {} in {:?}",
            rows,
            path.display(),
            elapsed
        );
    } else {
        log::info!(
            "Loaded {} rows from {} in {:?} ({} fields coerced)",
            rows,
            path.display(),
            elapsed,
            coerced
        );
    }
}

/// Warning text, with the dataset path appended when known
#[must_use]
pub fn warning_text(message: &str, path: Option<&Path>) -> String {
    match path {
        Some(path) => format!("{message} [{}]", path.display()),
        None => message.to_string(),
    }
}

/// Log a dataset or session warning
pub fn log_warning(message: &str, path: Option<&Path>) {
    log::warn!("{}", warning_text(message, path));
}
