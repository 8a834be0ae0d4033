//! Logging utilities

pub mod log;

pub use log::{log_load_complete, log_load_start, log_warning, warning_text};
