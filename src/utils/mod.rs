//! Utility functions: number formatting, logging helpers and test fixtures

pub mod format;
pub mod logging;
pub mod test;

pub use format::{format_grouped, format_int, format_percent, format_rate, format_signed_percent};
