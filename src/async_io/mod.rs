//! Async dataset loading
//!
//! The only async boundary of the crate: files are read on tokio's blocking
//! pool and merged into one snapshot.

pub mod file_ops;
pub mod loader;

pub use file_ops::find_dataset_files_async;
pub use loader::{
    AsyncDatasetLoader, BlockingDatasetLoader, LoadFuture, load_dataset_async,
    load_datasets_async,
};
