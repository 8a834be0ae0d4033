//! Async dataset loaders
//!
//! Reading and normalizing a dataset is CPU and blocking-I/O work, so it runs
//! on tokio's blocking pool and the async side only awaits the result.

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Instant;

use crate::config::EngineConfig;
use crate::dataset::MortalityDataset;
use crate::error::Result;
use crate::reader::DatasetReader;

/// Boxed future returned by `AsyncDatasetLoader`
pub type LoadFuture<'a> = Pin<Box<dyn Future<Output = Result<MortalityDataset>> + Send + 'a>>;

/// Loader that produces a dataset snapshot asynchronously
pub trait AsyncDatasetLoader: Send + Sync {
    /// Load one dataset file
    fn load_async<'a>(&'a self, path: &'a Path) -> LoadFuture<'a>;

    /// Load several files and merge them in the given order
    fn load_many_async<'a>(&'a self, paths: &'a [PathBuf]) -> LoadFuture<'a> {
        Box::pin(async move {
            let start = Instant::now();
            let futures = paths.iter().map(|path| self.load_async(path));
            let datasets = futures::future::try_join_all(futures).await?;
            let merged = MortalityDataset::merge(datasets);
            log::info!(
                "Merged {} rows from {} dataset files in {:?}",
                merged.len(),
                paths.len(),
                start.elapsed()
            );
            Ok(merged)
        })
    }
}

/// Runs `DatasetReader` on the blocking pool
#[derive(Debug, Clone)]
pub struct BlockingDatasetLoader {
    reader: DatasetReader,
}

impl BlockingDatasetLoader {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            reader: DatasetReader::new(config),
        }
    }
}

impl AsyncDatasetLoader for BlockingDatasetLoader {
    fn load_async<'a>(&'a self, path: &'a Path) -> LoadFuture<'a> {
        let reader = self.reader.clone();
        let path = path.to_path_buf();
        Box::pin(async move { tokio::task::spawn_blocking(move || reader.read(&path)).await? })
    }
}

/// Load one dataset file without blocking the runtime
pub async fn load_dataset_async(path: &Path, config: &EngineConfig) -> Result<MortalityDataset> {
    BlockingDatasetLoader::new(config).load_async(path).await
}

/// Load several dataset files concurrently and merge them in order
pub async fn load_datasets_async(
    paths: &[PathBuf],
    config: &EngineConfig,
) -> Result<MortalityDataset> {
    BlockingDatasetLoader::new(config).load_many_async(paths).await
}
