//! A Rust library for exploring global mortality statistics: dataset
//! normalization, country/year aggregation, rankings, trend phases and
//! narrative text, with sync and async loading of JSON and Parquet datasets.

pub mod algorithm;
pub mod async_io;
pub mod config;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod geo;
pub mod models;
pub mod reader;
pub mod schema;
pub mod session;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::{
    EngineConfig, NarrativeThresholds, PartialMatch, PhaseThresholds, TieBreak, YearBounds,
};
pub use dataset::MortalityDataset;
pub use engine::MortalityEngine;
pub use error::{MortalityError, Result};
pub use models::{
    CauseSelection, CountryYearAggregate, Metric, MortalityRow, Phase, PhaseDirection,
    RankResult, RawField, RawRecord, TrendPoint,
};
pub use session::SessionState;

// Core algorithms
pub use algorithm::aggregation::aggregate;
pub use algorithm::narrative::{NO_DATA, NO_TREND_DATA, build_country_summary, build_trend_narrative};
pub use algorithm::phases::detect_phases;
pub use algorithm::ranking::rank;
pub use schema::{MalformedRowError, normalize, normalize_with_report};

// Loading
pub use reader::{DatasetFormat, DatasetReader, load_dataset};

// Async functionality
pub use async_io::{find_dataset_files_async, load_dataset_async, load_datasets_async};
