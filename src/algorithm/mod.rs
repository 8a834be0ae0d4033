//! Algorithms over the mortality dataset
//!
//! Every function here is a pure computation over borrowed rows. The engine
//! module wires them to a dataset snapshot, the configuration and the
//! aggregate cache.

pub mod aggregation;
pub mod breakdown;
pub mod choropleth;
pub mod comparison;
pub mod narrative;
pub mod phases;
pub mod ranking;
