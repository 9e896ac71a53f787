//! Common types and utilities shared across the heat map crates.

pub mod dataset;
pub mod error;
pub mod month;

pub use dataset::{Dataset, DatasetSummary, MonthlyVariance};
pub use error::{HeatmapError, HeatmapResult};
pub use month::{month_name, MONTHS_PER_YEAR};
