//! Error types for the heat map crates.

use thiserror::Error;

/// Result type alias using HeatmapError.
pub type HeatmapResult<T> = Result<T, HeatmapError>;

/// Primary error type for loading and rendering.
#[derive(Debug, Error)]
pub enum HeatmapError {
    // === Loader Errors ===
    #[error("Failed to fetch dataset from {url}: {message}")]
    FetchError { url: String, message: String },

    #[error("Dataset request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to parse dataset: {0}")]
    ParseError(String),

    // === Data Errors ===
    #[error("Dataset has no monthly variance records")]
    EmptyDataset,

    #[error("Record {index} is outside the chart domain: {message}")]
    OutOfDomain { index: usize, message: String },

    // === Rendering Errors ===
    #[error("Rasterization failed: {0}")]
    RasterError(String),

    // === Infrastructure Errors ===
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    IoError(String),
}

impl HeatmapError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            HeatmapError::EmptyDataset
            | HeatmapError::OutOfDomain { .. }
            | HeatmapError::ParseError(_) => 422,

            HeatmapError::FetchError { .. } | HeatmapError::HttpStatus { .. } => 502,

            _ => 500,
        }
    }

    /// True when the failure happened before a dataset was obtained.
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            HeatmapError::FetchError { .. }
                | HeatmapError::HttpStatus { .. }
                | HeatmapError::ParseError(_)
        )
    }
}

// Conversion from common error types
impl From<std::io::Error> for HeatmapError {
    fn from(err: std::io::Error) -> Self {
        HeatmapError::IoError(err.to_string())
    }
}

impl From<serde_json::Error> for HeatmapError {
    fn from(err: serde_json::Error) -> Self {
        HeatmapError::ParseError(err.to_string())
    }
}
