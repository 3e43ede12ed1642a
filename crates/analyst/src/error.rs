//! Error types for the analyst library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for analyst operations.
#[derive(Debug, Error)]
pub enum AnalystError {
    /// A requested column does not exist in the dataset.
    #[error("Column '{column}' does not exist in the data")]
    MissingColumn { column: String },

    /// A chart request is missing a parameter its chart type requires.
    #[error("A {chart_type} chart requires the '{parameter}' parameter")]
    MissingParameter {
        chart_type: String,
        parameter: String,
    },

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error reading a spreadsheet workbook.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// File format not supported.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Empty file or no data to analyze.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external suggestion source failed or returned unusable content.
    #[error("Upstream error: {0}")]
    Upstream(String),
}

impl AnalystError {
    /// Whether this error reflects a mistake in the caller's request.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AnalystError::MissingColumn { .. } | AnalystError::MissingParameter { .. }
        )
    }
}

/// Result type alias for analyst operations.
pub type Result<T> = std::result::Result<T, AnalystError>;
