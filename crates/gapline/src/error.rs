//! Error types for the gapline library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for gapline operations.
///
/// Only load-level and schema-level problems surface here. Cell and row
/// problems are resolved inside the preprocessor and reported, not raised.
#[derive(Debug, Error)]
pub enum GaplineError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library while reading a source.
    #[error("CSV error in '{file}': {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    /// The identifier column is absent from the header row.
    #[error("Schema error in '{file}': identifier column '{column}' not found")]
    MissingIdColumn { file: String, column: String },

    /// A non-identifier column header does not parse as an integer year.
    #[error("Schema error in '{file}': column {position} header '{column}' is not an integer year")]
    InvalidYearColumn {
        file: String,
        column: String,
        position: usize,
    },

    /// The table has an identifier column but no year columns.
    #[error("Schema error in '{file}': no year columns")]
    NoYearColumns { file: String },

    /// The same country appears on more than one row and duplicates are rejected.
    #[error("Duplicate country '{country}' in '{file}' (lines {first_line} and {line})")]
    DuplicateCountry {
        file: String,
        country: String,
        first_line: usize,
        line: usize,
    },

    /// Empty file or no data to process.
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error saving or loading a file the library writes.
    #[error("Persistence error: {0}")]
    Persistence(String),
}

impl GaplineError {
    /// Wrap an IO error with the path it occurred on.
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        GaplineError::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether the error describes malformed input structure rather than access.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            GaplineError::MissingIdColumn { .. }
                | GaplineError::InvalidYearColumn { .. }
                | GaplineError::NoYearColumns { .. }
                | GaplineError::DuplicateCountry { .. }
        )
    }
}

/// Result type alias for gapline operations.
pub type Result<T> = std::result::Result<T, GaplineError>;
