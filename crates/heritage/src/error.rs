//! Error types for the heritage pipeline.

use std::path::PathBuf;

use arrow::error::ArrowError;
use parquet::errors::ParquetError;
use thiserror::Error;

/// Main error type for pipeline operations.
#[derive(Debug, Error)]
pub enum HeritageError {
    /// The input file or directory does not exist.
    #[error("Source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    /// A filter produced zero rows where at least one was required.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// An artifact that was just written is absent or empty on disk.
    #[error("Write verification failed: '{}' is missing or empty after write", .path.display())]
    WriteVerification { path: PathBuf },

    /// A column the operation depends on is not present in the input.
    #[error("Column '{column}' not found{location}")]
    MissingColumn { column: String, location: String },

    /// Error reading or writing a file.
    #[error("IO error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the Arrow compute layer.
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// Error from the Parquet reader or writer.
    #[error("Parquet error: {0}")]
    Parquet(#[from] ParquetError),

    /// Error from the CSV writer.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Chart rendering error.
    #[error("Chart error: {0}")]
    Chart(String),

    /// Invalid configuration or argument value.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl HeritageError {
    /// Wrap an IO error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HeritageError::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a missing-column error without file context.
    pub fn missing_column(column: impl Into<String>) -> Self {
        HeritageError::MissingColumn {
            column: column.into(),
            location: String::new(),
        }
    }

    /// Build a missing-column error naming the file that lacks it.
    pub fn missing_column_in(column: impl Into<String>, path: &std::path::Path) -> Self {
        HeritageError::MissingColumn {
            column: column.into(),
            location: format!(" in '{}'", path.display()),
        }
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, HeritageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_message() {
        let err = HeritageError::missing_column("name");
        assert_eq!(err.to_string(), "Column 'name' not found");

        let err = HeritageError::missing_column_in("name", std::path::Path::new("raw/data.parquet"));
        assert_eq!(
            err.to_string(),
            "Column 'name' not found in 'raw/data.parquet'"
        );
    }

    #[test]
    fn test_source_not_found_message() {
        let err = HeritageError::SourceNotFound {
            path: PathBuf::from("missing.parquet"),
        };
        assert!(err.to_string().contains("missing.parquet"));
    }
}
