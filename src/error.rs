use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn an input file into a [`LaunchDataset`](crate::data::model::LaunchDataset).
#[derive(Debug, Error)]
pub enum DataLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("row {row}, column '{column}': invalid value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("expected a top-level JSON array of record objects")]
    NotRecords,

    #[error("dataset contains no launch records")]
    Empty,

    #[error("CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("parquet: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("arrow: {0}")]
    Arrow(#[from] arrow::error::ArrowError),
}

/// Invalid value in the environment-driven configuration.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{key} must be a positive number, got '{value}'")]
    InvalidNumber { key: &'static str, value: String },

    #[error("{key} must not be empty")]
    EmptyValue { key: &'static str },
}

/// A UI update line that could not be applied.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("malformed update event: {0}")]
    Malformed(#[from] serde_json::Error),
}
