use std::path::PathBuf;

use thiserror::Error;

/// Validation and contract errors exposed by `basketwatch-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("series id cannot be empty")]
    EmptySeriesId,
    #[error("series id length {len} exceeds max {max}")]
    SeriesIdTooLong { len: usize, max: usize },
    #[error("series id contains control character at index {index}")]
    SeriesIdControlChar { index: usize },
    #[error("series id '{value}' appears more than once")]
    DuplicateSeriesId { value: String },

    #[error("period must be YYYY-MM: '{value}'")]
    InvalidPeriod { value: String },
    #[error("month must be between 1 and 12, got {value}")]
    InvalidMonth { value: u8 },
    #[error("year {value} is outside the supported range")]
    InvalidYear { value: i32 },

    #[error("quantity must be a whole number: '{value}'")]
    FractionalQuantity { value: String },
    #[error("quantity must be non-negative: '{value}'")]
    NegativeQuantity { value: String },
    #[error("quantity is not a number: '{value}'")]
    InvalidQuantity { value: String },

    #[error("item spec must be ID or ID=QTY: '{value}'")]
    InvalidItemSpec { value: String },
    #[error("item '{value}' is not tracked by the loaded price series")]
    UnknownItem { value: String },
    #[error("basket must contain at least one item")]
    EmptyBasket,
    #[error("unknown preset '{value}', expected one of: {expected}")]
    UnknownPreset { value: String, expected: String },

    #[error("request_id must be at least 8 characters")]
    InvalidRequestId,
    #[error("schema_version must match vMAJOR.MINOR.PATCH: '{value}'")]
    InvalidSchemaVersion { value: String },
    #[error("dataset reference cannot be empty")]
    EmptyDataset,

    #[error("error code cannot be empty")]
    EmptyErrorCode,
    #[error("error message cannot be empty")]
    EmptyErrorMessage,
}

/// Failures while reading a price table from disk.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("failed to open price table '{path}': {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed price table: {0}")]
    Csv(#[from] csv::Error),

    #[error("price table has no header row")]
    MissingHeader,

    #[error("price table has no numeric item columns")]
    NoItemColumns,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Top-level error type for core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
