/// Error types for the storage layer and the request handlers
///
/// Storage errors carry setup hints because they are most often seen at
/// startup, when the dataset or database is not where the service expects it.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Storage errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(
        "Climate dataset not found at '{0}'.\n\n  \
         Place hawaii.sqlite under Resources/ or point the service at it:\n  \
         climate_service --database /path/to/hawaii.sqlite"
    )]
    MissingDataset(String),

    #[error("Required table '{0}' does not exist in the climate dataset")]
    MissingTable(String),

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Database connection lock poisoned by a panicked request")]
    ConnectionPoisoned,
}

// ---------------------------------------------------------------------------
// Handler errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ApiError {
    /// Path parameter is not a `YYYY-MM-DD` calendar date.
    #[error("Invalid date '{input}': expected YYYY-MM-DD")]
    InvalidDate { input: String },

    /// The measurement table is empty, so no "last date" exists.
    #[error("No measurements available to determine the most recent date")]
    NoData,

    /// A stored date could not be parsed as `YYYY-MM-DD`.
    #[error("Stored measurement date '{0}' is not a valid YYYY-MM-DD date")]
    CorruptDate(String),

    #[error(transparent)]
    Storage(#[from] StoreError),
}

impl ApiError {
    /// HTTP status code this error is surfaced as.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidDate { .. } => 400,
            ApiError::NoData | ApiError::CorruptDate(_) | ApiError::Storage(_) => 500,
        }
    }
}
