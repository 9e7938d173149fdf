//! Error types for satchel-core

use thiserror::Error;

/// Result type alias for satchel-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in satchel-core
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A class identifier failed validation.
    #[error("invalid class identifier: '{value}'")]
    InvalidClassId {
        /// The rejected value, as supplied.
        value: String,
    },

    /// A roster row is missing a column the merge join requires.
    #[error("roster row {row} is missing required column '{column}'")]
    MissingColumn {
        /// The column header that was absent.
        column: &'static str,
        /// 1-based row number within the parsed sheet.
        row: usize,
    },

    /// A roll number cell could not be read as an integer.
    #[error("roster row {row} has non-numeric roll number '{value}'")]
    InvalidRoll {
        /// The cell value that failed to parse.
        value: String,
        /// 1-based row number within the parsed sheet.
        row: usize,
    },

    /// JSON serialization/deserialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
