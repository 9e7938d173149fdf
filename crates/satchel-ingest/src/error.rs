//! Error types for satchel-ingest

use thiserror::Error;

/// Result type alias for satchel-ingest operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while ingesting a spreadsheet
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// I/O error reading the uploaded file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The XLSX container could not be opened or read.
    #[error("ZIP error: {0}")]
    Zip(String),

    /// A required part is missing from the XLSX container.
    #[error("missing part in workbook: {path}")]
    MissingPart {
        /// Path of the part within the container.
        path: String,
    },

    /// The workbook declares no sheets.
    #[error("workbook contains no sheets")]
    NoSheets,

    /// Worksheet XML could not be parsed.
    #[error("XML parse error: {0}")]
    Xml(String),

    /// A cell references a shared string that does not exist.
    #[error("shared string index {0} out of bounds")]
    SharedStringOutOfBounds(usize),

    /// A cell carries an unparsable address.
    #[error("invalid cell address: {0}")]
    InvalidAddress(String),

    /// CSV parse error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
