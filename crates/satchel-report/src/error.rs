//! Error types for satchel-report

use thiserror::Error;

/// Result type alias for satchel-report operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while deriving or rendering a report card
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A subject is missing one of its six period scores.
    #[error("subject '{subject}' is missing a score for {period}")]
    MissingScore {
        /// The subject with the incomplete row.
        subject: String,
        /// The period column that has no score.
        period: &'static str,
    },

    /// A period score is present but not numeric.
    #[error("subject '{subject}' has non-numeric score for {period}: '{value}'")]
    NonNumericScore {
        /// The subject carrying the bad cell.
        subject: String,
        /// The period column.
        period: &'static str,
        /// The offending value, rendered for the log.
        value: String,
    },

    /// Rendering was asked for zero students.
    #[error("no students to render")]
    NoStudents,

    /// The PDF backend failed.
    #[error("PDF error: {0}")]
    Pdf(String),
}
