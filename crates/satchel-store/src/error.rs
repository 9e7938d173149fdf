//! Error types for satchel-store

use thiserror::Error;

/// Result type alias for satchel-store operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in satchel-store
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// The database file could not be opened or created.
    #[error("database error: {0}")]
    Database(#[from] redb::DatabaseError),

    /// A transaction could not be started.
    #[error("transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    /// A class table could not be opened.
    #[error("table error: {0}")]
    Table(#[from] redb::TableError),

    /// A read or write inside a transaction failed.
    #[error("storage error: {0}")]
    Storage(#[from] redb::StorageError),

    /// A transaction failed to commit.
    #[error("commit error: {0}")]
    Commit(#[from] redb::CommitError),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
