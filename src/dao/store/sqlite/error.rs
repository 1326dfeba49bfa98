//! Error types shared by the SQLite storage implementation.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result alias returning [`SqliteDaoError`] failures.
pub type SqliteResult<T> = Result<T, SqliteDaoError>;

/// Failures that can occur while interacting with the SQLite database.
#[derive(Debug, Error)]
pub enum SqliteDaoError {
    /// Creating the directory that should hold the database file failed.
    #[error("failed to create database directory `{path}`")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Opening the database file failed.
    #[error("failed to open database `{path}`")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    /// Applying pragmas or creating tables failed.
    #[error("failed to initialize database schema")]
    Schema {
        #[source]
        source: rusqlite::Error,
    },
    /// A query or statement failed.
    #[error("failed to {operation}")]
    Query {
        operation: &'static str,
        #[source]
        source: rusqlite::Error,
    },
    /// A stored save document no longer parses as JSON.
    #[error("stored save data for `{player_id}` is not valid JSON")]
    DecodeSave {
        player_id: String,
        #[source]
        source: serde_json::Error,
    },
    /// The blocking worker running the operation was cancelled or panicked.
    #[error("storage worker did not complete")]
    Worker,
    /// The connection mutex was poisoned by a panicking writer.
    #[error("storage connection poisoned")]
    Poisoned,
}

impl SqliteDaoError {
    /// Attach an operation label to a raw SQLite failure.
    pub fn query(operation: &'static str, source: rusqlite::Error) -> Self {
        SqliteDaoError::Query { operation, source }
    }
}
