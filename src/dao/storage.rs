//! Backend-agnostic failures surfaced by the score and save stores.

use std::error::Error;
use thiserror::Error;

/// Result alias for score and save store operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Error raised by a store backend regardless of the underlying database.
///
/// Callers treat any storage failure as fatal to the request, so a single
/// variant carrying the backend source is enough.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {message}")]
    Unavailable {
        message: String,
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl StorageError {
    /// Construct an unavailable error from any backend failure.
    pub fn unavailable(message: String, source: impl Error + Send + Sync + 'static) -> Self {
        StorageError::Unavailable {
            message,
            source: Box::new(source),
        }
    }
}
