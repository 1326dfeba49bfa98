//! SQLite-backed implementation of the score and save stores.

mod config;
mod error;
mod store;

pub use config::SqliteConfig;
pub use error::SqliteDaoError;
pub use store::SqliteDataStore;

use crate::dao::storage::StorageError;

impl From<SqliteDaoError> for StorageError {
    fn from(err: SqliteDaoError) -> Self {
        StorageError::unavailable(err.to_string(), err)
    }
}
