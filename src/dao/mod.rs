/// Database model definitions.
pub mod models;
/// Dense-rank computation over partition snapshots.
pub mod rank;
/// Score and save storage operations.
pub mod store;
/// Storage abstraction layer for database operations.
pub mod storage;
