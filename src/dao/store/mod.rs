/// SQLite-backed store implementation.
pub mod sqlite;

use futures::future::BoxFuture;

use crate::dao::{
    models::{
        NewSaveEntity, NewScoreEntity, Partition, PlayerBestEntity, PlayerRankEntity,
        RankedScoreEntity, SaveEntity,
    },
    storage::StorageResult,
};

/// Pagination window applied to a leaderboard read.
#[derive(Debug, Clone)]
pub struct LeaderboardQuery {
    /// Partition whose board is being read.
    pub partition: Partition,
    /// Maximum number of rows returned.
    pub limit: i64,
    /// Number of rows skipped from the top of the board.
    pub offset: i64,
}

/// Append-only persistence for ranked score submissions.
///
/// Records are immutable once inserted; there is no update or delete. Ranks
/// are derived fresh from current data on every read.
pub trait ScoreStore: Send + Sync {
    /// Append a submission, assigning its id and insertion timestamp.
    fn submit_score(&self, score: NewScoreEntity) -> BoxFuture<'static, StorageResult<i64>>;
    /// Read a page of the partition's board with whole-partition dense ranks.
    fn leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> BoxFuture<'static, StorageResult<Vec<RankedScoreEntity>>>;
    /// Best-of-each-field summaries of a player's runs, grouped by partition.
    fn player_bests(
        &self,
        player_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerBestEntity>>>;
    /// Rank and best score of a player within a partition, if they have one.
    fn player_rank(
        &self,
        player_id: String,
        partition: Partition,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerRankEntity>>>;
}

/// Whole-record save persistence keyed by player.
pub trait SaveStore: Send + Sync {
    /// Replace the player's save in full, stamping `updated_at`.
    fn upsert_save(&self, save: NewSaveEntity) -> BoxFuture<'static, StorageResult<()>>;
    /// Load the player's current save, if any.
    fn find_save(
        &self,
        player_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<SaveEntity>>>;
    /// Remove the player's save; removing a missing save succeeds.
    fn delete_save(&self, player_id: String) -> BoxFuture<'static, StorageResult<()>>;
}

/// Combined persistence surface handed to the application state.
pub trait DataStore: ScoreStore + SaveStore {
    /// Probe whether the backend can serve queries.
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>>;
}
