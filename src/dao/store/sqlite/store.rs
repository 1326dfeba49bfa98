use std::sync::{Arc, Mutex};

use futures::future::BoxFuture;
use rusqlite::{Connection, OpenFlags, OptionalExtension, Row, Transaction, params};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use tokio::task;

use super::{
    config::SqliteConfig,
    error::{SqliteDaoError, SqliteResult},
};
use crate::dao::{
    models::{
        NewSaveEntity, NewScoreEntity, Partition, PlayerBestEntity, PlayerRankEntity,
        RankedScoreEntity, SaveEntity, ScoreEntity,
    },
    rank::dense_rank,
    store::{DataStore, LeaderboardQuery, SaveStore, ScoreStore},
    storage::StorageResult,
};

/// SQLite-backed store for score submissions and cloud saves.
///
/// A single connection is shared behind a mutex; every operation runs on the
/// blocking thread pool so the async callers are never stalled by disk I/O.
/// Multi-statement reads and writes are wrapped in transactions, so callers
/// observe either the pre-write or post-write state in full.
#[derive(Clone)]
pub struct SqliteDataStore {
    connection: Arc<Mutex<Connection>>,
}

impl SqliteDataStore {
    /// Open (and create if needed) the database, applying pragmas and schema.
    pub fn open(config: SqliteConfig) -> SqliteResult<Self> {
        ensure_parent_dir(&config)?;

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let connection =
            Connection::open_with_flags(&config.path, flags).map_err(|source| {
                SqliteDaoError::Open {
                    path: config.path.clone(),
                    source,
                }
            })?;

        apply_pragmas(&connection, &config)?;
        initialize_schema(&connection)?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Run a closure against the shared connection on the blocking pool.
    async fn with_connection<T, F>(&self, op: F) -> SqliteResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Connection) -> SqliteResult<T> + Send + 'static,
    {
        let connection = Arc::clone(&self.connection);
        task::spawn_blocking(move || {
            let mut guard = connection.lock().map_err(|_| SqliteDaoError::Poisoned)?;
            op(&mut guard)
        })
        .await
        .map_err(|_| SqliteDaoError::Worker)?
    }

    async fn insert_score(&self, score: NewScoreEntity) -> SqliteResult<i64> {
        let created_at = now_rfc3339();
        self.with_connection(move |connection| {
            connection
                .execute(
                    "INSERT INTO scores (player_id, player_name, mode, level_index, score, \
                     kills, level, time, achieved_at, created_at) \
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        score.player_id,
                        score.player_name,
                        score.mode,
                        score.level_index,
                        score.score,
                        score.kills,
                        score.level,
                        score.time,
                        score.achieved_at,
                        created_at,
                    ],
                )
                .map_err(|source| SqliteDaoError::query("insert score", source))?;
            Ok(connection.last_insert_rowid())
        })
        .await
    }

    async fn leaderboard_page(
        &self,
        query: LeaderboardQuery,
    ) -> SqliteResult<Vec<RankedScoreEntity>> {
        self.with_connection(move |connection| {
            let tx = connection
                .transaction()
                .map_err(|source| SqliteDaoError::query("begin leaderboard read", source))?;

            let snapshot = partition_scores(&tx, &query.partition)?;
            let page = leaderboard_rows(&tx, &query)?;

            tx.commit()
                .map_err(|source| SqliteDaoError::query("finish leaderboard read", source))?;

            Ok(page
                .into_iter()
                .map(|entry| RankedScoreEntity {
                    rank: dense_rank(entry.score, &snapshot),
                    entry,
                })
                .collect())
        })
        .await
    }

    async fn player_bests(&self, player_id: String) -> SqliteResult<Vec<PlayerBestEntity>> {
        self.with_connection(move |connection| {
            let mut statement = connection
                .prepare(
                    "SELECT mode, level_index, MAX(score), MAX(kills), MAX(level), MIN(time) \
                     FROM scores WHERE player_id = ?1 \
                     GROUP BY mode, level_index \
                     ORDER BY mode, level_index",
                )
                .map_err(|source| SqliteDaoError::query("prepare player bests", source))?;

            let rows = statement
                .query_map(params![player_id], |row| {
                    Ok(PlayerBestEntity {
                        mode: row.get(0)?,
                        level_index: row.get(1)?,
                        best_score: row.get(2)?,
                        best_kills: row.get(3)?,
                        best_level: row.get(4)?,
                        best_time: row.get(5)?,
                    })
                })
                .map_err(|source| SqliteDaoError::query("query player bests", source))?
                .collect::<Result<Vec<_>, _>>()
                .map_err(|source| SqliteDaoError::query("read player bests", source))?;

            Ok(rows)
        })
        .await
    }

    async fn player_rank(
        &self,
        player_id: String,
        partition: Partition,
    ) -> SqliteResult<Option<PlayerRankEntity>> {
        self.with_connection(move |connection| {
            let tx = connection
                .transaction()
                .map_err(|source| SqliteDaoError::query("begin rank read", source))?;

            let best = player_best_score(&tx, &player_id, &partition)?;
            let result = match best {
                None => None,
                Some(score) => {
                    let snapshot = partition_scores(&tx, &partition)?;
                    Some(PlayerRankEntity {
                        rank: dense_rank(score, &snapshot),
                        score,
                    })
                }
            };

            tx.commit()
                .map_err(|source| SqliteDaoError::query("finish rank read", source))?;
            Ok(result)
        })
        .await
    }

    async fn upsert_save(&self, save: NewSaveEntity) -> SqliteResult<()> {
        let updated_at = now_rfc3339();
        let data_text = save.data.to_string();
        self.with_connection(move |connection| {
            connection
                .execute(
                    "INSERT INTO saves (player_id, data, checksum, updated_at) \
                     VALUES (?1, ?2, ?3, ?4) \
                     ON CONFLICT(player_id) DO UPDATE SET \
                     data = excluded.data, \
                     checksum = excluded.checksum, \
                     updated_at = excluded.updated_at",
                    params![save.player_id, data_text, save.checksum, updated_at],
                )
                .map_err(|source| SqliteDaoError::query("upsert save", source))?;
            Ok(())
        })
        .await
    }

    async fn find_save(&self, player_id: String) -> SqliteResult<Option<SaveEntity>> {
        self.with_connection(move |connection| {
            let row = connection
                .query_row(
                    "SELECT data, checksum, updated_at FROM saves WHERE player_id = ?1",
                    params![player_id],
                    |row| {
                        let data: String = row.get(0)?;
                        let checksum: String = row.get(1)?;
                        let updated_at: String = row.get(2)?;
                        Ok((data, checksum, updated_at))
                    },
                )
                .optional()
                .map_err(|source| SqliteDaoError::query("load save", source))?;

            let Some((data_text, checksum, updated_at)) = row else {
                return Ok(None);
            };

            let data = serde_json::from_str(&data_text).map_err(|source| {
                SqliteDaoError::DecodeSave {
                    player_id: player_id.clone(),
                    source,
                }
            })?;

            Ok(Some(SaveEntity {
                player_id,
                data,
                checksum,
                updated_at,
            }))
        })
        .await
    }

    async fn delete_save(&self, player_id: String) -> SqliteResult<()> {
        self.with_connection(move |connection| {
            // Deleting a missing row is a no-op, which keeps deletes idempotent.
            connection
                .execute("DELETE FROM saves WHERE player_id = ?1", params![player_id])
                .map_err(|source| SqliteDaoError::query("delete save", source))?;
            Ok(())
        })
        .await
    }

    async fn ping(&self) -> SqliteResult<()> {
        self.with_connection(|connection| {
            connection
                .query_row("SELECT 1", [], |_| Ok(()))
                .map_err(|source| SqliteDaoError::query("ping database", source))
        })
        .await
    }
}

impl ScoreStore for SqliteDataStore {
    fn submit_score(&self, score: NewScoreEntity) -> BoxFuture<'static, StorageResult<i64>> {
        let store = self.clone();
        Box::pin(async move { store.insert_score(score).await.map_err(Into::into) })
    }

    fn leaderboard(
        &self,
        query: LeaderboardQuery,
    ) -> BoxFuture<'static, StorageResult<Vec<RankedScoreEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.leaderboard_page(query).await.map_err(Into::into) })
    }

    fn player_bests(
        &self,
        player_id: String,
    ) -> BoxFuture<'static, StorageResult<Vec<PlayerBestEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.player_bests(player_id).await.map_err(Into::into) })
    }

    fn player_rank(
        &self,
        player_id: String,
        partition: Partition,
    ) -> BoxFuture<'static, StorageResult<Option<PlayerRankEntity>>> {
        let store = self.clone();
        Box::pin(async move {
            store
                .player_rank(player_id, partition)
                .await
                .map_err(Into::into)
        })
    }
}

impl SaveStore for SqliteDataStore {
    fn upsert_save(&self, save: NewSaveEntity) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.upsert_save(save).await.map_err(Into::into) })
    }

    fn find_save(
        &self,
        player_id: String,
    ) -> BoxFuture<'static, StorageResult<Option<SaveEntity>>> {
        let store = self.clone();
        Box::pin(async move { store.find_save(player_id).await.map_err(Into::into) })
    }

    fn delete_save(&self, player_id: String) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.delete_save(player_id).await.map_err(Into::into) })
    }
}

impl DataStore for SqliteDataStore {
    fn health_check(&self) -> BoxFuture<'static, StorageResult<()>> {
        let store = self.clone();
        Box::pin(async move { store.ping().await.map_err(Into::into) })
    }
}

/// Ensure the directory that should hold the database file exists.
fn ensure_parent_dir(config: &SqliteConfig) -> SqliteResult<()> {
    if let Some(parent) = config.path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| SqliteDaoError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Apply the pragmas required for durability before the first query.
fn apply_pragmas(connection: &Connection, config: &SqliteConfig) -> SqliteResult<()> {
    connection
        .execute_batch(
            "PRAGMA journal_mode = wal; \
             PRAGMA synchronous = full; \
             PRAGMA foreign_keys = ON;",
        )
        .map_err(|source| SqliteDaoError::Schema { source })?;
    connection
        .busy_timeout(std::time::Duration::from_millis(config.busy_timeout_ms))
        .map_err(|source| SqliteDaoError::Schema { source })?;
    Ok(())
}

/// Create the score and save tables along with their query indexes.
fn initialize_schema(connection: &Connection) -> SqliteResult<()> {
    connection
        .execute_batch(
            "CREATE TABLE IF NOT EXISTS scores (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                player_id TEXT NOT NULL,
                player_name TEXT NOT NULL,
                mode TEXT NOT NULL,
                level_index INTEGER NOT NULL DEFAULT 0,
                score INTEGER NOT NULL,
                kills INTEGER NOT NULL,
                level INTEGER NOT NULL,
                time INTEGER NOT NULL,
                achieved_at TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS saves (
                player_id TEXT PRIMARY KEY,
                data TEXT NOT NULL,
                checksum TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_scores_mode_level
                ON scores (mode, level_index, score DESC);
            CREATE INDEX IF NOT EXISTS idx_scores_player
                ON scores (player_id);",
        )
        .map_err(|source| SqliteDaoError::Schema { source })
}

/// Every score in the partition, used as the dense-rank snapshot.
///
/// Campaign boards are keyed by (mode, level_index); any other mode keeps a
/// single board and the level filter is skipped on purpose.
fn partition_scores(tx: &Transaction<'_>, partition: &Partition) -> SqliteResult<Vec<i64>> {
    if partition.uses_level_index() {
        let mut statement = tx
            .prepare("SELECT score FROM scores WHERE mode = ?1 AND level_index = ?2")
            .map_err(|source| SqliteDaoError::query("prepare partition snapshot", source))?;
        let scores = statement
            .query_map(params![partition.mode, partition.level_index], |row| {
                row.get(0)
            })
            .map_err(|source| SqliteDaoError::query("query partition snapshot", source))?
            .collect::<Result<Vec<i64>, _>>()
            .map_err(|source| SqliteDaoError::query("read partition snapshot", source))?;
        Ok(scores)
    } else {
        let mut statement = tx
            .prepare("SELECT score FROM scores WHERE mode = ?1")
            .map_err(|source| SqliteDaoError::query("prepare partition snapshot", source))?;
        let scores = statement
            .query_map(params![partition.mode], |row| row.get(0))
            .map_err(|source| SqliteDaoError::query("query partition snapshot", source))?
            .collect::<Result<Vec<i64>, _>>()
            .map_err(|source| SqliteDaoError::query("read partition snapshot", source))?;
        Ok(scores)
    }
}

const SCORE_COLUMNS: &str =
    "id, player_id, player_name, mode, level_index, score, kills, level, time, achieved_at, \
     created_at";

/// One page of the partition's board, score-descending, insertion order on ties.
fn leaderboard_rows(
    tx: &Transaction<'_>,
    query: &LeaderboardQuery,
) -> SqliteResult<Vec<ScoreEntity>> {
    if query.partition.uses_level_index() {
        let sql = format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE mode = ?1 AND level_index = ?2 \
             ORDER BY score DESC, id ASC LIMIT ?3 OFFSET ?4"
        );
        let mut statement = tx
            .prepare(&sql)
            .map_err(|source| SqliteDaoError::query("prepare leaderboard page", source))?;
        let rows = statement
            .query_map(
                params![
                    query.partition.mode,
                    query.partition.level_index,
                    query.limit,
                    query.offset
                ],
                score_from_row,
            )
            .map_err(|source| SqliteDaoError::query("query leaderboard page", source))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SqliteDaoError::query("read leaderboard page", source))?;
        Ok(rows)
    } else {
        let sql = format!(
            "SELECT {SCORE_COLUMNS} FROM scores WHERE mode = ?1 \
             ORDER BY score DESC, id ASC LIMIT ?2 OFFSET ?3"
        );
        let mut statement = tx
            .prepare(&sql)
            .map_err(|source| SqliteDaoError::query("prepare leaderboard page", source))?;
        let rows = statement
            .query_map(
                params![query.partition.mode, query.limit, query.offset],
                score_from_row,
            )
            .map_err(|source| SqliteDaoError::query("query leaderboard page", source))?
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| SqliteDaoError::query("read leaderboard page", source))?;
        Ok(rows)
    }
}

/// Highest score the player has posted in the partition, if any.
fn player_best_score(
    tx: &Transaction<'_>,
    player_id: &str,
    partition: &Partition,
) -> SqliteResult<Option<i64>> {
    let best = if partition.uses_level_index() {
        tx.query_row(
            "SELECT MAX(score) FROM scores \
             WHERE player_id = ?1 AND mode = ?2 AND level_index = ?3",
            params![player_id, partition.mode, partition.level_index],
            |row| row.get::<_, Option<i64>>(0),
        )
    } else {
        tx.query_row(
            "SELECT MAX(score) FROM scores WHERE player_id = ?1 AND mode = ?2",
            params![player_id, partition.mode],
            |row| row.get::<_, Option<i64>>(0),
        )
    }
    .map_err(|source| SqliteDaoError::query("query player best score", source))?;
    Ok(best)
}

fn score_from_row(row: &Row<'_>) -> rusqlite::Result<ScoreEntity> {
    Ok(ScoreEntity {
        id: row.get(0)?,
        player_id: row.get(1)?,
        player_name: row.get(2)?,
        mode: row.get(3)?,
        level_index: row.get(4)?,
        score: row.get(5)?,
        kills: row.get(6)?,
        level: row.get(7)?,
        time: row.get(8)?,
        achieved_at: row.get(9)?,
        created_at: row.get(10)?,
    })
}

/// Current wall-clock time as an RFC 3339 string.
fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "invalid-timestamp".into())
}
