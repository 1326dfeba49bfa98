use serde_json::Value;

/// Mode whose leaderboards are split per level. Every other mode keeps a
/// single global board regardless of the submitted `level_index`.
pub const CAMPAIGN_MODE: &str = "campaign";

/// Key space within which scores are ranked against each other.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Partition {
    /// Game mode, `endless` or `campaign`. Unknown values are accepted and
    /// form their own global board.
    pub mode: String,
    /// Level sub-partition, meaningful only for `campaign`.
    pub level_index: i64,
}

impl Partition {
    /// Build a partition key from caller-supplied mode and level.
    pub fn new(mode: impl Into<String>, level_index: i64) -> Self {
        Self {
            mode: mode.into(),
            level_index,
        }
    }

    /// Whether `level_index` participates in partition selection.
    ///
    /// Only `campaign` boards are split per level; `endless` (and any future
    /// mode) ignores the level and ranks everything together.
    pub fn uses_level_index(&self) -> bool {
        self.mode == CAMPAIGN_MODE
    }
}

/// Score submission before the store assigns its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewScoreEntity {
    /// Opaque caller-supplied player identifier.
    pub player_id: String,
    /// Display name captured at submission time.
    pub player_name: String,
    /// Game mode the run was played in.
    pub mode: String,
    /// Level sub-partition, 0 for endless runs.
    pub level_index: i64,
    /// Final score of the run.
    pub score: i64,
    /// Kills achieved during the run.
    pub kills: i64,
    /// Character level reached during the run.
    pub level: i64,
    /// Run duration in seconds.
    pub time: i64,
    /// Caller-supplied ISO-8601 timestamp of the run, stored as given.
    pub achieved_at: String,
}

/// Immutable score row as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEntity {
    /// Monotonically increasing identifier assigned on insert.
    pub id: i64,
    /// Opaque caller-supplied player identifier.
    pub player_id: String,
    /// Display name captured at submission time.
    pub player_name: String,
    /// Game mode the run was played in.
    pub mode: String,
    /// Level sub-partition, 0 for endless runs.
    pub level_index: i64,
    /// Final score of the run.
    pub score: i64,
    /// Kills achieved during the run.
    pub kills: i64,
    /// Character level reached during the run.
    pub level: i64,
    /// Run duration in seconds.
    pub time: i64,
    /// Caller-supplied ISO-8601 timestamp of the run.
    pub achieved_at: String,
    /// Server-assigned insertion timestamp (RFC 3339).
    pub created_at: String,
}

/// Leaderboard row paired with its dense rank within the whole partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedScoreEntity {
    /// Dense rank against every record of the partition, not just the page.
    pub rank: i64,
    /// The underlying score row.
    pub entry: ScoreEntity,
}

/// Best-of-each-field summary for one of a player's partitions.
///
/// The fields are maximized (minimized for `best_time`) independently, so they
/// need not come from the same underlying run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerBestEntity {
    /// Game mode of the partition.
    pub mode: String,
    /// Level sub-partition.
    pub level_index: i64,
    /// Highest score across the player's runs in the partition.
    pub best_score: i64,
    /// Highest kill count across the player's runs in the partition.
    pub best_kills: i64,
    /// Highest character level across the player's runs in the partition.
    pub best_level: i64,
    /// Shortest run duration across the player's runs in the partition.
    pub best_time: i64,
}

/// A player's standing within one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerRankEntity {
    /// Dense rank of the player's best score.
    pub rank: i64,
    /// The best score that rank was computed for.
    pub score: i64,
}

/// Save payload before the store stamps `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSaveEntity {
    /// Unique key, at most one save per player.
    pub player_id: String,
    /// Authoritative game state, opaque to the store.
    pub data: Value,
    /// Caller-supplied digest, verified by the service layer before the write.
    pub checksum: String,
}

/// Save row as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveEntity {
    /// Unique key, at most one save per player.
    pub player_id: String,
    /// Authoritative game state, opaque to the store.
    pub data: Value,
    /// Digest recorded at write time; not re-verified on read.
    pub checksum: String,
    /// Server-assigned timestamp of the last successful write (RFC 3339).
    pub updated_at: String,
}
