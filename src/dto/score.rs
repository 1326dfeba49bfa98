use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::dao::models::{PlayerBestEntity, RankedScoreEntity};

fn default_mode() -> String {
    "endless".to_string()
}

fn default_limit() -> i64 {
    100
}

/// Payload used to append a run to the leaderboard.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitScoreRequest {
    /// Opaque player identifier chosen by the client.
    #[validate(length(min = 1))]
    pub player_id: String,
    /// Display name shown on the board.
    #[validate(length(min = 1))]
    pub player_name: String,
    /// Game mode, `endless` or `campaign`; unknown modes are stored as given.
    #[validate(length(min = 1))]
    pub mode: String,
    /// Level sub-partition, only meaningful for `campaign`.
    #[serde(default)]
    pub level_index: i64,
    /// Final score of the run.
    #[validate(range(min = 0))]
    pub score: i64,
    /// Kills achieved during the run.
    #[validate(range(min = 0))]
    pub kills: i64,
    /// Character level reached during the run.
    #[validate(range(min = 0))]
    pub level: i64,
    /// Run duration in seconds.
    #[validate(range(min = 0))]
    pub time: i64,
    /// ISO-8601 timestamp of the run, opaque to the backend.
    #[validate(length(min = 1))]
    pub achieved_at: String,
}

/// Acknowledgement returned after a score submission.
#[derive(Debug, Serialize, ToSchema)]
pub struct SubmitScoreResponse {
    /// Always true when the submission was accepted.
    pub success: bool,
    /// Identifier assigned to the appended record.
    pub score_id: i64,
}

/// Query parameters selecting a leaderboard page.
#[derive(Debug, Deserialize, IntoParams)]
pub struct LeaderboardParams {
    /// Game mode of the board, defaults to `endless`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Level of the campaign board; ignored for any other mode.
    #[serde(default)]
    pub level_index: i64,
    /// Maximum number of rows to return.
    #[serde(default = "default_limit")]
    pub limit: i64,
    /// Number of rows to skip from the top of the board.
    #[serde(default)]
    pub offset: i64,
}

/// One leaderboard row along with its whole-partition rank.
#[derive(Debug, Serialize, ToSchema)]
pub struct LeaderboardEntry {
    /// Dense rank across the whole partition, independent of pagination.
    pub rank: i64,
    /// Opaque player identifier.
    pub player_id: String,
    /// Display name captured at submission time.
    pub player_name: String,
    /// Game mode the run was played in.
    pub mode: String,
    /// Level sub-partition of the run.
    pub level_index: i64,
    /// Final score of the run.
    pub score: i64,
    /// Kills achieved during the run.
    pub kills: i64,
    /// Character level reached during the run.
    pub level: i64,
    /// Run duration in seconds.
    pub time: i64,
    /// ISO-8601 timestamp of the run.
    pub achieved_at: String,
}

impl From<RankedScoreEntity> for LeaderboardEntry {
    fn from(value: RankedScoreEntity) -> Self {
        let RankedScoreEntity { rank, entry } = value;
        Self {
            rank,
            player_id: entry.player_id,
            player_name: entry.player_name,
            mode: entry.mode,
            level_index: entry.level_index,
            score: entry.score,
            kills: entry.kills,
            level: entry.level,
            time: entry.time,
            achieved_at: entry.achieved_at,
        }
    }
}

/// Best-of-each-field summary for one of a player's partitions.
#[derive(Debug, Serialize, ToSchema)]
pub struct PartitionBests {
    /// Game mode of the partition.
    pub mode: String,
    /// Level sub-partition.
    pub level_index: i64,
    /// Highest score posted in the partition.
    pub best_score: i64,
    /// Highest kill count posted in the partition.
    pub best_kills: i64,
    /// Highest character level posted in the partition.
    pub best_level: i64,
    /// Shortest run duration posted in the partition.
    pub best_time: i64,
}

impl From<PlayerBestEntity> for PartitionBests {
    fn from(value: PlayerBestEntity) -> Self {
        Self {
            mode: value.mode,
            level_index: value.level_index,
            best_score: value.best_score,
            best_kills: value.best_kills,
            best_level: value.best_level,
            best_time: value.best_time,
        }
    }
}

/// A player's best stats grouped by partition.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerScoresResponse {
    /// Player the summaries belong to.
    pub player_id: String,
    /// One entry per (mode, level_index) the player has posted in.
    pub best_scores: Vec<PartitionBests>,
}

/// Query parameters selecting the partition for a rank lookup.
#[derive(Debug, Deserialize, IntoParams)]
pub struct RankParams {
    /// Game mode of the board, defaults to `endless`.
    #[serde(default = "default_mode")]
    pub mode: String,
    /// Level of the campaign board; ignored for any other mode.
    #[serde(default)]
    pub level_index: i64,
}

/// A player's standing within a partition.
///
/// `rank` and `score` are null when the player has no record there, which is
/// distinct from holding rank 1.
#[derive(Debug, Serialize, ToSchema)]
pub struct PlayerRankResponse {
    /// Player the standing belongs to.
    pub player_id: String,
    /// Game mode the lookup ran against.
    pub mode: String,
    /// Level sub-partition the lookup ran against.
    pub level_index: i64,
    /// Dense rank of the player's best score, if any.
    pub rank: Option<i64>,
    /// The player's best score in the partition, if any.
    pub score: Option<i64>,
}
