use validator::Validate;

use crate::{
    dao::{
        models::{NewScoreEntity, Partition},
        store::LeaderboardQuery,
    },
    dto::score::{
        LeaderboardEntry, LeaderboardParams, PlayerRankResponse, PlayerScoresResponse, RankParams,
        SubmitScoreRequest, SubmitScoreResponse,
    },
    error::ServiceError,
    state::SharedState,
};

/// Append a run to the leaderboard, assigning its record id.
///
/// Fields are checked for shape only; the store trusts the caller for
/// game-semantic correctness, and unknown modes are stored as given.
pub async fn submit_score(
    state: &SharedState,
    request: SubmitScoreRequest,
) -> Result<SubmitScoreResponse, ServiceError> {
    request.validate()?;

    let entity = NewScoreEntity {
        player_id: request.player_id,
        player_name: request.player_name,
        mode: request.mode,
        level_index: request.level_index,
        score: request.score,
        kills: request.kills,
        level: request.level,
        time: request.time,
        achieved_at: request.achieved_at,
    };

    let score_id = state.store().submit_score(entity).await?;
    Ok(SubmitScoreResponse {
        success: true,
        score_id,
    })
}

/// Read a page of a partition's board with whole-partition dense ranks.
pub async fn leaderboard(
    state: &SharedState,
    params: LeaderboardParams,
) -> Result<Vec<LeaderboardEntry>, ServiceError> {
    if params.limit < 0 || params.offset < 0 {
        return Err(ServiceError::InvalidInput(
            "limit and offset must be non-negative".into(),
        ));
    }

    let query = LeaderboardQuery {
        partition: Partition::new(params.mode, params.level_index),
        limit: params.limit,
        offset: params.offset,
    };

    let rows = state.store().leaderboard(query).await?;
    Ok(rows.into_iter().map(Into::into).collect())
}

/// Best stats a player has posted, grouped by partition.
///
/// An empty `best_scores` list simply means the player has no records.
pub async fn player_scores(
    state: &SharedState,
    player_id: String,
) -> Result<PlayerScoresResponse, ServiceError> {
    let bests = state.store().player_bests(player_id.clone()).await?;
    Ok(PlayerScoresResponse {
        player_id,
        best_scores: bests.into_iter().map(Into::into).collect(),
    })
}

/// A player's standing in a partition; `rank`/`score` stay null when the
/// player has no record there.
pub async fn player_rank(
    state: &SharedState,
    player_id: String,
    params: RankParams,
) -> Result<PlayerRankResponse, ServiceError> {
    let partition = Partition::new(params.mode.clone(), params.level_index);
    let standing = state
        .store()
        .player_rank(player_id.clone(), partition)
        .await?;

    Ok(PlayerRankResponse {
        player_id,
        mode: params.mode,
        level_index: params.level_index,
        rank: standing.map(|entry| entry.rank),
        score: standing.map(|entry| entry.score),
    })
}
