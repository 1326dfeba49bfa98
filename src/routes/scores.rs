use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{get, post},
};

use crate::{
    dto::score::{
        LeaderboardEntry, LeaderboardParams, PlayerRankResponse, PlayerScoresResponse, RankParams,
        SubmitScoreRequest, SubmitScoreResponse,
    },
    error::AppError,
    routes::require_api_key,
    services::score_service,
    state::SharedState,
};

/// Routes handling leaderboard submissions and queries.
pub fn router(state: SharedState) -> Router<SharedState> {
    let protected = Router::new()
        .route("/scores/submit", post(submit_score))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .route("/scores/leaderboard", get(get_leaderboard))
        .route("/scores/player/{player_id}", get(get_player_scores))
        .route("/scores/rank/{player_id}", get(get_player_rank))
        .merge(protected)
}

/// Append a run to the leaderboard.
#[utoipa::path(
    post,
    path = "/api/scores/submit",
    tag = "scores",
    params(("X-API-Key" = String, Header, description = "Shared API key required for writes")),
    request_body = SubmitScoreRequest,
    responses(
        (status = 200, description = "Score recorded", body = SubmitScoreResponse),
        (status = 400, description = "Malformed submission"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn submit_score(
    State(state): State<SharedState>,
    Json(payload): Json<SubmitScoreRequest>,
) -> Result<Json<SubmitScoreResponse>, AppError> {
    let response = score_service::submit_score(&state, payload).await?;
    Ok(Json(response))
}

/// Read a page of the requested leaderboard.
#[utoipa::path(
    get,
    path = "/api/scores/leaderboard",
    tag = "scores",
    params(LeaderboardParams),
    responses(
        (status = 200, description = "Ranked page of the board", body = [LeaderboardEntry])
    )
)]
pub async fn get_leaderboard(
    State(state): State<SharedState>,
    Query(params): Query<LeaderboardParams>,
) -> Result<Json<Vec<LeaderboardEntry>>, AppError> {
    let rows = score_service::leaderboard(&state, params).await?;
    Ok(Json(rows))
}

/// Best stats a player has posted, grouped by mode and level.
#[utoipa::path(
    get,
    path = "/api/scores/player/{player_id}",
    tag = "scores",
    params(("player_id" = String, Path, description = "Player whose bests are requested")),
    responses(
        (status = 200, description = "Per-partition bests", body = PlayerScoresResponse)
    )
)]
pub async fn get_player_scores(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerScoresResponse>, AppError> {
    let response = score_service::player_scores(&state, player_id).await?;
    Ok(Json(response))
}

/// A player's rank within a mode/level partition.
#[utoipa::path(
    get,
    path = "/api/scores/rank/{player_id}",
    tag = "scores",
    params(
        ("player_id" = String, Path, description = "Player whose rank is requested"),
        RankParams
    ),
    responses(
        (status = 200, description = "Rank and best score, null when absent", body = PlayerRankResponse)
    )
)]
pub async fn get_player_rank(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
    Query(params): Query<RankParams>,
) -> Result<Json<PlayerRankResponse>, AppError> {
    let response = score_service::player_rank(&state, player_id, params).await?;
    Ok(Json(response))
}
