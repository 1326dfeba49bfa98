use axum::{
    Json, Router,
    extract::{Path, State},
    middleware,
    routing::{delete, get, post},
};

use crate::{
    dto::save::{DeleteSaveResponse, LoadSaveResponse, SaveGameRequest, SaveGameResponse},
    error::AppError,
    routes::require_api_key,
    services::save_service,
    state::SharedState,
};

/// Routes handling cloud save storage.
pub fn router(state: SharedState) -> Router<SharedState> {
    let protected = Router::new()
        .route("/saves/save", post(save_game))
        .route("/saves/delete/{player_id}", delete(delete_save))
        .route_layer(middleware::from_fn_with_state(state, require_api_key));

    Router::new()
        .route("/saves/load/{player_id}", get(load_game))
        .merge(protected)
}

/// Replace a player's cloud save after verifying its checksum.
#[utoipa::path(
    post,
    path = "/api/saves/save",
    tag = "saves",
    params(("X-API-Key" = String, Header, description = "Shared API key required for writes")),
    request_body = SaveGameRequest,
    responses(
        (status = 200, description = "Save written", body = SaveGameResponse),
        (status = 400, description = "Malformed payload or checksum mismatch"),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn save_game(
    State(state): State<SharedState>,
    Json(payload): Json<SaveGameRequest>,
) -> Result<Json<SaveGameResponse>, AppError> {
    let response = save_service::save_game(&state, payload).await?;
    Ok(Json(response))
}

/// Load a player's current cloud save.
#[utoipa::path(
    get,
    path = "/api/saves/load/{player_id}",
    tag = "saves",
    params(("player_id" = String, Path, description = "Player whose save is requested")),
    responses(
        (status = 200, description = "Current save", body = LoadSaveResponse),
        (status = 404, description = "No save exists for this player")
    )
)]
pub async fn load_game(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
) -> Result<Json<LoadSaveResponse>, AppError> {
    let response = save_service::load_game(&state, player_id).await?;
    Ok(Json(response))
}

/// Delete a player's cloud save; succeeds whether or not one exists.
#[utoipa::path(
    delete,
    path = "/api/saves/delete/{player_id}",
    tag = "saves",
    params(
        ("X-API-Key" = String, Header, description = "Shared API key required for writes"),
        ("player_id" = String, Path, description = "Player whose save is deleted")
    ),
    responses(
        (status = 200, description = "Save removed (or was already absent)", body = DeleteSaveResponse),
        (status = 401, description = "Missing or invalid API key")
    )
)]
pub async fn delete_save(
    State(state): State<SharedState>,
    Path(player_id): Path<String>,
) -> Result<Json<DeleteSaveResponse>, AppError> {
    let response = save_service::delete_save(&state, player_id).await?;
    Ok(Json(response))
}
