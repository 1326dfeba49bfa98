use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the Pixel Survivor backend.
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::scores::submit_score,
        crate::routes::scores::get_leaderboard,
        crate::routes::scores::get_player_scores,
        crate::routes::scores::get_player_rank,
        crate::routes::saves::save_game,
        crate::routes::saves::load_game,
        crate::routes::saves::delete_save,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::score::SubmitScoreRequest,
            crate::dto::score::SubmitScoreResponse,
            crate::dto::score::LeaderboardEntry,
            crate::dto::score::PartitionBests,
            crate::dto::score::PlayerScoresResponse,
            crate::dto::score::PlayerRankResponse,
            crate::dto::save::SaveGameRequest,
            crate::dto::save::SaveGameResponse,
            crate::dto::save::LoadSaveResponse,
            crate::dto::save::DeleteSaveResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "scores", description = "Leaderboard submissions and rank queries"),
        (name = "saves", description = "Cloud save storage with integrity verification"),
    )
)]
pub struct ApiDoc;
