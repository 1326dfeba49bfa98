//! Service-level tests for score submission and the rank query surface.

use std::sync::Arc;

use pixel_survivor_back::config::AppConfig;
use pixel_survivor_back::dao::store::sqlite::{SqliteConfig, SqliteDataStore};
use pixel_survivor_back::dto::score::{LeaderboardParams, RankParams, SubmitScoreRequest};
use pixel_survivor_back::error::ServiceError;
use pixel_survivor_back::services::score_service;
use pixel_survivor_back::state::{AppState, SharedState};
use tempfile::TempDir;

fn test_state(dir: &TempDir) -> SharedState {
    let db_path = dir.path().join("scores.db");
    let store = SqliteDataStore::open(SqliteConfig::new(db_path.clone())).expect("open store");
    let config = AppConfig::new(db_path, "test-key".to_string());
    AppState::new(Arc::new(store), config)
}

fn submission(player: &str, mode: &str, score: i64) -> SubmitScoreRequest {
    SubmitScoreRequest {
        player_id: player.to_string(),
        player_name: player.to_uppercase(),
        mode: mode.to_string(),
        level_index: 0,
        score,
        kills: 12,
        level: 3,
        time: 420,
        achieved_at: "2024-06-01T12:00:00Z".to_string(),
    }
}

fn endless_page(limit: i64, offset: i64) -> LeaderboardParams {
    LeaderboardParams {
        mode: "endless".to_string(),
        level_index: 0,
        limit,
        offset,
    }
}

#[tokio::test]
async fn submit_and_read_back_ranked_board() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_state(&dir);

    score_service::submit_score(&state, submission("alice", "endless", 100))
        .await
        .unwrap();
    score_service::submit_score(&state, submission("bob", "endless", 250))
        .await
        .unwrap();
    score_service::submit_score(&state, submission("carol", "endless", 250))
        .await
        .unwrap();

    let board = score_service::leaderboard(&state, endless_page(100, 0)).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].rank, 1);
    assert_eq!(board[2].rank, 3);
    assert_eq!(board[2].player_id, "alice");

    let rank = score_service::player_rank(
        &state,
        "alice".to_string(),
        RankParams {
            mode: "endless".to_string(),
            level_index: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(rank.rank, Some(3));
    assert_eq!(rank.score, Some(100));
}

#[tokio::test]
async fn player_rank_is_null_without_records() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_state(&dir);

    let rank = score_service::player_rank(
        &state,
        "ghost".to_string(),
        RankParams {
            mode: "endless".to_string(),
            level_index: 0,
        },
    )
    .await
    .unwrap();
    assert_eq!(rank.rank, None);
    assert_eq!(rank.score, None);
    assert_eq!(rank.player_id, "ghost");
}

#[tokio::test]
async fn malformed_submission_is_rejected_before_storage() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_state(&dir);

    let mut bad = submission("alice", "endless", 100);
    bad.player_name = String::new();
    let err = score_service::submit_score(&state, bad).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let mut negative = submission("alice", "endless", 100);
    negative.score = -1;
    let err = score_service::submit_score(&state, negative).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));

    let board = score_service::leaderboard(&state, endless_page(100, 0)).await.unwrap();
    assert!(board.is_empty(), "rejected submissions leave no trace");
}

#[tokio::test]
async fn negative_pagination_is_invalid() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_state(&dir);

    let err = score_service::leaderboard(&state, endless_page(-1, 0)).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidInput(_)));
}

#[tokio::test]
async fn player_scores_group_by_partition() {
    let dir = TempDir::new().expect("tempdir");
    let state = test_state(&dir);

    score_service::submit_score(&state, submission("alice", "endless", 100))
        .await
        .unwrap();
    let mut campaign = submission("alice", "campaign", 70);
    campaign.level_index = 2;
    score_service::submit_score(&state, campaign).await.unwrap();

    let scores = score_service::player_scores(&state, "alice".to_string()).await.unwrap();
    assert_eq!(scores.player_id, "alice");
    assert_eq!(scores.best_scores.len(), 2);
    assert!(scores.best_scores.iter().any(|b| b.mode == "campaign" && b.level_index == 2));
}
