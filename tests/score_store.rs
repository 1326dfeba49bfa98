//! Conformance tests for the SQLite-backed score store: partition selection,
//! dense ranking, pagination, and append-only semantics.

use pixel_survivor_back::dao::models::{NewScoreEntity, Partition};
use pixel_survivor_back::dao::store::sqlite::{SqliteConfig, SqliteDataStore};
use pixel_survivor_back::dao::store::{LeaderboardQuery, ScoreStore};
use tempfile::TempDir;

fn open_store(dir: &TempDir) -> SqliteDataStore {
    let config = SqliteConfig::new(dir.path().join("scores.db"));
    SqliteDataStore::open(config).expect("open sqlite store")
}

fn run(player: &str, mode: &str, level_index: i64, score: i64) -> NewScoreEntity {
    NewScoreEntity {
        player_id: player.to_string(),
        player_name: player.to_uppercase(),
        mode: mode.to_string(),
        level_index,
        score,
        kills: score / 10,
        level: 1 + score / 100,
        time: 300,
        achieved_at: "2024-06-01T12:00:00Z".to_string(),
    }
}

fn page(mode: &str, level_index: i64) -> LeaderboardQuery {
    LeaderboardQuery {
        partition: Partition::new(mode, level_index),
        limit: 100,
        offset: 0,
    }
}

#[tokio::test]
async fn ties_share_rank_and_keep_insertion_order() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("alice", "endless", 0, 100)).await.unwrap();
    store.submit_score(run("bob", "endless", 0, 250)).await.unwrap();
    store.submit_score(run("carol", "endless", 0, 250)).await.unwrap();

    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    assert_eq!(board.len(), 3);
    assert_eq!(board[0].rank, 1);
    assert_eq!(board[1].rank, 1);
    assert_eq!(board[2].rank, 3);
    // Equal scores keep insertion order: bob submitted before carol.
    assert_eq!(board[0].entry.player_id, "bob");
    assert_eq!(board[1].entry.player_id, "carol");
    assert_eq!(board[2].entry.player_id, "alice");

    let standing = store
        .player_rank("alice".into(), Partition::new("endless", 0))
        .await
        .unwrap()
        .expect("alice has a record");
    assert_eq!(standing.rank, 3);
    assert_eq!(standing.score, 100);
}

#[tokio::test]
async fn missing_player_rank_is_none_not_zero() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("bob", "endless", 0, 250)).await.unwrap();

    let standing = store
        .player_rank("ghost".into(), Partition::new("endless", 0))
        .await
        .unwrap();
    assert!(standing.is_none());
}

#[tokio::test]
async fn submissions_append_and_assign_ascending_ids() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let mut ids = Vec::new();
    for score in [10, 20, 30, 40, 50] {
        ids.push(store.submit_score(run("dora", "endless", 0, score)).await.unwrap());
    }

    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));

    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    assert_eq!(board.len(), 5, "every submission remains a distinct record");
    // Earlier submissions are untouched by later ones.
    let lowest = board.last().unwrap();
    assert_eq!(lowest.entry.score, 10);
    assert_eq!(lowest.entry.id, ids[0]);
}

#[tokio::test]
async fn endless_board_ignores_level_index() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("alice", "endless", 0, 100)).await.unwrap();
    store.submit_score(run("bob", "endless", 7, 300)).await.unwrap();

    // One global endless board, whatever level_index the query carries.
    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].entry.player_id, "bob");

    let same_board = store.leaderboard(page("endless", 7)).await.unwrap();
    assert_eq!(same_board.len(), 2);
}

#[tokio::test]
async fn campaign_boards_split_per_level() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("alice", "campaign", 0, 100)).await.unwrap();
    store.submit_score(run("bob", "campaign", 1, 300)).await.unwrap();

    let level_zero = store.leaderboard(page("campaign", 0)).await.unwrap();
    assert_eq!(level_zero.len(), 1);
    assert_eq!(level_zero[0].entry.player_id, "alice");
    assert_eq!(level_zero[0].rank, 1);

    let level_one = store.leaderboard(page("campaign", 1)).await.unwrap();
    assert_eq!(level_one.len(), 1);
    assert_eq!(level_one[0].entry.player_id, "bob");
    assert_eq!(level_one[0].rank, 1);
}

#[tokio::test]
async fn unknown_modes_are_stored_and_form_their_own_board() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("alice", "hardcore", 0, 50)).await.unwrap();
    store.submit_score(run("bob", "endless", 0, 100)).await.unwrap();

    let board = store.leaderboard(page("hardcore", 0)).await.unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].entry.mode, "hardcore");
}

#[tokio::test]
async fn page_ranks_reflect_global_partition_standing() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    for (player, score) in [("a", 400), ("b", 300), ("c", 200), ("d", 100)] {
        store.submit_score(run(player, "endless", 0, score)).await.unwrap();
    }

    let query = LeaderboardQuery {
        partition: Partition::new("endless", 0),
        limit: 2,
        offset: 2,
    };
    let board = store.leaderboard(query).await.unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].entry.player_id, "c");
    assert_eq!(board[0].rank, 3, "rank counts the whole partition, not the page");
    assert_eq!(board[1].rank, 4);
}

#[tokio::test]
async fn empty_partition_yields_empty_page() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    assert!(board.is_empty());
}

#[tokio::test]
async fn player_bests_mix_fields_across_runs() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let mut first = run("alice", "endless", 0, 100);
    first.kills = 50;
    first.level = 9;
    first.time = 400;
    store.submit_score(first).await.unwrap();

    let mut second = run("alice", "endless", 0, 80);
    second.kills = 90;
    second.level = 4;
    second.time = 200;
    store.submit_score(second).await.unwrap();

    store.submit_score(run("alice", "campaign", 2, 60)).await.unwrap();

    let bests = store.player_bests("alice".into()).await.unwrap();
    assert_eq!(bests.len(), 2, "one summary per partition");

    let endless = bests.iter().find(|entry| entry.mode == "endless").unwrap();
    // Each field is best-of independently; they may come from different runs.
    assert_eq!(endless.best_score, 100);
    assert_eq!(endless.best_kills, 90);
    assert_eq!(endless.best_level, 9);
    assert_eq!(endless.best_time, 200);
}

#[tokio::test]
async fn player_bests_empty_for_unknown_player() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let bests = store.player_bests("ghost".into()).await.unwrap();
    assert!(bests.is_empty());
}

#[tokio::test]
async fn rank_uses_players_best_score() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    store.submit_score(run("alice", "endless", 0, 50)).await.unwrap();
    store.submit_score(run("alice", "endless", 0, 150)).await.unwrap();
    store.submit_score(run("bob", "endless", 0, 100)).await.unwrap();

    let standing = store
        .player_rank("alice".into(), Partition::new("endless", 0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(standing.score, 150);
    assert_eq!(standing.rank, 1);

    let bob = store
        .player_rank("bob".into(), Partition::new("endless", 0))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.rank, 2, "alice's lower run does not push bob further down");
}

#[tokio::test]
async fn concurrent_submissions_all_append() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let mut handles = Vec::new();
    for score in 0..32 {
        let store = store.clone();
        handles.push(tokio::spawn(async move {
            store.submit_score(run("swarm", "endless", 0, score)).await
        }));
    }
    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.expect("join submit task").unwrap());
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 32, "every submission got its own record id");

    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    assert_eq!(board.len(), 32, "no submission was lost or merged");
}

#[tokio::test]
async fn leaderboard_and_player_rank_agree() {
    let dir = TempDir::new().expect("tempdir");
    let store = open_store(&dir);

    let submissions = [
        ("alice", 120),
        ("bob", 340),
        ("carol", 340),
        ("dora", 90),
        ("erin", 200),
        ("alice", 260),
    ];
    for (player, score) in submissions {
        store.submit_score(run(player, "endless", 0, score)).await.unwrap();
    }

    let board = store.leaderboard(page("endless", 0)).await.unwrap();
    for row in board {
        let standing = store
            .player_rank(row.entry.player_id.clone(), Partition::new("endless", 0))
            .await
            .unwrap()
            .expect("player is on the board");
        if row.entry.score == standing.score {
            assert_eq!(
                row.rank, standing.rank,
                "both read paths must report the same rank for {}",
                row.entry.player_id
            );
        }
    }
}
