//! Dense ranking over a snapshot of partition scores.
//!
//! Every rank the backend reports, whether attached to a leaderboard row or
//! returned for a single player, comes from [`dense_rank`]. Keeping the
//! formula in one place means the two read paths cannot drift apart.

/// Rank of `target_score` within `partition_scores`: one plus the number of
/// strictly greater scores. Tied scores share a rank.
pub fn dense_rank(target_score: i64, partition_scores: &[i64]) -> i64 {
    let greater = partition_scores
        .iter()
        .filter(|&&score| score > target_score)
        .count();
    1 + greater as i64
}
