use sqlx::SqlitePool;
use storage::{
    dto::leaderboard::LeaderboardEntry, error::Result,
    repository::leaderboard::LeaderboardRepository,
};

/// Latest score per user, sorted descending
pub async fn get_leaderboard(pool: &SqlitePool) -> Result<Vec<LeaderboardEntry>> {
    let repo = LeaderboardRepository::new(pool);
    repo.get_leaderboard().await
}
