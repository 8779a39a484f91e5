use std::cmp::Ordering;

use sqlx::{FromRow, SqlitePool};

use crate::dto::leaderboard::LeaderboardEntry;
use crate::error::Result;
use crate::services::score_computation::round_dp;

#[derive(FromRow)]
struct LeaderboardRow {
    user_id: i64,
    name: String,
    role: String,
    latest_score: Option<f64>,
    total_entries: i64,
}

pub struct LeaderboardRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> LeaderboardRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Latest score per user, best first.
    pub async fn get_leaderboard(&self) -> Result<Vec<LeaderboardEntry>> {
        let rows: Vec<LeaderboardRow> = sqlx::query_as(
            r#"
            SELECT
                u.id AS user_id,
                u.name,
                u.role,
                (
                    SELECT wm.computed_score
                    FROM weekly_metrics wm
                    WHERE wm.user_id = u.id
                    ORDER BY wm.week_date DESC, wm.id DESC
                    LIMIT 1
                ) AS latest_score,
                (
                    SELECT COUNT(*)
                    FROM weekly_metrics wm
                    WHERE wm.user_id = u.id
                ) AS total_entries
            FROM users u
            ORDER BY u.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        let entries = rows
            .into_iter()
            .map(|row| LeaderboardEntry {
                user_id: row.user_id,
                name: row.name,
                role: row.role,
                latest_score: row.latest_score.map(|score| round_dp(score, 2)),
                total_entries: row.total_entries,
            })
            .collect();

        Ok(rank_entries(entries))
    }
}

/// Order entries by descending score, users without submissions counting as 0.
///
/// Stable: equal scores keep their input order.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| {
        b.sort_score()
            .partial_cmp(&a.sort_score())
            .unwrap_or(Ordering::Equal)
    });
    entries
}
