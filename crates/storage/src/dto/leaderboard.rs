use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One user's standing, based on their most recent submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardEntry {
    pub user_id: i64,
    pub name: String,
    pub role: String,
    /// Latest computed score rounded to 2 decimals, null without submissions
    pub latest_score: Option<f64>,
    pub total_entries: i64,
}

impl LeaderboardEntry {
    /// Score used for ordering; users without submissions rank as 0.
    pub fn sort_score(&self) -> f64 {
        self.latest_score.unwrap_or(0.0)
    }
}
