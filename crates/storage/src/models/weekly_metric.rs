use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use super::DomainScore;

/// One scoring submission for a user.
///
/// `computed_score` is the formula output at submission time. It is stored
/// as-is and never recomputed, so old rows stay frozen snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WeeklyMetric {
    pub id: i64,
    pub user_id: i64,
    pub week_date: NaiveDateTime,
    #[serde(rename = "T_minutes")]
    pub t_minutes: i64,
    #[serde(rename = "B_days")]
    pub b_days: i64,
    #[serde(rename = "W_weight")]
    pub w_weight: f64,
    pub k1_bonus: f64,
    pub ke_bonus: f64,
    #[serde(rename = "N_violations")]
    pub n_violations: i64,
    #[serde(rename = "D_severity")]
    pub d_severity: f64,
    pub computed_score: f64,
}

/// A weekly metric together with the domain scores it owns.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyMetricWithDomains {
    pub metric: WeeklyMetric,
    pub domains: Vec<DomainScore>,
}
