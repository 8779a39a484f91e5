use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// One domain's weighted sub-score within a weekly submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct DomainScore {
    pub id: i64,
    pub weekly_metric_id: i64,
    pub domain_name: String,
    pub weight: f64,
    /// Expected on a 0-10 scale, not enforced.
    pub score: f64,
}
