use chrono::{NaiveDateTime, Utc};
use sqlx::SqlitePool;

use crate::dto::metrics::{CalculateRequest, SaveMetricsResponse};
use crate::error::Result;
use crate::repository::metrics::MetricsRepository;
use crate::repository::user::UserRepository;
use crate::services::score_computation::compute_score;

/// Score a submission and persist it for `user_id`, timestamped now.
pub async fn save_metrics(
    pool: &SqlitePool,
    user_id: i64,
    request: &CalculateRequest,
) -> Result<SaveMetricsResponse> {
    save_metrics_at(pool, user_id, request, Utc::now().naive_utc()).await
}

/// Score a submission and persist it for `user_id` with an explicit week date.
///
/// Unknown users are created first (see [`UserRepository::get_or_create`]);
/// the metric is stored under the id that user actually received.
pub async fn save_metrics_at(
    pool: &SqlitePool,
    user_id: i64,
    request: &CalculateRequest,
    week_date: NaiveDateTime,
) -> Result<SaveMetricsResponse> {
    let user = UserRepository::new(pool).get_or_create(user_id).await?;

    let breakdown = compute_score(request);

    let metric_id = MetricsRepository::new(pool)
        .create_with_domains(user.id, week_date, request, breakdown.final_score)
        .await?;

    Ok(SaveMetricsResponse {
        status: "success".to_string(),
        metric_id,
        computed_score: breakdown.final_score,
        breakdown,
    })
}
