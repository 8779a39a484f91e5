use sqlx::SqlitePool;
use storage::{
    dto::metrics::{CalculateRequest, MetricAuditEntry, MetricHistoryEntry, SaveMetricsResponse},
    error::Result,
    repository::metrics::MetricsRepository,
    services::metric_submission,
};

/// Compute and persist a weekly evaluation
pub async fn save_metrics(
    pool: &SqlitePool,
    user_id: i64,
    request: &CalculateRequest,
) -> Result<SaveMetricsResponse> {
    let saved = metric_submission::save_metrics(pool, user_id, request).await?;

    tracing::info!(
        metric_id = saved.metric_id,
        requested_user_id = user_id,
        computed_score = saved.computed_score,
        domains = request.domains.len(),
        "Saved weekly metric"
    );

    Ok(saved)
}

/// Score history of a user, oldest first
pub async fn get_user_metrics(pool: &SqlitePool, user_id: i64) -> Result<Vec<MetricHistoryEntry>> {
    let repo = MetricsRepository::new(pool);
    let history = repo.history_for_user(user_id).await?;

    Ok(history.into_iter().map(MetricHistoryEntry::from).collect())
}

/// Every stored metric, newest first
pub async fn get_all_metrics(pool: &SqlitePool) -> Result<Vec<MetricAuditEntry>> {
    let repo = MetricsRepository::new(pool);
    repo.list_all().await
}
