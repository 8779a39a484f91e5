use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::metrics::{
        CalculateRequest, MetricAuditEntry, MetricHistoryEntry, SaveMetricsParams,
        SaveMetricsResponse,
    },
};

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    post,
    path = "/api/metrics",
    params(SaveMetricsParams),
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Weekly metric scored and saved", body = SaveMetricsResponse),
        (status = 422, description = "Malformed request body")
    ),
    tag = "metrics"
)]
pub async fn save_metrics(
    State(db): State<Database>,
    Query(params): Query<SaveMetricsParams>,
    Json(payload): Json<CalculateRequest>,
) -> ApiResult<Response> {
    let saved = services::save_metrics(db.pool(), params.user_id_or_default(), &payload).await?;

    Ok(Json(saved).into_response())
}

#[utoipa::path(
    get,
    path = "/api/metrics/{user_id}",
    params(
        ("user_id" = i64, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Score history for the user, oldest first", body = Vec<MetricHistoryEntry>)
    ),
    tag = "metrics"
)]
pub async fn get_user_metrics(
    State(db): State<Database>,
    Path(user_id): Path<i64>,
) -> ApiResult<Response> {
    let history = services::get_user_metrics(db.pool(), user_id).await?;

    Ok(Json(history).into_response())
}

#[utoipa::path(
    get,
    path = "/api/all_metrics",
    responses(
        (status = 200, description = "All stored metrics, newest first", body = Vec<MetricAuditEntry>)
    ),
    tag = "metrics"
)]
pub async fn get_all_metrics(State(db): State<Database>) -> ApiResult<Response> {
    let entries = services::get_all_metrics(db.pool()).await?;

    Ok(Json(entries).into_response())
}
