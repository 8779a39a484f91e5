use axum::{
    Json,
    response::{IntoResponse, Response},
};
use storage::dto::metrics::{CalculateRequest, ScoreBreakdown};

use super::services;

#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Score computed without saving", body = ScoreBreakdown),
        (status = 422, description = "Malformed request body")
    ),
    tag = "scoring"
)]
pub async fn calculate_live_score(Json(payload): Json<CalculateRequest>) -> Response {
    Json(services::calculate(&payload)).into_response()
}
