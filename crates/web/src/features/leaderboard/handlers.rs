use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use storage::{Database, dto::leaderboard::LeaderboardEntry};

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Users ranked by their latest score", body = Vec<LeaderboardEntry>)
    ),
    tag = "leaderboard"
)]
pub async fn get_leaderboard(State(db): State<Database>) -> ApiResult<Response> {
    let entries = services::get_leaderboard(db.pool()).await?;

    Ok(Json(entries).into_response())
}
