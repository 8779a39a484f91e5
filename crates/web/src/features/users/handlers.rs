use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use storage::{
    Database,
    dto::user::{CreateUserRequest, UserResponse},
};
use validator::Validate;

use crate::error::ApiResult;

use super::services;

#[utoipa::path(
    get,
    path = "/api/users",
    responses(
        (status = 200, description = "List all users successfully", body = Vec<UserResponse>)
    ),
    tag = "users"
)]
pub async fn list_users(State(db): State<Database>) -> ApiResult<Response> {
    let users = services::list_users(db.pool()).await?;

    let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();

    Ok(Json(response).into_response())
}

#[utoipa::path(
    post,
    path = "/api/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created successfully", body = UserResponse),
        (status = 400, description = "Validation error")
    ),
    tag = "users"
)]
pub async fn create_user(
    State(db): State<Database>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<Response> {
    req.validate()?;

    let user = services::create_user(db.pool(), &req).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))).into_response())
}
