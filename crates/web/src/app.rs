use anyhow::{Context, Result};
use axum::{
    Json, Router,
    http::HeaderValue,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use storage::Database;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{ApiDoc, features};

/// Build the application router around an opened database.
pub fn build_router(db: Database, cors: CorsLayer) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(health))
        .nest("/api", features::api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

/// CORS policy for the configured origins; `*` opens it to any origin.
///
/// Credentials are only allowed with an explicit allowlist.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
    if origins.iter().any(|origin| origin == "*") {
        return Ok(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any));
    }

    let origins = origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin: {}", origin))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true))
}

async fn health() -> Response {
    Json(json!({ "status": "ok" })).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;

    async fn test_app() -> (Router, Database) {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        let cors = cors_layer(&["http://localhost:3000".to_string()]).unwrap();
        (build_router(db.clone(), cors), db)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn reference_payload() -> Value {
        json!({
            "T_minutes": 120,
            "B_days": 5,
            "W_weight": 1.0,
            "k1_bonus": 0.1,
            "ke_bonus": 0.05,
            "N_violations": 2,
            "D_severity": 1.5,
            "domains": [
                {"name": "Quality", "weight": 1.0, "score": 8.0},
                {"name": "Delivery", "weight": 0.5, "score": 6.0}
            ]
        })
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_calculate_returns_breakdown_without_saving() {
        let (app, db) = test_app().await;

        let (status, body) = send(&app, post("/api/calculate", reference_payload())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["G"], 11.0);
        assert_eq!(body["M"], 1.15);
        assert_eq!(body["Pi2"], 25.0);
        assert_eq!(body["sigma2"], 0.73472327);
        assert_eq!(body["numerator"], 37950.0);
        assert_eq!(body["denominator"], 1734.7233);
        assert_eq!(body["final_score"], 21.8767);

        let (_, again) = send(&app, post("/api/calculate", reference_payload())).await;
        assert_eq!(again, body);

        let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM weekly_metrics")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(stored, 0);
    }

    #[tokio::test]
    async fn test_calculate_rejects_missing_fields() {
        let (app, _db) = test_app().await;
        let (status, _) = send(&app, post("/api/calculate", json!({"T_minutes": 10}))).await;
        assert!(status.is_client_error());
    }

    #[tokio::test]
    async fn test_users_create_and_list() {
        let (app, _db) = test_app().await;

        let (status, created) = send(&app, post("/api/users", json!({"name": "Robin"}))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created["name"], "Robin");
        assert_eq!(created["role"], "Staff");

        let (status, _) = send(
            &app,
            post("/api/users", json!({"name": "Kai", "role": "Manager"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, users) = send(&app, get("/api/users")).await;
        assert_eq!(status, StatusCode::OK);
        let users = users.as_array().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0]["id"], created["id"]);
        assert_eq!(users[1]["role"], "Manager");
    }

    #[tokio::test]
    async fn test_create_user_validates_name() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, post("/api/users", json!({"name": ""}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Validation failed");
        assert!(body["details"][0].as_str().unwrap().starts_with("name:"));
    }

    #[tokio::test]
    async fn test_save_then_history() {
        let (app, _db) = test_app().await;

        let (status, saved) = send(&app, post("/api/metrics?user_id=1", reference_payload())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(saved["status"], "success");
        assert_eq!(saved["computed_score"], 21.8767);
        assert_eq!(saved["breakdown"]["final_score"], 21.8767);

        let (status, history) = send(&app, get("/api/metrics/1")).await;
        assert_eq!(status, StatusCode::OK);
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 1);

        let entry = &history[0];
        assert_eq!(entry["id"], saved["metric_id"]);
        assert_eq!(entry["computed_score"], saved["computed_score"]);
        assert_eq!(entry["T_minutes"], 120);
        assert_eq!(entry["B_days"], 5);
        assert_eq!(entry["N_violations"], 2);
        assert_eq!(entry["domains"][0]["name"], "Quality");
        assert_eq!(entry["domains"][1]["weight"], 0.5);
        assert!(entry["week_date"].is_string());
    }

    #[tokio::test]
    async fn test_save_without_user_id_targets_default_user() {
        let (app, _db) = test_app().await;

        let (status, _) = send(&app, post("/api/metrics", reference_payload())).await;
        assert_eq!(status, StatusCode::OK);

        let (_, users) = send(&app, get("/api/users")).await;
        assert_eq!(users[0]["id"], 1);
        assert_eq!(users[0]["name"], "User 1");
        assert_eq!(users[0]["role"], "Staff");
    }

    #[tokio::test]
    async fn test_history_for_unknown_user_is_empty() {
        let (app, _db) = test_app().await;
        let (status, body) = send(&app, get("/api/metrics/999")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_leaderboard_and_all_metrics() {
        let (app, _db) = test_app().await;

        send(&app, post("/api/users", json!({"name": "Idle"}))).await;
        let (_, saved) = send(&app, post("/api/metrics?user_id=2", reference_payload())).await;

        let (status, board) = send(&app, get("/api/leaderboard")).await;
        assert_eq!(status, StatusCode::OK);
        let board = board.as_array().unwrap();
        assert_eq!(board.len(), 2);
        assert_eq!(board[0]["name"], "User 2");
        assert_eq!(board[0]["latest_score"], 21.88);
        assert_eq!(board[0]["total_entries"], 1);
        assert_eq!(board[1]["name"], "Idle");
        assert!(board[1]["latest_score"].is_null());
        assert_eq!(board[1]["total_entries"], 0);

        let (status, all) = send(&app, get("/api/all_metrics")).await;
        assert_eq!(status, StatusCode::OK);
        let all = all.as_array().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0]["id"], saved["metric_id"]);
        assert_eq!(all[0]["user_name"], "User 2");
        assert_eq!(all[0]["computed_score"], 21.88);
        assert_eq!(all[0]["T_minutes"], 120);
        assert_eq!(all[0]["N_violations"], 2);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let (app, _db) = test_app().await;

        let request = Request::builder()
            .uri("/api/users")
            .header(header::ORIGIN, "http://localhost:3000")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );

        let request = Request::builder()
            .uri("/api/users")
            .header(header::ORIGIN, "http://evil.example")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert!(response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
    }

    #[test]
    fn test_cors_rejects_invalid_origin() {
        assert!(cors_layer(&["bad\norigin".to_string()]).is_err());
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (app, _db) = test_app().await;
        let (status, doc) = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/api/calculate"].is_object());
        assert!(doc["paths"]["/api/leaderboard"].is_object());
    }
}
