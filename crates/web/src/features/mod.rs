use axum::Router;
use storage::Database;

pub mod leaderboard;
pub mod metrics;
pub mod scoring;
pub mod users;

/// Every API route, relative to the `/api` prefix.
pub fn api_routes() -> Router<Database> {
    Router::new()
        .merge(users::routes::routes())
        .merge(scoring::routes::routes())
        .merge(metrics::routes::routes())
        .merge(leaderboard::routes::routes())
}
