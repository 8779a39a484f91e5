use axum::{Router, routing::post};
use storage::Database;

use super::handlers::calculate_live_score;

pub fn routes() -> Router<Database> {
    Router::new().route("/calculate", post(calculate_live_score))
}
