use axum::{
    Router,
    routing::{get, post},
};
use storage::Database;

use super::handlers::{get_all_metrics, get_user_metrics, save_metrics};

pub fn routes() -> Router<Database> {
    Router::new()
        .route("/metrics", post(save_metrics))
        .route("/metrics/:user_id", get(get_user_metrics))
        .route("/all_metrics", get(get_all_metrics))
}
