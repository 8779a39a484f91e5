use anyhow::Context;
use storage::{Database, models::User, repository::user::UserRepository};
use tokio::net::TcpListener;
use utoipa::OpenApi;

mod app;
mod config;
mod error;
mod features;

use config::Config;

#[derive(OpenApi)]
#[openapi(
    info(title = "WIPR Performance Engine API"),
    paths(
        features::users::handlers::list_users,
        features::users::handlers::create_user,
        features::scoring::handlers::calculate_live_score,
        features::metrics::handlers::save_metrics,
        features::metrics::handlers::get_user_metrics,
        features::metrics::handlers::get_all_metrics,
        features::leaderboard::handlers::get_leaderboard,
    ),
    components(
        schemas(
            storage::dto::user::CreateUserRequest,
            storage::dto::user::UserResponse,
            storage::dto::metrics::DomainInput,
            storage::dto::metrics::CalculateRequest,
            storage::dto::metrics::ScoreBreakdown,
            storage::dto::metrics::SaveMetricsResponse,
            storage::dto::metrics::DomainScoreInfo,
            storage::dto::metrics::MetricHistoryEntry,
            storage::dto::metrics::MetricAuditEntry,
            storage::dto::leaderboard::LeaderboardEntry,
            storage::models::User,
            storage::models::WeeklyMetric,
            storage::models::DomainScore,
        )
    ),
    tags(
        (name = "users", description = "User management endpoints"),
        (name = "scoring", description = "Stateless score preview"),
        (name = "metrics", description = "Weekly metric submission and history"),
        (name = "leaderboard", description = "Latest score ranking"),
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting WIPR Performance Engine API");

    let config = Config::from_env().context("Failed to load API configuration")?;
    tracing::info!("Configuration loaded successfully");

    tracing::info!(
        "Opening database at: {}",
        config
            .database_url
            .split('@')
            .next_back()
            .unwrap_or("unknown")
    );
    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    if config.seed.enabled {
        let seed = User {
            id: storage::DEFAULT_USER_ID,
            name: config.seed.name.clone(),
            role: config.seed.role.clone(),
        };
        let seeded = UserRepository::new(db.pool())
            .seed_if_empty(&seed)
            .await
            .context("Failed to seed default user")?;
        if seeded {
            tracing::info!(user_id = seed.id, name = %seed.name, "Seeded default user");
        }
    }

    let cors = app::cors_layer(&config.cors_allowed_origins)
        .context("Failed to build CORS policy")?;
    tracing::info!(origins = ?config.cors_allowed_origins, "CORS allowlist configured");

    let router = app::build_router(db.clone(), cors);

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    tracing::info!("Starting server at http://{}", bind_address);

    tracing::info!(
        "Swagger UI available at http://{}/swagger-ui/",
        bind_address
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped, closing database");
    db.close().await;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
