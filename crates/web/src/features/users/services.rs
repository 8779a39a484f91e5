use sqlx::SqlitePool;
use storage::{
    dto::user::CreateUserRequest, error::Result, models::User, repository::user::UserRepository,
};

/// List all users
pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
    let repo = UserRepository::new(pool);
    repo.list().await
}

/// Create a new user
pub async fn create_user(pool: &SqlitePool, request: &CreateUserRequest) -> Result<User> {
    let repo = UserRepository::new(pool);
    let user = repo.create(&request.name, &request.role).await?;

    tracing::info!(user_id = user.id, role = %user.role, "Created user");

    Ok(user)
}
