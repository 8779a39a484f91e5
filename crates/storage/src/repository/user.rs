use sqlx::SqlitePool;

use crate::error::Result;
use crate::models::User;
use crate::models::user::DEFAULT_ROLE;

pub struct UserRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepository<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List all users
    pub async fn list(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, role
            FROM users
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    pub async fn find_optional(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, role
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Create a new user with a store-assigned id
    pub async fn create(&self, name: &str, role: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, role)
            VALUES (?, ?)
            RETURNING id, name, role
            "#,
        )
        .bind(name)
        .bind(role)
        .fetch_one(self.pool)
        .await?;

        Ok(user)
    }

    /// Return the user with `id`, creating a placeholder user if there is none.
    ///
    /// The placeholder is named after the requested id but receives whatever
    /// id the store assigns, which callers must use from then on.
    pub async fn get_or_create(&self, id: i64) -> Result<User> {
        if let Some(user) = self.find_optional(id).await? {
            return Ok(user);
        }

        self.create(&User::placeholder_name(id), DEFAULT_ROLE).await
    }

    /// Insert `user` with its explicit id when the table is empty.
    ///
    /// Returns whether the user was inserted.
    pub async fn seed_if_empty(&self, user: &User) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (id, name, role)
            SELECT ?, ?, ?
            WHERE NOT EXISTS (SELECT 1 FROM users)
            "#,
        )
        .bind(user.id)
        .bind(&user.name)
        .bind(&user.role)
        .execute(self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
