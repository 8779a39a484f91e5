use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Role assigned to users created without one.
pub const DEFAULT_ROLE: &str = "Staff";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub role: String,
}

impl User {
    /// Placeholder name given to users created implicitly by a save.
    pub fn placeholder_name(requested_id: i64) -> String {
        format!("User {}", requested_id)
    }
}
