use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::models::User;
use crate::models::user::DEFAULT_ROLE;

/// Response containing a user's public fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub name: String,
    pub role: String,
}

/// Request payload for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[serde(default = "default_role")]
    #[schema(default = "Staff")]
    #[validate(length(max = 255, message = "Role must be at most 255 characters"))]
    pub role: String,
}

fn default_role() -> String {
    DEFAULT_ROLE.to_string()
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_staff() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"name": "Dana"}"#).unwrap();
        assert_eq!(req.role, "Staff");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_name_is_rejected() {
        let req = CreateUserRequest {
            name: String::new(),
            role: "Staff".to_string(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("name"));
    }

    #[test]
    fn test_overlong_role_is_rejected() {
        let req = CreateUserRequest {
            name: "Dana".to_string(),
            role: "x".repeat(256),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("role"));
    }
}
