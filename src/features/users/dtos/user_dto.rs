use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::features::users::models::UserRole;

/// Request DTO for creating or editing a console user
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveUserDto {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[serde(default)]
    pub role: UserRole,

    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}
