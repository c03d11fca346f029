use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request DTO for creating or editing a brand
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SaveBrandDto {
    #[validate(length(max = 200, message = "Name must be at most 200 characters"))]
    pub name: String,

    /// Derived from the name on create when empty
    #[validate(length(max = 200, message = "Slug must be at most 200 characters"))]
    #[serde(default)]
    pub slug: Option<String>,

    #[serde(default = "default_active")]
    pub is_active: bool,

    #[serde(default)]
    pub description: Option<String>,
}

fn default_active() -> bool {
    true
}
