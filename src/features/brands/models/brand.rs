use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub type BrandId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Brand {
    pub id: BrandId,
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    #[serde(default)]
    pub description: Option<String>,
    /// Path relative to the catalog base URL
    #[serde(default)]
    pub image_path: Option<String>,
}

/// Body of `POST /brands` and `PATCH /brands/{id}`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandPayload {
    pub name: String,
    pub slug: String,
    pub is_active: bool,
    pub description: Option<String>,
}
