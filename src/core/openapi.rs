use utoipa::{Modify, OpenApi};

use crate::features::auth::{dtos as auth_dtos, handlers as auth_handlers};
use crate::features::brands::{
    dtos as brands_dtos, handlers as brands_handlers, models as brands_models,
};
use crate::features::categories::services::CascadeOutcome;
use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::users::{dtos as users_dtos, handlers as users_handlers, models as users_models};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Auth
        auth_handlers::login,
        auth_handlers::confirm,
        auth_handlers::logout,
        auth_handlers::get_session,
        // Categories
        categories_handlers::list_categories,
        categories_handlers::parent_options,
        categories_handlers::slug_preview,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        categories_handlers::set_visibility,
        // Brands
        brands_handlers::list_brands,
        brands_handlers::create_brand,
        brands_handlers::update_brand,
        brands_handlers::delete_brand,
        // Users
        users_handlers::list_users,
        users_handlers::create_user,
        users_handlers::update_user,
        users_handlers::delete_user,
    ),
    components(
        schemas(
            Meta,
            // Auth
            auth_dtos::LoginRequestDto,
            auth_dtos::ConfirmRequestDto,
            auth_dtos::LoginCodeSentDto,
            auth_dtos::SessionDto,
            ApiResponse<auth_dtos::LoginCodeSentDto>,
            ApiResponse<auth_dtos::SessionDto>,
            // Categories
            categories_dtos::CategoryTreeDto,
            categories_dtos::SaveCategoryDto,
            categories_dtos::ToggleVisibilityDto,
            categories_dtos::VisibilityChangeDto,
            categories_dtos::ParentOptionDto,
            categories_dtos::SlugPreviewDto,
            CascadeOutcome,
            ApiResponse<Vec<categories_dtos::CategoryTreeDto>>,
            ApiResponse<categories_dtos::VisibilityChangeDto>,
            ApiResponse<Vec<categories_dtos::ParentOptionDto>>,
            ApiResponse<categories_dtos::SlugPreviewDto>,
            // Brands
            brands_models::Brand,
            brands_dtos::SaveBrandDto,
            ApiResponse<brands_models::Brand>,
            ApiResponse<Vec<brands_models::Brand>>,
            // Users
            users_models::User,
            users_models::UserRole,
            users_dtos::SaveUserDto,
            ApiResponse<Vec<users_models::User>>,
        )
    ),
    tags(
        (name = "auth", description = "Operator sign-in with a one-time e-mail code"),
        (name = "categories", description = "Category taxonomy with cascading visibility"),
        (name = "brands", description = "Brand management"),
        (name = "users", description = "Console user management"),
    ),
    info(
        title = "Catalog Admin API",
        version = "0.1.0",
        description = "Administrative console for the e-commerce catalog",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
