use std::sync::Arc;

use axum::{
    routing::{get, patch, put},
    Router,
};

use crate::features::categories::handlers;
use crate::features::categories::services::CategoryService;

/// Category taxonomy routes (require a console session)
pub fn routes(service: Arc<CategoryService>) -> Router {
    Router::new()
        .route(
            "/api/categories",
            get(handlers::list_categories).post(handlers::create_category),
        )
        .route(
            "/api/categories/parent-options",
            get(handlers::parent_options),
        )
        .route("/api/categories/slug-preview", get(handlers::slug_preview))
        .route(
            "/api/categories/{id}",
            patch(handlers::update_category).delete(handlers::delete_category),
        )
        .route("/api/categories/{id}/visibility", put(handlers::set_visibility))
        .with_state(service)
}
