use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::brands::handlers;
use crate::features::brands::services::BrandService;

/// Brand routes (require a console session)
pub fn routes(service: Arc<BrandService>) -> Router {
    Router::new()
        .route(
            "/api/brands",
            get(handlers::list_brands).post(handlers::create_brand),
        )
        .route(
            "/api/brands/{id}",
            patch(handlers::update_brand).delete(handlers::delete_brand),
        )
        .with_state(service)
}
