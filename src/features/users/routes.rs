use std::sync::Arc;

use axum::{
    routing::{get, patch},
    Router,
};

use crate::features::users::handlers;
use crate::features::users::services::UserService;

/// Console user routes (require a console session)
pub fn routes(service: Arc<UserService>) -> Router {
    Router::new()
        .route(
            "/api/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/api/users/{id}",
            patch(handlers::update_user).delete(handlers::delete_user),
        )
        .with_state(service)
}
