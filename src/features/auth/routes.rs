use crate::features::auth::handlers;
use crate::features::auth::services::AuthService;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Sign-in routes (reachable without a console session)
pub fn routes(service: Arc<AuthService>) -> Router {
    Router::new()
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/confirm", post(handlers::confirm))
        .route("/api/auth/logout", post(handlers::logout))
        .route("/api/auth/session", get(handlers::get_session))
        .with_state(service)
}
