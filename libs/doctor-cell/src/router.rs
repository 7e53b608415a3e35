use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, put},
    Router,
};

use shared_config::AppConfig;
use shared_utils::extractor::auth_middleware;

use crate::handlers;

pub fn doctor_routes(state: Arc<AppConfig>) -> Router {
    // Public routes (no authentication required)
    let public_routes = Router::new()
        .route("/{doctor_id}", get(handlers::get_doctor_public))
        .route(
            "/{doctor_id}/availability",
            get(handlers::get_doctor_availability_public),
        );

    // Protected routes (authentication required)
    let protected_routes = Router::new()
        .route("/{doctor_id}", put(handlers::update_doctor))
        .route("/{doctor_id}/availability", put(handlers::update_availability))
        .layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(state)
}
