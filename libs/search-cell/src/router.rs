use std::sync::Arc;

use axum::{routing::get, Router};

use shared_config::AppConfig;

use crate::handlers;
use crate::services::SearchService;

/// Router state for the search cell. The service is created once per router
/// so its generation counter spans the life of the process.
#[derive(Clone)]
pub struct SearchState {
    pub service: Arc<SearchService>,
}

pub fn search_routes(config: Arc<AppConfig>) -> Router {
    let state = SearchState {
        service: Arc::new(SearchService::new(&config)),
    };

    // Search is a public surface, same as the doctor directory it fronts.
    Router::new()
        .route("/doctors", get(handlers::search_doctors))
        .route("/specializations", get(handlers::list_specializations))
        .with_state(state)
}
