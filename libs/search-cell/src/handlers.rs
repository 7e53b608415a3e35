use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use shared_models::error::AppError;

use crate::alias::AliasTable;
use crate::models::SearchResponse;
use crate::router::SearchState;

#[derive(Debug, Deserialize)]
pub struct DoctorSearchQuery {
    pub query: Option<String>,
    pub city: Option<String>,
    /// Opaque token identifying the searching client (the SPA mints one per
    /// tab). Supersession is tracked per token; without one, every search
    /// completes normally.
    pub client_id: Option<String>,
}

#[axum::debug_handler]
pub async fn search_doctors(
    State(state): State<SearchState>,
    Query(params): Query<DoctorSearchQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let query = params.query.unwrap_or_default();
    let city = params.city.unwrap_or_default();

    // Nothing to search for: no backend call, and the response says so.
    if query.trim().is_empty() && city.trim().is_empty() {
        return Ok(Json(SearchResponse::not_searched()));
    }

    let terms = AliasTable::standard().resolve(&query);
    debug!("Search '{}' in '{}' resolved to {} term(s)", query, city, terms.len());

    let doctors = match params.client_id {
        Some(client) => match state.service.search_latest(&client, &terms, city.trim()).await {
            Some(doctors) => doctors,
            None => return Ok(Json(SearchResponse::superseded(terms))),
        },
        None => state.service.search(&terms, city.trim()).await,
    };

    Ok(Json(SearchResponse::results(terms, doctors)))
}

#[axum::debug_handler]
pub async fn list_specializations(
    State(_state): State<SearchState>,
) -> Result<Json<Value>, AppError> {
    let specializations = AliasTable::standard().canonical_terms();

    Ok(Json(json!({
        "specializations": specializations,
        "total": specializations.len()
    })))
}
