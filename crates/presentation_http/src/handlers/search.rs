//! Search handler

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use domain::{SearchQuery, SearchResult};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::{error::ApiError, state::AppState};

/// Query string of `GET /search`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

/// Resolve a query into normalized results
///
/// Upstream failures never surface here: the provider chain falls back to
/// the degraded result set.
#[instrument(skip(state, params))]
pub async fn search(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let Query(params) = params.map_err(|e| {
        warn!(error = %e, "Rejected search query string");
        no_query()
    })?;
    let query = SearchQuery::parse(params.q.as_deref().unwrap_or_default())
        .map_err(|_| no_query())?;

    let results = state.search.search(&query).await?;
    debug!(count = results.len(), "Search answered");
    Ok(Json(results))
}

fn no_query() -> ApiError {
    ApiError::BadRequest("No query provided".to_string())
}
