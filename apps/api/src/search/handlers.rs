//! Axum route handlers for the stateless Search API.

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::profile::models::SearchProfile;
use crate::search::ranking::SortMode;
use crate::search::sample::{sample_profile, sample_result};
use crate::search::service::{run_search, SearchResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub profile: SearchProfile,
    #[serde(default)]
    pub sort: SortMode,
}

#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub profile: SearchProfile,
    #[serde(flatten)]
    pub search: SearchResponse,
}

#[derive(Debug, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort: SortMode,
}

/// POST /api/v1/search
///
/// One-shot search: profile in, ordered results out. Nothing is stored.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = run_search(state.agent.as_ref(), &request.profile).await?;
    Ok(Json(SearchResponse::new(result, request.sort)))
}

/// GET /api/v1/search/sample
///
/// Canned profile and result for previewing the form and results view without calling the agent.
pub async fn handle_sample(Query(query): Query<SortQuery>) -> Json<SampleResponse> {
    Json(SampleResponse {
        profile: sample_profile(),
        search: SearchResponse::new(sample_result(), query.sort),
    })
}
