//! Axum route handlers for form sessions.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::models::{ProfileFields, SearchProfile};
use crate::profile::session::FormSession;
use crate::search::handlers::SortQuery;
use crate::search::service::{run_search, SearchResponse};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TagRequest {
    pub tag: String,
}

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> (StatusCode, Json<FormSession>) {
    let session = state.sessions.create().await;
    (StatusCode::CREATED, Json(session))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FormSession>, AppError> {
    Ok(Json(state.sessions.get(id).await?))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(id).await?;
    debug!("Session {id} ended");
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/sessions/:id/profile
///
/// Replaces the scalar profile fields. Tags are left as they are.
pub async fn handle_update_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<ProfileFields>,
) -> Result<Json<FormSession>, AppError> {
    let session = state
        .sessions
        .update_profile(id, |profile| profile.with_fields(fields))
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/skills
pub async fn handle_add_skill(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> Result<Json<FormSession>, AppError> {
    let session = state
        .sessions
        .update_profile(id, |p| SearchProfile {
            skills: p.skills.add(&req.tag),
            ..p.clone()
        })
        .await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/:id/skills/:index
pub async fn handle_remove_skill(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<FormSession>, AppError> {
    let session = state
        .sessions
        .update_profile(id, |p| SearchProfile {
            skills: p.skills.remove(index),
            ..p.clone()
        })
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/companies
pub async fn handle_add_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<TagRequest>,
) -> Result<Json<FormSession>, AppError> {
    let session = state
        .sessions
        .update_profile(id, |p| SearchProfile {
            target_companies: p.target_companies.add(&req.tag),
            ..p.clone()
        })
        .await?;
    Ok(Json(session))
}

/// DELETE /api/v1/sessions/:id/companies/:index
pub async fn handle_remove_company(
    State(state): State<AppState>,
    Path((id, index)): Path<(Uuid, usize)>,
) -> Result<Json<FormSession>, AppError> {
    let session = state
        .sessions
        .update_profile(id, |p| SearchProfile {
            target_companies: p.target_companies.remove(index),
            ..p.clone()
        })
        .await?;
    Ok(Json(session))
}

/// POST /api/v1/sessions/:id/search
///
/// Searches with the session's current profile. The result replaces the stored one
/// unless a newer search for the same session started in the meantime.
pub async fn handle_session_search(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let (ticket, profile) = state.sessions.begin_search(id).await?;
    let result = run_search(state.agent.as_ref(), &profile).await?;

    if !state.sessions.complete_search(ticket, result.clone()).await? {
        debug!("Discarded stale search result for session {id}");
    }

    Ok(Json(SearchResponse::new(result, query.sort)))
}

/// GET /api/v1/sessions/:id/results
///
/// Re-orders the stored result. Never calls the agent.
pub async fn handle_session_results(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SortQuery>,
) -> Result<Json<SearchResponse>, AppError> {
    let result = state
        .sessions
        .get(id)
        .await?
        .last_result
        .ok_or_else(|| AppError::NotFound(format!("No search results for session {id}")))?;

    Ok(Json(SearchResponse::new(result, query.sort)))
}
