pub mod health;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::profile::handlers as sessions;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Search API
        .route("/api/v1/search", post(search::handle_search))
        .route("/api/v1/search/sample", get(search::handle_sample))
        // Form sessions
        .route("/api/v1/sessions", post(sessions::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sessions::handle_get_session).delete(sessions::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/profile",
            put(sessions::handle_update_profile),
        )
        .route("/api/v1/sessions/:id/skills", post(sessions::handle_add_skill))
        .route(
            "/api/v1/sessions/:id/skills/:index",
            delete(sessions::handle_remove_skill),
        )
        .route(
            "/api/v1/sessions/:id/companies",
            post(sessions::handle_add_company),
        )
        .route(
            "/api/v1/sessions/:id/companies/:index",
            delete(sessions::handle_remove_company),
        )
        .route(
            "/api/v1/sessions/:id/search",
            post(sessions::handle_session_search),
        )
        .route(
            "/api/v1/sessions/:id/results",
            get(sessions::handle_session_results),
        )
        .with_state(state)
}
