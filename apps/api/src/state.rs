use std::sync::Arc;

use crate::agent_client::AgentInvoker;
use crate::profile::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable agent backend. Default: HttpAgentClient.
    pub agent: Arc<dyn AgentInvoker>,
    pub sessions: SessionStore,
}
