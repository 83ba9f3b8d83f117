//! In-memory form sessions. A session exclusively owns its profile (and therefore its tag
//! sets) and the last completed `SearchResult`, which is only ever replaced wholesale.
//!
//! A session ends when it is deleted or when it has been idle longer than the store's
//! TTL. Idle sessions read as not found and are pruned whenever a new session is created.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::profile::models::SearchProfile;
use crate::search::models::SearchResult;

#[derive(Debug, Clone, Serialize)]
pub struct FormSession {
    pub id: Uuid,
    pub profile: SearchProfile,
    pub last_result: Option<SearchResult>,
    /// Bumped every time a search starts. A finished search is only kept if its
    /// generation is still the latest one.
    #[serde(skip)]
    search_generation: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FormSession {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            profile: SearchProfile::default(),
            last_result: None,
            search_generation: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn is_idle(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        (now - self.updated_at)
            .to_std()
            .map_or(false, |idle| idle > ttl)
    }
}

/// Ticket handed out when a search starts; presented back when it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    pub session_id: Uuid,
    generation: u64,
}

/// Idle time after which a session is dropped, unless configured otherwise.
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, FormSession>>>,
    idle_ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_SESSION_TTL_SECS))
    }
}

impl SessionStore {
    pub fn new(idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::default(),
            idle_ttl,
        }
    }

    pub async fn create(&self) -> FormSession {
        let session = FormSession::new();
        let mut sessions = self.sessions.write().await;

        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_idle(now, self.idle_ttl));
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {pruned} idle sessions");
        }

        sessions.insert(session.id, session.clone());
        session
    }

    pub async fn get(&self, id: Uuid) -> Result<FormSession, AppError> {
        let sessions = self.sessions.read().await;
        sessions
            .get(&id)
            .filter(|s| !s.is_idle(Utc::now(), self.idle_ttl))
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    /// Ends a session. Its stored result goes with it.
    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    fn live_mut<'a>(
        &self,
        sessions: &'a mut HashMap<Uuid, FormSession>,
        id: Uuid,
    ) -> Result<&'a mut FormSession, AppError> {
        sessions
            .get_mut(&id)
            .filter(|s| !s.is_idle(Utc::now(), self.idle_ttl))
            .ok_or_else(|| not_found(id))
    }

    /// Replaces the session profile with `update(&current)`.
    pub async fn update_profile<F>(&self, id: Uuid, update: F) -> Result<FormSession, AppError>
    where
        F: FnOnce(&SearchProfile) -> SearchProfile,
    {
        let mut sessions = self.sessions.write().await;
        let session = self.live_mut(&mut sessions, id)?;
        session.profile = update(&session.profile);
        session.updated_at = Utc::now();
        Ok(session.clone())
    }

    /// Marks a new search as started and returns the profile snapshot to search with.
    pub async fn begin_search(&self, id: Uuid) -> Result<(SearchTicket, SearchProfile), AppError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_mut(&mut sessions, id)?;
        session.search_generation += 1;
        session.updated_at = Utc::now();
        let ticket = SearchTicket {
            session_id: id,
            generation: session.search_generation,
        };
        Ok((ticket, session.profile.clone()))
    }

    /// Stores `result` unless a newer search started after `ticket` was issued.
    /// Returns whether the result was kept.
    pub async fn complete_search(
        &self,
        ticket: SearchTicket,
        result: SearchResult,
    ) -> Result<bool, AppError> {
        let mut sessions = self.sessions.write().await;
        let session = self.live_mut(&mut sessions, ticket.session_id)?;

        if session.search_generation != ticket.generation {
            return Ok(false);
        }
        session.last_result = Some(result);
        session.updated_at = Utc::now();
        Ok(true)
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
