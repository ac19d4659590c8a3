// src/services/session_manager.rs
use std::{
    collections::HashMap,
    fmt::Debug,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::RwLock;
use uuid::Uuid;

use super::{
    composer::Composed,
    guide::{GuideMode, GuideSession, PendingTurn, SessionView, TurnOutcome},
};
use crate::error::AppError;

#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<RwLock<HashMap<String, GuideSession>>>,
    ttl: Duration,
}

impl Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl SessionManager {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    // Create a fresh session and return its id.
    pub async fn create_session(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let session = GuideSession::new(id.clone());

        let mut guard = self.inner.write().await;
        guard.insert(id.clone(), session);
        id
    }

    // Ensure there's a session with this id.
    pub async fn ensure_session(&self, id: &str) -> String {
        {
            let guard = self.inner.read().await;
            if guard.contains_key(id) {
                return id.to_string();
            }
        }
        let mut guard = self.inner.write().await;
        guard
            .entry(id.to_string())
            .or_insert_with(|| GuideSession::new(id));
        id.to_string()
    }

    /// Append the user's message and route it. The lock is released before
    /// the caller composes the reply.
    pub async fn begin_turn(&self, session_id: &str, text: &str) -> Result<PendingTurn, AppError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(session_id.to_string()))?;
        session.begin_turn(text)
    }

    pub async fn finish_turn(
        &self,
        session_id: &str,
        turn: PendingTurn,
        composed: Composed,
    ) -> Result<TurnOutcome, AppError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(session_id.to_string()))?;
        Ok(session.finish_turn(turn, composed))
    }

    pub async fn navigate(&self, session_id: &str, mode: GuideMode) -> Result<SessionView, AppError> {
        let mut guard = self.inner.write().await;
        let session = guard
            .get_mut(session_id)
            .ok_or_else(|| AppError::NotFound(session_id.to_string()))?;
        session.navigate(mode);
        Ok(session.view())
    }

    pub async fn view(&self, session_id: &str) -> Option<SessionView> {
        let guard = self.inner.read().await;
        guard.get(session_id).map(GuideSession::view)
    }

    /// Remove a session by id
    pub async fn remove_session(&self, session_id: &str) -> bool {
        let mut guard = self.inner.write().await;
        guard.remove(session_id).is_some()
    }

    /// Remove sessions idle longer than ttl. Returns number removed.
    pub async fn purge_expired(&self) -> usize {
        let mut guard = self.inner.write().await;
        let now = Instant::now();
        let before = guard.len();
        guard.retain(|_, s| s.is_loading() || now.duration_since(s.last_active) < self.ttl);
        before - guard.len()
    }

    /// Number of sessions
    pub async fn len(&self) -> usize {
        let guard = self.inner.read().await;
        guard.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
