//! Typed session access for the chat layer
//!
//! Sessions carry rolling expiry: every save rewrites the session with the
//! full TTL, so active conversations stay alive and abandoned ones age out
//! on their own.

use crate::keys;
use crate::model::SessionData;
use crate::storage::CacheBackend;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub struct SessionCache {
    backend: Arc<dyn CacheBackend>,
    ttl: Duration,
}

impl SessionCache {
    pub fn new(backend: Arc<dyn CacheBackend>, ttl: Duration) -> Self {
        Self { backend, ttl }
    }

    /// Fetch a session; an undecodable stored value counts as missing
    pub async fn get(&self, session_id: &str) -> Option<SessionData> {
        let raw = self.backend.get(&keys::session(session_id)).await?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                warn!("Discarding undecodable session {}: {}", session_id, e);
                None
            }
        }
    }

    /// Persist a session with the full TTL.
    ///
    /// Failures are logged and swallowed: losing a cache write must not
    /// fail the conversation that triggered it.
    pub async fn save(&self, session: &SessionData) {
        let key = keys::session(&session.session_id);
        match serde_json::to_string(session) {
            Ok(value) => {
                if let Err(e) = self.backend.set(&key, value, self.ttl).await {
                    warn!("Failed to save session {}: {}", session.session_id, e);
                } else {
                    debug!(
                        "Saved session {} ({} turns)",
                        session.session_id,
                        session.conversation_history.len()
                    );
                }
            }
            Err(e) => warn!("Failed to save session {}: {}", session.session_id, e),
        }
    }

    /// Reset the expiry clock without rewriting the payload. `false` when
    /// the session no longer exists.
    pub async fn touch(&self, session_id: &str) -> bool {
        match self.backend.extend_ttl(&keys::session(session_id), self.ttl).await {
            Ok(extended) => extended,
            Err(e) => {
                warn!("Failed to touch session {}: {}", session_id, e);
                false
            }
        }
    }

    /// Remove a session, reporting whether it existed
    pub async fn delete(&self, session_id: &str) -> bool {
        self.backend.delete(&keys::session(session_id)).await
    }

    /// Time left before the session expires
    pub async fn remaining(&self, session_id: &str) -> Option<Duration> {
        self.backend.remaining_ttl(&keys::session(session_id)).await
    }
}
