//! Token-based admin sessions with fixed time-to-live.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::util::serde::{AdminId, SessionToken};

/// An issued session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Bearer token presented on every request.
    pub token: SessionToken,
    /// Authenticated administrator.
    pub admin_id: AdminId,
    /// Issue time in milliseconds since epoch.
    pub issued_at_ms: u128,
    /// Expiry time in milliseconds since epoch.
    pub expires_at_ms: u128,
}

impl Session {
    /// True once `now_ms` reaches the expiry.
    pub const fn is_expired(&self, now_ms: u128) -> bool {
        now_ms >= self.expires_at_ms
    }
}

/// In-process registry of live sessions.
#[derive(Debug)]
pub struct SessionRegistry {
    ttl: Duration,
    sessions: HashMap<SessionToken, Session>,
}

impl SessionRegistry {
    /// Create a registry issuing sessions valid for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: HashMap::new(),
        }
    }

    /// Issue a new session for `admin_id`.
    pub fn issue(&mut self, admin_id: AdminId, now_ms: u128) -> Session {
        let session = Session {
            token: SessionToken::generate(),
            admin_id,
            issued_at_ms: now_ms,
            expires_at_ms: now_ms + self.ttl.as_millis(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Resolve a live session. Expired sessions are dropped on sight.
    pub fn resolve(&mut self, token: &SessionToken, now_ms: u128) -> Option<Session> {
        if self.sessions.get(token)?.is_expired(now_ms) {
            self.sessions.remove(token);
            return None;
        }
        self.sessions.get(token).cloned()
    }

    /// Revoke a session. Returns whether one was removed.
    pub fn revoke(&mut self, token: &SessionToken) -> bool {
        self.sessions.remove(token).is_some()
    }

    /// Drop every expired session and return how many were removed.
    pub fn prune_expired(&mut self, now_ms: u128) -> usize {
        let before = self.sessions.len();
        self.sessions.retain(|_, s| !s.is_expired(now_ms));
        before - self.sessions.len()
    }

    /// Number of sessions currently held, expired or not.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// True when no sessions are held.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
