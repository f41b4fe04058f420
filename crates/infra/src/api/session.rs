//! In-memory session cache
//!
//! Holds at most one live [`Session`]. Reads and writes are synchronous and
//! never suspend; every caller on the same client shares one cache.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use gttx_domain::Session;
use parking_lot::RwLock;
use tracing::debug;

use crate::clock::{Clock, SystemClock};

/// Most recently issued session plus the clock used to judge it
pub struct TokenCache {
    session: RwLock<Option<Session>>,
    clock: Arc<dyn Clock>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { session: RwLock::new(None), clock }
    }

    /// Current session, valid or not
    pub fn get(&self) -> Option<Session> {
        self.session.read().clone()
    }

    /// Install a freshly issued token, replacing whatever was there.
    pub fn set(&self, token: impl Into<String>) -> Session {
        let session = Session::new(token, self.clock.now());
        *self.session.write() = Some(session.clone());
        session
    }

    /// True iff a session exists and `now - issued_at` is below the window.
    pub fn is_valid(session: Option<&Session>, now: DateTime<Utc>) -> bool {
        session.is_some_and(|s| s.is_valid_at(now))
    }

    /// Cached session if it is still inside its validity window
    pub fn valid_session(&self) -> Option<Session> {
        let now = self.clock.now();
        self.session.read().as_ref().filter(|s| s.is_valid_at(now)).cloned()
    }

    /// Drop the cached session only if it still holds `token`.
    ///
    /// A session installed by a concurrent re-authorization is left alone.
    /// Returns whether anything was evicted.
    pub fn invalidate(&self, token: &str) -> bool {
        let mut guard = self.session.write();
        if guard.as_ref().is_some_and(|s| s.token() == token) {
            *guard = None;
            debug!("evicted rejected session token");
            true
        } else {
            false
        }
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}
