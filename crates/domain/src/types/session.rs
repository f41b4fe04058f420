//! Provider session token

use chrono::{DateTime, TimeDelta, Utc};

use crate::constants::SESSION_VALIDITY_SECS;

/// A token issued by the authorization endpoint and the instant it was issued
///
/// Sessions are replaced, never mutated: re-authorization produces a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    token: String,
    issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, issued_at: DateTime<Utc>) -> Self {
        Self { token: token.into(), issued_at }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Length of the window during which a session is presented
    pub fn validity_window() -> TimeDelta {
        TimeDelta::seconds(SESSION_VALIDITY_SECS)
    }

    /// True while `now - issued_at` is strictly below the validity window.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now.signed_duration_since(self.issued_at) < Self::validity_window()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
