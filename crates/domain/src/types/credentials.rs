//! Application credentials

use serde::{Deserialize, Serialize};

/// Application identifier and secret key issued by the provider
///
/// Immutable for the lifetime of a client.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub app_id: String,
    pub secret_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self { app_id: app_id.into(), secret_key: secret_key.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &self.app_id)
            .field("secret_key", &"<redacted>")
            .finish()
    }
}
