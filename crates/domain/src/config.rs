//! Client configuration structures
//!
//! Mirrors the construction options of the provider SDK: host, protocol and
//! the bound on authorization-rejected retries, plus transport settings.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_HOST, DEFAULT_HTTP_TIMEOUT_SECS};
use crate::errors::{GttxError, Result};
use crate::impl_wire_enum_conversions;
use crate::types::Credentials;

/// URL scheme used to reach the provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Protocol {
    Http,
    #[default]
    Https,
}

impl_wire_enum_conversions!(Protocol {
    Http => "http",
    Https => "https",
});

/// Options recognized at client construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Provider host, optionally with a port (e.g. `cloud.gttx.com`)
    pub host: String,
    pub protocol: Protocol,
    /// Maximum retries on authorization-rejected (code 4) failures
    pub unauthorized_retry: u32,
    /// Per-request transport timeout in seconds
    pub timeout_secs: u64,
    /// Evict a rejected token from the cache before retrying
    ///
    /// Off by default: a retry re-resolves the token through the normal
    /// time-based validity check, which may hand back the same token.
    pub invalidate_rejected_token: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            protocol: Protocol::Https,
            unauthorized_retry: 0,
            timeout_secs: DEFAULT_HTTP_TIMEOUT_SECS,
            invalidate_rejected_token: false,
            user_agent: None,
        }
    }
}

impl ClientConfig {
    /// `<protocol>://<host>` as a parsed URL
    ///
    /// # Errors
    /// Returns `GttxError::Config` if the host does not form a valid URL.
    pub fn base_url(&self) -> Result<url::Url> {
        let raw = format!("{}://{}", self.protocol, self.host.trim_end_matches('/'));
        url::Url::parse(&raw)
            .map_err(|e| GttxError::Config(format!("Invalid base URL {raw}: {e}")))
    }
}

/// Complete client settings as loaded from the environment or a file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub credentials: Credentials,
    #[serde(default)]
    pub client: ClientConfig,
}
