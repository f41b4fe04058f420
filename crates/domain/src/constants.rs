//! Provider constants
//!
//! Centralized location for the wire-level constants of the GTTX API.

// Endpoint defaults
pub const DEFAULT_HOST: &str = "cloud.gttx.com";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
pub const AUTHORIZE_PATH: &str = "/xddos/public/authorize";

// Session lifecycle
/// Sessions are treated as expired 25 minutes after issue, below the
/// provider's actual token lifetime.
pub const SESSION_VALIDITY_SECS: i64 = 25 * 60;

// Response envelope
pub const API_STATUS_FAILURE: i64 = 1;
pub const AUTHORIZATION_REJECTED_CODE: i64 = 4;

// Headers and field names
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const AUTHORIZATION_FIELD: &str = "Authorization";
pub const APP_ID_PARAM: &str = "appId";
pub const SECRET_KEY_PARAM: &str = "secretKey";
