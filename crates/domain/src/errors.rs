//! Error types used throughout the client
//!
//! Every failure carries enough structure for a caller to branch on it:
//! provider failures keep the numeric `error_code` and the English message,
//! everything else keeps a human-readable description.

use thiserror::Error;

use crate::constants::AUTHORIZATION_REJECTED_CODE;

/// Coarse grouping of [`GttxError`] variants for logging and branching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The provider refused credentials or a presented token
    Authorization,
    /// The provider rejected a request for a non-authorization reason
    Provider,
    /// No response body was obtained
    Transport,
    /// A response arrived but could not be interpreted
    Response,
    /// Local configuration is unusable
    Config,
}

/// Main error type for the GTTX client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GttxError {
    /// The authorization endpoint rejected the application credentials.
    #[error("Authorization failed (code {code}): {message}")]
    AuthorizationFailed { code: i64, message: String },

    /// An authenticated call was rejected because the token was refused.
    #[error("Authorization expired (code {code}): {message}")]
    AuthorizationExpired { code: i64, message: String },

    /// Any other provider-level failure.
    #[error("Provider rejected request (code {code}): {message}")]
    ProviderRejected { code: i64, message: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GttxError {
    /// Provider error code, if this failure came from a classified envelope
    pub fn code(&self) -> Option<i64> {
        match self {
            Self::AuthorizationFailed { code, .. }
            | Self::AuthorizationExpired { code, .. }
            | Self::ProviderRejected { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Human-readable message without the variant prefix
    pub fn message(&self) -> String {
        match self {
            Self::AuthorizationFailed { message, .. }
            | Self::AuthorizationExpired { message, .. }
            | Self::ProviderRejected { message, .. } => message.clone(),
            Self::Transport(message)
            | Self::InvalidResponse(message)
            | Self::Config(message) => message.clone(),
            Self::HttpStatus { status, body } => format!("status {status}: {body}"),
        }
    }

    /// Get the error category for this error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AuthorizationFailed { .. } | Self::AuthorizationExpired { .. } => {
                ErrorCategory::Authorization
            }
            Self::ProviderRejected { .. } => ErrorCategory::Provider,
            Self::Transport(_) => ErrorCategory::Transport,
            Self::HttpStatus { .. } | Self::InvalidResponse(_) => ErrorCategory::Response,
            Self::Config(_) => ErrorCategory::Config,
        }
    }

    /// Only a rejected token on an authenticated call is worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::AuthorizationExpired { code, .. } if *code == AUTHORIZATION_REJECTED_CODE)
    }

    /// Stable label suitable for structured log fields
    pub fn label(&self) -> &'static str {
        match self {
            Self::AuthorizationFailed { .. } => "authorization_failed",
            Self::AuthorizationExpired { .. } => "authorization_expired",
            Self::ProviderRejected { .. } => "provider_rejected",
            Self::Transport(_) => "transport",
            Self::HttpStatus { .. } => "http_status",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Config(_) => "config",
        }
    }
}

impl From<serde_json::Error> for GttxError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidResponse(err.to_string())
    }
}

/// Result type alias for GTTX operations
pub type Result<T> = std::result::Result<T, GttxError>;
