//! Provider response envelope
//!
//! Every reply is `{ apiStatus, result }`. `apiStatus == 1` marks a failure,
//! in which case `result` carries `error_code` and `error_en`.

use serde_json::Value;

/// A provider-level failure extracted from an envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub code: i64,
    pub message: String,
}

/// Outcome of classifying a decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ClassifiedResult {
    /// The full decoded body, untouched
    Success(Value),
    Failure(ProviderFailure),
}

impl ClassifiedResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}
