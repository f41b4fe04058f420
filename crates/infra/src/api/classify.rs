//! Response classification
//!
//! Applies the provider's single status-flag rule to a decoded body and maps
//! a failure to the error variant matching the call that produced it.

use gttx_domain::constants::{API_STATUS_FAILURE, AUTHORIZATION_REJECTED_CODE};
use gttx_domain::{ClassifiedResult, GttxError, ProviderFailure, Result};
use serde_json::{Number, Value};

/// Which kind of call a response belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// The unauthenticated authorization call itself
    Authorization,
    /// A resource call that presented a token
    Authenticated,
    /// A resource call made without a token
    Anonymous,
}

/// Classify a decoded body.
///
/// A numeric `apiStatus` equal to 1 (`1.0` included) yields a failure
/// carrying `result.error_code` and `result.error_en`. Any other body is a
/// success and is returned unchanged.
///
/// `error_code` may be an integral number or a string. A string contributes
/// its leading integer, so `"4 "`, `"4abc"` and `4.0` all read as code 4.
///
/// # Errors
/// Returns `GttxError::InvalidResponse` when a failure envelope has no
/// parseable `error_code`.
pub fn classify(body: Value) -> Result<ClassifiedResult> {
    if !body.get("apiStatus").is_some_and(is_failure_flag) {
        return Ok(ClassifiedResult::Success(body));
    }

    let result = body.get("result");
    let code = result
        .and_then(|r| r.get("error_code"))
        .and_then(parse_error_code)
        .ok_or_else(|| {
            GttxError::InvalidResponse(format!("failure envelope without a numeric error_code: {body}"))
        })?;
    let message = result
        .and_then(|r| r.get("error_en"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    Ok(ClassifiedResult::Failure(ProviderFailure { code, message }))
}

fn is_failure_flag(status: &Value) -> bool {
    match status {
        Value::Number(n) => number_as_integer(n) == Some(API_STATUS_FAILURE),
        _ => false,
    }
}

fn parse_error_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => number_as_integer(n),
        Value::String(s) => leading_integer(s),
        _ => None,
    }
}

fn number_as_integer(n: &Number) -> Option<i64> {
    n.as_i64().or_else(|| {
        let text = n.to_string();
        let (whole, fraction) = text.split_once('.')?;
        if fraction.bytes().all(|b| b == b'0') {
            whole.parse().ok()
        } else {
            None
        }
    })
}

/// Optional sign and digits at the start of `text`, after leading whitespace
fn leading_integer(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let sign = usize::from(text.starts_with(['+', '-']));
    let digits = text[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    text[..sign + digits].parse().ok()
}

/// Turn a provider failure into the error a caller sees for this call kind.
pub fn failure_to_error(failure: ProviderFailure, kind: CallKind) -> GttxError {
    let ProviderFailure { code, message } = failure;
    match kind {
        CallKind::Authorization => GttxError::AuthorizationFailed { code, message },
        CallKind::Authenticated if code == AUTHORIZATION_REJECTED_CODE => {
            GttxError::AuthorizationExpired { code, message }
        }
        CallKind::Authenticated | CallKind::Anonymous => {
            GttxError::ProviderRejected { code, message }
        }
    }
}

/// Classify and collapse into a `Result` for the given call kind.
pub fn classify_for(body: Value, kind: CallKind) -> Result<Value> {
    match classify(body)? {
        ClassifiedResult::Success(payload) => Ok(payload),
        ClassifiedResult::Failure(failure) => Err(failure_to_error(failure, kind)),
    }
}
