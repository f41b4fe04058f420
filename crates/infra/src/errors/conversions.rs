//! Conversions from external infrastructure errors into domain errors.

use gttx_domain::GttxError;
use reqwest::Error as HttpError;
use url::ParseError as UrlError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub GttxError);

impl From<InfraError> for GttxError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<GttxError> for InfraError {
    fn from(value: GttxError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoGttxError {
    fn into_gttx(self) -> GttxError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → GttxError */
/* -------------------------------------------------------------------------- */

impl IntoGttxError for HttpError {
    fn into_gttx(self) -> GttxError {
        if self.is_timeout() {
            return GttxError::Transport("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return GttxError::Transport(format!("HTTP connection failure: {self}"));
        }

        if self.is_decode() {
            return GttxError::InvalidResponse(format!("response body is not valid JSON: {self}"));
        }

        if self.is_builder() {
            return GttxError::Config(format!("cannot build HTTP request: {self}"));
        }

        GttxError::Transport(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_gttx())
    }
}

/* -------------------------------------------------------------------------- */
/* url::ParseError → GttxError */
/* -------------------------------------------------------------------------- */

impl From<UrlError> for InfraError {
    fn from(value: UrlError) -> Self {
        InfraError(GttxError::Config(format!("invalid request URL: {value}")))
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
