//! Application authorization and token resolution
//!
//! The provider issues a session token in exchange for the application id
//! and secret key. [`Authenticator`] performs that exchange, installs the
//! result into the shared [`TokenCache`] and hands tokens to the dispatcher.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use gttx_domain::constants::{APP_ID_PARAM, AUTHORIZATION_FIELD, AUTHORIZE_PATH, SECRET_KEY_PARAM};
use gttx_domain::{Credentials, GttxError, Result, Session};
use reqwest::Method;
use serde_json::Value;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};
use url::Url;

use super::classify::{classify_for, CallKind};
use super::response::decode_body;
use super::session::TokenCache;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Trait for providing access tokens
///
/// This trait allows dependency injection and testing with mock providers.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Get a token that is currently believed to be valid
    ///
    /// Implementations authorize on demand when nothing valid is cached.
    async fn access_token(&self) -> Result<String>;

    /// Authorize unconditionally and return the newly issued token
    async fn refresh_token(&self) -> Result<String>;

    /// Forget `token` after the provider refused it.
    ///
    /// Returns whether a cached session was evicted. The default keeps
    /// everything.
    fn invalidate(&self, _token: &str) -> bool {
        false
    }
}

/// Outcome of the most recent authorization call
#[derive(Debug, Default)]
struct LastAttempt {
    generation: u64,
    failure: Option<GttxError>,
}

/// Exchanges credentials for session tokens
///
/// Token resolution is single-flight: concurrent callers that all find the
/// cache empty or expired queue on one lock, and only the first performs the
/// authorization call. The rest share its outcome, the installed session or
/// the error it failed with.
pub struct Authenticator {
    http: HttpClient,
    base_url: Url,
    credentials: Credentials,
    cache: Arc<TokenCache>,
    generation: AtomicU64,
    last_attempt: Mutex<LastAttempt>,
}

impl Authenticator {
    pub fn new(
        http: HttpClient,
        base_url: Url,
        credentials: Credentials,
        cache: Arc<TokenCache>,
    ) -> Self {
        Self {
            http,
            base_url,
            credentials,
            cache,
            generation: AtomicU64::new(0),
            last_attempt: Mutex::new(LastAttempt::default()),
        }
    }

    #[cfg(test)]
    fn cache(&self) -> &Arc<TokenCache> {
        &self.cache
    }

    /// Perform one authorization call and install the issued token.
    ///
    /// Never retried here: a rejected authorization surfaces immediately as
    /// `AuthorizationFailed`.
    ///
    /// # Errors
    /// - `AuthorizationFailed` if the provider rejects the credentials
    /// - `Transport`, `HttpStatus` or `InvalidResponse` if no usable reply
    ///   arrives
    #[instrument(skip(self), fields(app_id = %self.credentials.app_id))]
    pub async fn authorize(&self) -> Result<Session> {
        let url = self.base_url.join(AUTHORIZE_PATH).map_err(InfraError::from)?;
        let request = self.http.request(Method::GET, url).query(&[
            (APP_ID_PARAM, self.credentials.app_id.as_str()),
            (SECRET_KEY_PARAM, self.credentials.secret_key.as_str()),
        ]);

        debug!("requesting session token");
        let response = self.http.send(request).await?;
        let body = decode_body(response).await?;
        let payload = classify_for(body, CallKind::Authorization)?;
        let token = extract_token(&payload)?;

        let session = self.cache.set(token);
        info!(issued_at = %session.issued_at(), "installed new session");
        Ok(session)
    }

    /// Authorize while holding the attempt lock and publish the outcome to
    /// callers queued behind it.
    async fn authorize_recording(&self, last: &mut LastAttempt) -> Result<String> {
        let outcome = self.authorize().await;
        last.generation += 1;
        last.failure = outcome.as_ref().err().cloned();
        self.generation.store(last.generation, Ordering::Release);
        outcome.map(|session| session.token().to_string())
    }
}

#[async_trait]
impl AccessTokenProvider for Authenticator {
    async fn access_token(&self) -> Result<String> {
        if let Some(session) = self.cache.valid_session() {
            return Ok(session.token().to_string());
        }

        let observed = self.generation.load(Ordering::Acquire);
        let mut last = self.last_attempt.lock().await;

        // Another caller may have authorized while we waited for the lock.
        if let Some(session) = self.cache.valid_session() {
            debug!("reusing session installed by concurrent authorization");
            return Ok(session.token().to_string());
        }
        if last.generation != observed {
            if let Some(err) = &last.failure {
                debug!(error = %err, "concurrent authorization failed; sharing its error");
                return Err(err.clone());
            }
        }

        self.authorize_recording(&mut last).await
    }

    async fn refresh_token(&self) -> Result<String> {
        let mut last = self.last_attempt.lock().await;
        self.authorize_recording(&mut last).await
    }

    fn invalidate(&self, token: &str) -> bool {
        self.cache.invalidate(token)
    }
}

/// Pull the token out of an authorization success body.
///
/// The provider places it at the top level; `result.Authorization` is
/// accepted as well.
fn extract_token(payload: &Value) -> Result<String> {
    payload
        .get(AUTHORIZATION_FIELD)
        .or_else(|| payload.get("result").and_then(|r| r.get(AUTHORIZATION_FIELD)))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .ok_or_else(|| {
            GttxError::InvalidResponse("authorization response carries no token".to_string())
        })
}
