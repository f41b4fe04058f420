//! GTTX API client
//!
//! [`GttxClient`] owns the request pipeline: it resolves a token when the
//! request needs one, sends it verbatim in the `Authorization` header,
//! classifies the response envelope and applies the retry policy.
//! Resource methods live in [`super::endpoints`] and only build
//! [`RequestSpec`]s.

use std::sync::Arc;
use std::time::Duration;

use gttx_domain::constants::AUTHORIZATION_HEADER;
use gttx_domain::{ClientConfig, Credentials, GttxError, Result, Settings};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument};
use url::Url;

use super::auth::{AccessTokenProvider, Authenticator};
use super::classify::{classify_for, CallKind};
use super::request::RequestSpec;
use super::response::decode_body;
use super::retry::RetryPolicy;
use super::session::TokenCache;
use crate::clock::{Clock, SystemClock};
use crate::errors::InfraError;
use crate::http::HttpClient;

/// Authenticated client for the GTTX anti-DDoS API
pub struct GttxClient {
    http: HttpClient,
    base_url: Url,
    auth: Arc<dyn AccessTokenProvider>,
    retry: RetryPolicy,
    config: ClientConfig,
}

impl GttxClient {
    /// Create a client with default transport settings.
    ///
    /// # Errors
    /// Returns `GttxError::Config` if the host does not form a valid URL or
    /// the HTTP client cannot be built.
    pub fn new(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Self::builder(credentials).config(config).build()
    }

    pub fn from_settings(settings: Settings) -> Result<Self> {
        Self::new(settings.credentials, settings.client)
    }

    pub fn builder(credentials: Credentials) -> GttxClientBuilder {
        GttxClientBuilder::new(credentials)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Authorize now and return the issued token.
    ///
    /// Resource calls authorize on demand, so calling this is only needed to
    /// validate credentials up front.
    pub async fn authorize(&self) -> Result<String> {
        self.auth.refresh_token().await
    }

    /// Dispatch a request through the full pipeline and return the success
    /// body unchanged.
    ///
    /// # Errors
    /// - `AuthorizationFailed` if a token was needed and authorization failed
    /// - `AuthorizationExpired` once code-4 retries are exhausted
    /// - `ProviderRejected` for any other provider failure code
    /// - `Transport`, `HttpStatus`, `InvalidResponse` when no usable envelope
    ///   arrived
    #[instrument(skip(self, spec), fields(method = %spec.method, path = %spec.path))]
    pub async fn send(&self, spec: RequestSpec) -> Result<Value> {
        let url = self.base_url.join(&spec.path).map_err(InfraError::from)?;
        let spec = &spec;
        let url = &url;

        let payload =
            self.retry.execute(move |attempt| self.attempt(spec, url, attempt)).await?;
        debug!("request succeeded");
        Ok(payload)
    }

    /// Like [`send`](Self::send), deserializing the success body into `T`.
    pub async fn send_as<T: DeserializeOwned>(&self, spec: RequestSpec) -> Result<T> {
        let payload = self.send(spec).await?;
        serde_json::from_value(payload).map_err(|e| {
            GttxError::InvalidResponse(format!("unexpected response shape: {e}"))
        })
    }

    async fn attempt(&self, spec: &RequestSpec, url: &Url, attempt: u32) -> Result<Value> {
        let token = if spec.requires_auth { Some(self.auth.access_token().await?) } else { None };

        let mut request = self.http.request(spec.method.clone(), url.clone());
        if let Some(token) = token.as_deref() {
            request = request.header(AUTHORIZATION_HEADER, token);
        }
        if !spec.query.is_empty() {
            request = request.query(&spec.query);
        }
        if let Some(body) = &spec.body {
            request = request.json(body);
        }

        debug!(attempt, authenticated = token.is_some(), "dispatching request");
        let response = self.http.send(request).await?;
        let body = decode_body(response).await?;

        let kind = if token.is_some() { CallKind::Authenticated } else { CallKind::Anonymous };
        let result = classify_for(body, kind);

        if let (Err(err), Some(token)) = (&result, token.as_deref()) {
            if err.is_retryable()
                && self.config.invalidate_rejected_token
                && self.auth.invalidate(token)
            {
                info!(attempt, "dropped rejected session token");
            }
        }

        result
    }
}

/// Builder for [`GttxClient`]
pub struct GttxClientBuilder {
    credentials: Credentials,
    config: ClientConfig,
    clock: Arc<dyn Clock>,
    token_provider: Option<Arc<dyn AccessTokenProvider>>,
    http: Option<HttpClient>,
}

impl GttxClientBuilder {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            config: ClientConfig::default(),
            clock: Arc::new(SystemClock),
            token_provider: None,
            http: None,
        }
    }

    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn unauthorized_retry(mut self, retries: u32) -> Self {
        self.config.unauthorized_retry = retries;
        self
    }

    /// Clock used to judge session validity
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the built-in authenticator.
    pub fn token_provider(mut self, provider: Arc<dyn AccessTokenProvider>) -> Self {
        self.token_provider = Some(provider);
        self
    }

    pub fn http_client(mut self, http: HttpClient) -> Self {
        self.http = Some(http);
        self
    }

    pub fn build(self) -> Result<GttxClient> {
        let base_url = self.config.base_url()?;

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut builder =
                    HttpClient::builder().timeout(Duration::from_secs(self.config.timeout_secs));
                if let Some(agent) = &self.config.user_agent {
                    builder = builder.user_agent(agent.clone());
                }
                builder.build()?
            }
        };

        let auth = match self.token_provider {
            Some(provider) => provider,
            None => {
                let cache = Arc::new(TokenCache::with_clock(self.clock));
                Arc::new(Authenticator::new(http.clone(), base_url.clone(), self.credentials, cache))
            }
        };

        debug!(
            %base_url,
            unauthorized_retry = self.config.unauthorized_retry,
            "built GTTX client"
        );

        Ok(GttxClient {
            http,
            base_url,
            auth,
            retry: RetryPolicy::new(self.config.unauthorized_retry),
            config: self.config,
        })
    }
}
