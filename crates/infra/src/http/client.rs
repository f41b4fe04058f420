use std::time::Duration;

use gttx_domain::Result;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;

use crate::errors::InfraError;

/// Request timeout applied when the caller does not pick one.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared reqwest client carrying the GTTX timeout and user agent.
///
/// Every request goes out exactly once. A failure before any response is
/// reported as `Transport`; re-sending is the retry policy's decision, and it
/// only re-sends on an expired authorization.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Send one request and hand back the response whatever its status.
    ///
    /// # Errors
    /// `Transport` when no response arrives, `Config` when the request
    /// cannot be built.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let request = builder.build().map_err(InfraError::from)?;
        let method = request.method().clone();
        let route = request.url().path().to_string();

        debug!(%method, path = %route, "sending request");
        match self.client.execute(request).await {
            Ok(response) => {
                debug!(%method, path = %route, status = %response.status(), "response received");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, path = %route, error = %err, "request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    user_agent: Option<String>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self { timeout: DEFAULT_TIMEOUT, user_agent: None }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder().timeout(self.timeout).no_proxy();
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(InfraError::from)?;
        Ok(HttpClient { client })
    }
}
