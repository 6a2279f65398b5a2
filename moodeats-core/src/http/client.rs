//! HTTP client trait and implementations.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::FetchError;

use super::host_of;
use super::rate_limiter::RateLimiter;

/// Trait for HTTP clients, enabling mockability in tests.
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// GET a URL and return the response body as text.
    async fn get_text(&self, url: &str) -> Result<String, FetchError>;
}

/// Configuration for [`CatalogHttpClient`].
#[derive(Clone)]
pub struct CatalogHttpClientBuilder {
    rate_limit_ms: u64,
    user_agent: String,
}

impl Default for CatalogHttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogHttpClientBuilder {
    /// Create a builder with rate limiting disabled and the crate user agent.
    pub fn new() -> Self {
        Self {
            rate_limit_ms: 0,
            user_agent: crate::config::default_user_agent(),
        }
    }

    /// Set the delay between requests to the same host. 0 disables rate limiting.
    pub fn rate_limit_ms(mut self, ms: u64) -> Self {
        self.rate_limit_ms = ms;
        self
    }

    /// Set the user agent string.
    pub fn user_agent(mut self, user_agent: String) -> Self {
        self.user_agent = user_agent;
        self
    }

    /// Build the client. No request timeout is configured; reqwest's defaults apply.
    pub fn build(self) -> Result<CatalogHttpClient, FetchError> {
        let inner = reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .build()?;

        Ok(CatalogHttpClient {
            inner: Arc::new(inner),
            rate_limiter: RateLimiter::new(Duration::from_millis(self.rate_limit_ms)),
        })
    }
}

/// Production HTTP client.
pub struct CatalogHttpClient {
    /// Shared reqwest client for connection pooling.
    inner: Arc<reqwest::Client>,
    /// Per-host rate limiter.
    rate_limiter: RateLimiter,
}

impl CatalogHttpClient {
    /// Create a client with default configuration.
    pub fn new() -> Result<Self, FetchError> {
        CatalogHttpClientBuilder::new().build()
    }

    pub fn builder() -> CatalogHttpClientBuilder {
        CatalogHttpClientBuilder::new()
    }
}

#[async_trait]
impl HttpClient for CatalogHttpClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        let parsed = url::Url::parse(url).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

        if let Some(host) = host_of(url) {
            self.rate_limiter.wait(&host).await;
        }

        tracing::debug!(url, "network: fetching");
        let response = self.inner.get(parsed).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(url, status = %status, "network: request failed");
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        tracing::debug!(url, status = %status, len = bytes.len(), "network: fetched");

        String::from_utf8(bytes.to_vec())
            .map_err(|e| FetchError::InvalidEncoding(format!("Invalid UTF-8 in response: {}", e)))
    }
}

/// Mock response for testing.
#[derive(Clone)]
pub enum MockResponse {
    /// A successful response body.
    Body(String),
    /// A non-success HTTP status.
    Status(u16),
    /// A transport failure.
    Error(String),
}

/// Mock HTTP client for testing.
///
/// Responses are keyed by the full request URL. Every request is recorded,
/// whether or not a response was registered for it.
pub struct MockClient {
    responses: HashMap<String, MockResponse>,
    requests: Mutex<Vec<String>>,
}

impl MockClient {
    /// Create a new empty mock client.
    pub fn new() -> Self {
        Self {
            responses: HashMap::new(),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a response for a URL.
    pub fn with_response(mut self, url: &str, response: MockResponse) -> Self {
        self.responses.insert(url.to_string(), response);
        self
    }

    /// Add a body for a URL.
    pub fn with_body(self, url: &str, body: &str) -> Self {
        self.with_response(url, MockResponse::Body(body.to_string()))
    }

    /// Add a JSON body for a URL.
    pub fn with_json(self, url: &str, value: &serde_json::Value) -> Self {
        self.with_response(url, MockResponse::Body(value.to_string()))
    }

    /// Add a transport error for a URL.
    pub fn with_error(self, url: &str, error: &str) -> Self {
        self.with_response(url, MockResponse::Error(error.to_string()))
    }

    /// URLs requested so far, in request order.
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .map(|requests| requests.clone())
            .unwrap_or_default()
    }

    /// Number of times a URL was requested.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Default for MockClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockClient {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        match self.responses.get(url) {
            Some(MockResponse::Body(body)) => Ok(body.clone()),
            Some(MockResponse::Status(status)) => Err(FetchError::HttpStatus {
                status: *status,
                url: url.to_string(),
            }),
            Some(MockResponse::Error(e)) => Err(FetchError::Unavailable(e.clone())),
            None => Err(FetchError::Unavailable(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}

// HttpClient is also implemented for shared handles so a test can keep a
// reference to a MockClient after handing it to the catalog.
#[async_trait]
impl<T: HttpClient + ?Sized> HttpClient for Arc<T> {
    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        (**self).get_text(url).await
    }
}
