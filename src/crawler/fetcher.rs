//! HTTP fetcher implementation
//!
//! This module defines the transport seam used by the crawl engine:
//! - `HttpClient`: HEAD and GET with caller-supplied headers and timeout
//! - `HttpResponse` / `TransportError`: the explicit outcome of every request
//! - `ReqwestClient`: the production transport
//! - `RequestProfile`: the fixed header set and timeout applied to every call

use crate::config::Config;
use crate::ConfigError;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

/// Failure to obtain a response at all
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("failed to read response body: {0}")]
    Body(String),

    #[error("request failed: {0}")]
    Request(String),
}

/// A response as seen by the crawl engine
///
/// HEAD responses and non-200 GET responses carry an empty body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: String::new(),
        }
    }

    /// Sets the Content-Type header
    pub fn with_content_type(mut self, content_type: &str) -> Self {
        if let Ok(value) = HeaderValue::from_str(content_type) {
            self.headers.insert(CONTENT_TYPE, value);
        }
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Raw Content-Type header value, if present and readable
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }
}

/// Outcome of a single request
pub type HttpResult = Result<HttpResponse, TransportError>;

/// HTTP capability consumed by the crawl engine
///
/// Implementations perform exactly one request per call. Retries, redirects
/// and TLS are transport defaults and never configured by the engine.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn head(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> HttpResult;

    async fn get(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> HttpResult;
}

/// Headers and timeout attached to every request of a run
#[derive(Debug, Clone)]
pub struct RequestProfile {
    pub headers: HeaderMap,
    pub timeout: Duration,
}

impl RequestProfile {
    /// Builds the profile from configuration
    ///
    /// # Returns
    ///
    /// * `Ok(RequestProfile)` - User-Agent header and timeout
    /// * `Err(ConfigError)` - The user agent is not a valid header value
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let user_agent = config.user_agent.header_value();
        let value = HeaderValue::from_str(&user_agent).map_err(|e| {
            ConfigError::Validation(format!("Invalid user agent '{}': {}", user_agent, e))
        })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, value);

        Ok(Self {
            headers,
            timeout: config.crawler.request_timeout(),
        })
    }
}

/// Production transport backed by a pooled `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    /// Builds a client whose idle pool per host matches the concurrency limit
    ///
    /// # Example
    ///
    /// ```no_run
    /// use site_sweep::crawler::ReqwestClient;
    ///
    /// let client = ReqwestClient::new(10).unwrap();
    /// ```
    pub fn new(max_connections: usize) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(max_connections)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { client })
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn head(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> HttpResult {
        let response = self
            .client
            .head(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_error)?;

        Ok(HttpResponse {
            status: response.status(),
            headers: response.headers().clone(),
            body: String::new(),
        })
    }

    async fn get(&self, url: &str, headers: &HeaderMap, timeout: Duration) -> HttpResult {
        let response = self
            .client
            .get(url)
            .headers(headers.clone())
            .timeout(timeout)
            .send()
            .await
            .map_err(classify_error)?;

        let status = response.status();
        let response_headers = response.headers().clone();

        // Non-200 pages are dropped, so their bodies are never read
        let body = if status == StatusCode::OK {
            response.text().await.map_err(|e| {
                if e.is_timeout() {
                    TransportError::Timeout
                } else {
                    TransportError::Body(e.to_string())
                }
            })?
        } else {
            String::new()
        };

        Ok(HttpResponse {
            status,
            headers: response_headers,
            body,
        })
    }
}

/// Maps a reqwest failure onto the transport error taxonomy
fn classify_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else if e.is_connect() {
        TransportError::Connect(e.to_string())
    } else {
        TransportError::Request(e.to_string())
    }
}
