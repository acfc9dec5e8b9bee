//! HTTP transport.
//!
//! The client hands one fully signed [`HttpRequest`] to an [`HttpTransport`]
//! and receives the raw status and body back. Exactly one attempt is made;
//! nothing here retries.

use super::params::FlatParams;
use super::profile::HttpMethod;
use async_trait::async_trait;
use hiface_core::error::NetworkError;
use reqwest::{Client, Method};
use std::time::Duration;
use tracing::debug;

/// Request body, shaped by the signing scheme.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON text, sent byte-for-byte as signed.
    Json(String),
    /// URL-encoded form body.
    Form(FlatParams),
    /// Parameters carried in the query string.
    Query(FlatParams),
}

/// A signed request ready to send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Absolute URL without query string.
    pub url: String,
    /// Extra headers, in order.
    pub headers: Vec<(String, String)>,
    /// Body or query parameters.
    pub body: RequestBody,
    /// Deadline for the whole exchange.
    pub timeout: Duration,
}

/// Raw HTTP answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    /// Status code.
    pub status: u16,
    /// Canonical reason phrase, if known.
    pub status_text: String,
    /// Body text.
    pub body: String,
}

/// Outbound HTTP capability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Performs one HTTP exchange.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError>;
}

/// `reqwest`-backed transport.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with a fresh connection pool.
    pub fn new() -> Result<Self, NetworkError> {
        let client = Client::builder()
            .user_agent(concat!("hiface/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| NetworkError::ConnectionFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, NetworkError> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };
        let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);

        debug!(method = %method, url = %request.url, "Sending request");

        let mut builder = self
            .client
            .request(method, &request.url)
            .timeout(request.timeout);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(text) => builder.body(text),
            RequestBody::Form(params) => builder.form(&params),
            RequestBody::Query(params) => builder.query(&params),
        };

        let response = builder
            .send()
            .await
            .map_err(|e| map_send_error(&e, timeout_ms))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| map_send_error(&e, timeout_ms))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}

fn map_send_error(e: &reqwest::Error, timeout_ms: u64) -> NetworkError {
    if e.is_timeout() {
        NetworkError::Timeout { timeout_ms }
    } else {
        NetworkError::ConnectionFailed {
            reason: e.to_string(),
        }
    }
}
