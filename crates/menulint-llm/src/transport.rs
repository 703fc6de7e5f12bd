//! HTTP transport seam
//!
//! A [`Transport`] performs exactly one attempt. Retry policy lives in
//! [`crate::retry`].

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::time::Duration;
use thiserror::Error;

use crate::LlmError;

/// Opaque request descriptor: endpoint, headers and JSON payload
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    /// Full endpoint URL
    pub url: String,
    /// Header name/value pairs
    pub headers: Vec<(String, String)>,
    /// JSON body
    pub body: Value,
}

impl HttpRequest {
    /// Create a POST descriptor with no headers
    pub fn post(url: impl Into<String>, body: Value) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
            body,
        }
    }

    /// Add a header
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Look up a header value (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values carry the credential.
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(name, _)| (name.as_str(), "<redacted>"))
            .collect();
        f.debug_struct("HttpRequest")
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_bytes", &self.body.to_string().len())
            .finish()
    }
}

/// A response received from the endpoint, whatever its status
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    /// HTTP status code
    pub status: u16,
    /// Canonical reason phrase for the status
    pub status_text: String,
    /// Raw response body
    pub body: String,
}

impl HttpReply {
    /// Build a reply, filling in the canonical reason phrase
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        let status_text = reqwest::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("")
            .to_string();
        Self {
            status,
            status_text,
            body: body.into(),
        }
    }

    /// Build a reply with a JSON body
    pub fn json(status: u16, body: &Value) -> Self {
        Self::new(status, body.to_string())
    }

    /// 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Rate-limited or transiently unavailable
    pub fn is_transient(&self) -> bool {
        crate::retry::TRANSIENT_STATUSES.contains(&self.status)
    }
}

/// A failure before any HTTP status was received
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    /// Description of the failure
    pub message: String,
}

impl TransportError {
    /// Create a transport error
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            TransportError::new(format!("Request timed out: {}", e))
        } else if e.is_connect() {
            TransportError::new(format!("Connection failed: {}", e))
        } else if e.is_body() || e.is_decode() {
            TransportError::new(format!("Failed to read response body: {}", e))
        } else {
            TransportError::new(format!("Request failed: {}", e))
        }
    }
}

/// One HTTP attempt against the model endpoint
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request once
    async fn send(&self, request: &HttpRequest) -> Result<HttpReply, TransportError>;
}

/// Transport backed by a shared `reqwest::Client`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with a per-attempt timeout
    pub fn new(timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> Result<HttpReply, TransportError> {
        let mut builder = self.client.post(&request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        // json() only adds Content-Type when no header set it already
        let builder = builder.json(&request.body);

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(HttpReply {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or("").to_string(),
            body,
        })
    }
}
