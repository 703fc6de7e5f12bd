//! Gemini Provider Implementation
//!
//! Builds `generateContent` requests and runs them through the
//! [`RetryingExecutor`].
//!
//! # Features
//!
//! - Credential sent in the `x-goog-api-key` header, never in the URL
//! - Safety settings at `BLOCK_MEDIUM_AND_ABOVE` for the four harm categories
//! - Optional schema enforcement (`responseMimeType` + `responseSchema`)
//! - Wire types for the success and error envelopes
//!
//! # Examples
//!
//! ```
//! use menulint_llm::{GeminiClient, GeminiConfig, HttpReply, MockTransport};
//!
//! let config = GeminiConfig::new("test-key");
//! let transport = MockTransport::always(HttpReply::new(200, "{}"));
//! let client = GeminiClient::with_transport(config, transport).unwrap();
//! assert_eq!(client.model(), "gemini-2.5-flash");
//! ```

use crate::retry::{RetryPolicy, RetryingExecutor};
use crate::transport::{HttpReply, HttpRequest, ReqwestTransport, Transport};
use crate::LlmError;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::debug;

/// Default Gemini API base URL
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Default per-attempt timeout (60 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const SAFETY_CATEGORIES: [&str; 4] = [
    "HARM_CATEGORY_HARASSMENT",
    "HARM_CATEGORY_HATE_SPEECH",
    "HARM_CATEGORY_SEXUALLY_EXPLICIT",
    "HARM_CATEGORY_DANGEROUS_CONTENT",
];

/// Settings for a [`GeminiClient`]
#[derive(Clone)]
pub struct GeminiConfig {
    /// API credential
    pub api_key: String,
    /// API base URL
    pub endpoint: String,
    /// Model name
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Ask the endpoint to constrain output to the response schema
    pub schema_enforcement: bool,
    /// Per-attempt timeout in seconds
    pub request_timeout_secs: u64,
    /// Retry budget and backoff
    pub retry: RetryPolicy,
}

impl GeminiConfig {
    /// Default settings with the given credential
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            schema_enforcement: true,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            retry: RetryPolicy::default(),
        }
    }

    /// Per-attempt timeout as a Duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }
        if self.model.trim().is_empty() {
            return Err(LlmError::Configuration("model must not be empty".to_string()));
        }
        if self.endpoint.trim().is_empty() {
            return Err(LlmError::Configuration("endpoint must not be empty".to_string()));
        }
        if self.request_timeout_secs == 0 {
            return Err(LlmError::Configuration(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        self.retry.validate().map_err(LlmError::Configuration)
    }
}

impl fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("schema_enforcement", &self.schema_enforcement)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("retry", &self.retry)
            .finish()
    }
}

/// Client for the Gemini `generateContent` endpoint
///
/// Built once at startup and shared by reference.
pub struct GeminiClient<T = ReqwestTransport> {
    config: GeminiConfig,
    executor: RetryingExecutor<T>,
}

impl GeminiClient<ReqwestTransport> {
    /// Create a client backed by reqwest
    pub fn new(config: GeminiConfig) -> Result<Self, LlmError> {
        config.validate()?;
        let transport = ReqwestTransport::new(config.request_timeout())?;
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> GeminiClient<T> {
    /// Create a client over any transport
    pub fn with_transport(config: GeminiConfig, transport: T) -> Result<Self, LlmError> {
        config.validate()?;
        let executor = RetryingExecutor::new(transport, config.retry.clone());
        Ok(Self { config, executor })
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Client configuration
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        self.executor.transport()
    }

    /// Build the request descriptor for a prompt
    ///
    /// The schema is attached only when schema enforcement is on.
    pub fn build_request(&self, prompt: &str, schema: Option<Value>) -> HttpRequest {
        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint.trim_end_matches('/'),
            self.config.model
        );

        let safety_settings: Vec<Value> = SAFETY_CATEGORIES
            .iter()
            .map(|category| json!({ "category": category, "threshold": "BLOCK_MEDIUM_AND_ABOVE" }))
            .collect();

        let mut generation_config = Map::new();
        generation_config.insert("temperature".to_string(), json!(self.config.temperature));
        if let (true, Some(schema)) = (self.config.schema_enforcement, schema) {
            generation_config.insert("responseMimeType".to_string(), json!("application/json"));
            generation_config.insert("responseSchema".to_string(), schema);
        }

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "safetySettings": safety_settings,
            "generationConfig": Value::Object(generation_config),
        });

        HttpRequest::post(url, body)
            .with_header("Content-Type", "application/json")
            .with_header("x-goog-api-key", self.config.api_key.clone())
    }

    /// Generate content for a prompt, retrying transient failures
    pub async fn generate(&self, prompt: &str, schema: Option<Value>) -> Result<HttpReply, LlmError> {
        let request = self.build_request(prompt, schema);
        debug!(
            "Sending generateContent to model '{}' ({} prompt chars)",
            self.config.model,
            prompt.chars().count()
        );
        self.executor.execute(&request).await
    }
}

/// Success envelope of `generateContent`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    /// Feedback on the prompt (block reason)
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

/// One generated candidate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// Candidate content
    #[serde(default)]
    pub content: Option<Content>,
    /// Why generation stopped (STOP, SAFETY, …)
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Content of a candidate
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Content {
    /// Content parts
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One content part
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Part {
    /// Text, if this is a text part
    #[serde(default)]
    pub text: Option<String>,
}

/// Prompt feedback
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    /// Set when the prompt was blocked
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Finish reasons that mean the output was withheld by a safety filter
const BLOCKING_FINISH_REASONS: [&str; 4] = ["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated
    pub fn first_text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    /// Reason the prompt or output was blocked, if any
    ///
    /// A blocking finish reason only counts when the candidate has no text.
    pub fn block_reason(&self) -> Option<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Some(reason);
        }
        let finish = self.candidates.first()?.finish_reason.as_deref()?;
        if BLOCKING_FINISH_REASONS.contains(&finish) && self.first_text().is_none() {
            return Some(finish.to_string());
        }
        None
    }
}

/// Error envelope returned with non-success statuses
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorEnvelope {
    /// Error object
    #[serde(default)]
    pub error: Option<ApiErrorBody>,
}

/// Provider error object
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    /// HTTP-like code
    #[serde(default)]
    pub code: Option<u16>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
    /// Canonical status (INVALID_ARGUMENT, UNAVAILABLE, …)
    #[serde(default)]
    pub status: Option<String>,
}

impl ApiErrorEnvelope {
    /// Provider message from a raw error body, if it has one
    pub fn message_from(body: &str) -> Option<String> {
        serde_json::from_str::<ApiErrorEnvelope>(body)
            .ok()?
            .error?
            .message
            .filter(|m| !m.trim().is_empty())
    }
}
