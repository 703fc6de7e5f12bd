//! menulint LLM Reliability Layer
//!
//! Owns the HTTP exchange with the text-generation endpoint.
//!
//! # Architecture
//!
//! ```text
//! GeminiClient → RetryingExecutor → Transport (reqwest | mock) → endpoint
//! ```
//!
//! - [`Transport`]: one HTTP attempt, no policy. `ReqwestTransport` for real
//!   traffic, `MockTransport` for deterministic tests.
//! - [`RetryingExecutor`]: retries transport failures and the transient
//!   statuses 429/500/503 with exponential backoff plus jitter.
//! - [`GeminiClient`]: builds `generateContent` requests (prompt, safety
//!   settings, optional response schema) and runs them through the executor.
//!
//! The layer returns the raw reply. Interpreting the body (provider error
//! messages, block reasons, model text) belongs to the caller.
//!
//! # Examples
//!
//! ```
//! use menulint_llm::{HttpReply, MockTransport, RetryPolicy, RetryingExecutor};
//!
//! let transport = MockTransport::always(HttpReply::new(200, "{}"));
//! let executor = RetryingExecutor::new(transport, RetryPolicy::default());
//! assert_eq!(executor.policy().max_retries, 3);
//! ```

#![warn(missing_docs)]

pub mod gemini;
pub mod mock;
pub mod retry;
pub mod transport;

use thiserror::Error;

pub use gemini::{ApiErrorEnvelope, GeminiClient, GeminiConfig, GenerateContentResponse};
pub use mock::MockTransport;
pub use retry::{RetryPolicy, RetryingExecutor, TRANSIENT_STATUSES};
pub use transport::{HttpReply, HttpRequest, ReqwestTransport, Transport, TransportError};

/// Errors that can occur in the reliability layer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LlmError {
    /// Every attempt failed at the transport level
    #[error("Network error after {attempts} attempt(s): {message}")]
    Network {
        /// Attempts made before giving up
        attempts: u32,
        /// Last transport error
        message: String,
    },

    /// No API key was supplied
    #[error("API key is not set (GEMINI_API_KEY)")]
    MissingApiKey,

    /// Client could not be configured (bad policy, empty model, HTTP client)
    #[error("Configuration error: {0}")]
    Configuration(String),
}
