//! Error types for the Analyzer

use menulint_llm::LlmError;
use thiserror::Error;

/// Errors that can occur during an analysis
///
/// `Display` never includes raw model output; use [`AnalysisError::raw_output`]
/// for diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// No API key was supplied; nothing was sent
    #[error("API key is not set (GEMINI_API_KEY)")]
    MissingApiKey,

    /// Invalid settings; nothing was sent
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Input rejected before any network call
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Every attempt failed at the transport level
    #[error("Network error after {attempts} attempt(s): {message}")]
    Network {
        /// Attempts made
        attempts: u32,
        /// Last transport error
        message: String,
    },

    /// 429/500/503 still returned when the retry budget ran out
    #[error("Service temporarily unavailable (HTTP {status}): {message}")]
    TransientService {
        /// Final HTTP status
        status: u16,
        /// Provider message or status text
        message: String,
    },

    /// Prompt or output blocked by the provider's safety filter
    #[error("Request blocked by content policy: {reason}")]
    ContentPolicy {
        /// Block reason reported by the provider
        reason: String,
    },

    /// Any other non-success status
    #[error("Model endpoint error (HTTP {status}): {message}")]
    Provider {
        /// HTTP status
        status: u16,
        /// Provider message or status text
        message: String,
    },

    /// Model output was not parseable JSON
    #[error("Malformed model response: {detail}")]
    MalformedResponse {
        /// Parser error
        detail: String,
        /// Raw output, for logs only
        raw: String,
    },

    /// Parsed output did not match the expected records
    #[error("Unexpected response shape: {detail}")]
    ShapeMismatch {
        /// What did not match
        detail: String,
        /// Raw output, for logs only
        raw: String,
    },

    /// The analysis deadline passed
    #[error("Analysis timed out after {0}s")]
    Timeout(u64),
}

impl AnalysisError {
    /// True when the failure survived the whole retry budget
    pub fn is_retry_exhausted(&self) -> bool {
        matches!(
            self,
            AnalysisError::Network { .. } | AnalysisError::TransientService { .. }
        )
    }

    /// True for malformed or mis-shaped model output
    pub fn is_bad_output(&self) -> bool {
        matches!(
            self,
            AnalysisError::MalformedResponse { .. } | AnalysisError::ShapeMismatch { .. }
        )
    }

    /// Raw model output carried for diagnostics
    pub fn raw_output(&self) -> Option<&str> {
        match self {
            AnalysisError::MalformedResponse { raw, .. }
            | AnalysisError::ShapeMismatch { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl From<LlmError> for AnalysisError {
    fn from(e: LlmError) -> Self {
        match e {
            LlmError::Network { attempts, message } => AnalysisError::Network { attempts, message },
            LlmError::MissingApiKey => AnalysisError::MissingApiKey,
            LlmError::Configuration(message) => AnalysisError::Configuration(message),
        }
    }
}
