//! Error types for the CLI application.

use menulint_analyzer::{friendly_message, AnalysisError};
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Analysis error, shown with its user-facing message
    #[error("{}", friendly_message(.0))]
    Analysis(#[from] AnalysisError),

    /// Document could not be read
    #[error("{0}")]
    Extract(#[from] menulint_extract::ExtractError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// One or more analyses of a review failed
    #[error("{0} analysis(es) failed")]
    ReviewFailed(usize),
}

impl From<menulint_llm::LlmError> for CliError {
    fn from(e: menulint_llm::LlmError) -> Self {
        CliError::Analysis(e.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_error_uses_friendly_message() {
        let err = CliError::from(AnalysisError::Timeout(240));
        assert_eq!(
            err.to_string(),
            friendly_message(&AnalysisError::Timeout(240))
        );
    }

    #[test]
    fn test_missing_key_keeps_its_kind() {
        let err = CliError::from(menulint_llm::LlmError::MissingApiKey);
        assert!(matches!(err, CliError::Analysis(AnalysisError::MissingApiKey)));
    }
}
