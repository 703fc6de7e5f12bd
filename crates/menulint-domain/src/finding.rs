//! Trait describing a record shape the model is asked to produce

use serde::de::DeserializeOwned;
use serde_json::Value;

/// A record type decoded from a model response.
///
/// Implementors supply the response schema sent to the model endpoint and
/// the checks serde cannot express (non-empty strings and the like).
pub trait Finding: DeserializeOwned + Send + 'static {
    /// Short label used in logs and error details
    const KIND: &'static str;

    /// Schema for an array of this record, in the endpoint's OpenAPI subset
    fn response_schema() -> Value;

    /// Validate a decoded record
    fn validate(&self) -> Result<(), String>;
}
