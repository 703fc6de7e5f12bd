//! Decode model replies into typed findings
//!
//! A batch is accepted whole or rejected whole. Dropping a single bad record
//! would silently lose a flagged correction.

use crate::error::AnalysisError;
use menulint_domain::Finding;
use menulint_llm::{ApiErrorEnvelope, GenerateContentResponse, HttpReply, LlmError};
use serde_json::Value;
use tracing::{debug, error, warn};

/// Turn the reliability layer's outcome into findings or a classified error
///
/// Missing or empty model text means "no findings" and yields an empty list.
pub fn decode<T: Finding>(outcome: Result<HttpReply, LlmError>) -> Result<Vec<T>, AnalysisError> {
    let reply = outcome?;

    if !reply.is_success() {
        return Err(classify_failure(&reply));
    }

    let envelope: GenerateContentResponse = serde_json::from_str(&reply.body).map_err(|e| {
        error!("Model endpoint returned an unreadable envelope: {}", reply.body);
        AnalysisError::MalformedResponse {
            detail: format!("invalid response envelope: {}", e),
            raw: reply.body.clone(),
        }
    })?;

    if let Some(reason) = envelope.block_reason() {
        warn!("Request blocked by content policy: {}", reason);
        return Err(AnalysisError::ContentPolicy { reason });
    }

    match envelope.first_text() {
        Some(text) => parse_findings(&text),
        None => {
            debug!("Model returned no text, treating as no {} findings", T::KIND);
            Ok(Vec::new())
        }
    }
}

/// Parse model text into findings
pub fn parse_findings<T: Finding>(text: &str) -> Result<Vec<T>, AnalysisError> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Ok(Vec::new());
    }

    let json: Value = serde_json::from_str(cleaned).map_err(|e| {
        error!("Model output is not valid JSON ({}): {}", e, text);
        AnalysisError::MalformedResponse {
            detail: format!("JSON parse error: {}", e),
            raw: text.to_string(),
        }
    })?;

    let items = match json {
        Value::Array(items) => items,
        other => {
            return Err(shape_mismatch(
                format!("expected JSON array, got {}", json_type(&other)),
                text,
            ))
        }
    };

    let mut findings = Vec::with_capacity(items.len());
    for (idx, item) in items.into_iter().enumerate() {
        let finding: T = serde_json::from_value(item)
            .map_err(|e| shape_mismatch(format!("{} {}: {}", T::KIND, idx, e), text))?;
        finding
            .validate()
            .map_err(|e| shape_mismatch(format!("{} {}: {}", T::KIND, idx, e), text))?;
        findings.push(finding);
    }

    debug!("Decoded {} {} finding(s)", findings.len(), T::KIND);
    Ok(findings)
}

/// Remove a surrounding ```` ```json ```` … ```` ``` ```` fence, if any
pub fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let opened = ["```json", "```JSON", "```"]
        .iter()
        .find_map(|fence| trimmed.strip_prefix(fence))
        .unwrap_or(trimmed);
    let closed = opened.trim_end().strip_suffix("```").unwrap_or(opened);
    closed.trim()
}

fn classify_failure(reply: &HttpReply) -> AnalysisError {
    error!("Model endpoint returned {}: {}", reply.status, reply.body);

    let message = ApiErrorEnvelope::message_from(&reply.body).unwrap_or_else(|| {
        if reply.status_text.is_empty() {
            format!("HTTP {}", reply.status)
        } else {
            reply.status_text.clone()
        }
    });

    if reply.is_transient() {
        return AnalysisError::TransientService {
            status: reply.status,
            message,
        };
    }

    if reply.status == 400 {
        if let Some(reason) = block_reason_in(&reply.body) {
            return AnalysisError::ContentPolicy { reason };
        }
    }

    AnalysisError::Provider {
        status: reply.status,
        message,
    }
}

fn block_reason_in(body: &str) -> Option<String> {
    if let Ok(envelope) = serde_json::from_str::<GenerateContentResponse>(body) {
        if let Some(reason) = envelope.block_reason() {
            return Some(reason);
        }
    }
    let lower = body.to_lowercase();
    if lower.contains("blockreason") || lower.contains("blocked") {
        return Some(ApiErrorEnvelope::message_from(body).unwrap_or_else(|| "blocked".to_string()));
    }
    None
}

fn shape_mismatch(detail: String, raw: &str) -> AnalysisError {
    error!("Model output has unexpected shape ({}): {}", detail, raw);
    AnalysisError::ShapeMismatch {
        detail,
        raw: raw.to_string(),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
