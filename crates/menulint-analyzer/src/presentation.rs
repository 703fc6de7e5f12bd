//! User-facing messages for analysis errors
//!
//! Best-effort mapping for display only. Callers branch on the
//! [`AnalysisError`] variant, never on these strings.

use crate::error::AnalysisError;

const AUTH_MARKERS: [&str; 4] = [
    "api key not valid",
    "api_key_invalid",
    "permission_denied",
    "invalid credential",
];

const OVERLOAD_MARKERS: [&str; 3] = ["overloaded", "unavailable", "internal error"];

/// One-line message for the end user
///
/// Raw model output is never included.
pub fn friendly_message(error: &AnalysisError) -> String {
    match error {
        AnalysisError::MissingApiKey => {
            "Chave da API não configurada. Defina GEMINI_API_KEY ou use --api-key.".to_string()
        }
        AnalysisError::Configuration(detail) => format!("Configuração inválida: {}", detail),
        AnalysisError::InvalidInput(message) => message.clone(),
        AnalysisError::Network { .. } => {
            "Falha na comunicação com a IA após múltiplas tentativas. Verifique sua conexão e tente novamente."
                .to_string()
        }
        AnalysisError::TransientService { .. } => overloaded(),
        AnalysisError::ContentPolicy { reason } => {
            format!("A solicitação foi bloqueada por motivos de segurança: {}", reason)
        }
        AnalysisError::MalformedResponse { .. } | AnalysisError::ShapeMismatch { .. } => {
            "A resposta da IA não está no formato esperado. Tente novamente.".to_string()
        }
        AnalysisError::Timeout(secs) => {
            format!("A análise excedeu o tempo limite de {}s. Tente novamente.", secs)
        }
        AnalysisError::Provider { status, message } => provider_message(*status, message),
    }
}

fn provider_message(status: u16, message: &str) -> String {
    let lower = message.to_lowercase();
    if status == 401 || status == 403 || AUTH_MARKERS.iter().any(|m| lower.contains(m)) {
        return "A chave da API é inválida ou não tem permissão. Verifique GEMINI_API_KEY.".to_string();
    }
    if (500..600).contains(&status) || OVERLOAD_MARKERS.iter().any(|m| lower.contains(m)) {
        return overloaded();
    }
    format!("Falha ao comunicar com a IA. {}", message.trim())
}

fn overloaded() -> String {
    "O serviço de IA está temporariamente sobrecarregado. Tente novamente em alguns instantes."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_key_gets_auth_guidance() {
        let err = AnalysisError::Provider {
            status: 400,
            message: "API key not valid. Please pass a valid API key.".to_string(),
        };
        assert!(friendly_message(&err).contains("chave da API"));
        // Mapping does not touch the kind
        assert!(matches!(err, AnalysisError::Provider { status: 400, .. }));
    }

    #[test]
    fn test_server_error_pattern_is_overloaded() {
        let err = AnalysisError::Provider {
            status: 502,
            message: "Bad Gateway".to_string(),
        };
        assert!(friendly_message(&err).contains("sobrecarregado"));

        let err = AnalysisError::TransientService {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert!(friendly_message(&err).contains("sobrecarregado"));
    }

    #[test]
    fn test_token_count_is_not_overload() {
        let err = AnalysisError::Provider {
            status: 400,
            message: "The input exceeds the limit of 5000 tokens".to_string(),
        };
        assert!(!friendly_message(&err).contains("sobrecarregado"));
    }

    #[test]
    fn test_missing_key_gets_key_hint() {
        assert!(friendly_message(&AnalysisError::MissingApiKey).contains("GEMINI_API_KEY"));
    }

    #[test]
    fn test_other_configuration_error_shows_detail() {
        let err = AnalysisError::Configuration("max_retries must be greater than 0".to_string());
        let message = friendly_message(&err);
        assert!(message.contains("max_retries must be greater than 0"));
        assert!(!message.contains("Chave da API"));
    }

    #[test]
    fn test_other_provider_message_passes_through() {
        let err = AnalysisError::Provider {
            status: 404,
            message: "models/foo is not found ".to_string(),
        };
        assert_eq!(
            friendly_message(&err),
            "Falha ao comunicar com a IA. models/foo is not found"
        );
    }

    #[test]
    fn test_bad_output_never_shows_raw() {
        let err = AnalysisError::MalformedResponse {
            detail: "JSON parse error".to_string(),
            raw: "RAW MODEL TEXT".to_string(),
        };
        assert!(!friendly_message(&err).contains("RAW MODEL TEXT"));
    }

    #[test]
    fn test_content_policy_names_reason() {
        let err = AnalysisError::ContentPolicy {
            reason: "SAFETY".to_string(),
        };
        assert!(friendly_message(&err).ends_with("SAFETY"));
    }

    #[test]
    fn test_network_mentions_retries() {
        let err = AnalysisError::Network {
            attempts: 3,
            message: "refused".to_string(),
        };
        assert!(friendly_message(&err).contains("múltiplas tentativas"));
    }
}
