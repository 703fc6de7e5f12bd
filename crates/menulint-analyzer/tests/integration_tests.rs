//! Integration tests for the Analyzer

use menulint_analyzer::{friendly_message, AnalysisError, Analyzer, AnalyzerConfig};
use menulint_domain::{ComparisonIssue, CorrectionKind};
use menulint_llm::{GeminiClient, GeminiConfig, HttpReply, HttpRequest, MockTransport};
use serde_json::json;

/// Helper wrapping model text in a generateContent envelope
fn model_reply(text: &str) -> HttpReply {
    HttpReply::json(
        200,
        &json!({
            "candidates": [{
                "content": { "parts": [{ "text": text }], "role": "model" },
                "finishReason": "STOP"
            }]
        }),
    )
}

fn prompt_of(request: &HttpRequest) -> &str {
    request.body["contents"][0]["parts"][0]["text"]
        .as_str()
        .unwrap_or_default()
}

fn is_comparison(request: &HttpRequest) -> bool {
    prompt_of(request).contains("REFERÊNCIA:")
}

fn create_analyzer(transport: MockTransport) -> Analyzer<MockTransport> {
    let client = GeminiClient::with_transport(GeminiConfig::new("test-key"), transport).unwrap();
    Analyzer::new(client, AnalyzerConfig::default()).unwrap()
}

#[tokio::test]
async fn test_typo_is_reported_as_correction() {
    let transport = MockTransport::always(model_reply(
        r#"[{"original":"grelhdo","issue":"Erro de digitação","suggestion":"grelhado","type":"correção"}]"#,
    ));
    let analyzer = create_analyzer(transport.clone());

    let corrections = analyzer
        .analyze_menu("Frango grelhdo com arroz")
        .await
        .unwrap();

    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].original, "grelhdo");
    assert_eq!(corrections[0].suggestion, "grelhado");
    assert_eq!(corrections[0].kind, CorrectionKind::Correction);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    assert!(prompt_of(&requests[0]).contains("Frango grelhdo com arroz"));
    assert_eq!(requests[0].header("x-goog-api-key"), Some("test-key"));
}

#[tokio::test]
async fn test_fenced_reply_is_accepted() {
    let transport = MockTransport::always(model_reply(
        "```json\n[{\"original\":\"Pudim\",\"issue\":\"Descrição curta\",\"suggestion\":\"Pudim de leite condensado\",\"type\":\"sugestão\"}]\n```",
    ));
    let analyzer = create_analyzer(transport);

    let corrections = analyzer.analyze_menu("Pudim").await.unwrap();

    assert_eq!(corrections.len(), 1);
    assert_eq!(corrections[0].kind, CorrectionKind::Suggestion);
}

#[tokio::test]
async fn test_price_mismatch_is_reported() {
    let transport = MockTransport::always(model_reply(
        r#"[{"item":"X-Burger","issue":"price_mismatch","details":{"menuPrice":"R$20","referencePrice":"R$18"}}]"#,
    ));
    let analyzer = create_analyzer(transport.clone());

    let results = analyzer
        .compare_menus("X-Burger R$20", "X-Burger R$18")
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].item, "X-Burger");
    assert_eq!(results[0].issue, ComparisonIssue::PriceMismatch);
    assert_eq!(results[0].details.menu_price.as_deref(), Some("R$20"));
    assert_eq!(results[0].details.reference_price.as_deref(), Some("R$18"));

    let requests = transport.requests();
    assert!(is_comparison(&requests[0]));
}

#[tokio::test]
async fn test_one_bad_element_rejects_batch() {
    let transport = MockTransport::always(model_reply(
        r#"[{"item":"X-Burger","issue":"price_mismatch"},{"item":"Suco","issue":"wrong_issue"}]"#,
    ));
    let analyzer = create_analyzer(transport);

    let result = analyzer
        .compare_menus("X-Burger R$20", "X-Burger R$18")
        .await;

    let err = result.unwrap_err();
    assert!(matches!(err, AnalysisError::ShapeMismatch { .. }));
    assert!(err.is_bad_output());
}

#[tokio::test(start_paused = true)]
async fn test_review_reports_each_analysis_separately() {
    let transport = MockTransport::new(|request| {
        if is_comparison(request) {
            Ok(HttpReply::new(503, ""))
        } else {
            Ok(model_reply(
                r#"[{"original":"grelhdo","issue":"Erro de digitação","suggestion":"grelhado","type":"correção"}]"#,
            ))
        }
    });
    let analyzer = create_analyzer(transport.clone());

    let report = analyzer
        .review("Frango grelhdo com arroz", Some("Frango grelhado R$30"))
        .await;

    let corrections = report.corrections.as_ref().unwrap();
    assert_eq!(corrections.len(), 1);

    match report.comparison.as_ref() {
        Some(Err(AnalysisError::TransientService { status, .. })) => assert_eq!(*status, 503),
        other => panic!("Expected transient comparison failure, got {:?}", other),
    }
    assert!(report.has_failures());

    let comparison_calls = transport
        .requests()
        .iter()
        .filter(|r| is_comparison(r))
        .count();
    assert_eq!(comparison_calls, 3);
    assert_eq!(transport.call_count(), 4);
}

#[tokio::test]
async fn test_review_without_reference_skips_comparison() {
    let transport = MockTransport::always(model_reply("[]"));
    let analyzer = create_analyzer(transport.clone());

    let report = analyzer.review("Pudim", None).await;

    assert_eq!(report.corrections, Ok(Vec::new()));
    assert!(report.comparison.is_none());
    assert!(!report.has_failures());
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_safety_block_is_content_policy() {
    let transport = MockTransport::always(HttpReply::json(
        200,
        &json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    ));
    let analyzer = create_analyzer(transport.clone());

    let err = analyzer.analyze_menu("Pudim").await.unwrap_err();

    assert_eq!(
        err,
        AnalysisError::ContentPolicy {
            reason: "SAFETY".to_string()
        }
    );
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test]
async fn test_invalid_key_is_provider_error_without_retry() {
    let transport = MockTransport::always(HttpReply::json(
        400,
        &json!({
            "error": {
                "code": 400,
                "message": "API key not valid. Please pass a valid API key.",
                "status": "INVALID_ARGUMENT"
            }
        }),
    ));
    let analyzer = create_analyzer(transport.clone());

    let err = analyzer.analyze_menu("Pudim").await.unwrap_err();

    assert!(matches!(err, AnalysisError::Provider { status: 400, .. }));
    assert!(friendly_message(&err).contains("chave da API"));
    assert_eq!(transport.call_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_exhausts_retries() {
    let transport = MockTransport::failing("connection refused");
    let analyzer = create_analyzer(transport.clone());

    let err = analyzer.analyze_menu("Pudim").await.unwrap_err();

    assert!(matches!(err, AnalysisError::Network { attempts: 3, .. }));
    assert!(err.is_retry_exhausted());
    assert_eq!(transport.call_count(), 3);
}

#[test]
fn test_missing_key_is_reported() {
    let transport = MockTransport::always(model_reply("[]"));
    let err = GeminiClient::with_transport(GeminiConfig::new(""), transport)
        .map(|_| ())
        .map_err(AnalysisError::from)
        .unwrap_err();

    assert_eq!(err, AnalysisError::MissingApiKey);
    assert!(friendly_message(&err).contains("GEMINI_API_KEY"));
}
