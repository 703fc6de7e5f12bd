//! Core Analyzer implementation

use crate::config::AnalyzerConfig;
use crate::decode::decode;
use crate::error::AnalysisError;
use crate::prompt::PromptBuilder;
use crate::types::ReviewReport;
use menulint_domain::{ComparisonResult, Correction, Finding};
use menulint_llm::{GeminiClient, GeminiConfig, ReqwestTransport, Transport};
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// The Analyzer reviews menu text through the model endpoint
///
/// Construct once at startup and share by reference; every call is
/// independent and holds no mutable state.
pub struct Analyzer<T = ReqwestTransport> {
    client: GeminiClient<T>,
    config: AnalyzerConfig,
}

impl Analyzer<ReqwestTransport> {
    /// Create an Analyzer talking to Gemini over HTTPS
    pub fn connect(gemini: GeminiConfig, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        let client = GeminiClient::new(gemini)?;
        Self::new(client, config)
    }
}

impl<T: Transport> Analyzer<T> {
    /// Create a new Analyzer
    pub fn new(client: GeminiClient<T>, config: AnalyzerConfig) -> Result<Self, AnalysisError> {
        config.validate().map_err(AnalysisError::Configuration)?;
        Ok(Self { client, config })
    }

    /// The model client
    pub fn client(&self) -> &GeminiClient<T> {
        &self.client
    }

    /// Analyzer configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Find spelling/grammar corrections and wording suggestions
    pub async fn analyze_menu(&self, text: &str) -> Result<Vec<Correction>, AnalysisError> {
        self.check_input("do cardápio", text)?;
        let prompt = PromptBuilder::correction(text).build();
        self.run::<Correction>(&prompt).await
    }

    /// Find price and name discrepancies between a menu and a reference
    pub async fn compare_menus(
        &self,
        menu_text: &str,
        reference_text: &str,
    ) -> Result<Vec<ComparisonResult>, AnalysisError> {
        self.check_input("do cardápio", menu_text)?;
        self.check_input("da referência", reference_text)?;
        let prompt = PromptBuilder::comparison(menu_text, reference_text).build();
        self.run::<ComparisonResult>(&prompt).await
    }

    /// Run the correction analysis and, with a reference, the comparison
    ///
    /// Both calls run concurrently with separate retry budgets; one failing
    /// does not affect the other.
    pub async fn review(&self, menu_text: &str, reference_text: Option<&str>) -> ReviewReport {
        match reference_text {
            Some(reference) => {
                let (corrections, comparison) = tokio::join!(
                    self.analyze_menu(menu_text),
                    self.compare_menus(menu_text, reference)
                );
                ReviewReport {
                    corrections,
                    comparison: Some(comparison),
                }
            }
            None => ReviewReport {
                corrections: self.analyze_menu(menu_text).await,
                comparison: None,
            },
        }
    }

    fn check_input(&self, label: &str, text: &str) -> Result<(), AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::InvalidInput(format!(
                "O texto {} está vazio.",
                label
            )));
        }
        let chars = text.chars().count();
        if chars > self.config.max_text_length {
            return Err(AnalysisError::InvalidInput(format!(
                "O texto {} é muito longo: {} caracteres (máximo: {}).",
                label, chars, self.config.max_text_length
            )));
        }
        Ok(())
    }

    async fn run<F: Finding>(&self, prompt: &str) -> Result<Vec<F>, AnalysisError> {
        let start_time = Instant::now();
        info!(
            "Starting {} analysis with model '{}'",
            F::KIND,
            self.client.model()
        );
        debug!("Prompt length: {} chars", prompt.chars().count());

        let outcome = timeout(
            self.config.analysis_timeout(),
            self.client.generate(prompt, Some(F::response_schema())),
        )
        .await
        .map_err(|_| AnalysisError::Timeout(self.config.analysis_timeout_secs))?;

        let result = decode::<F>(outcome);
        let elapsed_ms = start_time.elapsed().as_millis();

        match &result {
            Ok(findings) => info!(
                "{} analysis complete: {} finding(s) in {}ms",
                F::KIND,
                findings.len(),
                elapsed_ms
            ),
            Err(e) => warn!("{} analysis failed after {}ms: {}", F::KIND, elapsed_ms, e),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use menulint_llm::{HttpReply, MockTransport};

    fn analyzer(transport: MockTransport, config: AnalyzerConfig) -> Analyzer<MockTransport> {
        let client = GeminiClient::with_transport(GeminiConfig::new("test-key"), transport).unwrap();
        Analyzer::new(client, config).unwrap()
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let transport = MockTransport::always(HttpReply::new(200, "{}"));
        let analyzer = analyzer(transport.clone(), AnalyzerConfig::default());

        let result = analyzer.analyze_menu("   \n").await;

        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_reference_makes_no_request() {
        let transport = MockTransport::always(HttpReply::new(200, "{}"));
        let analyzer = analyzer(transport.clone(), AnalyzerConfig::default());

        let result = analyzer.compare_menus("X-Burger R$20", "").await;

        assert_eq!(
            result,
            Err(AnalysisError::InvalidInput(
                "O texto da referência está vazio.".to_string()
            ))
        );
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_text_length_limit() {
        let transport = MockTransport::always(HttpReply::new(200, "{}"));
        let config = AnalyzerConfig {
            max_text_length: 10,
            ..AnalyzerConfig::default()
        };
        let analyzer = analyzer(transport.clone(), config);

        let result = analyzer.analyze_menu(&"a".repeat(11)).await;

        assert!(matches!(result, Err(AnalysisError::InvalidInput(_))));
        assert_eq!(transport.call_count(), 0);
    }

    #[tokio::test]
    async fn test_request_carries_schema() {
        let transport = MockTransport::always(HttpReply::new(200, "{}"));
        let analyzer = analyzer(transport.clone(), AnalyzerConfig::default());

        let result = analyzer.analyze_menu("Pudim").await.unwrap();

        assert!(result.is_empty());
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].body["generationConfig"]["responseSchema"],
            Correction::response_schema()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_is_enforced() {
        // Every attempt is transient and the backoff outlasts the deadline
        let transport = MockTransport::always(HttpReply::new(503, ""));
        let mut gemini = GeminiConfig::new("test-key");
        gemini.retry.max_retries = 10;
        let client = GeminiClient::with_transport(gemini, transport).unwrap();
        let config = AnalyzerConfig {
            analysis_timeout_secs: 5,
            ..AnalyzerConfig::default()
        };
        let analyzer = Analyzer::new(client, config).unwrap();

        let result = analyzer.analyze_menu("Pudim").await;

        assert_eq!(result, Err(AnalysisError::Timeout(5)));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let transport = MockTransport::always(HttpReply::new(200, "{}"));
        let client = GeminiClient::with_transport(GeminiConfig::new("k"), transport).unwrap();
        let config = AnalyzerConfig {
            max_text_length: 0,
            ..AnalyzerConfig::default()
        };
        assert!(matches!(
            Analyzer::new(client, config),
            Err(AnalysisError::Configuration(_))
        ));
    }
}
