//! menulint Analyzer
//!
//! Reviews menu text with a language model and decodes the findings.
//!
//! # Overview
//!
//! Two analyses are offered: corrections and wording suggestions for a menu,
//! and a price/name comparison between a menu and a reference price sheet.
//! Both go through the same pipeline:
//!
//! ```text
//! text → PromptBuilder → GeminiClient (retries) → decode → Vec<T>
//! ```
//!
//! # Key Features
//!
//! - **Typed decoding**: model output must be a JSON array of well-formed
//!   records or the whole batch is rejected
//! - **Code-fence cleanup**: ```` ```json ```` wrappers are stripped before parsing
//! - **Error classification**: [`AnalysisError`] separates network, transient,
//!   policy, provider and malformed-output failures
//! - **Concurrent review**: [`Analyzer::review`] runs both analyses at once and
//!   reports each outcome separately
//!
//! # Example Usage
//!
//! ```no_run
//! use menulint_analyzer::{Analyzer, AnalyzerConfig};
//! use menulint_llm::{GeminiClient, GeminiConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = GeminiClient::new(GeminiConfig::new("api-key"))?;
//! let analyzer = Analyzer::new(client, AnalyzerConfig::default())?;
//!
//! let corrections = analyzer.analyze_menu("Frango grelhdo com arroz").await?;
//! println!("{} correction(s)", corrections.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod analyzer;
mod config;
mod decode;
mod error;
mod prompt;
mod types;

pub mod presentation;

pub use analyzer::Analyzer;
pub use config::AnalyzerConfig;
pub use decode::{decode, parse_findings, strip_code_fences};
pub use error::AnalysisError;
pub use presentation::friendly_message;
pub use prompt::PromptBuilder;
pub use types::ReviewReport;
