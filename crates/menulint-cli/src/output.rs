//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use menulint_analyzer::{friendly_message, AnalysisError, ReviewReport};
use menulint_domain::{ComparisonIssue, ComparisonResult, Correction, CorrectionKind};
use serde::Serialize;
use serde_json::{json, Value};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format correction findings.
    pub fn format_corrections(&self, corrections: &[Correction]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(corrections)?),
            OutputFormat::Card => Ok(self.correction_cards(corrections)),
            OutputFormat::Quiet => Ok(corrections
                .iter()
                .map(|c| format!("{}\t{}\t{}", c.kind, c.original, c.suggestion))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format comparison findings.
    pub fn format_comparison(&self, results: &[ComparisonResult]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(results)?),
            OutputFormat::Card => Ok(self.comparison_cards(results)),
            OutputFormat::Quiet => Ok(results
                .iter()
                .map(|r| format!("{}\t{}", r.issue, r.item))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a combined review, each analysis reported on its own.
    pub fn format_review(&self, report: &ReviewReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let mut body = serde_json::Map::new();
                body.insert("corrections".into(), section_json(&report.corrections));
                if let Some(comparison) = &report.comparison {
                    body.insert("comparison".into(), section_json(comparison));
                }
                Ok(serde_json::to_string_pretty(&Value::Object(body))?)
            }
            OutputFormat::Card => {
                let mut sections = Vec::new();

                sections.push(self.heading("Correções e sugestões"));
                sections.push(match &report.corrections {
                    Ok(corrections) => self.correction_cards(corrections),
                    Err(e) => self.error(&friendly_message(e)),
                });

                if let Some(comparison) = &report.comparison {
                    sections.push(self.heading("Comparação com a referência"));
                    sections.push(match comparison {
                        Ok(results) => self.comparison_cards(results),
                        Err(e) => self.error(&friendly_message(e)),
                    });
                }

                sections.push(summary_table(
                    report.corrections.as_deref().ok(),
                    report
                        .comparison
                        .as_ref()
                        .and_then(|c| c.as_deref().ok()),
                ));

                Ok(sections.join("\n\n"))
            }
            OutputFormat::Quiet => {
                let mut lines = Vec::new();
                match &report.corrections {
                    Ok(corrections) => lines.push(self.format_corrections(corrections)?),
                    Err(e) => lines.push(format!("error\tcorrections\t{}", friendly_message(e))),
                }
                match &report.comparison {
                    Some(Ok(results)) => lines.push(self.format_comparison(results)?),
                    Some(Err(e)) => lines.push(format!("error\tcomparison\t{}", friendly_message(e))),
                    None => {}
                }
                lines.retain(|l| !l.is_empty());
                Ok(lines.join("\n"))
            }
        }
    }

    /// Summary table, shown only in card format.
    pub fn summary(
        &self,
        corrections: Option<&[Correction]>,
        comparison: Option<&[ComparisonResult]>,
    ) -> Option<String> {
        match self.format {
            OutputFormat::Card => Some(summary_table(corrections, comparison)),
            OutputFormat::Json | OutputFormat::Quiet => None,
        }
    }

    fn correction_cards(&self, corrections: &[Correction]) -> String {
        if corrections.is_empty() {
            return self.success("Nenhuma correção encontrada.");
        }

        corrections
            .iter()
            .map(|c| {
                let color = match c.kind {
                    CorrectionKind::Correction => "red",
                    CorrectionKind::Suggestion => "yellow",
                };
                format!(
                    "{}\n  Original: {}\n  Problema: {}\n  {}: {}",
                    self.colorize(&format!("● {}", c.kind.label()), color),
                    c.original,
                    c.issue,
                    c.kind.suggestion_label(),
                    self.colorize(&c.suggestion, "green")
                )
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn comparison_cards(&self, results: &[ComparisonResult]) -> String {
        if results.is_empty() {
            return self.success("Nenhuma divergência encontrada.");
        }

        results
            .iter()
            .map(|r| {
                let color = match r.issue {
                    ComparisonIssue::PriceMismatch => "red",
                    ComparisonIssue::MissingInMenu => "yellow",
                    ComparisonIssue::MissingInReference => "cyan",
                };
                let mut card = format!(
                    "{} {}",
                    self.colorize(&format!("● {}", r.issue.title()), color),
                    r.item
                );
                let details = &r.details;
                let lines = [
                    ("Preço no cardápio", &details.menu_price),
                    ("Preço na referência", &details.reference_price),
                    ("Nome no cardápio", &details.menu_name),
                    ("Nome na referência", &details.reference_name),
                ];
                for (label, value) in lines {
                    if let Some(value) = value {
                        card.push_str(&format!("\n  {}: {}", label, value));
                    }
                }
                card
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    fn heading(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().underline().to_string()
        } else {
            text.to_string()
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Counts per finding type as a table.
pub fn summary_table(
    corrections: Option<&[Correction]>,
    comparison: Option<&[ComparisonResult]>,
) -> String {
    let mut builder = Builder::default();
    builder.push_record(["Tipo", "Quantidade"]);

    if let Some(corrections) = corrections {
        let count = |kind: CorrectionKind| corrections.iter().filter(|c| c.kind == kind).count();
        builder.push_record(["Correções".to_string(), count(CorrectionKind::Correction).to_string()]);
        builder.push_record(["Sugestões".to_string(), count(CorrectionKind::Suggestion).to_string()]);
    }

    if let Some(results) = comparison {
        for issue in [
            ComparisonIssue::PriceMismatch,
            ComparisonIssue::MissingInMenu,
            ComparisonIssue::MissingInReference,
        ] {
            let count = results.iter().filter(|r| r.issue == issue).count();
            builder.push_record([issue.title().to_string(), count.to_string()]);
        }
    }

    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}

fn section_json<T: Serialize>(outcome: &std::result::Result<Vec<T>, AnalysisError>) -> Value {
    match outcome {
        Ok(findings) => json!({ "status": "ok", "findings": findings }),
        Err(e) => json!({
            "status": "error",
            "kind": error_kind(e),
            "message": friendly_message(e),
        }),
    }
}

fn error_kind(error: &AnalysisError) -> &'static str {
    match error {
        AnalysisError::MissingApiKey => "missing_api_key",
        AnalysisError::Configuration(_) => "configuration",
        AnalysisError::InvalidInput(_) => "invalid_input",
        AnalysisError::Network { .. } => "network",
        AnalysisError::TransientService { .. } => "transient_service",
        AnalysisError::ContentPolicy { .. } => "content_policy",
        AnalysisError::Provider { .. } => "provider",
        AnalysisError::MalformedResponse { .. } => "malformed_response",
        AnalysisError::ShapeMismatch { .. } => "shape_mismatch",
        AnalysisError::Timeout(_) => "timeout",
    }
}
