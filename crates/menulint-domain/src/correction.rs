//! Correction module - one flagged span of menu text and its remedy

use crate::finding::Finding;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Whether a correction fixes an objective error or improves wording
///
/// The model labels these in Portuguese; English and unaccented spellings
/// are accepted when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CorrectionKind {
    /// Spelling, grammar or typing error
    #[serde(rename = "correção", alias = "correction", alias = "correcao")]
    Correction,

    /// Stylistic improvement
    #[serde(rename = "sugestão", alias = "suggestion", alias = "sugestao")]
    Suggestion,
}

impl CorrectionKind {
    /// Wire label as emitted by the model
    pub fn as_str(&self) -> &'static str {
        match self {
            CorrectionKind::Correction => "correção",
            CorrectionKind::Suggestion => "sugestão",
        }
    }

    /// Card heading for the issue line
    pub fn label(&self) -> &'static str {
        match self {
            CorrectionKind::Correction => "Erro encontrado",
            CorrectionKind::Suggestion => "Ponto de melhoria",
        }
    }

    /// Card heading for the suggestion line
    pub fn suggestion_label(&self) -> &'static str {
        match self {
            CorrectionKind::Correction => "Correção sugerida",
            CorrectionKind::Suggestion => "Sugestão de aprimoramento",
        }
    }
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flagged span of menu text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Exact quoted source substring
    pub original: String,

    /// Description of the problem
    pub issue: String,

    /// Replacement or improved text
    pub suggestion: String,

    /// Objective error or stylistic suggestion
    #[serde(rename = "type")]
    pub kind: CorrectionKind,
}

impl Finding for Correction {
    const KIND: &'static str = "correction";

    fn response_schema() -> Value {
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "original": {
                        "type": "STRING",
                        "description": "O trecho de texto original do cardápio que contém um erro ou pode ser melhorado."
                    },
                    "issue": {
                        "type": "STRING",
                        "description": "Uma descrição clara e concisa do problema encontrado (ex: 'Erro de digitação', 'Gramática incorreta', 'Descrição pouco apetitosa')."
                    },
                    "suggestion": {
                        "type": "STRING",
                        "description": "A versão corrigida e melhorada do texto."
                    },
                    "type": {
                        "type": "STRING",
                        "enum": ["correção", "sugestão"],
                        "description": "'correção' para erros objetivos, 'sugestão' para melhorias de estilo."
                    }
                },
                "required": ["original", "issue", "suggestion", "type"]
            }
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.original.trim().is_empty() {
            return Err("original is empty".to_string());
        }
        Ok(())
    }
}
