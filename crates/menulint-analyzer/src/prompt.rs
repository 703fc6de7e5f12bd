//! LLM prompt engineering for menu review

/// Builds prompts for the two analyses
pub struct PromptBuilder {
    task: Task,
}

enum Task {
    Correction { menu: String },
    Comparison { menu: String, reference: String },
}

impl PromptBuilder {
    /// Prompt asking for corrections and wording suggestions
    pub fn correction(menu: impl Into<String>) -> Self {
        Self {
            task: Task::Correction { menu: menu.into() },
        }
    }

    /// Prompt asking for discrepancies between menu and reference
    pub fn comparison(menu: impl Into<String>, reference: impl Into<String>) -> Self {
        Self {
            task: Task::Comparison {
                menu: menu.into(),
                reference: reference.into(),
            },
        }
    }

    /// Build the complete prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        match &self.task {
            Task::Correction { menu } => {
                prompt.push_str(CORRECTION_INSTRUCTIONS);
                prompt.push_str("\n\n");
                push_document(&mut prompt, "CARDÁPIO", menu);
                prompt.push_str(CORRECTION_FORMAT);
            }
            Task::Comparison { menu, reference } => {
                prompt.push_str(COMPARISON_INSTRUCTIONS);
                prompt.push_str("\n\n");
                push_document(&mut prompt, "CARDÁPIO", menu);
                push_document(&mut prompt, "REFERÊNCIA", reference);
                prompt.push_str(COMPARISON_FORMAT);
            }
        }

        prompt
    }
}

fn push_document(prompt: &mut String, label: &str, text: &str) {
    prompt.push_str(label);
    prompt.push_str(":\n\"\"\"\n");
    prompt.push_str(text.trim());
    prompt.push_str("\n\"\"\"\n\n");
}

const CORRECTION_INSTRUCTIONS: &str = r#"Analise o texto deste cardápio e forneça correções e sugestões para torná-lo mais profissional e apetitoso.
Identifique erros de digitação, gramática e descrições que podem ser melhoradas.

Regras:
- Em "original", copie exatamente o trecho do cardápio, sem alterações
- Use "type": "correção" para erros objetivos (ortografia, gramática, digitação)
- Use "type": "sugestão" para melhorias de estilo ou descrições pouco apetitosas
- Não invente itens que não estão no cardápio
- Se não houver nada a corrigir, retorne []"#;

const CORRECTION_FORMAT: &str = r#"Formato de saída (somente um array JSON, sem texto adicional):
[
  {
    "original": "trecho exato do cardápio",
    "issue": "descrição do problema",
    "suggestion": "texto corrigido ou melhorado",
    "type": "correção"
  }
]

Lembre-se: retorne SOMENTE JSON válido, sem blocos de código markdown, sem explicações."#;

const COMPARISON_INSTRUCTIONS: &str = r#"Compare o CARDÁPIO com a REFERÊNCIA de preços e liste as divergências entre os dois documentos.
Considere o mesmo item mesmo quando o nome estiver escrito de forma ligeiramente diferente.

Tipos de divergência ("issue"):
- "price_mismatch": o item aparece nos dois documentos com preços diferentes
- "missing_in_menu": o item está na referência, mas não no cardápio
- "missing_in_reference": o item está no cardápio, mas não na referência

Em "details", informe quando disponíveis: "menuPrice", "referencePrice", "menuName", "referenceName".
Copie os preços exatamente como aparecem nos documentos (ex: "R$20").
Se não houver divergências, retorne []"#;

const COMPARISON_FORMAT: &str = r#"Formato de saída (somente um array JSON, sem texto adicional):
[
  {
    "item": "nome do item",
    "issue": "price_mismatch",
    "details": { "menuPrice": "R$20", "referencePrice": "R$18" }
  }
]

Lembre-se: retorne SOMENTE JSON válido, sem blocos de código markdown, sem explicações."#;
