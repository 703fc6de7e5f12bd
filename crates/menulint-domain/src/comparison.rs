//! Comparison module - discrepancies between a menu and its reference sheet
//!
//! Item matching across the two documents is done by the model. Nothing here
//! normalizes names or prices; the records carry whatever the model reported.

use crate::finding::Finding;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;

/// Kind of discrepancy found for an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonIssue {
    /// Item present in both, prices differ
    PriceMismatch,

    /// Item in the reference but not on the menu
    MissingInMenu,

    /// Item on the menu but not in the reference
    MissingInReference,
}

impl ComparisonIssue {
    /// Wire label
    pub fn as_str(&self) -> &'static str {
        match self {
            ComparisonIssue::PriceMismatch => "price_mismatch",
            ComparisonIssue::MissingInMenu => "missing_in_menu",
            ComparisonIssue::MissingInReference => "missing_in_reference",
        }
    }

    /// Card title
    pub fn title(&self) -> &'static str {
        match self {
            ComparisonIssue::PriceMismatch => "Inconsistência de preço",
            ComparisonIssue::MissingInMenu => "Item faltando no cardápio",
            ComparisonIssue::MissingInReference => "Item extra no cardápio (não na referência)",
        }
    }
}

impl fmt::Display for ComparisonIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prices and names reported for a discrepancy
///
/// Which fields are present depends on the issue; none is guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonDetails {
    /// Price as printed on the menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_price: Option<String>,

    /// Price in the reference sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_price: Option<String>,

    /// Item name as printed on the menu
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_name: Option<String>,

    /// Item name in the reference sheet
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_name: Option<String>,
}

impl ComparisonDetails {
    /// True when no field was reported
    pub fn is_empty(&self) -> bool {
        self.menu_price.is_none()
            && self.reference_price.is_none()
            && self.menu_name.is_none()
            && self.reference_name.is_none()
    }
}

/// One discrepancy between menu and reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Canonical item name
    pub item: String,

    /// Kind of discrepancy
    pub issue: ComparisonIssue,

    /// Reported prices and names
    #[serde(default)]
    pub details: ComparisonDetails,
}

impl Finding for ComparisonResult {
    const KIND: &'static str = "comparison";

    fn response_schema() -> Value {
        json!({
            "type": "ARRAY",
            "items": {
                "type": "OBJECT",
                "properties": {
                    "item": {
                        "type": "STRING",
                        "description": "Nome do item comparado."
                    },
                    "issue": {
                        "type": "STRING",
                        "enum": ["price_mismatch", "missing_in_menu", "missing_in_reference"],
                        "description": "Tipo de divergência encontrada."
                    },
                    "details": {
                        "type": "OBJECT",
                        "properties": {
                            "menuPrice": { "type": "STRING", "description": "Preço no cardápio." },
                            "referencePrice": { "type": "STRING", "description": "Preço na referência." },
                            "menuName": { "type": "STRING", "description": "Nome do item no cardápio." },
                            "referenceName": { "type": "STRING", "description": "Nome do item na referência." }
                        }
                    }
                },
                "required": ["item", "issue"]
            }
        })
    }

    fn validate(&self) -> Result<(), String> {
        if self.item.trim().is_empty() {
            return Err("item is empty".to_string());
        }
        Ok(())
    }
}
