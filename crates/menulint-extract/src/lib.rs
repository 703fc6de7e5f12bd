//! menulint Text Extraction
//!
//! Turns a menu or reference document into plain text for the analyzer.
//!
//! # Supported formats
//!
//! - PDF via `pdf-extract`
//! - Word `.docx` via `docx-lite`
//! - Plain `.txt`, read as-is
//!
//! Extraction fails with [`ExtractError::NoText`] when a document yields only
//! whitespace (a scanned menu, for instance), so no empty prompt ever reaches
//! the model.
//!
//! # Example Usage
//!
//! ```no_run
//! use menulint_extract::{extract_expecting, DocumentKind};
//!
//! # fn example() -> Result<(), menulint_extract::ExtractError> {
//! let menu = extract_expecting("cardapio.pdf", DocumentKind::MENU)?;
//! println!("{} chars from {}", menu.char_count, menu.kind);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod document;
mod error;

pub use document::{
    extract_expecting, extract_file, extract_text, DocumentKind, ExtractedText,
};
pub use error::ExtractError;
