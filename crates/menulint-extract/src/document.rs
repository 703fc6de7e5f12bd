//! Document text extraction

use crate::error::ExtractError;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Supported document types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    /// PDF document
    Pdf,
    /// Word document
    Docx,
    /// Plain text
    Text,
}

impl DocumentKind {
    /// Kinds accepted for a menu
    pub const MENU: &'static [DocumentKind] = &[DocumentKind::Pdf, DocumentKind::Text];

    /// Kinds accepted for a reference price sheet
    pub const REFERENCE: &'static [DocumentKind] = &[DocumentKind::Docx, DocumentKind::Text];

    /// Detect the kind from a file extension
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentKind::Pdf),
            "docx" => Ok(DocumentKind::Docx),
            "txt" | "text" => Ok(DocumentKind::Text),
            "" => Err(ExtractError::UnsupportedFormat(format!(
                "{} has no extension",
                path.display()
            ))),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Short name
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Docx => "docx",
            DocumentKind::Text => "txt",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain text pulled from a document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    /// Source document kind
    pub kind: DocumentKind,
    /// Extracted text
    pub text: String,
    /// Number of characters in `text`
    pub char_count: usize,
}

/// Extract text from a document, detecting its kind from the extension
pub fn extract_text(path: impl AsRef<Path>) -> Result<ExtractedText, ExtractError> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)?;

    let text = match kind {
        DocumentKind::Pdf => extract_pdf(path)?,
        DocumentKind::Docx => extract_docx(path)?,
        DocumentKind::Text => std::fs::read_to_string(path).map_err(|e| io_error(path, e))?,
    };

    if text.trim().is_empty() {
        return Err(ExtractError::NoText(path.display().to_string()));
    }

    let char_count = text.chars().count();
    debug!("Extracted {} chars from {} ({})", char_count, path.display(), kind);

    Ok(ExtractedText {
        kind,
        text,
        char_count,
    })
}

/// Extract text, rejecting documents whose kind is not in `accepted`
pub fn extract_expecting(
    path: impl AsRef<Path>,
    accepted: &[DocumentKind],
) -> Result<ExtractedText, ExtractError> {
    let path = path.as_ref();
    let kind = DocumentKind::from_path(path)?;
    if !accepted.contains(&kind) {
        let expected: Vec<&str> = accepted.iter().map(|k| k.as_str()).collect();
        return Err(ExtractError::WrongKind {
            expected: expected.join(" or "),
            actual: kind.to_string(),
        });
    }
    extract_text(path)
}

/// [`extract_expecting`] on the blocking pool
pub async fn extract_file(
    path: impl Into<PathBuf>,
    accepted: &'static [DocumentKind],
) -> Result<ExtractedText, ExtractError> {
    let path = path.into();
    tokio::task::spawn_blocking(move || extract_expecting(&path, accepted))
        .await
        .map_err(|e| ExtractError::Task(e.to_string()))?
}

fn extract_pdf(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|e| io_error(path, e))?;

    // pdf_extract can panic on malformed PDFs
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    }));

    match result {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Pdf(e.to_string())),
        Err(_) => Err(ExtractError::Pdf("malformed PDF".to_string())),
    }
}

fn extract_docx(path: &Path) -> Result<String, ExtractError> {
    if !path.exists() {
        return Err(io_error(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        ));
    }
    docx_lite::extract_text(path).map_err(|e| ExtractError::Docx(e.to_string()))
}

fn io_error(path: &Path, source: std::io::Error) -> ExtractError {
    ExtractError::Io {
        path: path.display().to_string(),
        source,
    }
}
