//! Error types for text extraction

use thiserror::Error;

/// Errors that can occur while extracting text from a document
#[derive(Error, Debug)]
pub enum ExtractError {
    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Path being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// File extension is not a supported document type
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Document type not accepted for this input
    #[error("Wrong file type: expected {expected}, got {actual}")]
    WrongKind {
        /// Accepted kinds
        expected: String,
        /// Kind detected
        actual: String,
    },

    /// PDF parsing failed
    #[error("PDF extraction failed: {0}")]
    Pdf(String),

    /// DOCX parsing failed
    #[error("DOCX extraction failed: {0}")]
    Docx(String),

    /// Document contained no text
    #[error("No text could be extracted from {0}; the file may be empty or a scanned image")]
    NoText(String),

    /// Blocking extraction task failed
    #[error("Extraction task failed: {0}")]
    Task(String),
}
