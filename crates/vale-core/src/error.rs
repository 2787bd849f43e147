//! Error types for the vale-core library.
//!
//! Field extraction itself never fails: a field that cannot be found is
//! `None` in the record. These errors cover the edges around the engine:
//! building rule tables, resolving documents into text, and configuration.

use thiserror::Error;

/// Main error type for the vale library.
#[derive(Error, Debug)]
pub enum ValeError {
    /// PDF text-layer error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Engine construction error.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to resolving a PDF into text.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// A backend failed to extract text.
    #[error("{backend} failed to extract text: {reason}")]
    TextExtraction { backend: &'static str, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Neither backend produced any text.
    #[error("no backend produced text")]
    NoText,
}

/// Errors raised while building extraction rule tables.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// A cascade or repair pattern failed to compile.
    #[error("invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// A field name is not declared in the catalog.
    #[error("unknown field: {0}")]
    UnknownField(String),
}

/// Result type for the vale library.
pub type Result<T> = std::result::Result<T, ValeError>;
