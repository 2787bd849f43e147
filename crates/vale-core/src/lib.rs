//! Core library for vale and payment-order field extraction.
//!
//! This crate provides:
//! - PDF text layers (layout-preserving and robust backends)
//! - Pattern cascades and per-field normalization
//! - Space repair for concatenated Spanish amount-in-words strings
//! - Vendor-aware folio resolution for payment orders
//! - Record assembly with table-derived overrides

pub mod error;
pub mod extract;
pub mod models;
pub mod pdf;

pub use error::{ExtractionError, PdfError, Result, ValeError};
pub use extract::{
    DocumentSources, ExtractionEngine, ExtractionOrchestrator, FieldCatalog, FieldNormalizer,
    FolioResolver, PatternCascade, TableOverrides, TextRepairer,
};
pub use models::{DocumentIdentity, DocumentKind, FieldValue, Record, ValeConfig};
pub use pdf::{TextBackend, TextLayers};
