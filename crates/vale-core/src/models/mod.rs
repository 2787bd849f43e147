//! Data models: extracted records and configuration.

pub mod config;
pub mod record;

pub use config::{ExtractionConfig, PdfConfig, ValeConfig};
pub use record::{DocumentIdentity, DocumentKind, FieldValue, Record};
