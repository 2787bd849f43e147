//! PDF text layers.
//!
//! Every document is read twice: once with a layout-preserving backend
//! (spacing inside names and descriptions survives) and once with a robust
//! backend (tolerates broken fonts, but tends to glue words). The two
//! results become a [`DocumentSources`] for the extraction engine.

mod extractor;

pub use extractor::{LopdfBackend, PdfExtractBackend};

use std::path::Path;

use tracing::{debug, warn};

use crate::error::{PdfError, ValeError};
use crate::extract::DocumentSources;
use crate::models::PdfConfig;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// A PDF text extraction backend.
pub trait TextBackend: Send + Sync {
    /// Backend name as used in configuration.
    fn name(&self) -> &'static str;

    /// Extract the text of every page.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

/// Look up a backend by its configuration name.
pub fn backend_by_name(name: &str, config: &PdfConfig) -> Option<Box<dyn TextBackend>> {
    match name {
        PdfExtractBackend::NAME => Some(Box::new(PdfExtractBackend::new(config.decrypt_empty_password))),
        LopdfBackend::NAME => Some(Box::new(LopdfBackend::new(config.decrypt_empty_password))),
        _ => None,
    }
}

/// The pair of backends that produce a document's two text variants.
pub struct TextLayers {
    high_fidelity: Box<dyn TextBackend>,
    robust: Box<dyn TextBackend>,
}

impl TextLayers {
    pub fn new(high_fidelity: Box<dyn TextBackend>, robust: Box<dyn TextBackend>) -> Self {
        Self {
            high_fidelity,
            robust,
        }
    }

    /// Build the backends named in the configuration.
    pub fn from_config(config: &PdfConfig) -> std::result::Result<Self, ValeError> {
        let lookup = |name: &str| {
            backend_by_name(name, config)
                .ok_or_else(|| ValeError::Config(format!("unknown PDF backend: {}", name)))
        };
        Ok(Self::new(
            lookup(&config.high_fidelity_backend)?,
            lookup(&config.robust_backend)?,
        ))
    }

    /// Names of the high-fidelity and robust backends.
    pub fn names(&self) -> (&'static str, &'static str) {
        (self.high_fidelity.name(), self.robust.name())
    }

    /// Run both backends. A failing backend contributes an empty variant;
    /// when neither produces text the document is rejected.
    pub fn extract(&self, data: &[u8]) -> Result<DocumentSources> {
        let sources = DocumentSources::new(
            run_backend(self.high_fidelity.as_ref(), data),
            run_backend(self.robust.as_ref(), data),
        );
        if sources.is_empty() {
            return Err(PdfError::NoText);
        }
        Ok(sources)
    }
}

impl Default for TextLayers {
    fn default() -> Self {
        Self::new(
            Box::new(PdfExtractBackend::default()),
            Box::new(LopdfBackend::default()),
        )
    }
}

fn run_backend(backend: &dyn TextBackend, data: &[u8]) -> String {
    match backend.extract_text(data) {
        Ok(text) => {
            debug!("{} extracted {} chars", backend.name(), text.len());
            text
        }
        Err(e) => {
            warn!("{} failed: {}", backend.name(), e);
            String::new()
        }
    }
}

impl DocumentSources {
    /// Resolve PDF bytes into both text variants with the default backends.
    pub fn from_pdf_bytes(data: &[u8]) -> Result<Self> {
        TextLayers::default().extract(data)
    }

    /// Read a PDF file and resolve it into both text variants.
    pub fn from_pdf_path(path: impl AsRef<Path>) -> std::result::Result<Self, ValeError> {
        let data = std::fs::read(path.as_ref())?;
        Ok(Self::from_pdf_bytes(&data)?)
    }
}
