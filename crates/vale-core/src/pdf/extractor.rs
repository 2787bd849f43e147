//! Text backends built on lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{Result, TextBackend};
use crate::error::PdfError;

/// Parse a PDF, decrypting empty-password documents when allowed.
///
/// Returns the document and whether it had to be decrypted.
fn load_document(data: &[u8], decrypt_empty_password: bool) -> Result<(Document, bool)> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let decrypted = doc.is_encrypted();
    if decrypted {
        if !decrypt_empty_password || doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");
    }

    if doc.get_pages().is_empty() {
        return Err(PdfError::NoPages);
    }
    Ok((doc, decrypted))
}

/// Layout-preserving backend (pdf-extract).
#[derive(Debug, Clone)]
pub struct PdfExtractBackend {
    decrypt_empty_password: bool,
}

impl PdfExtractBackend {
    pub const NAME: &'static str = "pdf-extract";

    pub fn new(decrypt_empty_password: bool) -> Self {
        Self {
            decrypt_empty_password,
        }
    }
}

impl Default for PdfExtractBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TextBackend for PdfExtractBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let (mut doc, decrypted) = load_document(data, self.decrypt_empty_password)?;

        // pdf-extract reads raw bytes, so hand it the decrypted document
        let text = if decrypted {
            let mut plain = Vec::new();
            doc.save_to(&mut plain)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            pdf_extract::extract_text_from_mem(&plain)
        } else {
            pdf_extract::extract_text_from_mem(data)
        };

        text.map_err(|e| PdfError::TextExtraction {
            backend: Self::NAME,
            reason: e.to_string(),
        })
    }
}

/// Robust backend (lopdf content-stream text).
#[derive(Debug, Clone)]
pub struct LopdfBackend {
    decrypt_empty_password: bool,
}

impl LopdfBackend {
    pub const NAME: &'static str = "lopdf";

    pub fn new(decrypt_empty_password: bool) -> Self {
        Self {
            decrypt_empty_password,
        }
    }
}

impl Default for LopdfBackend {
    fn default() -> Self {
        Self::new(true)
    }
}

impl TextBackend for LopdfBackend {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let (doc, _) = load_document(data, self.decrypt_empty_password)?;
        let pages: Vec<u32> = doc.get_pages().keys().copied().collect();

        doc.extract_text(&pages).map_err(|e| PdfError::TextExtraction {
            backend: Self::NAME,
            reason: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{Object, Stream, dictionary};

    fn sample_pdf(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
            "Encoding" => "WinAnsiEncoding",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_load_rejects_garbage() {
        assert!(matches!(load_document(b"%PDF-garbage", true), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_load_sample() {
        let (doc, decrypted) = load_document(&sample_pdf("Total: 100.00"), true).unwrap();
        assert!(!decrypted);
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_sample_yields_text_from_some_backend() {
        let data = sample_pdf("Total: 100.00");
        let sources = crate::extract::DocumentSources::from_pdf_bytes(&data).unwrap();
        assert!(sources.merged().contains("100.00"));
    }
}
