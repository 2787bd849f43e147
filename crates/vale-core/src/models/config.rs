//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, ValeError};

/// Main configuration for the vale pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValeConfig {
    /// Field extraction configuration.
    pub extraction: ExtractionConfig,

    /// PDF text-layer configuration.
    pub pdf: PdfConfig,
}

/// Field extraction configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Iteration cap for the amount-in-words repair loop.
    pub repair_max_passes: usize,

    /// Query whitespace-sensitive fields against the high-fidelity text first.
    /// When disabled they use the merged text like every other field.
    pub prefer_high_fidelity: bool,

    /// Text shorter than this (in characters) is reported as suspicious.
    pub min_text_length: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            repair_max_passes: 5,
            prefer_high_fidelity: true,
            min_text_length: 20,
        }
    }
}

/// PDF text-layer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Backend used for the high-fidelity text variant.
    pub high_fidelity_backend: String,

    /// Backend used for the robust text variant.
    pub robust_backend: String,

    /// Try an empty password on encrypted documents.
    pub decrypt_empty_password: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            high_fidelity_backend: "pdf-extract".to_string(),
            robust_backend: "lopdf".to_string(),
            decrypt_empty_password: true,
        }
    }
}

impl ValeConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.extraction.repair_max_passes == 0 {
            return Err(ValeError::Config(
                "extraction.repair_max_passes must be at least 1".to_string(),
            ));
        }
        if self.pdf.high_fidelity_backend == self.pdf.robust_backend {
            return Err(ValeError::Config(format!(
                "pdf backends must differ, both are '{}'",
                self.pdf.robust_backend
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = ValeConfig::default();
        assert_eq!(config.extraction.repair_max_passes, 5);
        assert!(config.extraction.prefer_high_fidelity);
        assert_eq!(config.pdf.high_fidelity_backend, "pdf-extract");
        assert_eq!(config.pdf.robust_backend, "lopdf");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: ValeConfig =
            serde_json::from_str(r#"{"extraction": {"repair_max_passes": 3}}"#).unwrap();
        assert_eq!(config.extraction.repair_max_passes, 3);
        assert!(config.extraction.prefer_high_fidelity);
        assert_eq!(config.pdf, PdfConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = ValeConfig::default();
        config.extraction.prefer_high_fidelity = false;
        config.save(&path).unwrap();

        let loaded = ValeConfig::from_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_validate_rejects_zero_passes() {
        let mut config = ValeConfig::default();
        config.extraction.repair_max_passes = 0;
        assert!(matches!(config.validate(), Err(ValeError::Config(_))));
    }
}
